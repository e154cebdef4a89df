//! Batch recompute planning
//!
//! Every production record's `(delivery_date, priority)` pair is derived
//! from its parent order's issuance date and the current date. The pair is
//! refreshed for the whole table at once - after each record registration
//! and on demand - so no record's priority goes stale. Planning is pure:
//! callers persist the resulting updates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::priority::{classify_priority, compute_delivery, PriorityBand};

/// One production record together with its parent order's issuance date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    pub record_id: Uuid,
    /// Absent when the order was imported without an issuance date.
    pub issued_on: Option<NaiveDate>,
}

/// The freshly derived pair for one record. Both fields are always written
/// together; there is no operation that updates one without the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleUpdate {
    pub record_id: Uuid,
    pub delivery_date: NaiveDate,
    pub band: PriorityBand,
}

/// Outcome of planning a full recompute pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecomputePlan {
    pub updates: Vec<ScheduleUpdate>,
    /// Records whose order has no issuance date. They are surfaced rather
    /// than failing the pass, so one malformed order never blocks the rest.
    pub skipped: Vec<Uuid>,
}

impl RecomputePlan {
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.skipped.is_empty()
    }
}

/// Plan a recompute of every record's `(delivery_date, priority)` pair.
///
/// Deterministic and idempotent for a fixed `(inputs, today, buffer_days)`:
/// planning twice yields identical updates.
pub fn plan_recompute(
    inputs: &[ScheduleInput],
    today: NaiveDate,
    buffer_days: i64,
) -> RecomputePlan {
    let mut plan = RecomputePlan::default();

    for input in inputs {
        match input.issued_on {
            Some(issued_on) => {
                let delivery_date = compute_delivery(issued_on, buffer_days);
                let band = classify_priority(delivery_date, today, buffer_days);
                plan.updates.push(ScheduleUpdate {
                    record_id: input.record_id,
                    delivery_date,
                    band,
                });
            }
            None => plan.skipped.push(input.record_id),
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(id: u128, issued_on: Option<NaiveDate>) -> ScheduleInput {
        ScheduleInput {
            record_id: Uuid::from_u128(id),
            issued_on,
        }
    }

    #[test]
    fn test_empty_input_plans_nothing() {
        let plan = plan_recompute(&[], date(2024, 1, 15), 30);
        assert!(plan.is_empty());
    }

    #[test]
    fn test_plans_pair_for_each_dated_record() {
        let inputs = vec![
            input(1, Some(date(2024, 1, 1))),
            input(2, Some(date(2024, 1, 8))),
        ];
        let plan = plan_recompute(&inputs, date(2024, 1, 15), 30);

        assert_eq!(plan.updates.len(), 2);
        assert!(plan.skipped.is_empty());
        assert_eq!(plan.updates[0].delivery_date, date(2024, 2, 12));
        assert_eq!(plan.updates[1].delivery_date, date(2024, 2, 19));
    }

    #[test]
    fn test_missing_issuance_is_skipped_not_fatal() {
        let inputs = vec![
            input(1, Some(date(2024, 1, 1))),
            input(2, None),
            input(3, Some(date(2024, 1, 2))),
        ];
        let plan = plan_recompute(&inputs, date(2024, 1, 15), 30);

        assert_eq!(plan.updates.len(), 2);
        assert_eq!(plan.skipped, vec![Uuid::from_u128(2)]);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let inputs = vec![
            input(1, Some(date(2024, 1, 1))),
            input(2, None),
            input(3, Some(date(2024, 2, 20))),
        ];
        let today = date(2024, 2, 1);

        let first = plan_recompute(&inputs, today, 30);
        let second = plan_recompute(&inputs, today, 30);

        assert_eq!(first.updates, second.updates);
        assert_eq!(first.skipped, second.skipped);
    }

    #[test]
    fn test_bands_reflect_each_record_age() {
        // An order issued today is comfortably ahead; one issued long ago
        // is overdue
        let today = date(2024, 6, 3);
        let inputs = vec![
            input(1, Some(today)),
            input(2, Some(date(2024, 1, 2))),
        ];
        let plan = plan_recompute(&inputs, today, 30);

        assert_eq!(plan.updates[0].band, PriorityBand::Ahead);
        assert_eq!(plan.updates[1].band, PriorityBand::Overdue);
    }
}

//! Priority banding for production records
//!
//! A record's urgency is derived from where "today" sits between the
//! order's issuance date and its computed delivery date. Four checkpoints
//! are stepped backward from the delivery date; the first checkpoint on or
//! after today decides the band. The checks are evaluated most-comfortable
//! first, so overlapping windows resolve deterministically.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::advance_business_days;

/// Delivery-priority band, ordered most severe to least severe.
///
/// The variant order doubles as the sort order: ascending sort puts
/// overdue records first. Severity levels are stable integers persisted
/// to the database; display colors are presentation only and never stored.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PriorityBand {
    /// Past the delivery date.
    Overdue,
    /// Inside the last third of the buffer window.
    Urgent,
    /// Inside the middle third of the buffer window.
    Caution,
    /// Inside the first third of the buffer window.
    OnTrack,
    /// On or before the start of the buffer window.
    Ahead,
}

impl PriorityBand {
    /// Stable severity level, 1 (most severe) through 5 (least severe).
    pub fn severity(self) -> i16 {
        match self {
            PriorityBand::Overdue => 1,
            PriorityBand::Urgent => 2,
            PriorityBand::Caution => 3,
            PriorityBand::OnTrack => 4,
            PriorityBand::Ahead => 5,
        }
    }

    /// Reverse of [`severity`](Self::severity).
    pub fn from_severity(level: i16) -> Option<Self> {
        match level {
            1 => Some(PriorityBand::Overdue),
            2 => Some(PriorityBand::Urgent),
            3 => Some(PriorityBand::Caution),
            4 => Some(PriorityBand::OnTrack),
            5 => Some(PriorityBand::Ahead),
            _ => None,
        }
    }

    /// Display color for tracking tables.
    pub fn color(self) -> &'static str {
        match self {
            PriorityBand::Overdue => "black",
            PriorityBand::Urgent => "red",
            PriorityBand::Caution => "yellow",
            PriorityBand::OnTrack => "green",
            PriorityBand::Ahead => "blue",
        }
    }
}

/// Compute the target delivery date: `buffer_days` business days after the
/// order's issuance date.
pub fn compute_delivery(issued_on: NaiveDate, buffer_days: i64) -> NaiveDate {
    advance_business_days(issued_on, buffer_days)
}

/// Classify `today` into a priority band relative to `delivery_date`.
///
/// Checkpoints step backward from the delivery date by the full buffer,
/// then by 66% and 33% of it. All boundaries are inclusive: a record is
/// still [`PriorityBand::Urgent`] on the delivery date itself and only
/// becomes [`PriorityBand::Overdue`] the day after.
pub fn classify_priority(
    delivery_date: NaiveDate,
    today: NaiveDate,
    buffer_days: i64,
) -> PriorityBand {
    let full = advance_business_days(delivery_date, -buffer_days);
    let two_thirds = advance_business_days(delivery_date, -buffer_fraction(buffer_days, 0.66));
    let one_third = advance_business_days(delivery_date, -buffer_fraction(buffer_days, 0.33));

    if today <= full {
        PriorityBand::Ahead
    } else if today <= two_thirds {
        PriorityBand::OnTrack
    } else if today <= one_third {
        PriorityBand::Caution
    } else if today <= delivery_date {
        PriorityBand::Urgent
    } else {
        PriorityBand::Overdue
    }
}

// Truncation toward zero is load-bearing: a buffer of 30 yields offsets of
// 19 and 9 business days, not 20 and 10. The 0.66/0.33 constants are the
// contract, not approximations of exact thirds.
fn buffer_fraction(buffer_days: i64, fraction: f64) -> i64 {
    (buffer_days as f64 * fraction) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const BUFFER: i64 = 30;

    #[test]
    fn test_buffer_fraction_truncates_toward_zero() {
        assert_eq!(buffer_fraction(30, 0.66), 19);
        assert_eq!(buffer_fraction(30, 0.33), 9);
        assert_eq!(buffer_fraction(10, 0.66), 6);
        assert_eq!(buffer_fraction(10, 0.33), 3);
    }

    #[test]
    fn test_delivery_fixed_point() {
        // Locked regression value: issued on Monday 2024-01-01 with the
        // standard 30-day buffer delivers on Monday 2024-02-12
        assert_eq!(compute_delivery(date(2024, 1, 1), BUFFER), date(2024, 2, 12));
    }

    #[test]
    fn test_on_delivery_date_is_urgent_not_overdue() {
        let delivery = compute_delivery(date(2024, 1, 1), BUFFER);
        assert_eq!(
            classify_priority(delivery, delivery, BUFFER),
            PriorityBand::Urgent
        );
    }

    #[test]
    fn test_one_business_day_past_delivery_is_overdue() {
        let delivery = compute_delivery(date(2024, 1, 1), BUFFER);
        let late = advance_business_days(delivery, 1);
        assert_eq!(
            classify_priority(delivery, late, BUFFER),
            PriorityBand::Overdue
        );
    }

    #[test]
    fn test_issuance_day_is_ahead() {
        let issued = date(2024, 1, 1);
        let delivery = compute_delivery(issued, BUFFER);
        // delivery - 30 business days walks back to the issuance date
        assert_eq!(
            classify_priority(delivery, issued, BUFFER),
            PriorityBand::Ahead
        );
    }

    #[test]
    fn test_band_windows_across_the_buffer() {
        let delivery = compute_delivery(date(2024, 1, 1), BUFFER);

        // Checkpoints for buffer 30: delivery - 30, - 19 and - 9 business days
        let t_full = advance_business_days(delivery, -30);
        let t_two_thirds = advance_business_days(delivery, -19);
        let t_one_third = advance_business_days(delivery, -9);

        assert_eq!(
            classify_priority(delivery, t_full, BUFFER),
            PriorityBand::Ahead
        );
        assert_eq!(
            classify_priority(delivery, advance_business_days(t_full, 1), BUFFER),
            PriorityBand::OnTrack
        );
        assert_eq!(
            classify_priority(delivery, t_two_thirds, BUFFER),
            PriorityBand::OnTrack
        );
        assert_eq!(
            classify_priority(delivery, advance_business_days(t_two_thirds, 1), BUFFER),
            PriorityBand::Caution
        );
        assert_eq!(
            classify_priority(delivery, t_one_third, BUFFER),
            PriorityBand::Caution
        );
        assert_eq!(
            classify_priority(delivery, advance_business_days(t_one_third, 1), BUFFER),
            PriorityBand::Urgent
        );
    }

    #[test]
    fn test_severity_never_increases_as_today_advances() {
        let delivery = compute_delivery(date(2024, 1, 1), BUFFER);
        let mut today = date(2023, 12, 1);
        let end = date(2024, 3, 15);

        let mut last = classify_priority(delivery, today, BUFFER).severity();
        while today < end {
            today = today.succ_opt().unwrap();
            let severity = classify_priority(delivery, today, BUFFER).severity();
            assert!(
                severity <= last,
                "severity rose from {} to {} at {}",
                last,
                severity,
                today
            );
            last = severity;
        }
    }

    #[test]
    fn test_band_ordering_matches_severity() {
        let mut bands = vec![
            PriorityBand::Ahead,
            PriorityBand::Overdue,
            PriorityBand::OnTrack,
            PriorityBand::Urgent,
            PriorityBand::Caution,
        ];
        bands.sort();
        let severities: Vec<i16> = bands.iter().map(|b| b.severity()).collect();
        assert_eq!(severities, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_severity_round_trip() {
        for level in 1..=5 {
            let band = PriorityBand::from_severity(level).unwrap();
            assert_eq!(band.severity(), level);
        }
        assert_eq!(PriorityBand::from_severity(0), None);
        assert_eq!(PriorityBand::from_severity(6), None);
    }

    #[test]
    fn test_color_labels() {
        assert_eq!(PriorityBand::Overdue.color(), "black");
        assert_eq!(PriorityBand::Urgent.color(), "red");
        assert_eq!(PriorityBand::Caution.color(), "yellow");
        assert_eq!(PriorityBand::OnTrack.color(), "green");
        assert_eq!(PriorityBand::Ahead.color(), "blue");
    }
}

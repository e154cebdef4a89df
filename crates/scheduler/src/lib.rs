//! Delivery scheduling core
//!
//! Pure calendar arithmetic for the production tracker:
//! - Business-day stepping (weekends excluded, no holiday calendar)
//! - Delivery-date computation from an order's issuance date
//! - Five-band priority classification against a sliding buffer window
//! - Batch recompute planning over all production records
//!
//! Nothing in this crate touches the clock, the database, or the network.
//! Callers supply `today` explicitly, which keeps every operation
//! deterministic and directly testable.

pub mod calendar;
pub mod priority;
pub mod recompute;

pub use calendar::advance_business_days;
pub use priority::{classify_priority, compute_delivery, PriorityBand};
pub use recompute::{plan_recompute, RecomputePlan, ScheduleInput, ScheduleUpdate};

/// Standard production lead time in business days.
pub const DEFAULT_BUFFER_DAYS: i64 = 30;

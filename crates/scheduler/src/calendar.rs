//! Business-day calendar arithmetic
//!
//! A business day is Monday through Friday. Holidays are not modeled:
//! the lead-time buffer is deliberately calendar-only.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Whether `date` falls on a weekday (Monday-Friday).
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Advance `start` by `n` business days.
///
/// Steps one calendar day at a time in the direction of `n`'s sign and
/// counts a step only when the resulting day is a weekday, until `|n|`
/// business days have been counted. `n = 0` returns `start` unchanged,
/// even when `start` itself is a weekend day.
pub fn advance_business_days(start: NaiveDate, n: i64) -> NaiveDate {
    let step = if n >= 0 {
        Duration::days(1)
    } else {
        Duration::days(-1)
    };
    let target = n.abs();

    let mut date = start;
    let mut counted = 0;
    while counted < target {
        date += step;
        if is_business_day(date) {
            counted += 1;
        }
    }
    date
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_zero_days_is_identity() {
        // Holds for weekdays and weekend days alike
        let monday = date(2024, 1, 1);
        let saturday = date(2024, 1, 6);
        assert_eq!(advance_business_days(monday, 0), monday);
        assert_eq!(advance_business_days(saturday, 0), saturday);
    }

    #[test]
    fn test_friday_plus_one_is_monday() {
        let friday = date(2024, 1, 5);
        assert_eq!(advance_business_days(friday, 1), date(2024, 1, 8));
    }

    #[test]
    fn test_monday_minus_one_is_friday() {
        let monday = date(2024, 1, 8);
        assert_eq!(advance_business_days(monday, -1), date(2024, 1, 5));
    }

    #[test]
    fn test_full_week_spans_seven_calendar_days() {
        // 5 business days from a Monday lands on the next Monday
        let monday = date(2024, 1, 1);
        assert_eq!(advance_business_days(monday, 5), date(2024, 1, 8));
    }

    #[test]
    fn test_weekend_start_counts_from_next_weekday() {
        // Saturday + 1 business day = Monday (the Saturday itself never counts)
        let saturday = date(2024, 1, 6);
        assert_eq!(advance_business_days(saturday, 1), date(2024, 1, 8));
    }

    #[test]
    fn test_forward_backward_symmetry_from_business_day() {
        let start = date(2024, 3, 6); // a Wednesday
        for n in 0..25 {
            let there = advance_business_days(start, n);
            assert_eq!(advance_business_days(there, -n), start, "n = {}", n);
        }
    }

    #[test]
    fn test_symmetry_does_not_hold_from_weekend() {
        // Walking forward from a Sunday and back again lands on Friday,
        // not the original Sunday
        let sunday = date(2024, 1, 7);
        let forward = advance_business_days(sunday, 3);
        assert_eq!(advance_business_days(forward, -3), date(2024, 1, 5));
    }

    #[test]
    fn test_thirty_business_days_from_new_year_2024() {
        // Fixed point: 2024-01-01 is a Monday; 30 weekdays later is
        // 2024-02-12, skipping 12 weekend days across the span
        let issued = date(2024, 1, 1);
        assert_eq!(advance_business_days(issued, 30), date(2024, 2, 12));
    }

    #[test]
    fn test_is_business_day() {
        assert!(is_business_day(date(2024, 1, 1))); // Monday
        assert!(is_business_day(date(2024, 1, 5))); // Friday
        assert!(!is_business_day(date(2024, 1, 6))); // Saturday
        assert!(!is_business_day(date(2024, 1, 7))); // Sunday
    }
}

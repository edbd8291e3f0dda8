//! Parking tariff computation.
//!
//! The charge for a request is a flat hourly rate applied to the booked
//! window, with partial hours rounded up: a stay of 1h30m01s bills as two
//! hours. The rate is fixed; there is no per-slot or per-vehicle pricing.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Currency units charged per started hour.
pub const RATE_PER_HOUR: i64 = 1000;

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Number of billable hours for a booking window, rounded up.
///
/// Fails with `Validation` unless `exit > entry`.
pub fn billable_hours(entry: Timestamp, exit: Timestamp) -> Result<i64, CoreError> {
    if exit <= entry {
        return Err(CoreError::Validation(
            "Exit time must be after entry time".into(),
        ));
    }
    let millis = (exit - entry).num_milliseconds();
    // `millis` is strictly positive here (guarded above), so ceiling
    // division is the standard `(a + b - 1) / b` form. Avoids the
    // unstable `int_roundings` `i64::div_ceil`.
    Ok((millis + MILLIS_PER_HOUR - 1) / MILLIS_PER_HOUR)
}

/// Total amount due for a booking window.
pub fn compute_amount(entry: Timestamp, exit: Timestamp) -> Result<i64, CoreError> {
    Ok(billable_hours(entry, exit)? * RATE_PER_HOUR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_utc_instant;

    fn at(s: &str) -> Timestamp {
        parse_utc_instant(s).unwrap()
    }

    #[test]
    fn exact_hour_bills_one_hour() {
        let amount =
            compute_amount(at("2025-05-20T14:00:00"), at("2025-05-20T15:00:00")).unwrap();
        assert_eq!(amount, 1000);
    }

    #[test]
    fn partial_hour_rounds_up() {
        // 1h30m01s -> 2 billable hours.
        let amount =
            compute_amount(at("2025-05-20T14:00:00"), at("2025-05-20T15:30:01")).unwrap();
        assert_eq!(amount, 2000);
    }

    #[test]
    fn one_second_bills_one_hour() {
        let amount =
            compute_amount(at("2025-05-20T14:00:00"), at("2025-05-20T14:00:01")).unwrap();
        assert_eq!(amount, 1000);
    }

    #[test]
    fn multi_day_window() {
        // 48h exactly.
        let hours = billable_hours(at("2025-05-20T00:00:00"), at("2025-05-22T00:00:00")).unwrap();
        assert_eq!(hours, 48);
    }

    #[test]
    fn equal_times_are_rejected() {
        let err =
            compute_amount(at("2025-05-20T14:00:00"), at("2025-05-20T14:00:00")).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn reversed_times_are_rejected() {
        let err =
            compute_amount(at("2025-05-20T15:00:00"), at("2025-05-20T14:00:00")).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}

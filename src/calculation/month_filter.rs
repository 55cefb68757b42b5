//! Month selection for tour records.
//!
//! The filter is fail-soft: a bad selector yields an empty selection and a
//! `warn` log line, never an error. Use [`BillingMonth::new`] directly when a
//! typed error is wanted.

use tracing::warn;

use crate::models::{BillingMonth, TourRecord};

/// Returns every tour dated within the given calendar month, in input order.
///
/// An out-of-range month (anything outside `1..=12`) selects nothing.
///
/// # Examples
///
/// ```
/// use gls_pricing::calculation::select_month;
/// use gls_pricing::models::TourRecord;
/// use chrono::NaiveDate;
///
/// let tours = vec![
///     TourRecord::new("a", "d", "GLS-001", NaiveDate::from_ymd_opt(2023, 1, 31).unwrap()),
///     TourRecord::new("b", "d", "GLS-001", NaiveDate::from_ymd_opt(2023, 2, 1).unwrap()),
/// ];
///
/// let january = select_month(&tours, 2023, 1);
/// assert_eq!(january.len(), 1);
/// assert_eq!(january[0].id, "a");
///
/// assert!(select_month(&tours, 2023, 13).is_empty());
/// ```
pub fn select_month(records: &[TourRecord], year: i32, month: i32) -> Vec<TourRecord> {
    match BillingMonth::new(year, month) {
        Ok(billing_month) => filter_by_month(records, &billing_month),
        Err(e) => {
            warn!(year, month, error = %e, "Rejected month selector");
            Vec::new()
        }
    }
}

/// Like [`select_month`], but takes the raw year and month strings of a
/// request and selects nothing when either does not parse as an integer.
pub fn select_month_from_params(records: &[TourRecord], year: &str, month: &str) -> Vec<TourRecord> {
    match BillingMonth::parse(year, month) {
        Ok(billing_month) => filter_by_month(records, &billing_month),
        Err(e) => {
            warn!(year, month, error = %e, "Rejected month selector");
            Vec::new()
        }
    }
}

/// Returns the tours dated within `month`, in input order.
pub fn filter_by_month(records: &[TourRecord], month: &BillingMonth) -> Vec<TourRecord> {
    records
        .iter()
        .filter(|tour| month.contains_date(tour.date))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn make_tours(dates: &[&str]) -> Vec<TourRecord> {
        dates
            .iter()
            .enumerate()
            .map(|(i, d)| TourRecord::new(format!("gls_{:03}", i), "driver_01", "GLS-001", make_date(d)))
            .collect()
    }

    fn ids(tours: &[TourRecord]) -> Vec<&str> {
        tours.iter().map(|t| t.id.as_str()).collect()
    }

    // ==========================================================================
    // MF-001: only in-month records are returned, input order preserved
    // ==========================================================================
    #[test]
    fn test_mf_001_selects_only_month_in_order() {
        let tours = make_tours(&["2023-01-20", "2022-12-31", "2023-01-01", "2023-02-01", "2023-01-31"]);

        let selected = select_month(&tours, 2023, 1);

        assert_eq!(ids(&selected), vec!["gls_000", "gls_002", "gls_004"]);
    }

    // ==========================================================================
    // MF-002: February of a leap year includes the 29th
    // ==========================================================================
    #[test]
    fn test_mf_002_leap_february() {
        let tours = make_tours(&["2024-02-28", "2024-02-29", "2024-03-01"]);

        let selected = select_month(&tours, 2024, 2);

        assert_eq!(ids(&selected), vec!["gls_000", "gls_001"]);
    }

    // ==========================================================================
    // MF-003: February of a non-leap year stops at the 28th
    // ==========================================================================
    #[test]
    fn test_mf_003_non_leap_february() {
        let tours = make_tours(&["2023-02-28", "2023-03-01"]);

        let selected = select_month(&tours, 2023, 2);

        assert_eq!(ids(&selected), vec!["gls_000"]);
    }

    // ==========================================================================
    // MF-004: invalid months select nothing
    // ==========================================================================
    #[test]
    fn test_mf_004_invalid_months_are_empty() {
        let tours = make_tours(&["2023-01-15", "2023-12-15"]);

        assert!(select_month(&tours, 2023, 13).is_empty());
        assert!(select_month(&tours, 2023, 0).is_empty());
        assert!(select_month(&tours, 2023, -1).is_empty());
    }

    #[test]
    fn test_december_boundary() {
        let tours = make_tours(&["2023-12-31", "2024-01-01"]);

        assert_eq!(ids(&select_month(&tours, 2023, 12)), vec!["gls_000"]);
        assert_eq!(ids(&select_month(&tours, 2024, 1)), vec!["gls_001"]);
    }

    #[test]
    fn test_params_variant_parses_integers() {
        let tours = make_tours(&["2023-01-15", "2023-02-15"]);

        assert_eq!(ids(&select_month_from_params(&tours, "2023", "2")), vec!["gls_001"]);
        assert_eq!(ids(&select_month_from_params(&tours, " 2023 ", "01")), vec!["gls_000"]);
    }

    #[test]
    fn test_params_variant_non_integer_is_empty() {
        let tours = make_tours(&["2023-01-15"]);

        assert!(select_month_from_params(&tours, "2023", "jan").is_empty());
        assert!(select_month_from_params(&tours, "", "1").is_empty());
        assert!(select_month_from_params(&tours, "2023", "1.5").is_empty());
        assert!(select_month_from_params(&tours, "2023", "13").is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(select_month(&[], 2023, 1).is_empty());
    }

    #[test]
    fn test_idempotent() {
        let tours = make_tours(&["2023-01-20", "2023-02-01"]);
        assert_eq!(select_month(&tours, 2023, 1), select_month(&tours, 2023, 1));
    }
}

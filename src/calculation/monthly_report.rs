//! Monthly report assembly.

use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::RateConfig;
use crate::error::EngineResult;
use crate::models::{AuditTrace, BillingMonth, MonthlyReport, TourRecord};

use super::data_checks::check_tours;
use super::month_filter::filter_by_month;
use super::total_price::calculate_total_price;

/// Selects one month of tours, prices it, and wraps the result in a report.
///
/// Unlike [`select_month`](super::select_month), an invalid month is an
/// error here: a report is an explicit request, not a display filter.
/// Suspicious data is priced as-is and listed in the audit trace warnings.
///
/// # Errors
///
/// Returns [`EngineError::InvalidMonthSelector`](crate::error::EngineError::InvalidMonthSelector)
/// if `month` is outside `1..=12`.
///
/// # Examples
///
/// ```
/// use gls_pricing::calculation::build_monthly_report;
/// use gls_pricing::config::RateConfig;
/// use gls_pricing::models::TourRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let mut tour = TourRecord::new("t1", "d", "GLS-001", NaiveDate::from_ymd_opt(2023, 1, 5).unwrap());
/// tour.packages_delivered = 240;
///
/// let report = build_monthly_report(&[tour], 2023, 1, &RateConfig::gls_default()).unwrap();
///
/// assert_eq!(report.tour_count, 1);
/// assert_eq!(report.prices.total_price, Decimal::from_str("760.80").unwrap());
/// assert!(build_monthly_report(&[], 2023, 13, &RateConfig::gls_default()).is_err());
/// ```
pub fn build_monthly_report(
    tours: &[TourRecord],
    year: i32,
    month: i32,
    rates: &RateConfig,
) -> EngineResult<MonthlyReport> {
    let report_id = Uuid::new_v4();
    let billing_month = BillingMonth::new(year, month)?;

    let start_time = Instant::now();
    let selected = filter_by_month(tours, &billing_month);
    let totals = calculate_total_price(&selected, rates, 1);
    let warnings = check_tours(&selected);
    let duration_us = start_time.elapsed().as_micros() as u64;

    if !warnings.is_empty() {
        warn!(
            report_id = %report_id,
            month = %billing_month,
            warning_count = warnings.len(),
            "Priced tours with suspicious data"
        );
    }
    info!(
        report_id = %report_id,
        month = %billing_month,
        tour_count = selected.len(),
        total_price = %totals.prices.total_price,
        duration_us,
        "Monthly report built"
    );

    Ok(MonthlyReport {
        report_id,
        generated_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        month: billing_month,
        tour_count: selected.len(),
        prices: totals.prices,
        audit_trace: AuditTrace {
            steps: totals.audit_steps,
            warnings,
            duration_us,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{NEGATIVE_COUNT, NON_CONTIGUOUS_SHD};
    use crate::error::EngineError;
    use crate::models::ShdEntry;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn make_tour(id: &str, date: &str, packages: i64) -> TourRecord {
        let mut tour = TourRecord::new(id, "driver_01", "GLS-001", make_date(date));
        tour.packages_delivered = packages;
        tour
    }

    #[test]
    fn test_report_prices_only_selected_month() {
        let tours = vec![
            make_tour("gls_001", "2023-01-05", 95),
            make_tour("gls_002", "2023-01-20", 145),
            make_tour("gls_003", "2023-02-01", 18500),
        ];

        let report = build_monthly_report(&tours, 2023, 1, &RateConfig::gls_default()).unwrap();

        assert_eq!(report.tour_count, 2);
        assert_eq!(report.month.to_string(), "2023-01");
        assert_eq!(report.prices.delivered_price, dec("760.80"));
        assert_eq!(report.audit_trace.steps.len(), 4);
        assert!(report.audit_trace.warnings.is_empty());
        assert_eq!(report.engine_version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_invalid_month_is_an_error() {
        let result = build_monthly_report(&[], 2023, 0, &RateConfig::gls_default());

        match result {
            Err(EngineError::InvalidMonthSelector { year, month }) => {
                assert_eq!(year, "2023");
                assert_eq!(month, "0");
            }
            other => panic!("Expected InvalidMonthSelector, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_month_is_zero_report() {
        let report = build_monthly_report(&[], 2023, 6, &RateConfig::gls_default()).unwrap();
        assert_eq!(report.tour_count, 0);
        assert!(report.prices.total_price.is_zero());
    }

    #[test]
    fn test_suspicious_data_is_priced_and_flagged() {
        let mut negative = make_tour("gls_001", "2023-01-05", -5);
        negative.pickup_points = 10;
        let mut gapped = make_tour("gls_002", "2023-01-06", 100);
        gapped.shd_entries = vec![ShdEntry { position: 2, value: 1 }];

        let report =
            build_monthly_report(&[negative, gapped], 2023, 1, &RateConfig::gls_default()).unwrap();

        // 95 × 3.17 + 10 × 1.52 + 1 × 3.17
        assert_eq!(report.prices.total_price, dec("319.52"));
        let codes: Vec<&str> = report
            .audit_trace
            .warnings
            .iter()
            .map(|w| w.code.as_str())
            .collect();
        assert_eq!(codes, vec![NEGATIVE_COUNT, NON_CONTIGUOUS_SHD]);
    }

    #[test]
    fn test_each_report_gets_fresh_id() {
        let rates = RateConfig::gls_default();
        let first = build_monthly_report(&[], 2023, 1, &rates).unwrap();
        let second = build_monthly_report(&[], 2023, 1, &rates).unwrap();
        assert_ne!(first.report_id, second.report_id);
        assert_eq!(first.prices, second.prices);
    }
}

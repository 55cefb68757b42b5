//! SHD entry pricing.
//!
//! Within each tour, entries are taken in position order and priced by rank:
//! the first at 3.17 per unit, the second at 0.63, and every later one at 0.32.
//! Ranking restarts for every tour. The sum over all tours is rounded once.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::RateConfig;
use crate::models::{AuditStep, TourRecord};

/// The result of pricing SHD entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShdPriceResult {
    /// Number of entries priced.
    pub entry_count: usize,
    /// Units priced at the first-entry rate.
    pub first_units: Decimal,
    /// Units priced at the second-entry rate.
    pub second_units: Decimal,
    /// Units priced at the subsequent-entry rate.
    pub subsequent_units: Decimal,
    /// The rounded price.
    pub price: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Prices the SHD entries of a set of tours.
///
/// Entries are ranked by ascending position, so gaps in the positions do not
/// change the price: positions `[1, 3]` are priced as first and second.
///
/// # Examples
///
/// ```
/// use gls_pricing::calculation::calculate_shd_price;
/// use gls_pricing::config::RateConfig;
/// use gls_pricing::models::TourRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let mut tour = TourRecord::new("t1", "d", "GLS-001", NaiveDate::from_ymd_opt(2023, 1, 5).unwrap());
/// tour.add_shd_entry(10);
/// tour.add_shd_entry(5);
/// tour.add_shd_entry(3);
///
/// let result = calculate_shd_price(&[tour], &RateConfig::gls_default(), 1);
///
/// // 10 × 3.17 + 5 × 0.63 + 3 × 0.32
/// assert_eq!(result.price, Decimal::from_str("35.81").unwrap());
/// ```
pub fn calculate_shd_price(
    records: &[TourRecord],
    rates: &RateConfig,
    step_number: u32,
) -> ShdPriceResult {
    let shd = &rates.shd;
    let mut entry_count = 0;
    let mut units = [Decimal::ZERO; 3];
    let mut amount = Decimal::ZERO;

    for tour in records {
        for (index, entry) in tour.shd_entries_by_position().into_iter().enumerate() {
            let value = Decimal::from(entry.value);
            amount += value * shd.unit_price(index);
            units[index.min(2)] += value;
            entry_count += 1;
        }
    }

    let price = rates.round(amount);
    let [first_units, second_units, subsequent_units] = units;

    let audit_step = AuditStep {
        step_number,
        rule_id: "shd_entries".to_string(),
        rule_name: "SHD Entries".to_string(),
        input: serde_json::json!({
            "tour_count": records.len(),
            "entry_count": entry_count,
            "first_rate": shd.first.normalize().to_string(),
            "second_rate": shd.second.normalize().to_string(),
            "subsequent_rate": shd.subsequent.normalize().to_string()
        }),
        output: serde_json::json!({
            "first_units": first_units.to_string(),
            "second_units": second_units.to_string(),
            "subsequent_units": subsequent_units.to_string(),
            "price": price.to_string()
        }),
        reasoning: format!(
            "{} entries over {} tours: {} × {} + {} × {} + {} × {} = {}",
            entry_count,
            records.len(),
            first_units,
            shd.first.normalize(),
            second_units,
            shd.second.normalize(),
            subsequent_units,
            shd.subsequent.normalize(),
            price
        ),
    };

    ShdPriceResult {
        entry_count,
        first_units,
        second_units,
        subsequent_units,
        price,
        audit_step,
    }
}

/// Prices SHD entries with the standard GLS rates.
pub fn shd_price(records: &[TourRecord]) -> Decimal {
    calculate_shd_price(records, &RateConfig::gls_default(), 1).price
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShdEntry;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_tour(id: &str, values: &[i64]) -> TourRecord {
        let mut tour = TourRecord::new(
            id,
            "driver_01",
            "GLS-001",
            NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(),
        );
        for &value in values {
            tour.add_shd_entry(value);
        }
        tour
    }

    // ==========================================================================
    // SHD-001: three entries use all three ranks
    // ==========================================================================
    #[test]
    fn test_shd_001_three_entries() {
        assert_eq!(shd_price(&[make_tour("gls_001", &[10, 5, 3])]), dec("35.81"));
    }

    // ==========================================================================
    // SHD-002: two entries
    // ==========================================================================
    #[test]
    fn test_shd_002_two_entries() {
        // 8 × 3.17 + 4 × 0.63
        assert_eq!(shd_price(&[make_tour("gls_002", &[8, 4])]), dec("27.88"));
    }

    // ==========================================================================
    // SHD-003: ranking restarts per tour
    // ==========================================================================
    #[test]
    fn test_shd_003_ranking_restarts_per_tour() {
        let tours = vec![make_tour("gls_001", &[10, 5, 3]), make_tour("gls_002", &[8, 4])];

        let result = calculate_shd_price(&tours, &RateConfig::gls_default(), 1);

        assert_eq!(result.price, dec("63.69"));
        assert_eq!(result.entry_count, 5);
        assert_eq!(result.first_units, dec("18"));
        assert_eq!(result.second_units, dec("9"));
        assert_eq!(result.subsequent_units, dec("3"));
    }

    #[test]
    fn test_fourth_and_later_entries_use_subsequent_rate() {
        // 1 × 3.17 + 1 × 0.63 + 1 × 0.32 + 1 × 0.32
        assert_eq!(shd_price(&[make_tour("gls_001", &[1, 1, 1, 1])]), dec("4.44"));
    }

    #[test]
    fn test_unordered_entries_priced_by_position() {
        let mut tour = make_tour("gls_001", &[]);
        tour.shd_entries = vec![
            ShdEntry { position: 3, value: 3 },
            ShdEntry { position: 1, value: 10 },
            ShdEntry { position: 2, value: 5 },
        ];
        assert_eq!(shd_price(&[tour]), dec("35.81"));
    }

    #[test]
    fn test_gap_in_positions_ranks_by_order() {
        let mut tour = make_tour("gls_001", &[10, 5, 3]);
        tour.remove_shd_entry(2);
        // 10 × 3.17 + 3 × 0.63
        assert_eq!(shd_price(&[tour]), dec("33.59"));
    }

    #[test]
    fn test_negative_value_reduces_price() {
        assert_eq!(shd_price(&[make_tour("gls_001", &[10, -5])]), dec("28.55"));
    }

    #[test]
    fn test_units_beyond_i64_do_not_overflow() {
        let tours = vec![make_tour("gls_001", &[i64::MAX]), make_tour("gls_002", &[1])];

        let result = calculate_shd_price(&tours, &RateConfig::gls_default(), 1);

        assert_eq!(result.first_units, Decimal::from(i64::MAX) + Decimal::ONE);
        assert_eq!(result.price, dec("29238089356829639311.36"));
    }

    #[test]
    fn test_tours_without_entries_are_zero() {
        assert_eq!(shd_price(&[]), Decimal::ZERO);
        assert_eq!(shd_price(&[make_tour("gls_001", &[])]), Decimal::ZERO);
    }

    #[test]
    fn test_audit_step() {
        let tours = vec![make_tour("gls_001", &[10, 5, 3]), make_tour("gls_002", &[8, 4])];
        let result = calculate_shd_price(&tours, &RateConfig::gls_default(), 4);

        assert_eq!(result.audit_step.step_number, 4);
        assert_eq!(result.audit_step.rule_id, "shd_entries");
        assert_eq!(result.audit_step.input["entry_count"], 5);
        assert_eq!(result.audit_step.output["first_units"].as_str().unwrap(), "18");
        assert_eq!(result.audit_step.output["price"].as_str().unwrap(), "63.69");
    }
}

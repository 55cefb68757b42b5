//! Sanity checks over tour data.
//!
//! Pricing accepts any integer counts. These checks flag records that are
//! priced but probably mistyped, so a report reader can review them.

use crate::models::{AuditWarning, TourRecord};

/// Warning code for a negative package, pickup, or SHD count.
pub const NEGATIVE_COUNT: &str = "NEGATIVE_COUNT";

/// Warning code for SHD positions that are not exactly `1..=n`.
pub const NON_CONTIGUOUS_SHD: &str = "NON_CONTIGUOUS_SHD";

/// Returns one warning per suspicious field, in tour order.
///
/// # Examples
///
/// ```
/// use gls_pricing::calculation::{check_tours, NEGATIVE_COUNT};
/// use gls_pricing::models::TourRecord;
/// use chrono::NaiveDate;
///
/// let mut tour = TourRecord::new("t1", "d", "GLS-001", NaiveDate::from_ymd_opt(2023, 1, 5).unwrap());
/// tour.pickup_points = -3;
///
/// let warnings = check_tours(&[tour]);
/// assert_eq!(warnings.len(), 1);
/// assert_eq!(warnings[0].code, NEGATIVE_COUNT);
/// ```
pub fn check_tours(records: &[TourRecord]) -> Vec<AuditWarning> {
    let mut warnings = Vec::new();

    for tour in records {
        let counts = [
            ("packages_delivered", tour.packages_delivered),
            ("pickup_points", tour.pickup_points),
            ("occasional_pickups", tour.occasional_pickups),
        ];
        for (field, value) in counts {
            if value < 0 {
                warnings.push(AuditWarning {
                    code: NEGATIVE_COUNT.to_string(),
                    message: format!("{} is negative ({})", field, value),
                    tour_id: tour.id.clone(),
                });
            }
        }

        for entry in tour.shd_entries_by_position() {
            if entry.value < 0 {
                warnings.push(AuditWarning {
                    code: NEGATIVE_COUNT.to_string(),
                    message: format!("SHD entry {} is negative ({})", entry.position, entry.value),
                    tour_id: tour.id.clone(),
                });
            }
        }

        if !tour.has_contiguous_shd_positions() {
            let positions: Vec<String> = tour
                .shd_entries_by_position()
                .iter()
                .map(|e| e.position.to_string())
                .collect();
            warnings.push(AuditWarning {
                code: NON_CONTIGUOUS_SHD.to_string(),
                message: format!("SHD positions [{}] are not contiguous from 1", positions.join(", ")),
                tour_id: tour.id.clone(),
            });
        }
    }

    warnings
}

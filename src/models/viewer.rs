//! Viewer model used for row-level scoping.

use serde::{Deserialize, Serialize};

use super::{Expense, TourRecord};

/// The user on whose behalf records are read or changed.
///
/// Drivers only see their own records; superusers see everything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    /// The user's identifier (matches `TourRecord::driver_id`).
    pub user_id: String,
    /// Whether the user has unrestricted access.
    #[serde(default)]
    pub is_superuser: bool,
}

impl Viewer {
    /// Creates a driver viewer scoped to their own records.
    pub fn driver(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            is_superuser: false,
        }
    }

    /// Creates an unrestricted viewer.
    pub fn superuser(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            is_superuser: true,
        }
    }

    /// Returns true if this viewer owns records of `driver_id` or is a superuser.
    pub fn can_access(&self, driver_id: &str) -> bool {
        self.is_superuser || self.user_id == driver_id
    }

    /// Returns true if the tour is visible to this viewer.
    ///
    /// # Examples
    ///
    /// ```
    /// use gls_pricing::models::{TourRecord, Viewer};
    /// use chrono::NaiveDate;
    ///
    /// let tour = TourRecord::new("t1", "driver_01", "GLS-001", NaiveDate::from_ymd_opt(2023, 1, 5).unwrap());
    /// assert!(Viewer::driver("driver_01").can_view(&tour));
    /// assert!(!Viewer::driver("driver_02").can_view(&tour));
    /// assert!(Viewer::superuser("admin").can_view(&tour));
    /// ```
    pub fn can_view(&self, tour: &TourRecord) -> bool {
        self.can_access(&tour.driver_id)
    }

    /// Returns true if the expense is visible to this viewer.
    ///
    /// An expense without an owner is only visible to superusers.
    pub fn can_view_expense(&self, expense: &Expense) -> bool {
        match expense.owner_id.as_deref() {
            Some(owner) => self.can_access(owner),
            None => self.is_superuser,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_accesses_only_own_records() {
        let viewer = Viewer::driver("driver_01");
        assert!(viewer.can_access("driver_01"));
        assert!(!viewer.can_access("driver_02"));
    }

    #[test]
    fn test_superuser_accesses_everything() {
        let viewer = Viewer::superuser("admin");
        assert!(viewer.can_access("driver_01"));
        assert!(viewer.can_access("driver_02"));
    }

    #[test]
    fn test_unowned_expense_is_superuser_only() {
        let date = chrono::NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let unowned = Expense::new("exp_001", "Fuel", "abc123", rust_decimal::Decimal::ONE, date, None);
        let owned = Expense::new(
            "exp_002",
            "Fuel",
            "abc123",
            rust_decimal::Decimal::ONE,
            date,
            Some("driver_01".to_string()),
        );

        assert!(!Viewer::driver("driver_01").can_view_expense(&unowned));
        assert!(Viewer::superuser("admin").can_view_expense(&unowned));
        assert!(Viewer::driver("driver_01").can_view_expense(&owned));
        assert!(!Viewer::driver("driver_02").can_view_expense(&owned));
    }

    #[test]
    fn test_deserialize_viewer_defaults_to_driver() {
        let viewer: Viewer = serde_json::from_str(r#"{"user_id": "driver_01"}"#).unwrap();
        assert!(!viewer.is_superuser);
    }
}

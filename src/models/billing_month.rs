//! Billing month model.
//!
//! This module contains the [`BillingMonth`] type, the calendar month a
//! pricing run covers.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A validated calendar month with its inclusive date range.
///
/// Deserialization goes through [`BillingMonth::new`]: only `year` and
/// `month` are read, and the date range is recomputed from them.
///
/// # Example
///
/// ```
/// use gls_pricing::models::BillingMonth;
/// use chrono::NaiveDate;
///
/// let february = BillingMonth::new(2024, 2).unwrap();
/// assert_eq!(february.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert!(february.contains_date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
/// assert!(!february.contains_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BillingMonthFields")]
pub struct BillingMonth {
    /// The calendar year.
    pub year: i32,
    /// The month number (1-12).
    pub month: u32,
    first_day: NaiveDate,
    last_day: NaiveDate,
}

#[derive(Deserialize)]
struct BillingMonthFields {
    year: i32,
    month: i32,
}

impl TryFrom<BillingMonthFields> for BillingMonth {
    type Error = EngineError;

    fn try_from(fields: BillingMonthFields) -> EngineResult<Self> {
        Self::new(fields.year, fields.month)
    }
}

impl BillingMonth {
    /// Builds the month for `year`/`month`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidMonthSelector`] if `month` is outside
    /// `1..=12` or the year is outside chrono's supported range.
    pub fn new(year: i32, month: i32) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidMonthSelector {
            year: year.to_string(),
            month: month.to_string(),
        };

        let month_number = u32::try_from(month)
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(invalid)?;

        let first_day = NaiveDate::from_ymd_opt(year, month_number, 1).ok_or_else(invalid)?;
        let next_month_start = if month_number == 12 {
            year.checked_add(1)
                .and_then(|next| NaiveDate::from_ymd_opt(next, 1, 1))
        } else {
            NaiveDate::from_ymd_opt(year, month_number + 1, 1)
        };
        let last_day = next_month_start
            .and_then(|d| d.pred_opt())
            .ok_or_else(invalid)?;

        Ok(Self {
            year,
            month: month_number,
            first_day,
            last_day,
        })
    }

    /// Parses a year and month given as text (e.g. UI query parameters).
    ///
    /// Surrounding whitespace is ignored. Anything that does not parse as an
    /// integer yields [`EngineError::InvalidMonthSelector`].
    pub fn parse(year: &str, month: &str) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidMonthSelector {
            year: year.to_string(),
            month: month.to_string(),
        };
        let y: i32 = year.trim().parse().map_err(|_| invalid())?;
        let m: i32 = month.trim().parse().map_err(|_| invalid())?;
        Self::new(y, m).map_err(|_| invalid())
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        // A day of an existing date always yields a valid month.
        let first_day = date.with_day(1).unwrap_or(date);
        let last_day = Self::new(date.year(), date.month() as i32)
            .map(|m| m.last_day)
            .unwrap_or(date);
        Self {
            year: date.year(),
            month: date.month(),
            first_day,
            last_day,
        }
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// The last day of the month (leap years included).
    pub fn last_day(&self) -> NaiveDate {
        self.last_day
    }

    /// Number of days in the month.
    pub fn day_count(&self) -> u32 {
        self.last_day.day()
    }

    /// Checks if a date falls within this month, bounds included.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.first_day && date <= self.last_day
    }
}

impl std::fmt::Display for BillingMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

//! Vehicle and running expenses.
//!
//! Expenses are tracked next to tours: a title, the plate of the vehicle the
//! cost belongs to, a two-decimal amount, and the driver it was recorded for.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// One expense line.
///
/// The plate is stored uppercased and the amount is rounded half-up to two
/// decimals, whether the expense is built with [`Expense::new`] or deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ExpenseFields")]
pub struct Expense {
    /// Unique identifier for the expense.
    pub id: String,
    /// What the money was spent on.
    pub title: String,
    license_plate: String,
    amount: Decimal,
    /// The day the expense was incurred.
    pub date: NaiveDate,
    /// The driver the expense was recorded for. Unowned expenses are only
    /// visible to superusers.
    pub owner_id: Option<String>,
}

#[derive(Deserialize)]
struct ExpenseFields {
    id: String,
    title: String,
    license_plate: String,
    amount: Decimal,
    date: NaiveDate,
    #[serde(default)]
    owner_id: Option<String>,
}

impl From<ExpenseFields> for Expense {
    fn from(fields: ExpenseFields) -> Self {
        Expense::new(
            fields.id,
            fields.title,
            fields.license_plate,
            fields.amount,
            fields.date,
            fields.owner_id,
        )
    }
}

impl Expense {
    /// Creates an expense, normalizing the plate and the amount.
    ///
    /// # Examples
    ///
    /// ```
    /// use gls_pricing::models::Expense;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let expense = Expense::new(
    ///     "exp_001",
    ///     "Fuel",
    ///     "abc123",
    ///     Decimal::new(1005, 1),
    ///     NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
    ///     Some("driver_01".to_string()),
    /// );
    /// assert_eq!(expense.license_plate(), "ABC123");
    /// assert_eq!(expense.amount().to_string(), "100.50");
    /// ```
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        license_plate: impl AsRef<str>,
        amount: Decimal,
        date: NaiveDate,
        owner_id: Option<String>,
    ) -> Self {
        let mut amount = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        amount.rescale(2);
        Self {
            id: id.into(),
            title: title.into(),
            license_plate: license_plate.as_ref().trim().to_uppercase(),
            amount,
            date,
            owner_id,
        }
    }

    /// The vehicle plate, uppercased.
    pub fn license_plate(&self) -> &str {
        &self.license_plate
    }

    /// The amount, with exactly two decimals.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Sorts expenses newest first. Same-day expenses keep id order.
    pub fn sort_newest_first(expenses: &mut [Expense]) {
        expenses.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
    }

    /// Sums the amounts of a list of expenses.
    pub fn total_amount(expenses: &[Expense]) -> Decimal {
        expenses.iter().fold(Decimal::ZERO, |acc, e| acc + e.amount)
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.title, self.license_plate, self.date)
    }
}

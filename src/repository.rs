//! Viewer-scoped tour and expense storage.
//!
//! Every read and write goes through a [`Viewer`]: drivers only reach their
//! own records, superusers reach all of them. Pricing functions never see
//! records the viewer could not see.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::calculation::select_month;
use crate::error::{EngineError, EngineResult};
use crate::models::{BillingMonth, Expense, TourRecord, Viewer};

/// Storage abstraction for tour records.
pub trait TourRepository {
    /// Stores a new tour.
    ///
    /// Fails with [`EngineError::TourConflict`] if the id is taken, or
    /// [`EngineError::PermissionDenied`] if the tour belongs to another driver.
    fn insert(&mut self, viewer: &Viewer, tour: TourRecord) -> EngineResult<()>;

    /// Replaces an existing tour.
    fn update(&mut self, viewer: &Viewer, tour: TourRecord) -> EngineResult<()>;

    /// Returns a copy of the tour with the given id.
    fn fetch(&self, viewer: &Viewer, tour_id: &str) -> EngineResult<TourRecord>;

    /// Deletes a tour, together with its SHD entries.
    fn remove(&mut self, viewer: &Viewer, tour_id: &str) -> EngineResult<TourRecord>;

    /// Returns every tour the viewer may see.
    fn visible_to(&self, viewer: &Viewer) -> Vec<TourRecord>;

    /// Returns the viewer's tours for one calendar month.
    ///
    /// An invalid month selects nothing.
    fn monthly_tours(&self, viewer: &Viewer, year: i32, month: i32) -> Vec<TourRecord> {
        select_month(&self.visible_to(viewer), year, month)
    }
}

/// A [`TourRepository`] backed by an ordered map keyed by tour id.
///
/// # Example
///
/// ```
/// use gls_pricing::models::{TourRecord, Viewer};
/// use gls_pricing::repository::{InMemoryTourRepository, TourRepository};
/// use chrono::NaiveDate;
///
/// let driver = Viewer::driver("driver_01");
/// let mut repository = InMemoryTourRepository::new();
/// repository
///     .insert(&driver, TourRecord::new("t1", "driver_01", "GLS-001", NaiveDate::from_ymd_opt(2023, 1, 5).unwrap()))
///     .unwrap();
///
/// assert_eq!(repository.visible_to(&driver).len(), 1);
/// assert!(repository.visible_to(&Viewer::driver("driver_02")).is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryTourRepository {
    tours: BTreeMap<String, TourRecord>,
}

impl InMemoryTourRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tours, regardless of viewer.
    pub fn len(&self) -> usize {
        self.tours.len()
    }

    /// Returns true if no tour is stored.
    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }

    fn authorize(viewer: &Viewer, tour: &TourRecord, action: &str) -> EngineResult<()> {
        if viewer.can_view(tour) {
            return Ok(());
        }
        warn!(
            user_id = %viewer.user_id,
            tour_id = %tour.id,
            action,
            "Rejected access to another driver's tour"
        );
        Err(EngineError::PermissionDenied {
            user_id: viewer.user_id.clone(),
            action: format!("{} tour {}", action, tour.id),
        })
    }

    fn stored(&self, tour_id: &str) -> EngineResult<&TourRecord> {
        self.tours.get(tour_id).ok_or_else(|| EngineError::TourNotFound {
            tour_id: tour_id.to_string(),
        })
    }
}

impl TourRepository for InMemoryTourRepository {
    fn insert(&mut self, viewer: &Viewer, tour: TourRecord) -> EngineResult<()> {
        Self::authorize(viewer, &tour, "create")?;
        if self.tours.contains_key(&tour.id) {
            return Err(EngineError::TourConflict { tour_id: tour.id });
        }
        debug!(tour_id = %tour.id, driver_id = %tour.driver_id, "Tour stored");
        self.tours.insert(tour.id.clone(), tour);
        Ok(())
    }

    fn update(&mut self, viewer: &Viewer, tour: TourRecord) -> EngineResult<()> {
        Self::authorize(viewer, self.stored(&tour.id)?, "update")?;
        Self::authorize(viewer, &tour, "update")?;
        debug!(tour_id = %tour.id, "Tour updated");
        self.tours.insert(tour.id.clone(), tour);
        Ok(())
    }

    fn fetch(&self, viewer: &Viewer, tour_id: &str) -> EngineResult<TourRecord> {
        let tour = self.stored(tour_id)?;
        Self::authorize(viewer, tour, "view")?;
        Ok(tour.clone())
    }

    fn remove(&mut self, viewer: &Viewer, tour_id: &str) -> EngineResult<TourRecord> {
        Self::authorize(viewer, self.stored(tour_id)?, "delete")?;
        debug!(tour_id, "Tour removed");
        self.tours.remove(tour_id).ok_or_else(|| EngineError::TourNotFound {
            tour_id: tour_id.to_string(),
        })
    }

    fn visible_to(&self, viewer: &Viewer) -> Vec<TourRecord> {
        self.tours
            .values()
            .filter(|tour| viewer.can_view(tour))
            .cloned()
            .collect()
    }
}

/// Storage abstraction for expenses.
pub trait ExpenseRepository {
    /// Stores a new expense.
    ///
    /// Fails with [`EngineError::ExpenseConflict`] if the id is taken, or
    /// [`EngineError::PermissionDenied`] if the viewer could not see it.
    fn insert(&mut self, viewer: &Viewer, expense: Expense) -> EngineResult<()>;

    /// Returns a copy of the expense with the given id.
    fn fetch(&self, viewer: &Viewer, expense_id: &str) -> EngineResult<Expense>;

    /// Deletes an expense.
    fn remove(&mut self, viewer: &Viewer, expense_id: &str) -> EngineResult<Expense>;

    /// Returns every expense the viewer may see, newest first.
    fn visible_to(&self, viewer: &Viewer) -> Vec<Expense>;

    /// Returns the viewer's expenses for one calendar month, newest first.
    ///
    /// An invalid month selects nothing.
    fn monthly_expenses(&self, viewer: &Viewer, year: i32, month: i32) -> Vec<Expense> {
        match BillingMonth::new(year, month) {
            Ok(billing_month) => self
                .visible_to(viewer)
                .into_iter()
                .filter(|e| billing_month.contains_date(e.date))
                .collect(),
            Err(e) => {
                warn!(year, month, error = %e, "Invalid month for expense selection");
                Vec::new()
            }
        }
    }
}

/// An [`ExpenseRepository`] backed by an ordered map keyed by expense id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExpenseRepository {
    expenses: BTreeMap<String, Expense>,
}

impl InMemoryExpenseRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored expenses, regardless of viewer.
    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    /// Returns true if no expense is stored.
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    fn authorize(viewer: &Viewer, expense: &Expense, action: &str) -> EngineResult<()> {
        if viewer.can_view_expense(expense) {
            return Ok(());
        }
        warn!(
            user_id = %viewer.user_id,
            expense_id = %expense.id,
            action,
            "Rejected access to another driver's expense"
        );
        Err(EngineError::PermissionDenied {
            user_id: viewer.user_id.clone(),
            action: format!("{} expense {}", action, expense.id),
        })
    }

    fn stored(&self, expense_id: &str) -> EngineResult<&Expense> {
        self.expenses
            .get(expense_id)
            .ok_or_else(|| EngineError::ExpenseNotFound {
                expense_id: expense_id.to_string(),
            })
    }
}

impl ExpenseRepository for InMemoryExpenseRepository {
    fn insert(&mut self, viewer: &Viewer, expense: Expense) -> EngineResult<()> {
        Self::authorize(viewer, &expense, "create")?;
        if self.expenses.contains_key(&expense.id) {
            return Err(EngineError::ExpenseConflict {
                expense_id: expense.id,
            });
        }
        debug!(expense_id = %expense.id, amount = %expense.amount(), "Expense stored");
        self.expenses.insert(expense.id.clone(), expense);
        Ok(())
    }

    fn fetch(&self, viewer: &Viewer, expense_id: &str) -> EngineResult<Expense> {
        let expense = self.stored(expense_id)?;
        Self::authorize(viewer, expense, "view")?;
        Ok(expense.clone())
    }

    fn remove(&mut self, viewer: &Viewer, expense_id: &str) -> EngineResult<Expense> {
        Self::authorize(viewer, self.stored(expense_id)?, "delete")?;
        debug!(expense_id, "Expense removed");
        self.expenses
            .remove(expense_id)
            .ok_or_else(|| EngineError::ExpenseNotFound {
                expense_id: expense_id.to_string(),
            })
    }

    fn visible_to(&self, viewer: &Viewer) -> Vec<Expense> {
        let mut expenses: Vec<Expense> = self
            .expenses
            .values()
            .filter(|expense| viewer.can_view_expense(expense))
            .cloned()
            .collect();
        Expense::sort_newest_first(&mut expenses);
        expenses
    }
}

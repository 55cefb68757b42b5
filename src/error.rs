//! Error types for the GLS pricing engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine can report. Pricing itself never fails on
//! well-formed numeric input; these errors come from configuration loading,
//! month selection, permission checks, and export.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the GLS pricing engine.
///
/// # Example
///
/// ```
/// use gls_pricing::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/carrier.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/carrier.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No rate table is effective on the requested date.
    #[error("No rate table effective on {date}")]
    RateNotFound {
        /// The date for which rates were requested.
        date: NaiveDate,
    },

    /// A year/month pair did not describe a calendar month.
    #[error("Invalid month selector: year '{year}', month '{month}'")]
    InvalidMonthSelector {
        /// The year as supplied by the caller.
        year: String,
        /// The month as supplied by the caller.
        month: String,
    },

    /// A rest request ends before it starts.
    #[error("Invalid rest period: {start} to {end}")]
    InvalidRestPeriod {
        /// The requested first day of rest.
        start: NaiveDate,
        /// The requested last day of rest.
        end: NaiveDate,
    },

    /// The viewer is not allowed to perform the action.
    #[error("User '{user_id}' is not allowed to {action}")]
    PermissionDenied {
        /// The user attempting the action.
        user_id: String,
        /// A description of the denied action.
        action: String,
    },

    /// A tour with the same identifier already exists.
    #[error("Tour already exists: {tour_id}")]
    TourConflict {
        /// The conflicting tour identifier.
        tour_id: String,
    },

    /// No tour exists with the given identifier.
    #[error("Tour not found: {tour_id}")]
    TourNotFound {
        /// The missing tour identifier.
        tour_id: String,
    },

    /// An expense with the same identifier already exists.
    #[error("Expense already exists: {expense_id}")]
    ExpenseConflict {
        /// The conflicting expense identifier.
        expense_id: String,
    },

    /// No expense exists with the given identifier.
    #[error("Expense not found: {expense_id}")]
    ExpenseNotFound {
        /// The missing expense identifier.
        expense_id: String,
    },

    /// Writing an export failed.
    #[error("Export failed: {message}")]
    ExportError {
        /// A description of the export failure.
        message: String,
    },
}

impl From<csv::Error> for EngineError {
    fn from(err: csv::Error) -> Self {
        EngineError::ExportError {
            message: err.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

//! Core data models for the GLS pricing engine.
//!
//! This module contains all the domain models used throughout the engine.

mod billing_month;
mod expense;
mod pricing_result;
mod rest_request;
mod tour;
mod viewer;

pub use billing_month::BillingMonth;
pub use expense::Expense;
pub use pricing_result::{
    AuditStep, AuditTrace, AuditWarning, MonthlyReport, PickupPrice, PriceBreakdown,
};
pub use rest_request::{RestRequest, RestStatus};
pub use tour::{ShdEntry, TourRecord};
pub use viewer::Viewer;

//! CSV export of tours, expenses, and monthly price breakdowns.

use std::io::Write;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{Expense, MonthlyReport, TourRecord};

const TOUR_HEADER: [&str; 20] = [
    "id",
    "driver",
    "name",
    "date",
    "license_plate",
    "beginning_hour",
    "ending_hour",
    "breaks",
    "hours",
    "full_km",
    "points_charges",
    "points_delivered",
    "packages_charges",
    "packages_delivered",
    "avp_relay",
    "packages_refused",
    "pickup_points",
    "occasional_pickups",
    "shd_count",
    "shd_total",
];

const EXPENSE_HEADER: [&str; 6] = ["id", "title", "license_plate", "amount", "date", "owner"];

#[derive(Debug, Serialize)]
struct TourRow<'a> {
    id: &'a str,
    driver: &'a str,
    name: &'a str,
    date: NaiveDate,
    license_plate: &'a str,
    beginning_hour: Option<NaiveTime>,
    ending_hour: Option<NaiveTime>,
    breaks: Option<NaiveTime>,
    hours: Option<Decimal>,
    full_km: i64,
    points_charges: i64,
    points_delivered: i64,
    packages_charges: i64,
    packages_delivered: i64,
    avp_relay: i64,
    packages_refused: i64,
    pickup_points: i64,
    occasional_pickups: i64,
    shd_count: usize,
    shd_total: Decimal,
}

impl<'a> From<&'a TourRecord> for TourRow<'a> {
    fn from(tour: &'a TourRecord) -> Self {
        Self {
            id: &tour.id,
            driver: &tour.driver_id,
            name: &tour.name,
            date: tour.date,
            license_plate: &tour.license_plate,
            beginning_hour: tour.beginning_hour,
            ending_hour: tour.ending_hour,
            breaks: tour.breaks,
            hours: tour.elapsed_hours(),
            full_km: tour.full_km,
            points_charges: tour.points_charges,
            points_delivered: tour.points_delivered,
            packages_charges: tour.packages_charges,
            packages_delivered: tour.packages_delivered,
            avp_relay: tour.avp_relay,
            packages_refused: tour.packages_refused,
            pickup_points: tour.pickup_points,
            occasional_pickups: tour.occasional_pickups,
            shd_count: tour.shd_entries.len(),
            shd_total: tour.shd_total(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ExpenseRow<'a> {
    id: &'a str,
    title: &'a str,
    license_plate: &'a str,
    amount: Decimal,
    date: NaiveDate,
    owner: Option<&'a str>,
}

impl<'a> From<&'a Expense> for ExpenseRow<'a> {
    fn from(expense: &'a Expense) -> Self {
        Self {
            id: &expense.id,
            title: &expense.title,
            license_plate: expense.license_plate(),
            amount: expense.amount(),
            date: expense.date,
            owner: expense.owner_id.as_deref(),
        }
    }
}

/// Writes one CSV row per tour, preceded by a header row.
///
/// Missing times and hours are written as empty fields.
///
/// # Errors
///
/// Returns [`EngineError::ExportError`] if the writer fails.
///
/// # Example
///
/// ```
/// use gls_pricing::export::write_tours_csv;
/// use gls_pricing::models::TourRecord;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let mut tour = TourRecord::new("t1", "driver_01", "GLS-001", NaiveDate::from_ymd_opt(2023, 1, 5).unwrap());
/// tour.packages_delivered = 95;
///
/// let mut buffer = Vec::new();
/// write_tours_csv(&[tour], &mut buffer).unwrap();
///
/// let text = String::from_utf8(buffer).unwrap();
/// assert!(text.starts_with("id,driver,name,date,license_plate"));
/// ```
pub fn write_tours_csv<W: Write>(tours: &[TourRecord], writer: W) -> EngineResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if tours.is_empty() {
        csv_writer.write_record(TOUR_HEADER)?;
    }
    for tour in tours {
        csv_writer.serialize(TourRow::from(tour))?;
    }
    csv_writer.flush().map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })?;
    debug!(rows = tours.len(), "Tours exported");
    Ok(())
}

/// Writes one CSV row per expense, in the given order, preceded by a header row.
///
/// # Errors
///
/// Returns [`EngineError::ExportError`] if the writer fails.
pub fn write_expenses_csv<W: Write>(expenses: &[Expense], writer: W) -> EngineResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if expenses.is_empty() {
        csv_writer.write_record(EXPENSE_HEADER)?;
    }
    for expense in expenses {
        csv_writer.serialize(ExpenseRow::from(expense))?;
    }
    csv_writer.flush().map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })?;
    debug!(rows = expenses.len(), "Expenses exported");
    Ok(())
}

/// Writes a `component,amount` CSV of a report's prices.
///
/// # Errors
///
/// Returns [`EngineError::ExportError`] if the writer fails.
pub fn write_breakdown_csv<W: Write>(report: &MonthlyReport, writer: W) -> EngineResult<()> {
    let prices = &report.prices;
    let rows = [
        ("delivered", prices.delivered_price),
        ("regular_pickup", prices.regular_pickup_price),
        ("eo", prices.eo_price),
        ("pickup", prices.pickup_price),
        ("shd", prices.shd_price),
        ("total", prices.total_price),
    ];

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["component", "amount"])?;
    for (component, amount) in rows {
        csv_writer.write_record([component, amount.to_string().as_str()])?;
    }
    csv_writer.flush().map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })?;
    debug!(report_id = %report.report_id, month = %report.month, "Breakdown exported");
    Ok(())
}

/// Builds the download name of an export, e.g. `tour_export_20230131.csv`.
///
/// # Example
///
/// ```
/// use gls_pricing::export::export_filename;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let date = NaiveDate::from_ymd_opt(2023, 1, 31).unwrap();
/// assert_eq!(export_filename("tour", date), "tour_export_20230131.csv");
/// ```
pub fn export_filename(prefix: &str, date: NaiveDate) -> String {
    format!("{}_export_{}.csv", prefix, date.format("%Y%m%d"))
}

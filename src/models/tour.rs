//! Tour model and SHD entries.
//!
//! This module defines the [`TourRecord`] and [`ShdEntry`] types. A tour is
//! one driver's GLS delivery route for a single day; SHD entries are the
//! ordered secondary charge lines attached to it.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A secondary charge line attached to a tour, priced by its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShdEntry {
    /// The 1-based position of the entry within its tour.
    pub position: u32,
    /// The quantity to be priced (signed).
    pub value: i64,
}

/// Represents one GLS delivery tour for one driver on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourRecord {
    /// Unique identifier for the tour.
    pub id: String,
    /// The deliveryman who owns this tour.
    pub driver_id: String,
    /// The tour name (e.g., "GLS-001").
    pub name: String,
    /// The tour date (determines month bucketing).
    pub date: NaiveDate,
    /// When the tour started, if recorded.
    #[serde(default)]
    pub beginning_hour: Option<NaiveTime>,
    /// When the tour ended, if recorded.
    #[serde(default)]
    pub ending_hour: Option<NaiveTime>,
    /// Break time taken during the tour, as a duration of day.
    #[serde(default)]
    pub breaks: Option<NaiveTime>,
    /// Plate of the vehicle driven.
    #[serde(default)]
    pub license_plate: String,
    /// Kilometres driven.
    #[serde(default)]
    pub full_km: i64,
    /// Delivery points loaded onto the vehicle.
    #[serde(default)]
    pub points_charges: i64,
    /// Delivery points served.
    #[serde(default)]
    pub points_delivered: i64,
    /// Packages loaded onto the vehicle.
    #[serde(default)]
    pub packages_charges: i64,
    /// Packages delivered during the tour.
    #[serde(default)]
    pub packages_delivered: i64,
    /// Packages left at a relay point.
    #[serde(default)]
    pub avp_relay: i64,
    /// Packages refused by the recipient.
    #[serde(default)]
    pub packages_refused: i64,
    /// Regular pickup packages collected.
    #[serde(default)]
    pub pickup_points: i64,
    /// Occasional (EO) pickups collected.
    #[serde(default)]
    pub occasional_pickups: i64,
    /// SHD entries owned by this tour.
    #[serde(default)]
    pub shd_entries: Vec<ShdEntry>,
}

impl TourRecord {
    /// Creates an empty tour with zero counts and no SHD entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use gls_pricing::models::TourRecord;
    /// use chrono::NaiveDate;
    ///
    /// let tour = TourRecord::new(
    ///     "gls_001",
    ///     "driver_01",
    ///     "GLS-001",
    ///     NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(),
    /// );
    /// assert_eq!(tour.packages_delivered, 0);
    /// assert!(tour.shd_entries.is_empty());
    /// ```
    pub fn new(
        id: impl Into<String>,
        driver_id: impl Into<String>,
        name: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            driver_id: driver_id.into(),
            name: name.into(),
            date,
            beginning_hour: None,
            ending_hour: None,
            breaks: None,
            license_plate: String::new(),
            full_km: 0,
            points_charges: 0,
            points_delivered: 0,
            packages_charges: 0,
            packages_delivered: 0,
            avp_relay: 0,
            packages_refused: 0,
            pickup_points: 0,
            occasional_pickups: 0,
            shd_entries: Vec::new(),
        }
    }

    /// Appends an SHD entry at the first free position and returns that position.
    ///
    /// Positions start at 1. If an entry was removed earlier, its position is
    /// reused before any new higher position is allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use gls_pricing::models::TourRecord;
    /// use chrono::NaiveDate;
    ///
    /// let mut tour = TourRecord::new("t", "d", "GLS", NaiveDate::from_ymd_opt(2023, 1, 5).unwrap());
    /// assert_eq!(tour.add_shd_entry(10), 1);
    /// assert_eq!(tour.add_shd_entry(5), 2);
    /// ```
    pub fn add_shd_entry(&mut self, value: i64) -> u32 {
        let position = self.next_free_position();
        let index = self
            .shd_entries
            .iter()
            .position(|e| e.position > position)
            .unwrap_or(self.shd_entries.len());
        self.shd_entries.insert(index, ShdEntry { position, value });
        position
    }

    /// Removes the SHD entry at `position`, returning it if present.
    pub fn remove_shd_entry(&mut self, position: u32) -> Option<ShdEntry> {
        let index = self
            .shd_entries
            .iter()
            .position(|e| e.position == position)?;
        Some(self.shd_entries.remove(index))
    }

    /// Returns the SHD entries sorted by ascending position.
    ///
    /// Entries deserialized from external data may arrive unordered, so
    /// pricing always goes through this method.
    pub fn shd_entries_by_position(&self) -> Vec<&ShdEntry> {
        let mut entries: Vec<&ShdEntry> = self.shd_entries.iter().collect();
        entries.sort_by_key(|e| e.position);
        entries
    }

    /// Returns true if SHD positions are exactly `1..=n` with no gaps or duplicates.
    pub fn has_contiguous_shd_positions(&self) -> bool {
        self.shd_entries_by_position()
            .iter()
            .enumerate()
            .all(|(i, e)| e.position as usize == i + 1)
    }

    /// Sum of all SHD values on this tour.
    pub fn shd_total(&self) -> Decimal {
        self.shd_entries
            .iter()
            .fold(Decimal::ZERO, |acc, e| acc + Decimal::from(e.value))
    }

    /// Calculates the hours between the beginning and ending hour.
    ///
    /// Returns `None` if either bound is missing. The result is rounded to
    /// two decimal places.
    ///
    /// # Examples
    ///
    /// ```
    /// use gls_pricing::models::TourRecord;
    /// use chrono::{NaiveDate, NaiveTime};
    /// use rust_decimal::Decimal;
    ///
    /// let mut tour = TourRecord::new("t", "d", "GLS", NaiveDate::from_ymd_opt(2023, 1, 5).unwrap());
    /// tour.beginning_hour = NaiveTime::from_hms_opt(8, 0, 0);
    /// tour.ending_hour = NaiveTime::from_hms_opt(17, 0, 0);
    /// assert_eq!(tour.elapsed_hours(), Some(Decimal::new(900, 2))); // 9.00 hours
    /// ```
    pub fn elapsed_hours(&self) -> Option<Decimal> {
        let (begin, end) = (self.beginning_hour?, self.ending_hour?);
        let seconds = (end - begin).num_seconds();
        let mut hours = (Decimal::new(seconds, 0) / Decimal::new(3600, 0))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        hours.rescale(2);
        Some(hours)
    }

    fn next_free_position(&self) -> u32 {
        let mut candidate = 1;
        for entry in self.shd_entries_by_position() {
            if entry.position == candidate {
                candidate += 1;
            } else if entry.position > candidate {
                break;
            }
        }
        candidate
    }
}

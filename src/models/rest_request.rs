//! Rest request model.
//!
//! Deliverymen file rest (time-off) requests that start out pending and are
//! validated by an administrator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};

use super::Viewer;

/// Approval state of a rest request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestStatus {
    /// Awaiting an administrator decision.
    #[default]
    Pending,
    /// Approved by an administrator.
    Validated,
}

/// A deliveryman's request for a rest period (both bounds inclusive).
///
/// Deserialized requests are checked like [`RestRequest::new`] ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RestRequestFields")]
pub struct RestRequest {
    /// Unique identifier for the request.
    pub id: String,
    /// The deliveryman requesting rest.
    pub driver_id: String,
    /// First day of rest.
    pub start_date: NaiveDate,
    /// Last day of rest.
    pub end_date: NaiveDate,
    status: RestStatus,
}

#[derive(Deserialize)]
struct RestRequestFields {
    id: String,
    driver_id: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    #[serde(default)]
    status: RestStatus,
}

impl TryFrom<RestRequestFields> for RestRequest {
    type Error = EngineError;

    fn try_from(fields: RestRequestFields) -> EngineResult<Self> {
        let mut request = Self::new(fields.id, fields.driver_id, fields.start_date, fields.end_date)?;
        request.status = fields.status;
        Ok(request)
    }
}

impl RestRequest {
    /// Files a new pending request.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRestPeriod`] if `end_date` is before `start_date`.
    pub fn new(
        id: impl Into<String>,
        driver_id: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> EngineResult<Self> {
        if end_date < start_date {
            return Err(EngineError::InvalidRestPeriod {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            id: id.into(),
            driver_id: driver_id.into(),
            start_date,
            end_date,
            status: RestStatus::Pending,
        })
    }

    /// The current approval state.
    pub fn status(&self) -> RestStatus {
        self.status
    }

    /// Changes the approval state.
    ///
    /// Only a superuser may change the status. Re-applying the current status
    /// is accepted from anyone, so a driver can resubmit an unchanged form.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PermissionDenied`] when a non-superuser tries to
    /// change the status.
    pub fn set_status(&mut self, viewer: &Viewer, status: RestStatus) -> EngineResult<()> {
        if status == self.status {
            return Ok(());
        }
        if !viewer.is_superuser {
            warn!(
                request_id = %self.id,
                user_id = %viewer.user_id,
                "Rejected rest status change by non-admin user"
            );
            return Err(EngineError::PermissionDenied {
                user_id: viewer.user_id.clone(),
                action: "change rest request status".to_string(),
            });
        }
        info!(
            request_id = %self.id,
            user_id = %viewer.user_id,
            status = ?status,
            "Rest request status changed"
        );
        self.status = status;
        Ok(())
    }

    /// Checks if `date` falls within the rest period.
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Number of calendar days in the rest period.
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

//! Trip model
//!
//! A business trip assigned to an employee. Trips are owned by trip
//! management; the dashboard only reads them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{TripId, UserId};
use super::money::Money;

/// A business trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    /// Unique identifier
    pub id: TripId,

    /// Employee the trip is assigned to
    pub user_id: UserId,

    /// Where the trip goes
    pub destination: String,

    /// First day of the trip
    pub start_date: NaiveDate,

    /// Last day of the trip (inclusive)
    pub end_date: NaiveDate,

    /// Reason for travelling (conference, client visit, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occasion: Option<String>,

    /// Approved budget
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<Money>,

    /// Approval status as reported by trip management
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Trip {
    /// Create a new trip with no display attributes
    pub fn new(
        id: TripId,
        user_id: UserId,
        destination: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            user_id,
            destination: destination.into(),
            start_date,
            end_date,
            occasion: None,
            budget: None,
            status: None,
        }
    }

    /// Number of calendar days covered, both ends included
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Validate the trip
    pub fn validate(&self) -> Result<(), TripValidationError> {
        if self.destination.trim().is_empty() {
            return Err(TripValidationError::EmptyDestination);
        }

        if self.start_date > self.end_date {
            return Err(TripValidationError::EndBeforeStart {
                start: self.start_date,
                end: self.end_date,
            });
        }

        if let Some(budget) = self.budget {
            if budget.is_negative() {
                return Err(TripValidationError::NegativeBudget);
            }
        }

        Ok(())
    }
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} ({} - {})",
            self.id, self.destination, self.start_date, self.end_date
        )
    }
}

/// Validation errors for trips
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripValidationError {
    EmptyDestination,
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    NegativeBudget,
}

impl fmt::Display for TripValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDestination => write!(f, "Trip destination cannot be empty"),
            Self::EndBeforeStart { start, end } => {
                write!(f, "Trip ends ({}) before it starts ({})", end, start)
            }
            Self::NegativeBudget => write!(f, "Trip budget cannot be negative"),
        }
    }
}

impl std::error::Error for TripValidationError {}

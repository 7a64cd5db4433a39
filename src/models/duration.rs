//! Trip duration in half-day steps

use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of a trip, counted in half days so that only 0.5 steps exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct TripDuration(u32);

impl TripDuration {
    /// Build from a number of half days
    pub const fn from_half_days(half_days: u32) -> Self {
        Self(half_days)
    }

    /// Build from whole days
    pub const fn from_days(days: u32) -> Self {
        Self(days * 2)
    }

    pub const fn half_days(&self) -> u32 {
        self.0
    }

    /// Duration as a decimal number of days
    pub fn days(&self) -> f64 {
        f64::from(self.0) / 2.0
    }

    /// Parse `2`, `2.0`, `2.5` or `.5`
    pub fn parse(s: &str) -> Result<Self, DurationParseError> {
        let trimmed = s.trim();
        let invalid = || DurationParseError::InvalidFormat(trimmed.to_string());

        if trimmed.starts_with('-') {
            return Err(DurationParseError::Negative(trimmed.to_string()));
        }

        let (whole, fraction) = match trimmed.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (trimmed, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let days: u32 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        let fraction = fraction.trim_end_matches('0');
        let half = match fraction {
            "" => 0,
            "5" => 1,
            _ => return Err(DurationParseError::NotHalfStep(trimmed.to_string())),
        };

        days.checked_mul(2)
            .and_then(|h| h.checked_add(half))
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for TripDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let half = if self.0 % 2 == 1 { 5 } else { 0 };
        write!(f, "{}.{}", self.0 / 2, half)
    }
}

/// Error type for duration parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationParseError {
    InvalidFormat(String),
    Negative(String),
    NotHalfStep(String),
}

impl fmt::Display for DurationParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid duration: '{}'", s),
            Self::Negative(s) => write!(f, "Duration cannot be negative: '{}'", s),
            Self::NotHalfStep(s) => {
                write!(f, "Duration must be a multiple of 0.5 days: '{}'", s)
            }
        }
    }
}

impl std::error::Error for DurationParseError {}

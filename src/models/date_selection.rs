//! Date or date-range picked in the trip filter

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use crate::error::TripDeskError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single day or an inclusive `from..to` range with `from <= to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateSelection {
    Single(NaiveDate),
    Range { from: NaiveDate, to: NaiveDate },
}

impl DateSelection {
    /// Select a single day
    pub fn single(date: NaiveDate) -> Self {
        Self::Single(date)
    }

    /// Select an inclusive range; `from` must not be after `to`
    pub fn range(from: NaiveDate, to: NaiveDate) -> Result<Self, TripDeskError> {
        if from > to {
            return Err(TripDeskError::Validation(format!(
                "Date range start {} is after its end {}",
                from, to
            )));
        }
        Ok(Self::Range { from, to })
    }

    /// First selected day
    pub fn from(&self) -> NaiveDate {
        match self {
            Self::Single(date) => *date,
            Self::Range { from, .. } => *from,
        }
    }

    /// Last selected day
    pub fn to(&self) -> NaiveDate {
        match self {
            Self::Single(date) => *date,
            Self::Range { to, .. } => *to,
        }
    }

    /// Whether `[start, end]` shares at least one day with the selection
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.to() && end >= self.from()
    }
}

impl fmt::Display for DateSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            Self::Range { from, to } => write!(
                f,
                "{}..{}",
                from.format(DATE_FORMAT),
                to.format(DATE_FORMAT)
            ),
        }
    }
}

impl FromStr for DateSelection {
    type Err = TripDeskError;

    /// Accepts `YYYY-MM-DD` or `YYYY-MM-DD..YYYY-MM-DD`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once("..") {
            Some((from, to)) => Self::range(parse_date(from)?, parse_date(to)?),
            None => Ok(Self::single(parse_date(s)?)),
        }
    }
}

/// Parse a `YYYY-MM-DD` date as a validation error on failure
pub fn parse_date(s: &str) -> Result<NaiveDate, TripDeskError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| {
        TripDeskError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", s.trim()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_single_is_zero_width_range() {
        let sel = DateSelection::single(d("2025-01-11"));
        assert_eq!(sel.from(), sel.to());
        assert!(sel.overlaps(d("2025-01-10"), d("2025-01-12")));
        assert!(sel.overlaps(d("2025-01-11"), d("2025-01-11")));
        assert!(!sel.overlaps(d("2025-01-12"), d("2025-01-14")));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = DateSelection::range(d("2025-02-01"), d("2025-01-01")).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "2025-01-11".parse::<DateSelection>().unwrap(),
            DateSelection::Single(d("2025-01-11"))
        );
        let range: DateSelection = "2025-01-11..2025-01-21".parse().unwrap();
        assert_eq!(range.from(), d("2025-01-11"));
        assert_eq!(range.to(), d("2025-01-21"));
        assert_eq!(range.to_string(), "2025-01-11..2025-01-21");
        assert!("2025-13-01".parse::<DateSelection>().is_err());
    }

    #[test]
    fn test_touching_edges_overlap() {
        let sel = DateSelection::range(d("2025-01-12"), d("2025-01-20")).unwrap();
        assert!(sel.overlaps(d("2025-01-10"), d("2025-01-12")));
        assert!(sel.overlaps(d("2025-01-20"), d("2025-01-22")));
        assert!(!sel.overlaps(d("2025-01-21"), d("2025-01-22")));
    }
}

//! Trip date-overlap filter
//!
//! A trip is kept when `[start_date, end_date]` overlaps the selection:
//! `start_date <= selection.to && end_date >= selection.from`. Results are
//! ordered by start date, ties broken by ascending trip id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::{DateSelection, Trip};

/// Direction of the start-date ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(format!("Unknown sort order '{}'. Use asc or desc", other)),
        }
    }
}

/// The detail column shown next to the trip dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripColumn {
    #[default]
    Occasion,
    Budget,
    Status,
}

impl TripColumn {
    pub fn header(self) -> &'static str {
        match self {
            Self::Occasion => "Occasion",
            Self::Budget => "Budget",
            Self::Status => "Status",
        }
    }

    /// Cell text for a trip; `-` when the trip has no value
    pub fn value(self, trip: &Trip) -> String {
        let value = match self {
            Self::Occasion => trip.occasion.clone(),
            Self::Budget => trip.budget.map(|b| b.to_string()),
            Self::Status => trip.status.clone(),
        };
        value.unwrap_or_else(|| "-".to_string())
    }

    /// Next column in Occasion → Budget → Status order
    pub fn cycle(self) -> Self {
        match self {
            Self::Occasion => Self::Budget,
            Self::Budget => Self::Status,
            Self::Status => Self::Occasion,
        }
    }
}

impl fmt::Display for TripColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

impl FromStr for TripColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "occasion" => Ok(Self::Occasion),
            "budget" => Ok(Self::Budget),
            "status" => Ok(Self::Status),
            other => Err(format!(
                "Unknown column '{}'. Use occasion, budget or status",
                other
            )),
        }
    }
}

/// View configuration of the trip table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TripView {
    pub order: SortOrder,
    pub detail: TripColumn,
}

/// Keep the trips overlapping `selection`, sorted by start date
///
/// Pure and idempotent. An empty result is not an error.
pub fn filter_trips(trips: &[Trip], selection: &DateSelection, order: SortOrder) -> Vec<Trip> {
    let mut matching: Vec<Trip> = trips
        .iter()
        .filter(|t| selection.overlaps(t.start_date, t.end_date))
        .cloned()
        .collect();

    matching.sort_by(|a, b| {
        let by_date = match order {
            SortOrder::Ascending => a.start_date.cmp(&b.start_date),
            SortOrder::Descending => b.start_date.cmp(&a.start_date),
        };
        by_date.then(a.id.cmp(&b.id))
    });

    matching
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TripId, UserId};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn trip(id: u32, start: NaiveDate, end: NaiveDate) -> Trip {
        Trip::new(TripId::new(id), UserId::new(1), format!("Trip {}", id), start, end)
    }

    fn ids(trips: &[Trip]) -> Vec<u32> {
        trips.iter().map(|t| t.id.value()).collect()
    }

    fn sample() -> Vec<Trip> {
        vec![
            trip(2, date(2025, 1, 20), date(2025, 1, 22)),
            trip(1, date(2025, 1, 10), date(2025, 1, 12)),
            trip(3, date(2025, 2, 1), date(2025, 2, 3)),
        ]
    }

    #[test]
    fn test_range_overlap_example() {
        let selection = DateSelection::range(date(2025, 1, 11), date(2025, 1, 21)).unwrap();
        let result = filter_trips(&sample(), &selection, SortOrder::Ascending);
        assert_eq!(ids(&result), vec![1, 2]);
    }

    #[test]
    fn test_single_date_matches_inclusive_bounds() {
        let trips = sample();
        let on_start = filter_trips(&trips, &DateSelection::single(date(2025, 1, 20)), SortOrder::Ascending);
        let on_end = filter_trips(&trips, &DateSelection::single(date(2025, 1, 12)), SortOrder::Ascending);
        let between = filter_trips(&trips, &DateSelection::single(date(2025, 1, 15)), SortOrder::Ascending);

        assert_eq!(ids(&on_start), vec![2]);
        assert_eq!(ids(&on_end), vec![1]);
        assert!(between.is_empty());
    }

    #[test]
    fn test_descending_order() {
        let selection = DateSelection::range(date(2025, 1, 1), date(2025, 12, 31)).unwrap();
        let result = filter_trips(&sample(), &selection, SortOrder::Descending);
        assert_eq!(ids(&result), vec![3, 2, 1]);
    }

    #[test]
    fn test_equal_start_dates_ordered_by_id() {
        let trips = vec![
            trip(9, date(2025, 3, 1), date(2025, 3, 2)),
            trip(4, date(2025, 3, 1), date(2025, 3, 5)),
        ];
        let selection = DateSelection::single(date(2025, 3, 1));

        assert_eq!(ids(&filter_trips(&trips, &selection, SortOrder::Ascending)), vec![4, 9]);
        assert_eq!(ids(&filter_trips(&trips, &selection, SortOrder::Descending)), vec![4, 9]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let selection = DateSelection::range(date(2025, 1, 11), date(2025, 2, 1)).unwrap();
        for order in [SortOrder::Ascending, SortOrder::Descending] {
            let once = filter_trips(&sample(), &selection, order);
            let twice = filter_trips(&once, &selection, order);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_gap_between_trips_is_empty() {
        let selection = DateSelection::range(date(2025, 1, 13), date(2025, 1, 19)).unwrap();
        let result = filter_trips(&sample(), &selection, SortOrder::Ascending);
        assert!(result.is_empty());
    }

    #[test]
    fn test_result_is_exactly_the_overlapping_trips() {
        let trips = sample();
        let first = date(2025, 1, 5);

        for offset in 0..35 {
            let from = first + chrono::Duration::days(offset);
            for length in 0..12 {
                let to = from + chrono::Duration::days(length);
                let selection = DateSelection::range(from, to).unwrap();

                let mut expected: Vec<u32> = trips
                    .iter()
                    .filter(|t| t.start_date <= to && t.end_date >= from)
                    .map(|t| t.id.value())
                    .collect();
                expected.sort_unstable();

                let result = filter_trips(&trips, &selection, SortOrder::Ascending);
                assert_eq!(ids(&result), expected, "selection {} to {}", from, to);
                assert!(result.windows(2).all(|w| w[0].start_date <= w[1].start_date));
            }
        }
    }

    #[test]
    fn test_detail_column_values() {
        let mut t = trip(1, date(2025, 1, 10), date(2025, 1, 12));
        assert_eq!(TripColumn::Occasion.value(&t), "-");

        t.budget = Some(Money::from_cents(150_000));
        t.status = Some("approved".to_string());
        assert_eq!(TripColumn::Budget.value(&t), "CHF 1,500.00");
        assert_eq!(TripColumn::Status.value(&t), "approved");
        assert_eq!(TripColumn::Status.cycle(), TripColumn::Occasion);
    }

    #[test]
    fn test_parse_view_options() {
        assert_eq!("DESC".parse::<SortOrder>().unwrap(), SortOrder::Descending);
        assert_eq!("budget".parse::<TripColumn>().unwrap(), TripColumn::Budget);
        assert!("sideways".parse::<SortOrder>().is_err());
    }
}

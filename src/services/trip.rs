//! Trip service
//!
//! Provides the trip list of a user and the filtered dashboard view.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{TripDeskError, TripDeskResult};
use crate::models::{DateSelection, Money, Trip, TripId, UserId};
use crate::storage::Storage;

use super::trip_filter::{filter_trips, SortOrder};

/// Input for assigning a new trip
#[derive(Debug, Clone, Default)]
pub struct NewTrip {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub occasion: Option<String>,
    pub budget: Option<Money>,
    pub status: Option<String>,
}

/// Service for trip access
pub struct TripService<'a> {
    storage: &'a Storage,
}

impl<'a> TripService<'a> {
    /// Create a new trip service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All trips of a user; empty for a user without trips
    ///
    /// Fails with `NotFound` if the user does not exist.
    pub fn get_user_trips(&self, user_id: UserId) -> TripDeskResult<Vec<Trip>> {
        if !self.storage.users.exists(user_id)? {
            return Err(TripDeskError::user_not_found(user_id.to_string()));
        }
        self.storage.trips.get_by_user(user_id)
    }

    /// One of the user's trips; trips of other users are not visible
    pub fn get(&self, user_id: UserId, trip_id: TripId) -> TripDeskResult<Trip> {
        self.storage
            .trips
            .get(trip_id)?
            .filter(|t| t.user_id == user_id)
            .ok_or_else(|| TripDeskError::trip_not_found(trip_id.to_string()))
    }

    /// Assign a new trip to a user
    pub fn add(&self, user_id: UserId, new_trip: NewTrip) -> TripDeskResult<Trip> {
        if !self.storage.users.exists(user_id)? {
            return Err(TripDeskError::user_not_found(user_id.to_string()));
        }

        let mut trip = Trip::new(
            self.storage.trips.next_id()?,
            user_id,
            new_trip.destination.trim(),
            new_trip.start_date,
            new_trip.end_date,
        );
        trip.occasion = non_empty(new_trip.occasion);
        trip.budget = new_trip.budget;
        trip.status = non_empty(new_trip.status);

        trip.validate()
            .map_err(|e| TripDeskError::Validation(e.to_string()))?;

        self.storage.trips.upsert(trip.clone())?;
        self.storage.trips.save()?;

        self.storage.log_create(
            EntityType::Trip,
            trip.id.to_string(),
            Some(trip.destination.clone()),
            &trip,
        )?;

        Ok(trip)
    }

    /// The user's trips overlapping `selection`, sorted by start date
    pub fn list_filtered(
        &self,
        user_id: UserId,
        selection: &DateSelection,
        order: SortOrder,
    ) -> TripDeskResult<Vec<Trip>> {
        let trips = self.get_user_trips(user_id)?;
        Ok(filter_trips(&trips, selection, order))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TripDeskPaths;
    use crate::services::UserService;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TripDeskPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn new_trip(destination: &str, start: NaiveDate, end: NaiveDate) -> NewTrip {
        NewTrip {
            destination: destination.to_string(),
            start_date: start,
            end_date: end,
            ..Default::default()
        }
    }

    #[test]
    fn test_unknown_user_is_not_found() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TripService::new(&storage);

        let err = service.get_user_trips(UserId::new(5)).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_get_is_scoped_to_user() {
        let (_temp_dir, storage) = create_test_storage();
        let anna = UserService::new(&storage).create("Anna Keller").unwrap();
        let marc = UserService::new(&storage).create("Marc Rossi").unwrap();
        let service = TripService::new(&storage);

        let trip = service
            .add(anna.id, new_trip("Bern", date(2025, 3, 3), date(2025, 3, 4)))
            .unwrap();

        assert_eq!(service.get(anna.id, trip.id).unwrap().destination, "Bern");
        assert!(service.get(marc.id, trip.id).unwrap_err().is_not_found());
        assert!(service.get(anna.id, TripId::new(99)).unwrap_err().is_not_found());
    }

    #[test]
    fn test_user_without_trips_gets_empty_list() {
        let (_temp_dir, storage) = create_test_storage();
        let user = UserService::new(&storage).create("Anna Keller").unwrap();

        let trips = TripService::new(&storage).get_user_trips(user.id).unwrap();
        assert!(trips.is_empty());
    }

    #[test]
    fn test_add_and_filter() {
        let (_temp_dir, storage) = create_test_storage();
        let user = UserService::new(&storage).create("Anna Keller").unwrap();
        let service = TripService::new(&storage);

        service
            .add(user.id, new_trip("Geneva", date(2025, 1, 10), date(2025, 1, 12)))
            .unwrap();
        service
            .add(user.id, new_trip("Basel", date(2025, 1, 20), date(2025, 1, 22)))
            .unwrap();

        let selection = DateSelection::range(date(2025, 1, 11), date(2025, 1, 21)).unwrap();
        let trips = service
            .list_filtered(user.id, &selection, SortOrder::Descending)
            .unwrap();

        let names: Vec<_> = trips.iter().map(|t| t.destination.as_str()).collect();
        assert_eq!(names, vec!["Basel", "Geneva"]);
    }

    #[test]
    fn test_add_rejects_inverted_dates() {
        let (_temp_dir, storage) = create_test_storage();
        let user = UserService::new(&storage).create("Anna Keller").unwrap();

        let err = TripService::new(&storage)
            .add(user.id, new_trip("Bern", date(2025, 2, 5), date(2025, 2, 1)))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(storage.trips.count().unwrap(), 0);
    }
}

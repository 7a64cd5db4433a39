//! Trip repository for JSON storage
//!
//! Manages loading and saving trips to trips.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::TripDeskError;
use crate::models::{Trip, TripId, UserId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable trip data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TripData {
    trips: Vec<Trip>,
}

/// Repository for trip persistence
pub struct TripRepository {
    path: PathBuf,
    data: RwLock<HashMap<TripId, Trip>>,
}

impl TripRepository {
    /// Create a new trip repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load trips from disk
    pub fn load(&self) -> Result<(), TripDeskError> {
        let file_data: TripData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            TripDeskError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for trip in file_data.trips {
            data.insert(trip.id, trip);
        }

        Ok(())
    }

    /// Save trips to disk, ordered by ID
    pub fn save(&self) -> Result<(), TripDeskError> {
        let data = self.data.read().map_err(|e| {
            TripDeskError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut trips: Vec<_> = data.values().cloned().collect();
        trips.sort_by_key(|t| t.id);

        write_json_atomic(&self.path, &TripData { trips })
    }

    /// Get a trip by ID
    pub fn get(&self, id: TripId) -> Result<Option<Trip>, TripDeskError> {
        let data = self.data.read().map_err(|e| {
            TripDeskError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get all trips assigned to a user, ordered by start date then ID
    pub fn get_by_user(&self, user_id: UserId) -> Result<Vec<Trip>, TripDeskError> {
        let data = self.data.read().map_err(|e| {
            TripDeskError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut trips: Vec<_> = data
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        trips.sort_by(|a, b| a.start_date.cmp(&b.start_date).then(a.id.cmp(&b.id)));
        Ok(trips)
    }

    /// Insert or update a trip
    pub fn upsert(&self, trip: Trip) -> Result<(), TripDeskError> {
        let mut data = self.data.write().map_err(|e| {
            TripDeskError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(trip.id, trip);
        Ok(())
    }

    /// The ID a newly added trip receives
    pub fn next_id(&self) -> Result<TripId, TripDeskError> {
        let data = self.data.read().map_err(|e| {
            TripDeskError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data
            .keys()
            .max()
            .map(|id| id.next())
            .unwrap_or_else(|| TripId::new(1)))
    }

    /// Count trips
    pub fn count(&self) -> Result<usize, TripDeskError> {
        let data = self.data.read().map_err(|e| {
            TripDeskError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}

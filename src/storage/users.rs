//! User repository for JSON storage
//!
//! Manages loading and saving employees to users.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::TripDeskError;
use crate::models::{User, UserId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable user data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct UserData {
    users: Vec<User>,
}

/// Repository for user persistence
pub struct UserRepository {
    path: PathBuf,
    data: RwLock<HashMap<UserId, User>>,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load users from disk
    pub fn load(&self) -> Result<(), TripDeskError> {
        let file_data: UserData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            TripDeskError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for user in file_data.users {
            data.insert(user.id, user);
        }

        Ok(())
    }

    /// Save users to disk, ordered by ID
    pub fn save(&self) -> Result<(), TripDeskError> {
        let file_data = UserData {
            users: self.get_all()?,
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a user by ID
    pub fn get(&self, id: UserId) -> Result<Option<User>, TripDeskError> {
        let data = self.data.read().map_err(|e| {
            TripDeskError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get all users ordered by ID
    pub fn get_all(&self) -> Result<Vec<User>, TripDeskError> {
        let data = self.data.read().map_err(|e| {
            TripDeskError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut users: Vec<_> = data.values().cloned().collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    /// Get a user by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<User>, TripDeskError> {
        let data = self.data.read().map_err(|e| {
            TripDeskError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let name_lower = name.to_lowercase();
        Ok(data
            .values()
            .find(|u| u.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Insert or update a user
    pub fn upsert(&self, user: User) -> Result<(), TripDeskError> {
        let mut data = self.data.write().map_err(|e| {
            TripDeskError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(user.id, user);
        Ok(())
    }

    /// Check if a user exists
    pub fn exists(&self, id: UserId) -> Result<bool, TripDeskError> {
        let data = self.data.read().map_err(|e| {
            TripDeskError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.contains_key(&id))
    }

    /// The ID a newly added user receives
    pub fn next_id(&self) -> Result<UserId, TripDeskError> {
        let data = self.data.read().map_err(|e| {
            TripDeskError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data
            .keys()
            .max()
            .map(|id| id.next())
            .unwrap_or_else(|| UserId::new(1)))
    }

    /// Count users
    pub fn count(&self) -> Result<usize, TripDeskError> {
        let data = self.data.read().map_err(|e| {
            TripDeskError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}

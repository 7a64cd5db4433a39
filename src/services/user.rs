//! User service
//!
//! Registration and lookup of employees.

use crate::audit::EntityType;
use crate::error::{TripDeskError, TripDeskResult};
use crate::models::{User, UserId};
use crate::storage::Storage;

/// Service for user management
pub struct UserService<'a> {
    storage: &'a Storage,
}

impl<'a> UserService<'a> {
    /// Create a new user service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a new user under the next free ID
    pub fn create(&self, name: &str) -> TripDeskResult<User> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TripDeskError::Validation("User name cannot be empty".into()));
        }

        if self.storage.users.get_by_name(name)?.is_some() {
            return Err(TripDeskError::Duplicate {
                entity_type: "User",
                identifier: name.to_string(),
            });
        }

        let user = User::new(self.storage.users.next_id()?, name);

        self.storage.users.upsert(user.clone())?;
        self.storage.users.save()?;

        self.storage.log_create(
            EntityType::User,
            user.id.to_string(),
            Some(user.name.clone()),
            &user,
        )?;

        Ok(user)
    }

    /// Get a user by ID
    pub fn get(&self, id: UserId) -> TripDeskResult<Option<User>> {
        self.storage.users.get(id)
    }

    /// Get a user by ID, failing with `NotFound` if unknown
    pub fn require(&self, id: UserId) -> TripDeskResult<User> {
        self.storage
            .users
            .get(id)?
            .ok_or_else(|| TripDeskError::user_not_found(id.to_string()))
    }

    /// Get all users
    pub fn list(&self) -> TripDeskResult<Vec<User>> {
        self.storage.users.get_all()
    }
}

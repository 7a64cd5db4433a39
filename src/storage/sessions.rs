//! Wizard session store
//!
//! One JSON file per user under `sessions/`, holding the wizard visibility and
//! the in-progress draft (receipt bytes included, base64-encoded).

use std::fs;
use std::path::PathBuf;

use crate::error::TripDeskError;
use crate::models::UserId;
use crate::wizard::ExpenseWizard;

use super::file_io::{read_json_optional, write_json_atomic};

/// Persists expense wizard sessions between invocations
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, user_id: UserId) -> PathBuf {
        self.dir.join(format!("user-{}.json", user_id.value()))
    }

    /// Load a user's wizard, or `None` if the user never opened it
    pub fn load(&self, user_id: UserId) -> Result<Option<ExpenseWizard>, TripDeskError> {
        read_json_optional(self.path_for(user_id))
    }

    /// Save a user's wizard
    pub fn save(&self, user_id: UserId, wizard: &ExpenseWizard) -> Result<(), TripDeskError> {
        write_json_atomic(self.path_for(user_id), wizard)
    }

    /// Forget a user's session entirely
    pub fn remove(&self, user_id: UserId) -> Result<bool, TripDeskError> {
        let path = self.path_for(user_id);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(|e| {
            TripDeskError::Storage(format!("Failed to remove {}: {}", path.display(), e))
        })?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attachment, City, ExpenseCategory, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_missing_session_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path().to_path_buf());
        assert!(store.load(UserId::new(1)).unwrap().is_none());
        assert!(!store.remove(UserId::new(1)).unwrap());
    }

    #[test]
    fn test_session_round_trip_keeps_receipts_and_step() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path().join("sessions"));
        let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();

        let mut wizard = ExpenseWizard::new(today);
        wizard.open();
        wizard.set_cost(ExpenseCategory::Hotel, Money::from_cents(12000)).unwrap();
        wizard.attach(
            ExpenseCategory::Hotel,
            Attachment::new("invoice.png", vec![0x89, b'P', b'N', b'G', 0, 255]).unwrap(),
        );
        wizard.set_destination_city(City::Basel);
        wizard.next();

        store.save(UserId::new(3), &wizard).unwrap();
        assert!(temp_dir.path().join("sessions").join("user-3.json").exists());

        let loaded = store.load(UserId::new(3)).unwrap().unwrap();
        assert_eq!(loaded, wizard);

        // Sessions are isolated per user
        assert!(store.load(UserId::new(4)).unwrap().is_none());
    }
}

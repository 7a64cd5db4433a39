//! Storage layer for TripDesk
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation, plus the per-user wizard sessions, committed receipt files and
//! the audit log.

pub mod attachments;
pub mod expenses;
pub mod file_io;
pub mod init;
pub mod sessions;
pub mod trips;
pub mod users;

pub use attachments::AttachmentStore;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use sessions::SessionStore;
pub use trips::TripRepository;
pub use users::UserRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::TripDeskPaths;
use crate::error::TripDeskError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: TripDeskPaths,
    pub users: UserRepository,
    pub trips: TripRepository,
    pub expenses: ExpenseRepository,
    pub sessions: SessionStore,
    pub attachments: AttachmentStore,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: TripDeskPaths) -> Result<Self, TripDeskError> {
        paths.ensure_directories()?;

        Ok(Self {
            users: UserRepository::new(paths.users_file()),
            trips: TripRepository::new(paths.trips_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            sessions: SessionStore::new(paths.sessions_dir()),
            attachments: AttachmentStore::new(paths.attachments_dir()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), TripDeskError> {
        self.users.load()?;
        self.trips.load()?;
        self.expenses.load()?;
        Ok(())
    }

    /// Record the creation of an entity in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), TripDeskError> {
        let entry = AuditEntry::create(entity_type, entity_id, entity_name, entity);
        self.audit.log(&entry)
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

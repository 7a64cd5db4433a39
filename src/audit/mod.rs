//! Audit logging system for TripDesk
//!
//! Records user, trip and expense creation, plus the retraining requests
//! issued after each committed expense, in an append-only JSONL log.
//!
//! # Example
//!
//! ```rust,ignore
//! use tripdesk::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(audit_log_path);
//! let entry = AuditEntry::create(EntityType::Trip, "7", Some("Geneva".into()), &trip);
//! logger.log(&entry)?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;

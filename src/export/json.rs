//! JSON Export functionality
//!
//! Exports a user's committed expenses as one machine-readable document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{TripDeskError, TripDeskResult};
use crate::models::{Expense, UserId};
use crate::services::ExpenseService;
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: u32 = 1;

/// Complete expense export of one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseExport {
    pub schema_version: u32,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub user_id: UserId,
    pub expenses: Vec<Expense>,
}

impl ExpenseExport {
    /// Collect a user's expenses from storage
    pub fn from_storage(storage: &Storage, user_id: UserId) -> TripDeskResult<Self> {
        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            user_id,
            expenses: ExpenseService::new(storage).list(user_id)?,
        })
    }
}

/// Export a user's expenses as pretty-printed JSON
pub fn export_expenses_json<W: Write>(
    storage: &Storage,
    user_id: UserId,
    writer: &mut W,
) -> TripDeskResult<()> {
    let export = ExpenseExport::from_storage(storage, user_id)?;
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| TripDeskError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| TripDeskError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TripDeskPaths;
    use tempfile::TempDir;

    #[test]
    fn test_json_export_empty() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TripDeskPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let mut output = Vec::new();
        export_expenses_json(&storage, UserId::new(1), &mut output).unwrap();

        let parsed: ExpenseExport = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(parsed.user_id, UserId::new(1));
        assert!(parsed.expenses.is_empty());
    }
}

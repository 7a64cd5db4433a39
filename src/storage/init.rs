//! Storage initialization
//!
//! Handles first-run setup: directories, empty data files and default
//! settings.

use crate::config::paths::TripDeskPaths;
use crate::config::settings::Settings;
use crate::error::TripDeskError;

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Existing files are left untouched, so running it twice is harmless.
pub fn initialize_storage(paths: &TripDeskPaths) -> Result<(), TripDeskError> {
    paths.ensure_directories()?;

    let empty_files = [
        (paths.users_file(), "users"),
        (paths.trips_file(), "trips"),
        (paths.expenses_file(), "expenses"),
    ];
    for (path, key) in empty_files {
        if !path.exists() {
            let mut empty = serde_json::Map::new();
            empty.insert(key.to_string(), serde_json::Value::Array(Vec::new()));
            write_json_atomic(&path, &empty)?;
        }
    }

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
    }

    Ok(())
}

//! User settings for TripDesk
//!
//! Manages user preferences such as the default trip table layout and the
//! diagnostic log level.

use serde::{Deserialize, Serialize};

use super::paths::TripDeskPaths;
use crate::error::TripDeskError;
use crate::services::trip_filter::{SortOrder, TripColumn};

/// User settings for TripDesk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Direction the trip table is sorted by start date
    #[serde(default)]
    pub trip_sort_order: SortOrder,

    /// Which detail column the trip table shows next to the dates
    #[serde(default)]
    pub trip_detail_column: TripColumn,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Default tracing filter when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            trip_sort_order: SortOrder::default(),
            trip_detail_column: TripColumn::default(),
            date_format: default_date_format(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &TripDeskPaths) -> Result<Self, TripDeskError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                TripDeskError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                TripDeskError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TripDeskPaths) -> Result<(), TripDeskError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            TripDeskError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            TripDeskError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.trip_sort_order, SortOrder::Ascending);
        assert_eq!(settings.trip_detail_column, TripColumn::Occasion);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TripDeskPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.trip_sort_order = SortOrder::Descending;
        settings.trip_detail_column = TripColumn::Status;

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.trip_sort_order, SortOrder::Descending);
        assert_eq!(loaded.trip_detail_column, TripColumn::Status);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let loaded: Settings = serde_json::from_str(r#"{"log_level": "debug"}"#).unwrap();
        assert_eq!(loaded.schema_version, 1);
        assert_eq!(loaded.date_format, "%Y-%m-%d");
        assert_eq!(loaded.log_level, "debug");
    }
}

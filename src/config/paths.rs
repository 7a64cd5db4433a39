//! Path management for TripDesk
//!
//! Provides XDG-compliant path resolution for configuration, data, sessions
//! and logs.
//!
//! ## Path Resolution Order
//!
//! 1. `TRIPDESK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/tripdesk` or `~/.config/tripdesk`
//! 3. Windows: `%APPDATA%\tripdesk`

use std::path::PathBuf;

use crate::error::TripDeskError;

/// Manages all paths used by TripDesk
#[derive(Debug, Clone)]
pub struct TripDeskPaths {
    /// Base directory for all TripDesk data
    base_dir: PathBuf,
}

impl TripDeskPaths {
    /// Create a new TripDeskPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, TripDeskError> {
        let base_dir = if let Ok(custom) = std::env::var("TRIPDESK_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create TripDeskPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/tripdesk/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/tripdesk/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Directory holding one wizard session file per user
    pub fn sessions_dir(&self) -> PathBuf {
        self.base_dir.join("sessions")
    }

    /// Root directory for committed receipt files
    pub fn attachments_dir(&self) -> PathBuf {
        self.data_dir().join("attachments")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Diagnostic log used while the TUI owns the terminal
    pub fn diagnostic_log(&self) -> PathBuf {
        self.base_dir.join("tripdesk.log")
    }

    /// Get the path to users.json
    pub fn users_file(&self) -> PathBuf {
        self.data_dir().join("users.json")
    }

    /// Get the path to trips.json
    pub fn trips_file(&self) -> PathBuf {
        self.data_dir().join("trips.json")
    }

    /// Get the path to expenses.json
    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), TripDeskError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| TripDeskError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| TripDeskError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.sessions_dir()).map_err(|e| {
            TripDeskError::Io(format!("Failed to create sessions directory: {}", e))
        })?;

        std::fs::create_dir_all(self.attachments_dir()).map_err(|e| {
            TripDeskError::Io(format!("Failed to create attachments directory: {}", e))
        })?;

        Ok(())
    }

    /// Check if TripDesk has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, TripDeskError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                TripDeskError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("tripdesk"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, TripDeskError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| TripDeskError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("tripdesk"))
}

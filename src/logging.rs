//! Diagnostic logging setup
//!
//! Installs a global `tracing` subscriber. `RUST_LOG` wins over the level
//! configured in settings.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Mutex, Once};

use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{TripDeskError, TripDeskResult};

static TRACING_INIT: Once = Once::new();

fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tripdesk={}", default_level)))
}

/// Initializes tracing to stderr. Later calls are no-ops.
pub fn init_tracing(default_level: &str) {
    TRACING_INIT.call_once(|| {
        fmt()
            .with_env_filter(build_filter(default_level))
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}

/// Initializes tracing into a file, for when the terminal is owned by the TUI.
pub fn init_file_tracing(default_level: &str, log_file: &Path) -> TripDeskResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| TripDeskError::Io(format!("Failed to open log file: {}", e)))?;

    TRACING_INIT.call_once(|| {
        fmt()
            .with_env_filter(build_filter(default_level))
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    });

    Ok(())
}

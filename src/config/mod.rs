//! Configuration module for TripDesk
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::TripDeskPaths;
pub use settings::Settings;

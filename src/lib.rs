//! TripDesk - Employee trip dashboard and post-trip expense wizard
//!
//! This library lists the trips assigned to an employee, filtered by a date
//! or date range, and drives a five-step, resumable wizard that collects
//! hotel, transport, meal and other costs (with receipts) into a single
//! persisted expense record.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: Diagnostic tracing setup
//! - `models`: Core data models (trips, users, money, receipts, expenses)
//! - `wizard`: The expense wizard state machine
//! - `storage`: JSON file storage layer
//! - `audit`: Audit logging system
//! - `services`: Business logic layer (trip filter, expense sink, sessions)
//! - `display`: Terminal formatting
//! - `export`: Expense export to CSV, JSON and YAML
//! - `cli`: Command handlers
//! - `tui`: Interactive dashboard
//!
//! # Example
//!
//! ```rust,ignore
//! use tripdesk::config::{paths::TripDeskPaths, settings::Settings};
//!
//! let paths = TripDeskPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;
pub mod tui;
pub mod wizard;

pub use error::TripDeskError;

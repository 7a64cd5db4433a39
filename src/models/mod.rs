//! Core data models for TripDesk
//!
//! This module contains the data structures of the trip dashboard: trips,
//! employees, money, receipts and expense records.

pub mod attachment;
pub mod city;
pub mod date_selection;
pub mod duration;
pub mod expense;
pub mod ids;
pub mod money;
pub mod trip;
pub mod user;

pub use attachment::{Attachment, AttachmentError, MimeKind};
pub use city::City;
pub use date_selection::{parse_date, DateSelection};
pub use duration::TripDuration;
pub use expense::{CategoryEntry, CategoryRecord, Expense, ExpenseCategory, StoredAttachment};
pub use ids::{ExpenseId, TripId, UserId};
pub use money::Money;
pub use trip::Trip;
pub use user::User;

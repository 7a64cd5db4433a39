//! Service layer for TripDesk
//!
//! The service layer provides business logic on top of the storage layer:
//! the trip filter, user and trip access, the expense sink and the wizard
//! session controller.

pub mod expense;
pub mod trip;
pub mod trip_filter;
pub mod user;
pub mod wizard;

pub use expense::{ExpenseService, Retrainer};
pub use trip::{NewTrip, TripService};
pub use trip_filter::{filter_trips, SortOrder, TripColumn, TripView};
pub use user::UserService;
pub use wizard::{read_attachment, ExpenseWizardService};

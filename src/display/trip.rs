//! Trip display formatting
//!
//! Renders the filtered trip table with one configurable detail column.

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::models::{DateSelection, Trip};
use crate::services::trip_filter::TripView;

/// Shown when the selection matches no trip
pub const NO_TRIPS_NOTICE: &str = "No trips found for the selected date range.";

/// Format the dashboard trip table
pub fn format_trip_table(trips: &[Trip], selection: &DateSelection, view: TripView) -> String {
    let heading = format!(
        "Trips overlapping {} (sorted by start date, {})\n",
        selection, view.order
    );

    if trips.is_empty() {
        return format!("{}{}\n", heading, NO_TRIPS_NOTICE);
    }

    let mut builder = Builder::default();
    builder.push_record(["ID", "Destination", "Start", "End", view.detail.header()]);
    for trip in trips {
        builder.push_record([
            trip.id.to_string(),
            trip.destination.clone(),
            trip.start_date.to_string(),
            trip.end_date.to_string(),
            view.detail.value(trip),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());

    format!("{}{}\n{} trip(s)\n", heading, table, trips.len())
}

/// Format a single trip's details
pub fn format_trip_details(trip: &Trip) -> String {
    let mut output = String::new();

    output.push_str(&format!("Trip #{}: {}\n", trip.id, trip.destination));
    output.push_str(&format!(
        "  Dates:    {} to {} ({} day(s))\n",
        trip.start_date,
        trip.end_date,
        trip.days()
    ));
    if let Some(occasion) = &trip.occasion {
        output.push_str(&format!("  Occasion: {}\n", occasion));
    }
    if let Some(budget) = trip.budget {
        output.push_str(&format!("  Budget:   {}\n", budget));
    }
    if let Some(status) = &trip.status {
        output.push_str(&format!("  Status:   {}\n", status));
    }

    output
}

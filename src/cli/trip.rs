//! Trip CLI commands
//!
//! Assigning trips and listing them through the date-overlap filter.

use clap::Subcommand;

use super::{parse_money, require_user, today};
use crate::config::settings::Settings;
use crate::display::trip::{format_trip_details, format_trip_table};
use crate::error::{TripDeskError, TripDeskResult};
use crate::models::{parse_date, DateSelection, TripId, UserId};
use crate::services::trip_filter::{SortOrder, TripColumn, TripView};
use crate::services::{NewTrip, TripService};
use crate::storage::Storage;

/// Trip subcommands
#[derive(Subcommand)]
pub enum TripCommands {
    /// Assign a trip to the current user
    Add {
        /// Destination (e.g. "Geneva")
        destination: String,
        /// First day (YYYY-MM-DD)
        start: String,
        /// Last day, inclusive (YYYY-MM-DD)
        end: String,
        /// Reason for travelling
        #[arg(short, long)]
        occasion: Option<String>,
        /// Approved budget in CHF
        #[arg(short, long)]
        budget: Option<String>,
        /// Approval status
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Show one trip
    Show {
        /// Trip ID
        id: TripId,
    },
    /// List trips overlapping a date or range (default: today)
    List {
        /// Single date (YYYY-MM-DD)
        #[arg(long, conflicts_with_all = ["from", "to"])]
        on: Option<String>,
        /// Range start (YYYY-MM-DD), used with --to
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// Range end (YYYY-MM-DD), used with --from
        #[arg(long, requires = "from")]
        to: Option<String>,
        /// Sort direction by start date (asc, desc)
        #[arg(long)]
        order: Option<SortOrder>,
        /// Detail column (occasion, budget, status)
        #[arg(long)]
        column: Option<TripColumn>,
    },
}

/// Turn the list flags into a date selection
fn selection_from_args(
    on: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
) -> TripDeskResult<DateSelection> {
    match (on, from, to) {
        (Some(date), _, _) => Ok(DateSelection::single(parse_date(date)?)),
        (None, Some(from), Some(to)) => DateSelection::range(parse_date(from)?, parse_date(to)?),
        (None, None, None) => Ok(DateSelection::single(today())),
        _ => Err(TripDeskError::Validation(
            "--from and --to must be given together".into(),
        )),
    }
}

/// Handle a trip command
pub fn handle_trip_command(
    storage: &Storage,
    settings: &Settings,
    user: Option<UserId>,
    cmd: TripCommands,
) -> TripDeskResult<()> {
    let user_id = require_user(user)?;
    let service = TripService::new(storage);

    match cmd {
        TripCommands::Add {
            destination,
            start,
            end,
            occasion,
            budget,
            status,
        } => {
            let budget = budget.as_deref().map(parse_money).transpose()?;
            let trip = service.add(
                user_id,
                NewTrip {
                    destination,
                    start_date: parse_date(&start)?,
                    end_date: parse_date(&end)?,
                    occasion,
                    budget,
                    status,
                },
            )?;

            println!("Added trip #{}: {}", trip.id, trip.destination);
            println!("  Dates: {} to {}", trip.start_date, trip.end_date);
        }

        TripCommands::Show { id } => {
            let trip = service.get(user_id, id)?;
            print!("{}", format_trip_details(&trip));
        }

        TripCommands::List {
            on,
            from,
            to,
            order,
            column,
        } => {
            let selection = selection_from_args(on.as_deref(), from.as_deref(), to.as_deref())?;
            let view = TripView {
                order: order.unwrap_or(settings.trip_sort_order),
                detail: column.unwrap_or(settings.trip_detail_column),
            };

            let trips = service.list_filtered(user_id, &selection, view.order)?;
            print!("{}", format_trip_table(&trips, &selection, view));
        }
    }

    Ok(())
}

use anyhow::Result;
use clap::{Parser, Subcommand};

use tripdesk::cli::{
    handle_expense_command, handle_trip_command, handle_user_command, require_user, today,
};
use tripdesk::config::{paths::TripDeskPaths, settings::Settings};
use tripdesk::logging::{init_file_tracing, init_tracing};
use tripdesk::models::UserId;
use tripdesk::storage::Storage;

#[derive(Parser)]
#[command(
    name = "tripdesk",
    version,
    about = "Business trip dashboard and expense claims",
    long_about = "TripDesk shows an employee the business trips that overlap a date \
                  or date range and walks them through filing the expenses of a \
                  trip: hotel, transport, meals and other costs with receipts, \
                  then a review and commit."
)]
struct Cli {
    /// Employee ID the command acts for
    #[arg(long, short = 'u', global = true, env = "TRIPDESK_USER")]
    user: Option<UserId>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive dashboard
    #[command(alias = "ui")]
    Tui,

    /// Create the data directories and default settings
    Init,

    /// Show current configuration and paths
    Config,

    /// Employee registry
    #[command(subcommand)]
    User(tripdesk::cli::UserCommands),

    /// Business trips
    #[command(subcommand)]
    Trip(tripdesk::cli::TripCommands),

    /// Expense wizard and filed expenses
    #[command(subcommand, alias = "exp")]
    Expense(tripdesk::cli::ExpenseCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = TripDeskPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // The dashboard owns the terminal, so its diagnostics go to a file
    if matches!(cli.command, Some(Commands::Tui)) {
        paths.ensure_directories()?;
        init_file_tracing(&settings.log_level, &paths.diagnostic_log())?;
    } else {
        init_tracing(&settings.log_level);
    }

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Tui) => {
            let user_id = require_user(cli.user)?;
            tripdesk::tui::run_tui(&storage, &settings, user_id, today())?;
        }
        Some(Commands::Init) => {
            println!("Initializing TripDesk at: {}", paths.base_dir().display());
            tripdesk::storage::initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Next steps:");
            println!("  tripdesk user add \"Anna Keller\"");
            println!("  tripdesk --user 1 trip add Geneva 2025-01-10 2025-01-12");
            println!("  tripdesk --user 1 trip list --from 2025-01-01 --to 2025-01-31");
        }
        Some(Commands::Config) => {
            println!("TripDesk Configuration");
            println!("======================");
            println!("Base directory:     {}", paths.base_dir().display());
            println!("Data directory:     {}", paths.data_dir().display());
            println!("Sessions directory: {}", paths.sessions_dir().display());
            println!("Receipts directory: {}", paths.attachments_dir().display());
            println!("Audit log:          {}", paths.audit_log().display());
            println!("Diagnostic log:     {}", paths.diagnostic_log().display());
            println!();
            println!("Settings:");
            println!("  Trip sort order:    {}", settings.trip_sort_order);
            println!("  Trip detail column: {}", settings.trip_detail_column);
            println!("  Date format:        {}", settings.date_format);
            println!("  Log level:          {}", settings.log_level);
            if !storage.is_initialized() {
                println!();
                println!("Not initialized yet. Run 'tripdesk init'.");
            }
        }
        Some(Commands::User(cmd)) => {
            handle_user_command(&storage, cmd)?;
        }
        Some(Commands::Trip(cmd)) => {
            handle_trip_command(&storage, &settings, cli.user, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, cli.user, cmd)?;
        }
        None => {
            println!("TripDesk - business trips and expense claims");
            println!();
            println!("Run 'tripdesk --help' for usage information.");
            println!("Run 'tripdesk --user <id> tui' to launch the dashboard.");
        }
    }

    Ok(())
}

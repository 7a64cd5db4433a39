//! User CLI commands

use clap::Subcommand;

use crate::error::TripDeskResult;
use crate::services::UserService;
use crate::storage::Storage;

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Register an employee
    Add {
        /// Full name
        name: String,
    },
    /// List all employees
    List,
}

/// Handle a user command
pub fn handle_user_command(storage: &Storage, cmd: UserCommands) -> TripDeskResult<()> {
    let service = UserService::new(storage);

    match cmd {
        UserCommands::Add { name } => {
            let user = service.create(&name)?;
            println!("Created user: {}", user.name);
            println!("  ID: {}", user.id);
            println!();
            println!("Use it with --user {} or TRIPDESK_USER={}", user.id, user.id);
        }

        UserCommands::List => {
            let users = service.list()?;
            if users.is_empty() {
                println!("No users found.");
            } else {
                println!("{:>4}  Name", "ID");
                for user in users {
                    println!("{:>4}  {}", user.id, user.name);
                }
            }
        }
    }

    Ok(())
}

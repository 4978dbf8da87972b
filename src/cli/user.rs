//! User management CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::crypto::SecureString;
use crate::display::format_user_table;
use crate::error::{KioskError, KioskResult};
use crate::models::{Role, User};
use crate::services::UserService;
use crate::storage::Storage;

use super::auth::prompt_secret;

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// List user accounts
    List,
    /// Create a user account (administrators only)
    Add {
        /// Login name (no spaces)
        username: String,
        /// Role (admin or staff)
        #[arg(short, long, default_value = "staff")]
        role: String,
        /// Password for the new account (prompted when absent)
        #[arg(long, env = "KIOSK_NEW_PASSWORD", hide_env_values = true)]
        new_password: Option<String>,
    },
    /// Delete a user account (administrators only)
    Delete {
        /// Login name
        username: String,
    },
    /// Change a password (your own, or anyone's as an administrator)
    Passwd {
        /// Account to change (defaults to the logged-in user)
        username: Option<String>,
        /// New password (prompted when absent)
        #[arg(long, env = "KIOSK_NEW_PASSWORD", hide_env_values = true)]
        new_password: Option<String>,
    },
}

/// Handle a user command
pub fn handle_user_command(
    storage: &Storage,
    settings: &Settings,
    user: &User,
    cmd: UserCommands,
) -> KioskResult<()> {
    let service = UserService::new(storage);

    match cmd {
        UserCommands::List => {
            print!("{}", format_user_table(&service.list()?, &settings.date_format));
        }

        UserCommands::Add {
            username,
            role,
            new_password,
        } => {
            let role = Role::parse(&role).ok_or_else(|| {
                KioskError::Validation(format!(
                    "Invalid role: '{}'. Valid roles: admin, staff",
                    role
                ))
            })?;
            let password = new_password_or_prompt(new_password)?;
            let created = service.create(user, &username, &password, role)?;
            println!("Created user: {} ({})", created.username, created.role);
        }

        UserCommands::Delete { username } => {
            let deleted = service.delete(user, &username)?;
            println!("Deleted user: {}", deleted.username);
        }

        UserCommands::Passwd {
            username,
            new_password,
        } => {
            let target = username.unwrap_or_else(|| user.username.clone());
            let password = new_password_or_prompt(new_password)?;
            service.change_password(user, &target, &password)?;
            println!("Password changed for {}", target);
        }
    }

    Ok(())
}

fn new_password_or_prompt(given: Option<String>) -> KioskResult<SecureString> {
    if let Some(password) = given {
        return Ok(SecureString::new(password));
    }
    let password = prompt_secret("New password: ")?;
    let confirm = prompt_secret("Confirm password: ")?;
    if password.as_str() != confirm.as_str() {
        return Err(KioskError::Validation("Passwords don't match".into()));
    }
    Ok(password)
}

//! Login and secret prompts for CLI commands

use std::io::{self, BufRead, Write};

use crate::crypto::SecureString;
use crate::error::{KioskError, KioskResult};
use crate::models::User;
use crate::services::UserService;
use crate::storage::Storage;

/// Inventory credentials from the command line or environment
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub user: Option<String>,
    pub password: Option<String>,
}

/// Authenticate, prompting for whatever was not supplied
pub fn login(storage: &Storage, credentials: &Credentials) -> KioskResult<User> {
    let username = match &credentials.user {
        Some(user) => user.clone(),
        None => prompt_line("Username: ")?,
    };
    let password = match &credentials.password {
        Some(password) => SecureString::new(password.as_str()),
        None => prompt_secret("Password: ")?,
    };

    UserService::new(storage).authenticate(&username, &password)
}

/// Prompt for a secret with hidden input
pub fn prompt_secret(prompt: &str) -> KioskResult<SecureString> {
    rpassword::prompt_password(prompt)
        .map(SecureString::new)
        .map_err(|e| KioskError::Io(format!("Failed to read input: {}", e)))
}

/// Prompt for a visible line of input
pub fn prompt_line(prompt: &str) -> KioskResult<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

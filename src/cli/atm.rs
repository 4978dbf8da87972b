//! ATM CLI commands
//!
//! `session` drives the keypad state machine from stdin, one key or button
//! per line (a run of digits is typed and then submitted). The other
//! commands perform one operation after checking the PIN.

use std::io::{self, BufRead};

use clap::{Args, Subcommand};

use crate::atm::{AtmSession, Input, RandomCaptcha};
use crate::config::settings::Settings;
use crate::crypto::SecureString;
use crate::display::format_statement;
use crate::error::{KioskError, KioskResult};
use crate::models::money::MoneyParseError;
use crate::models::Money;
use crate::services::AtmService;
use crate::storage::Storage;

use super::auth::prompt_secret;

/// ATM arguments
#[derive(Args)]
pub struct AtmArgs {
    /// ATM PIN (prompted when absent; ignored by `session`)
    #[arg(long, env = "KIOSK_PIN", hide_env_values = true, global = true)]
    pub pin: Option<String>,

    #[command(subcommand)]
    pub command: AtmCommands,
}

/// ATM subcommands
#[derive(Subcommand)]
pub enum AtmCommands {
    /// Run the interactive keypad over stdin
    Session,
    /// Show the balance
    Balance,
    /// Withdraw cash (multiples of the withdrawal step)
    Withdraw {
        /// Amount, e.g. "200" or "$200"
        amount: String,
    },
    /// Deposit cash
    Deposit {
        /// Amount, e.g. "50"
        amount: String,
    },
    /// Change the PIN (the new PIN is always prompted)
    ChangePin,
    /// Show the mini statement
    Statement,
}

/// Handle an ATM command
pub fn handle_atm_command(storage: &Storage, settings: &Settings, args: AtmArgs) -> KioskResult<()> {
    let service = AtmService::new(storage, &settings.atm);

    let AtmArgs { pin, command } = args;

    match command {
        AtmCommands::Session => run_session(service)?,

        AtmCommands::Balance => {
            let pin = entered_pin(pin)?;
            service.verify_pin(&pin)?;
            let balance = service.balance()?;
            println!("Current Balance: {}", balance.format_whole());
        }

        AtmCommands::Withdraw { amount } => {
            let pin = entered_pin(pin)?;
            service.verify_pin(&pin)?;
            let amount = parse_amount(&amount)?;
            let balance = service.withdraw(amount)?;
            println!("Withdrew {}", amount.format_whole());
            println!("New Balance: {}", balance.format_whole());
        }

        AtmCommands::Deposit { amount } => {
            let pin = entered_pin(pin)?;
            service.verify_pin(&pin)?;
            let amount = parse_amount(&amount)?;
            let balance = service.deposit(amount)?;
            println!("Deposited {}", amount.format_whole());
            println!("New Balance: {}", balance.format_whole());
        }

        AtmCommands::ChangePin => {
            let pin = entered_pin(pin)?;
            service.verify_current_pin(&pin)?;
            let new_pin = prompt_secret("New PIN: ")?;
            let confirm = prompt_secret("Confirm new PIN: ")?;
            service.check_new_pin(&new_pin, &confirm)?;
            service.set_pin(&new_pin)?;
            println!("PIN changed successfully");
        }

        AtmCommands::Statement => {
            let pin = entered_pin(pin)?;
            service.verify_pin(&pin)?;
            let statement = service.statement()?;
            print!("{}", format_statement(&statement, settings.atm.statement_size));
        }
    }

    Ok(())
}

fn entered_pin(pin: Option<String>) -> KioskResult<SecureString> {
    match pin {
        Some(pin) => Ok(SecureString::new(pin)),
        None => prompt_secret("PIN: "),
    }
}

/// Drive the keypad from stdin until the user exits or input ends
fn run_session(service: AtmService<'_>) -> KioskResult<()> {
    let mut session = AtmSession::new(service, RandomCaptcha);
    println!("{}", session.screen());

    for line in io::stdin().lock().lines() {
        let line = line?;
        let Some(inputs) = Input::parse_line(&line) else {
            println!("Unrecognized input: {}", line.trim());
            println!("Type digits, 'clear', 'enter', or one of: balance, withdraw, deposit, pin, statement, exit");
            continue;
        };

        for input in inputs {
            if let Some(notice) = session.handle(input)? {
                println!("{}", notice);
            }
        }
        println!("{}", session.screen());

        if session.is_finished() {
            break;
        }
    }

    tracing::debug!(mode = ?session.mode(), "ATM session ended");
    Ok(())
}

fn parse_amount(input: &str) -> KioskResult<Money> {
    Money::parse(input).map_err(|err| match err {
        MoneyParseError::TooLarge(_) => KioskError::Validation("Amount is too large".into()),
        MoneyParseError::InvalidFormat(_) => {
            KioskError::Validation(format!("Invalid amount: '{}'", input.trim()))
        }
    })
}

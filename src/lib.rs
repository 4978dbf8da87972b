//! kiosk-cli - Terminal ATM simulator and inventory manager
//!
//! This library provides the core functionality for the `kiosk` binary: a
//! single PIN-protected ATM account driven through a keypad state machine,
//! and a small inventory system with products, stock movements, reports and
//! per-user access control. All data lives in local JSON files.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (ATM account, products, transactions, users)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `atm`: Keypad state machine for interactive ATM sessions
//! - `audit`: Audit logging system
//! - `backup`: Rolling backup management
//! - `reports`: Inventory reports
//! - `export`: CSV, JSON and YAML export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `kiosk` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use kiosk_cli::config::{paths::KioskPaths, settings::Settings};
//! use kiosk_cli::services::AtmService;
//! use kiosk_cli::storage::Storage;
//!
//! let paths = KioskPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths)?;
//!
//! let atm = AtmService::new(&storage, &settings.atm);
//! atm.verify_pin("1234")?;
//! println!("{}", atm.balance()?);
//! ```

pub mod atm;
pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{KioskError, KioskResult};

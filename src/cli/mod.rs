//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod atm;
pub mod audit;
pub mod auth;
pub mod backup;
pub mod export;
pub mod product;
pub mod report;
pub mod stock;
pub mod user;

pub use atm::{handle_atm_command, AtmArgs, AtmCommands};
pub use audit::{handle_audit_command, AuditArgs};
pub use auth::{login, Credentials};
pub use backup::{handle_backup_command, BackupCommands};
pub use export::{handle_export_command, ExportCommands};
pub use product::{handle_product_command, ProductCommands};
pub use report::{handle_report_command, ReportCommands};
pub use stock::{handle_stock_command, StockCommands};
pub use user::{handle_user_command, UserCommands};

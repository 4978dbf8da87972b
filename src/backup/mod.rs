//! Backup system for kiosk-cli
//!
//! Provides rolling backups of the four data files (ATM account,
//! inventory, transaction log, users) with configurable retention, and
//! restore functionality.
//!
//! # Retention Policy
//!
//! By default the system keeps 30 daily backups and 12 monthly backups
//! (the first backup of each month).

mod manager;
mod restore;

pub use manager::{BackupArchive, BackupInfo, BackupManager, BACKUP_SCHEMA_VERSION};
pub use restore::{RestoreManager, RestoreResult, ValidationResult};

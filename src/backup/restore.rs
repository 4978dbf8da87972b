//! Backup restoration for kiosk-cli

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::config::paths::KioskPaths;
use crate::error::{KioskError, KioskResult};
use crate::storage::file_io::write_json_atomic;

use super::manager::{BackupArchive, BACKUP_SCHEMA_VERSION};

/// Handles restoring from backups
pub struct RestoreManager {
    paths: KioskPaths,
}

impl RestoreManager {
    pub fn new(paths: KioskPaths) -> Self {
        Self { paths }
    }

    /// Restore data from a backup file
    ///
    /// Overwrites every data file present in the archive.
    pub fn restore_from_file(&self, backup_path: &Path) -> KioskResult<RestoreResult> {
        let archive = read_archive(backup_path)?;
        let result = self.restore_from_archive(&archive)?;
        tracing::info!(path = %backup_path.display(), restored = %result.summary(), "backup restored");
        Ok(result)
    }

    /// Restore data from a parsed backup archive
    pub fn restore_from_archive(&self, archive: &BackupArchive) -> KioskResult<RestoreResult> {
        if archive.schema_version > BACKUP_SCHEMA_VERSION {
            return Err(KioskError::Validation(format!(
                "Backup schema v{} is newer than this version of kiosk supports (v{})",
                archive.schema_version, BACKUP_SCHEMA_VERSION
            )));
        }
        self.paths.ensure_directories()?;

        let mut result = RestoreResult {
            schema_version: archive.schema_version,
            backup_date: archive.created_at,
            restored: Vec::new(),
        };

        let sections = [
            ("atm", &archive.atm, self.paths.atm_file()),
            ("inventory", &archive.inventory, self.paths.inventory_file()),
            ("transactions", &archive.transactions, self.paths.transactions_file()),
            ("users", &archive.users, self.paths.users_file()),
        ];
        for (name, value, path) in sections {
            if value.is_null() {
                continue;
            }
            write_json_atomic(&path, value)?;
            result.restored.push(name);
        }

        Ok(result)
    }

    /// Validate a backup file without restoring it
    pub fn validate_backup(&self, backup_path: &Path) -> KioskResult<ValidationResult> {
        let archive = read_archive(backup_path)?;

        Ok(ValidationResult {
            schema_version: archive.schema_version,
            backup_date: archive.created_at,
            has_atm: archive.atm.is_object(),
            has_inventory: archive.inventory.get("products").is_some_and(|p| p.is_array()),
            has_transactions: archive
                .transactions
                .get("transactions")
                .is_some_and(|t| t.is_array()),
            has_users: archive.users.get("users").is_some_and(|u| u.is_array()),
        })
    }
}

fn read_archive(path: &Path) -> KioskResult<BackupArchive> {
    let contents = fs::read_to_string(path)
        .map_err(|e| KioskError::Io(format!("Failed to read backup file: {}", e)))?;
    serde_json::from_str(&contents)
        .map_err(|e| KioskError::Json(format!("Failed to parse backup file: {}", e)))
}

/// Result of a restore operation
#[derive(Debug)]
pub struct RestoreResult {
    pub schema_version: u32,
    pub backup_date: DateTime<Utc>,
    /// Data files written, by name
    pub restored: Vec<&'static str>,
}

impl RestoreResult {
    pub fn all_restored(&self) -> bool {
        self.restored.len() == 4
    }

    pub fn summary(&self) -> String {
        if self.restored.is_empty() {
            "Restored: nothing".to_string()
        } else {
            format!("Restored: {}", self.restored.join(", "))
        }
    }
}

/// Result of validating a backup
#[derive(Debug)]
pub struct ValidationResult {
    pub schema_version: u32,
    pub backup_date: DateTime<Utc>,
    pub has_atm: bool,
    pub has_inventory: bool,
    pub has_transactions: bool,
    pub has_users: bool,
}

impl ValidationResult {
    /// Check if all expected data is present
    pub fn is_complete(&self) -> bool {
        self.has_atm && self.has_inventory && self.has_transactions && self.has_users
    }

    pub fn summary(&self) -> String {
        let sections = [
            ("atm", self.has_atm),
            ("inventory", self.has_inventory),
            ("transactions", self.has_transactions),
            ("users", self.has_users),
        ];
        let present: Vec<&str> = sections.iter().filter(|(_, ok)| *ok).map(|(n, _)| *n).collect();
        let missing: Vec<&str> = sections.iter().filter(|(_, ok)| !*ok).map(|(n, _)| *n).collect();

        if missing.is_empty() {
            format!("Complete backup (v{})", self.schema_version)
        } else {
            format!(
                "Partial backup (v{}): has {}, missing {}",
                self.schema_version,
                if present.is_empty() { "nothing".to_string() } else { present.join(", ") },
                missing.join(", ")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::manager::BackupManager;
    use crate::config::settings::{BackupRetention, Settings};
    use crate::models::Money;
    use crate::storage::{initialize_storage, Storage};
    use tempfile::TempDir;

    fn create_test_env() -> (RestoreManager, BackupManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = KioskPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths, &Settings::default()).unwrap();

        let backup_manager = BackupManager::new(paths.clone(), BackupRetention::default());
        let restore_manager = RestoreManager::new(paths);
        (restore_manager, backup_manager, temp_dir)
    }

    #[test]
    fn test_restore_undoes_changes() {
        let (restore_manager, backup_manager, temp) = create_test_env();
        let backup_path = backup_manager.create_backup().unwrap();

        let paths = KioskPaths::with_base_dir(temp.path().to_path_buf());
        let storage = Storage::open(paths.clone()).unwrap();
        let mut account = storage.atm.get().unwrap();
        account.balance = Money::zero();
        storage.atm.set(account).unwrap();
        storage.atm.save().unwrap();

        let result = restore_manager.restore_from_file(&backup_path).unwrap();
        assert!(result.all_restored());

        let reopened = Storage::open(paths).unwrap();
        assert_eq!(reopened.atm.get().unwrap().balance, Money::from_dollars(1000));
        assert_eq!(reopened.products.count().unwrap(), 3);
    }

    #[test]
    fn test_restore_recreates_files() {
        let (restore_manager, backup_manager, temp) = create_test_env();
        let backup_path = backup_manager.create_backup().unwrap();

        let paths = KioskPaths::with_base_dir(temp.path().to_path_buf());
        fs::remove_dir_all(paths.data_dir()).unwrap();

        restore_manager.restore_from_file(&backup_path).unwrap();
        assert!(paths.atm_file().exists());
        assert!(paths.inventory_file().exists());
        assert!(paths.transactions_file().exists());
        assert!(paths.users_file().exists());
    }

    #[test]
    fn test_validate_backup() {
        let (restore_manager, backup_manager, _temp) = create_test_env();
        let backup_path = backup_manager.create_backup().unwrap();

        let result = restore_manager.validate_backup(&backup_path).unwrap();
        assert!(result.is_complete());
        assert_eq!(result.schema_version, 1);
        assert!(result.summary().contains("Complete backup"));
    }

    #[test]
    fn test_validate_rejects_garbage() {
        let (restore_manager, _backup_manager, temp) = create_test_env();
        let bogus = temp.path().join("bogus.json");
        fs::write(&bogus, "{\"not\": \"a backup\"}").unwrap();

        assert!(matches!(
            restore_manager.validate_backup(&bogus),
            Err(KioskError::Json(_))
        ));
    }

    #[test]
    fn test_partial_summary() {
        let result = ValidationResult {
            schema_version: 1,
            backup_date: Utc::now(),
            has_atm: false,
            has_inventory: true,
            has_transactions: true,
            has_users: true,
        };
        assert!(!result.is_complete());
        assert_eq!(
            result.summary(),
            "Partial backup (v1): has inventory, transactions, users, missing atm"
        );
    }
}

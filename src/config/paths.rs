//! Path management for kiosk-cli
//!
//! Provides path resolution for configuration, data, audit log and backups.
//!
//! ## Path Resolution Order
//!
//! 1. `KIOSK_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories` (e.g. `~/.config/kiosk`)
//! 3. `./.kiosk` when no home directory can be determined

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::KioskError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "KIOSK_DATA_DIR";

/// Manages all paths used by kiosk-cli
#[derive(Debug, Clone)]
pub struct KioskPaths {
    /// Base directory for all kiosk-cli data
    base_dir: PathBuf,
}

impl KioskPaths {
    /// Resolve the base directory from the environment or platform defaults
    pub fn new() -> Result<Self, KioskError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            if custom.trim().is_empty() {
                return Err(KioskError::Config(format!("{} is set but empty", DATA_DIR_ENV)));
            }
            PathBuf::from(custom)
        } else {
            resolve_default_path()
        };

        Ok(Self { base_dir })
    }

    /// Create KioskPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the backup directory (<base>/backups/)
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to atm.json (PIN hash, balance, statement)
    pub fn atm_file(&self) -> PathBuf {
        self.data_dir().join("atm.json")
    }

    /// Get the path to inventory.json (product catalogue)
    pub fn inventory_file(&self) -> PathBuf {
        self.data_dir().join("inventory.json")
    }

    /// Get the path to transactions.json (inventory transaction log)
    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    /// Get the path to users.json
    pub fn users_file(&self) -> PathBuf {
        self.data_dir().join("users.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), KioskError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| KioskError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| KioskError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| KioskError::Io(format!("Failed to create backup directory: {}", e)))?;

        Ok(())
    }

    /// Check if kiosk-cli has been initialized (users file exists)
    pub fn is_initialized(&self) -> bool {
        self.users_file().exists()
    }
}

fn resolve_default_path() -> PathBuf {
    ProjectDirs::from("", "", "kiosk")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".kiosk"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = KioskPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.backup_dir(), temp_dir.path().join("backups"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = KioskPaths::with_base_dir(temp_dir.path().to_path_buf());

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(paths.backup_dir().exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = KioskPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.inventory_file(),
            temp_dir.path().join("data").join("inventory.json")
        );
        assert_eq!(paths.atm_file(), temp_dir.path().join("data").join("atm.json"));
    }
}

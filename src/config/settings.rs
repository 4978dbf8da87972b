//! User settings for kiosk-cli
//!
//! Holds the tunable business rules (ATM withdrawal step and reserve,
//! statement sizes, default reorder threshold) together with display and
//! backup retention preferences.

use serde::{Deserialize, Serialize};

use super::paths::KioskPaths;
use crate::error::KioskError;
use crate::models::Money;

/// ATM rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtmSettings {
    /// Withdrawals must be a multiple of this amount
    #[serde(default = "default_withdrawal_step")]
    pub withdrawal_step: Money,

    /// Balance that must remain in the account after a withdrawal
    #[serde(default = "default_minimum_balance")]
    pub minimum_balance: Money,

    /// Maximum number of events kept in the ATM history
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Number of events shown on a statement
    #[serde(default = "default_statement_size")]
    pub statement_size: usize,

    /// PIN given to a freshly initialized account
    #[serde(default = "default_pin")]
    pub default_pin: String,

    /// Balance given to a freshly initialized account
    #[serde(default = "default_opening_balance")]
    pub opening_balance: Money,
}

fn default_withdrawal_step() -> Money {
    Money::from_dollars(100)
}

fn default_minimum_balance() -> Money {
    Money::from_dollars(100)
}

fn default_history_limit() -> usize {
    20
}

fn default_statement_size() -> usize {
    5
}

fn default_pin() -> String {
    "1234".to_string()
}

fn default_opening_balance() -> Money {
    Money::from_dollars(1000)
}

impl Default for AtmSettings {
    fn default() -> Self {
        Self {
            withdrawal_step: default_withdrawal_step(),
            minimum_balance: default_minimum_balance(),
            history_limit: default_history_limit(),
            statement_size: default_statement_size(),
            default_pin: default_pin(),
            opening_balance: default_opening_balance(),
        }
    }
}

/// Inventory preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventorySettings {
    /// Number of transactions shown by the activity report
    #[serde(default = "default_recent_activity")]
    pub recent_activity: usize,

    /// Threshold used when a new product does not specify one
    #[serde(default)]
    pub default_threshold: u32,
}

fn default_recent_activity() -> usize {
    10
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            recent_activity: default_recent_activity(),
            default_threshold: 0,
        }
    }
}

/// Backup retention settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupRetention {
    /// Number of daily backups to keep
    pub daily_count: u32,
    /// Number of monthly backups to keep
    pub monthly_count: u32,
}

impl Default for BackupRetention {
    fn default() -> Self {
        Self {
            daily_count: 30,
            monthly_count: 12,
        }
    }
}

/// User settings for kiosk-cli
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in reports
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default)]
    pub atm: AtmSettings,

    #[serde(default)]
    pub inventory: InventorySettings,

    /// Backup retention policy
    #[serde(default)]
    pub backup_retention: BackupRetention,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            atm: AtmSettings::default(),
            inventory: InventorySettings::default(),
            backup_retention: BackupRetention::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &KioskPaths) -> Result<Self, KioskError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| KioskError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                KioskError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &KioskPaths) -> Result<(), KioskError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| KioskError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| KioskError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject rule combinations the ATM cannot work with
    pub fn validate(&self) -> Result<(), KioskError> {
        if !self.atm.withdrawal_step.is_positive() {
            return Err(KioskError::Config(
                "atm.withdrawal_step must be greater than zero".into(),
            ));
        }
        if self.atm.minimum_balance.is_negative() {
            return Err(KioskError::Config(
                "atm.minimum_balance cannot be negative".into(),
            ));
        }
        if self.atm.history_limit == 0 {
            return Err(KioskError::Config(
                "atm.history_limit must be at least 1".into(),
            ));
        }
        if !crate::models::atm::is_well_formed_pin(&self.atm.default_pin) {
            return Err(KioskError::Config(
                "atm.default_pin must be exactly 4 digits".into(),
            ));
        }
        if chrono::format::StrftimeItems::new(&self.date_format)
            .any(|item| matches!(item, chrono::format::Item::Error))
        {
            return Err(KioskError::Config(format!(
                "date_format '{}' is not a valid strftime pattern",
                self.date_format
            )));
        }
        Ok(())
    }
}

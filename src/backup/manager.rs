//! Backup manager for kiosk-cli
//!
//! Handles rolling backups with configurable retention policies. Each backup
//! is one dated JSON archive holding the four data files verbatim.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::config::paths::KioskPaths;
use crate::config::settings::BackupRetention;
use crate::error::{KioskError, KioskResult};
use crate::storage::file_io::write_json_atomic;

/// Archive schema version written by this build
pub const BACKUP_SCHEMA_VERSION: u32 = 1;

/// Metadata about a backup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupInfo {
    pub filename: String,
    pub path: PathBuf,
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
    /// First backup of its calendar month; kept under the monthly quota
    pub is_monthly: bool,
}

/// Backup archive format
///
/// A data file that did not exist when the backup was taken is stored as
/// `null` and left alone on restore.
#[derive(Debug, Serialize, Deserialize)]
pub struct BackupArchive {
    pub schema_version: u32,
    pub created_at: DateTime<Utc>,
    pub atm: serde_json::Value,
    pub inventory: serde_json::Value,
    pub transactions: serde_json::Value,
    pub users: serde_json::Value,
}

/// Manages backup creation and retention
pub struct BackupManager {
    backup_dir: PathBuf,
    paths: KioskPaths,
    retention: BackupRetention,
}

impl BackupManager {
    pub fn new(paths: KioskPaths, retention: BackupRetention) -> Self {
        let backup_dir = paths.backup_dir();
        Self {
            backup_dir,
            paths,
            retention,
        }
    }

    /// Create a backup of all data, returning the archive path
    pub fn create_backup(&self) -> KioskResult<PathBuf> {
        let now = Utc::now();
        let filename = format!(
            "backup-{}-{:03}.json",
            now.format("%Y%m%d-%H%M%S"),
            now.timestamp_subsec_millis()
        );
        let backup_path = self.backup_dir.join(&filename);

        let archive = self.create_archive(now)?;
        write_json_atomic(&backup_path, &archive)?;

        tracing::info!(path = %backup_path.display(), "backup created");
        Ok(backup_path)
    }

    fn create_archive(&self, timestamp: DateTime<Utc>) -> KioskResult<BackupArchive> {
        Ok(BackupArchive {
            schema_version: BACKUP_SCHEMA_VERSION,
            created_at: timestamp,
            atm: read_json_value(&self.paths.atm_file())?,
            inventory: read_json_value(&self.paths.inventory_file())?,
            transactions: read_json_value(&self.paths.transactions_file())?,
            users: read_json_value(&self.paths.users_file())?,
        })
    }

    /// List all available backups, newest first
    pub fn list_backups(&self) -> KioskResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();
        for entry in fs::read_dir(&self.backup_dir)
            .map_err(|e| KioskError::Io(format!("Failed to read backup directory: {}", e)))?
        {
            let entry = entry
                .map_err(|e| KioskError::Io(format!("Failed to read directory entry: {}", e)))?;
            if let Some(info) = parse_backup_info(&entry.path()) {
                backups.push(info);
            }
        }

        // Oldest first to flag the first backup of each month
        backups.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        let mut last_month = None;
        for backup in &mut backups {
            let month = (backup.created_at.year(), backup.created_at.month());
            backup.is_monthly = last_month != Some(month);
            last_month = Some(month);
        }

        backups.reverse();
        Ok(backups)
    }

    /// Delete backups beyond the retention quotas, returning what was removed
    pub fn enforce_retention(&self) -> KioskResult<Vec<PathBuf>> {
        let (monthly, daily): (Vec<_>, Vec<_>) =
            self.list_backups()?.into_iter().partition(|b| b.is_monthly);

        let expired = daily
            .into_iter()
            .skip(self.retention.daily_count as usize)
            .chain(monthly.into_iter().skip(self.retention.monthly_count as usize));

        let mut deleted = Vec::new();
        for backup in expired {
            fs::remove_file(&backup.path)
                .map_err(|e| KioskError::Io(format!("Failed to delete old backup: {}", e)))?;
            tracing::debug!(file = %backup.filename, "old backup removed");
            deleted.push(backup.path);
        }
        Ok(deleted)
    }

    /// Create a backup and then enforce retention policy
    pub fn create_backup_with_retention(&self) -> KioskResult<(PathBuf, Vec<PathBuf>)> {
        let backup_path = self.create_backup()?;
        let deleted = self.enforce_retention()?;
        Ok((backup_path, deleted))
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Get the most recent backup
    pub fn get_latest_backup(&self) -> KioskResult<Option<BackupInfo>> {
        Ok(self.list_backups()?.into_iter().next())
    }

    /// Resolve `latest`, a filename in the backup directory, or a path
    pub fn resolve(&self, name: &str) -> KioskResult<PathBuf> {
        if name.eq_ignore_ascii_case("latest") {
            return self
                .get_latest_backup()?
                .map(|b| b.path)
                .ok_or_else(|| KioskError::NotFound {
                    entity_type: "Backup",
                    identifier: "latest".into(),
                });
        }

        let in_dir = self.backup_dir.join(name);
        if in_dir.is_file() {
            return Ok(in_dir);
        }
        let as_path = PathBuf::from(name);
        if as_path.is_file() {
            return Ok(as_path);
        }
        Err(KioskError::NotFound {
            entity_type: "Backup",
            identifier: name.to_string(),
        })
    }
}

/// Read a JSON file as a generic Value; `null` if the file doesn't exist
fn read_json_value(path: &Path) -> KioskResult<serde_json::Value> {
    if !path.exists() {
        return Ok(serde_json::Value::Null);
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| KioskError::Io(format!("Failed to read {} for backup: {}", path.display(), e)))?;
    serde_json::from_str(&contents).map_err(|e| {
        KioskError::Json(format!("Failed to parse {} for backup: {}", path.display(), e))
    })
}

fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    let stamp = filename.strip_prefix("backup-")?.strip_suffix(".json")?;
    let created_at = parse_backup_timestamp(stamp)?;
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes,
        is_monthly: false,
    })
}

/// Parse `YYYYMMDD-HHMMSS` or `YYYYMMDD-HHMMSS-mmm`
fn parse_backup_timestamp(stamp: &str) -> Option<DateTime<Utc>> {
    let mut parts = stamp.split('-');
    let date = NaiveDate::parse_from_str(parts.next()?, "%Y%m%d").ok()?;
    let time_part = parts.next()?;
    let millis: u32 = match parts.next() {
        Some(ms) => ms.parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() || time_part.len() != 6 {
        return None;
    }

    let time = NaiveTime::parse_from_str(time_part, "%H%M%S").ok()?;
    let time = time.with_nanosecond(millis * 1_000_000)?;
    Some(date.and_time(time).and_utc())
}

//! Append-only audit log
//!
//! Entries are stored one JSON object per line. The file is only ever
//! appended to; readers tolerate a trailing blank line.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{KioskError, KioskResult};

use super::entry::{AuditEntry, EntityType};

/// Criteria for narrowing down audit history
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<String>,
    pub actor: Option<String>,
}

impl AuditFilter {
    fn matches(&self, entry: &AuditEntry) -> bool {
        if let Some(kind) = self.entity_type {
            if entry.entity_type != kind {
                return false;
            }
        }
        if let Some(id) = &self.entity_id {
            if !entry.entity_id.eq_ignore_ascii_case(id) {
                return false;
            }
        }
        if let Some(actor) = &self.actor {
            if entry.actor.as_deref() != Some(actor.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Writes and reads the audit log file
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an entry and flush it to disk
    pub fn log(&self, entry: &AuditEntry) -> KioskResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| KioskError::Io(format!("Failed to open audit log: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| KioskError::Json(format!("Failed to serialize audit entry: {}", e)))?;

        writeln!(file, "{}", json)
            .and_then(|_| file.flush())
            .map_err(|e| KioskError::Io(format!("Failed to write audit entry: {}", e)))?;

        tracing::trace!(
            operation = %entry.operation,
            entity = %entry.entity_type,
            id = %entry.entity_id,
            "audit entry written"
        );
        Ok(())
    }

    /// Read every entry, oldest first
    pub fn read_all(&self) -> KioskResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| KioskError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut entries = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                KioskError::Io(format!("Failed to read audit log line {}: {}", index + 1, e))
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                KioskError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    index + 1,
                    e
                ))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// The most recent `count` entries matching `filter`, newest first
    pub fn query(&self, filter: &AuditFilter, count: usize) -> KioskResult<Vec<AuditEntry>> {
        Ok(self
            .read_all()?
            .into_iter()
            .rev()
            .filter(|entry| filter.matches(entry))
            .take(count)
            .collect())
    }

    /// The most recent `count` entries, newest first
    pub fn read_recent(&self, count: usize) -> KioskResult<Vec<AuditEntry>> {
        self.query(&AuditFilter::default(), count)
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn product_entry(id: &str, actor: &str) -> AuditEntry {
        AuditEntry::create(EntityType::Product, id, None, &json!({"id": id})).by(actor)
    }

    #[test]
    fn test_missing_log_reads_empty() {
        let (logger, _temp) = test_logger();
        assert!(logger.read_all().unwrap().is_empty());
        assert!(logger.read_recent(5).unwrap().is_empty());
    }

    #[test]
    fn test_append_and_reopen() {
        let (logger, temp) = test_logger();
        logger.log(&product_entry("P0001", "admin")).unwrap();
        logger.log(&product_entry("P0002", "admin")).unwrap();

        let reopened = AuditLogger::new(temp.path().join("audit.log"));
        let entries = reopened.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].entity_id, "P0001");
    }

    #[test]
    fn test_recent_is_newest_first() {
        let (logger, _temp) = test_logger();
        for i in 1..=6 {
            logger.log(&product_entry(&format!("P{:04}", i), "admin")).unwrap();
        }

        let recent = logger.read_recent(3).unwrap();
        let ids: Vec<_> = recent.iter().map(|e| e.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["P0006", "P0005", "P0004"]);
    }

    #[test]
    fn test_query_filters() {
        let (logger, _temp) = test_logger();
        logger.log(&product_entry("P0001", "admin")).unwrap();
        logger.log(&product_entry("P0002", "clerk")).unwrap();
        logger
            .log(&AuditEntry::create(EntityType::User, "clerk", None, &json!({})).by("admin"))
            .unwrap();

        let by_clerk = AuditFilter {
            actor: Some("clerk".into()),
            ..Default::default()
        };
        assert_eq!(logger.query(&by_clerk, 10).unwrap().len(), 1);

        let users = AuditFilter {
            entity_type: Some(EntityType::User),
            ..Default::default()
        };
        assert_eq!(logger.query(&users, 10).unwrap()[0].entity_id, "clerk");

        let one_product = AuditFilter {
            entity_id: Some("p0001".into()),
            ..Default::default()
        };
        assert_eq!(logger.query(&one_product, 10).unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_line_reported() {
        let (logger, _temp) = test_logger();
        logger.log(&product_entry("P0001", "admin")).unwrap();
        std::fs::OpenOptions::new()
            .append(true)
            .open(logger.path())
            .unwrap()
            .write_all(b"not json\n")
            .unwrap();

        let err = logger.read_all().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}

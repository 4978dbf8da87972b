//! JSON file helpers with atomic writes
//!
//! Every data file is rewritten wholesale on each mutation. Writes go to a
//! sibling temp file which is synced and then renamed over the target, so a
//! crash leaves either the old or the new contents on disk.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{KioskError, KioskResult};

/// Read JSON from `path`, or `T::default()` if the file doesn't exist yet
pub fn read_json<T, P>(path: P) -> KioskResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(T::default());
    }
    parse_file(path)
}

/// Read JSON from `path`, failing if the file is missing
pub fn read_json_required<T, P>(path: P) -> KioskResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(KioskError::Storage(format!(
            "File not found: {}",
            path.display()
        )));
    }
    parse_file(path)
}

fn parse_file<T: DeserializeOwned>(path: &Path) -> KioskResult<T> {
    let file = File::open(path)
        .map_err(|e| KioskError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| KioskError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write pretty-printed JSON to `path` via temp file + rename
pub fn write_json_atomic<T, P>(path: P, data: &T) -> KioskResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            KioskError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Must live in the same directory for rename to be atomic
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| KioskError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| KioskError::Storage(format!("Failed to serialize data: {}", e)))?;
    writer
        .flush()
        .and_then(|_| writer.get_ref().sync_all())
        .map_err(|e| KioskError::Storage(format!("Failed to flush data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        KioskError::Storage(format!("Failed to replace {}: {}", path.display(), e))
    })?;

    tracing::trace!(path = %path.display(), "wrote data file");
    Ok(())
}

/// Whether `path` exists and parses as JSON
pub fn json_file_valid<P: AsRef<Path>>(path: P) -> bool {
    File::open(path.as_ref())
        .ok()
        .map(|file| serde_json::from_reader::<_, serde_json::Value>(BufReader::new(file)).is_ok())
        .unwrap_or(false)
}

//! YAML Export functionality
//!
//! Same structure as the JSON export, for human-readable archives.

use std::io::Write;

use crate::error::KioskResult;
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export the full database to YAML format
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> KioskResult<()> {
    let export = FullExport::from_storage(storage)?;

    writeln!(writer, "# kiosk inventory export")?;
    writeln!(writer, "# Generated: {}", export.exported_at)?;
    writeln!(writer, "# App Version: {}", export.app_version)?;
    writeln!(writer)?;

    serde_yaml::to_writer(writer, &export)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::KioskPaths;
    use crate::config::settings::Settings;
    use crate::storage::initialize_storage;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_export() {
        let temp_dir = TempDir::new().unwrap();
        let paths = KioskPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths, &Settings::default()).unwrap();
        let storage = Storage::open(paths).unwrap();

        let mut output = Vec::new();
        export_full_yaml(&storage, &mut output).unwrap();
        let yaml_string = String::from_utf8(output).unwrap();

        assert!(yaml_string.starts_with("# kiosk inventory export"));
        assert!(yaml_string.contains("Premium Laptop"));
        assert!(!yaml_string.contains("password_hash"));

        // serde_yaml skips the comment header
        let imported: FullExport = serde_yaml::from_str(&yaml_string).unwrap();
        assert_eq!(imported.products.len(), 3);
        assert_eq!(imported.users.len(), 1);
    }
}

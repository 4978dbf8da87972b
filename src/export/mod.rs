//! Export module for kiosk-cli
//!
//! Provides data export in multiple formats:
//! - CSV: products and the inventory transaction log (spreadsheet-compatible)
//! - JSON: machine-readable full database export
//! - YAML: human-readable full database export

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_products_csv, export_transactions_csv};
pub use json::{export_full_json, ExportedUser, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;

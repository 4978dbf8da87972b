//! JSON Export functionality
//!
//! Exports the inventory database to JSON with schema versioning. Users are
//! exported without their password hashes; the ATM account is not included.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::KioskResult;
use crate::models::{InventoryTransaction, Money, Product, Role, User};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full database export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub products: Vec<Product>,

    pub transactions: Vec<InventoryTransaction>,

    pub users: Vec<ExportedUser>,

    pub metadata: ExportMetadata,
}

/// A user account as it appears in an export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedUser {
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for ExportedUser {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub product_count: usize,
    pub transaction_count: usize,
    pub user_count: usize,
    /// Sum of price × quantity over all products
    pub total_stock_value: Money,
    pub earliest_transaction: Option<DateTime<Utc>>,
    pub latest_transaction: Option<DateTime<Utc>>,
}

impl FullExport {
    /// Create a new full export from storage
    pub fn from_storage(storage: &Storage) -> KioskResult<Self> {
        let products = storage.products.get_all()?;
        let transactions = storage.transactions.get_all()?;
        let users: Vec<ExportedUser> = storage
            .users
            .get_all()?
            .iter()
            .map(ExportedUser::from)
            .collect();

        let metadata = ExportMetadata {
            product_count: products.len(),
            transaction_count: transactions.len(),
            user_count: users.len(),
            total_stock_value: products.iter().map(Product::stock_value).sum(),
            earliest_transaction: transactions.iter().map(|t| t.timestamp).min(),
            latest_transaction: transactions.iter().map(|t| t.timestamp).max(),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            products,
            transactions,
            users,
            metadata,
        })
    }
}

/// Export the full database to JSON
pub fn export_full_json<W: Write>(storage: &Storage, writer: &mut W, pretty: bool) -> KioskResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)?;
    } else {
        serde_json::to_writer(writer, &export)?;
    }

    tracing::debug!(
        products = export.metadata.product_count,
        transactions = export.metadata.transaction_count,
        "exported database to JSON"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::KioskPaths;
    use crate::config::settings::Settings;
    use crate::services::{ProductInput, ProductService};
    use crate::storage::initialize_storage;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = KioskPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths, &Settings::default()).unwrap();
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_full_export() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let admin = storage.users.get("admin").unwrap().unwrap();
        ProductService::new(&storage, &settings.inventory)
            .create(
                &admin,
                ProductInput {
                    name: "USB-C Hub".into(),
                    category: "Accessories".into(),
                    price: Money::from_cents(3_999),
                    quantity: 12,
                    ..Default::default()
                },
            )
            .unwrap();

        let export = FullExport::from_storage(&storage).unwrap();

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.products.len(), 4);
        assert_eq!(export.transactions.len(), 1);
        assert_eq!(export.users.len(), 1);
        assert_eq!(export.metadata.user_count, 1);
        assert!(export.metadata.earliest_transaction.is_some());
    }

    #[test]
    fn test_json_has_no_password_hashes() {
        let (_temp_dir, storage) = create_test_storage();

        let mut output = Vec::new();
        export_full_json(&storage, &mut output, true).unwrap();
        let json_string = String::from_utf8(output).unwrap();

        assert!(!json_string.contains("password_hash"));
        assert!(!json_string.contains("argon2"));

        let imported: FullExport = serde_json::from_str(&json_string).unwrap();
        assert_eq!(imported.users[0].username, "admin");
        assert_eq!(imported.products[1].name, "Wireless Mouse");
    }

    #[test]
    fn test_metadata_value() {
        let (_temp_dir, storage) = create_test_storage();
        let export = FullExport::from_storage(&storage).unwrap();

        // 999.99 × 15 + 25.50 × 42 + 45.75 × 8
        assert_eq!(export.metadata.total_stock_value, Money::from_cents(1_499_985 + 107_100 + 36_600));
        assert_eq!(export.metadata.transaction_count, 0);
        assert!(export.metadata.latest_transaction.is_none());
    }
}

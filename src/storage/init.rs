//! First-run setup
//!
//! Seeds the admin account, a small sample catalogue and the ATM account.
//! Files that already exist are left untouched.

use chrono::{TimeZone, Utc};

use crate::config::paths::KioskPaths;
use crate::config::settings::Settings;
use crate::crypto::hash_secret;
use crate::error::KioskResult;
use crate::models::{AtmAccount, Money, Product, ProductId, Role, User};

use super::file_io::write_json_atomic;
use super::products::InventoryData;
use super::transactions::TransactionData;
use super::users::UserData;

pub const DEFAULT_ADMIN_USER: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// What `initialize_storage` created on this run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InitReport {
    pub users: bool,
    pub products: bool,
    pub transactions: bool,
    pub atm: bool,
    pub settings: bool,
}

impl InitReport {
    pub fn created_anything(&self) -> bool {
        self.users || self.products || self.transactions || self.atm || self.settings
    }
}

/// Create any missing data file with its seed contents
pub fn initialize_storage(paths: &KioskPaths, settings: &Settings) -> KioskResult<InitReport> {
    paths.ensure_directories()?;
    let mut report = InitReport::default();

    if !paths.users_file().exists() {
        let admin = User::new(
            DEFAULT_ADMIN_USER,
            hash_secret(DEFAULT_ADMIN_PASSWORD)?,
            Role::Admin,
        );
        write_json_atomic(paths.users_file(), &UserData { users: vec![admin] })?;
        report.users = true;
    }

    if !paths.inventory_file().exists() {
        let data = InventoryData {
            products: sample_products(),
        };
        write_json_atomic(paths.inventory_file(), &data)?;
        report.products = true;
    }

    if !paths.transactions_file().exists() {
        write_json_atomic(paths.transactions_file(), &TransactionData::default())?;
        report.transactions = true;
    }

    if !paths.atm_file().exists() {
        let account = AtmAccount::new(
            hash_secret(&settings.atm.default_pin)?,
            settings.atm.opening_balance,
        );
        write_json_atomic(paths.atm_file(), &account)?;
        report.atm = true;
    }

    if !paths.settings_file().exists() {
        settings.save(paths)?;
        report.settings = true;
    }

    tracing::info!(?report, "storage initialized");
    Ok(report)
}

/// The starter catalogue
fn sample_products() -> Vec<Product> {
    let seeds = [
        (1, "Premium Laptop", "Electronics", 99_999, 15, 10, "High-end business laptop", (2023, 1, 1, 10, 0)),
        (2, "Wireless Mouse", "Accessories", 2_550, 42, 20, "Ergonomic wireless mouse", (2023, 1, 5, 14, 30)),
        (3, "Monitor Stand", "Furniture", 4_575, 8, 15, "Adjustable monitor stand", (2023, 1, 10, 9, 15)),
    ];

    seeds
        .into_iter()
        .map(|(number, name, category, cents, qty, threshold, description, (y, mo, d, h, mi))| {
            let mut product = Product::new(
                ProductId::from_number(number),
                name,
                category,
                Money::from_cents(cents),
                qty,
                threshold,
            );
            product.description = description.to_string();
            if let Some(stamp) = Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).single() {
                product.created_at = stamp;
                product.updated_at = stamp;
            }
            product
        })
        .collect()
}

//! Storage layer for kiosk-cli
//!
//! Each data file is owned by a repository that loads it into memory and
//! writes it back atomically. `Storage` ties the repositories together with
//! the audit log.

pub mod atm;
pub mod file_io;
pub mod init;
pub mod products;
pub mod transactions;
pub mod users;

pub use atm::AtmRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use products::ProductRepository;
pub use transactions::TransactionRepository;
pub use users::UserRepository;

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::KioskPaths;
use crate::error::{KioskError, KioskResult};

pub(crate) fn lock_poisoned<E: std::fmt::Display>(e: E) -> KioskError {
    KioskError::Storage(format!("Failed to acquire lock: {}", e))
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: KioskPaths,
    pub atm: AtmRepository,
    pub products: ProductRepository,
    pub transactions: TransactionRepository,
    pub users: UserRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a storage instance, creating the directory layout if needed
    pub fn new(paths: KioskPaths) -> KioskResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            atm: AtmRepository::new(paths.atm_file()),
            products: ProductRepository::new(paths.inventory_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            users: UserRepository::new(paths.users_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Open storage and load everything from disk
    pub fn open(paths: KioskPaths) -> KioskResult<Self> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &KioskPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn load_all(&self) -> KioskResult<()> {
        self.atm.load()?;
        self.products.load()?;
        self.transactions.load()?;
        self.users.load()?;
        tracing::debug!(base = %self.paths.base_dir().display(), "storage loaded");
        Ok(())
    }

    pub fn save_all(&self) -> KioskResult<()> {
        self.atm.save()?;
        self.products.save()?;
        self.transactions.save()?;
        self.users.save()?;
        Ok(())
    }

    /// Whether `kiosk init` has been run against this directory
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Record a newly created entity in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        actor: &str,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> KioskResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity).by(actor))
    }

    /// Record a change in the audit log, returning the diff summary
    pub fn log_update<T: Serialize>(
        &self,
        actor: &str,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> KioskResult<Option<String>> {
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        let entry = AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff.clone(),
        )
        .by(actor);
        self.audit.log(&entry)?;
        Ok(diff)
    }

    /// Record a removed entity in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        actor: &str,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> KioskResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity).by(actor))
    }
}

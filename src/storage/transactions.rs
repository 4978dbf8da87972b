//! Inventory transaction log
//!
//! `transactions.json` is an unbounded, append-only list. Each entry gets the
//! next sequential ID when it is appended.

use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::KioskResult;
use crate::models::{InventoryTransaction, ProductId, TransactionId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_poisoned;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct TransactionData {
    pub(crate) transactions: Vec<InventoryTransaction>,
}

/// Repository for the inventory transaction log
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<Vec<InventoryTransaction>>,
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    pub fn load(&self) -> KioskResult<()> {
        let file_data: TransactionData = read_json(&self.path)?;
        let mut transactions = file_data.transactions;
        transactions.sort_by_key(|t| t.id);
        *self.data.write().map_err(lock_poisoned)? = transactions;
        Ok(())
    }

    pub fn save(&self) -> KioskResult<()> {
        let data = self.data.read().map_err(lock_poisoned)?;
        let file_data = TransactionData {
            transactions: data.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Append a transaction, assigning it the next sequential ID
    pub fn append(&self, mut txn: InventoryTransaction) -> KioskResult<InventoryTransaction> {
        let mut data = self.data.write().map_err(lock_poisoned)?;
        txn.id = data.last().map(|t| t.id + 1).unwrap_or(1);
        data.push(txn.clone());
        Ok(txn)
    }

    pub fn get(&self, id: TransactionId) -> KioskResult<Option<InventoryTransaction>> {
        let data = self.data.read().map_err(lock_poisoned)?;
        Ok(data.iter().find(|t| t.id == id).cloned())
    }

    /// All transactions, oldest first
    pub fn get_all(&self) -> KioskResult<Vec<InventoryTransaction>> {
        Ok(self.data.read().map_err(lock_poisoned)?.clone())
    }

    /// The last `count` transactions, newest first
    pub fn recent(&self, count: usize) -> KioskResult<Vec<InventoryTransaction>> {
        let data = self.data.read().map_err(lock_poisoned)?;
        Ok(data.iter().rev().take(count).cloned().collect())
    }

    /// Every transaction touching one product, oldest first
    pub fn get_by_product(&self, product_id: ProductId) -> KioskResult<Vec<InventoryTransaction>> {
        let data = self.data.read().map_err(lock_poisoned)?;
        Ok(data
            .iter()
            .filter(|t| t.product_id == product_id)
            .cloned()
            .collect())
    }

    pub fn count(&self) -> KioskResult<usize> {
        Ok(self.data.read().map_err(lock_poisoned)?.len())
    }
}

//! Inventory transaction model
//!
//! Every catalogue change and stock movement is recorded as one entry in
//! the inventory transaction log. Entries are never edited or removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ProductId, TransactionId};

/// What a transaction did to the inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionAction {
    /// Product added to the catalogue
    Create,
    /// Product fields edited
    Update,
    /// Product removed from the catalogue
    Delete,
    /// Units received into stock
    Add,
    /// Units taken out of stock
    Remove,
}

impl TransactionAction {
    /// Whether this action moved units in or out of stock
    pub fn is_stock_movement(&self) -> bool {
        matches!(self, Self::Add | Self::Remove)
    }
}

impl fmt::Display for TransactionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "CREATE"),
            Self::Update => write!(f, "UPDATE"),
            Self::Delete => write!(f, "DELETE"),
            Self::Add => write!(f, "STOCK_ADD"),
            Self::Remove => write!(f, "STOCK_REMOVE"),
        }
    }
}

/// One entry in the inventory transaction log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryTransaction {
    /// Sequential identifier, assigned by the repository
    pub id: TransactionId,

    pub timestamp: DateTime<Utc>,

    /// Username of whoever performed the action
    pub user: String,

    pub action: TransactionAction,

    pub product_id: ProductId,

    /// Product name at the time of the action
    pub product_name: String,

    /// Units moved (stock actions) or on hand (catalogue actions)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,

    /// Summary of what changed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    #[serde(default)]
    pub notes: String,
}

impl InventoryTransaction {
    /// Create an entry; the repository replaces `id` when appending
    pub fn new(
        user: impl Into<String>,
        action: TransactionAction,
        product_id: ProductId,
        product_name: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            timestamp: Utc::now(),
            user: user.into(),
            action,
            product_id,
            product_name: product_name.into(),
            quantity: None,
            details: None,
            notes: String::new(),
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_details(mut self, details: Option<String>) -> Self {
        self.details = details;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

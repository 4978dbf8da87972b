//! Core data models for kiosk-cli
//!
//! This module contains the data structures for both halves of the
//! application: the ATM account and the inventory (products, stock
//! transactions and users).

pub mod atm;
pub mod ids;
pub mod money;
pub mod product;
pub mod transaction;
pub mod user;

pub use atm::{AtmAccount, AtmTransaction, AtmTransactionKind, PIN_LENGTH};
pub use ids::{ProductId, TransactionId};
pub use money::Money;
pub use product::{Product, StockStatus};
pub use transaction::{InventoryTransaction, TransactionAction};
pub use user::{Role, User};

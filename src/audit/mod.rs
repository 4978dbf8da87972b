//! Audit trail for kiosk-cli
//!
//! Every change to a product, a user or the ATM account is appended to
//! `audit.log` with a before/after snapshot. Credential hashes are stripped
//! from snapshots before they are written.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::{AuditFilter, AuditLogger};

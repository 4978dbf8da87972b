//! Credential handling for kiosk-cli
//!
//! Provides Argon2id hashing for ATM PINs and inventory passwords, and a
//! zeroizing string type for secrets entered at the terminal.

pub mod hashing;
pub mod secure_memory;

pub use hashing::{hash_secret, verify_secret};
pub use secure_memory::SecureString;

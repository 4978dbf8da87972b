//! Custom error types for kiosk-cli
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Rule violations (a wrong PIN or a stock
//! shortfall) are variants here so callers can show them as
//! short notices rather than failures.

use thiserror::Error;

use crate::models::Money;

/// The main error type for kiosk-cli operations
#[derive(Error, Debug)]
pub enum KioskError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input and data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Bad PIN, password or CAPTCHA
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The acting user's role does not allow the operation
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// ATM withdrawal would break into the reserved balance
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: Money, available: Money },

    /// Stock removal larger than the quantity on hand
    #[error("Not enough stock to remove from '{product}': requested {requested}, on hand {available}")]
    InsufficientStock {
        product: String,
        requested: u32,
        available: u32,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Hashing / secret handling errors
    #[error("Crypto error: {0}")]
    Crypto(String),
}

impl KioskError {
    /// Create a "not found" error for products
    pub fn product_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Product",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for users
    pub fn user_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Short message suitable for a one-line notice (no category prefix)
    pub fn notice(&self) -> String {
        match self {
            Self::Validation(msg) | Self::Authentication(msg) | Self::PermissionDenied(msg) => {
                msg.clone()
            }
            Self::InsufficientFunds { .. } => "Insufficient funds".to_string(),
            Self::InsufficientStock { .. } => "Not enough stock to remove".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for KioskError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for KioskError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for KioskError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Export(format!("YAML: {}", err))
    }
}

impl From<csv::Error> for KioskError {
    fn from(err: csv::Error) -> Self {
        Self::Export(format!("CSV: {}", err))
    }
}

/// Result type alias for kiosk-cli operations
pub type KioskResult<T> = Result<T, KioskError>;

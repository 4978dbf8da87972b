//! Strongly-typed identifiers
//!
//! Product IDs are short codes ("P0001") as printed on shelf labels.
//! Inventory transactions use a plain sequential number.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const PRODUCT_PREFIX: char = 'P';
const PRODUCT_DIGITS: usize = 4;

/// Identifier of a product in the catalogue, e.g. `P0007`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(u32);

impl ProductId {
    /// Create an ID from its sequence number
    pub const fn from_number(number: u32) -> Self {
        Self(number)
    }

    /// The numeric part of the ID
    pub const fn number(&self) -> u32 {
        self.0
    }

    /// The ID that follows this one
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:0width$}", PRODUCT_PREFIX, self.0, width = PRODUCT_DIGITS)
    }
}

/// Error returned when a string is not a valid product ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductIdParseError(pub String);

impl fmt::Display for ProductIdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid product ID '{}': expected 'P' followed by at least {} digits",
            self.0, PRODUCT_DIGITS
        )
    }
}

impl std::error::Error for ProductIdParseError {}

impl FromStr for ProductId {
    type Err = ProductIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix(PRODUCT_PREFIX)
            .or_else(|| trimmed.strip_prefix(PRODUCT_PREFIX.to_ascii_lowercase()))
            .ok_or_else(|| ProductIdParseError(s.to_string()))?;

        if digits.len() < PRODUCT_DIGITS || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ProductIdParseError(s.to_string()));
        }

        digits
            .parse::<u32>()
            .map(Self)
            .map_err(|_| ProductIdParseError(s.to_string()))
    }
}

impl TryFrom<String> for ProductId {
    type Error = ProductIdParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.to_string()
    }
}

/// Sequential identifier of an inventory transaction
pub type TransactionId = u64;

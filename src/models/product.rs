//! Product model
//!
//! A catalogue entry with its on-hand quantity and the reorder threshold at
//! or below which it is flagged as low stock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ProductId;
use super::money::Money;

/// Stock level classification for a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    /// Parse a status from user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "in_stock" | "in" | "ok" => Some(Self::InStock),
            "low_stock" | "low" => Some(Self::LowStock),
            "out_of_stock" | "out" | "empty" => Some(Self::OutOfStock),
            _ => None,
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InStock => write!(f, "In Stock"),
            Self::LowStock => write!(f, "Low Stock"),
            Self::OutOfStock => write!(f, "Out of Stock"),
        }
    }
}

/// A product in the inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier ("P0001")
    pub id: ProductId,

    pub name: String,

    pub category: String,

    #[serde(default)]
    pub description: String,

    /// Unit price
    pub price: Money,

    /// Units on hand
    pub quantity: u32,

    /// Reorder level; at or below this the product is low on stock
    #[serde(alias = "min_stock")]
    pub threshold: u32,

    #[serde(default)]
    pub supplier: String,

    pub created_at: DateTime<Utc>,

    #[serde(alias = "last_updated")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Create a product with empty description and supplier
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Money,
        quantity: u32,
        threshold: u32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            category: category.into(),
            description: String::new(),
            price,
            quantity,
            threshold,
            supplier: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Stock level classification
    pub fn status(&self) -> StockStatus {
        if self.quantity == 0 {
            StockStatus::OutOfStock
        } else if self.quantity <= self.threshold {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    /// Whether the product needs reordering (includes out of stock)
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.threshold
    }

    /// Units needed to bring the quantity back up to the threshold
    pub fn reorder_quantity(&self) -> u32 {
        self.threshold.saturating_sub(self.quantity)
    }

    /// Value of the units on hand
    pub fn stock_value(&self) -> Money {
        self.price.times(self.quantity)
    }

    /// Mark the product as modified now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Whether any searchable field contains `needle` (already lowercased)
    pub fn matches(&self, needle: &str) -> bool {
        [
            self.id.to_string().as_str(),
            self.name.as_str(),
            self.category.as_str(),
            self.description.as_str(),
            self.supplier.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }

    /// Validate the product data
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProductValidationError::EmptyName);
        }
        if self.category.trim().is_empty() {
            return Err(ProductValidationError::EmptyCategory);
        }
        if !self.price.is_positive() {
            return Err(ProductValidationError::NonPositivePrice);
        }
        if self.price.checked_times(self.quantity).is_none() {
            return Err(ProductValidationError::ValueTooLarge);
        }
        Ok(())
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.name)
    }
}

/// Validation errors for products
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductValidationError {
    EmptyName,
    EmptyCategory,
    NonPositivePrice,
    ValueTooLarge,
}

impl fmt::Display for ProductValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Product name is required"),
            Self::EmptyCategory => write!(f, "Category is required"),
            Self::NonPositivePrice => write!(f, "Price must be greater than 0"),
            Self::ValueTooLarge => write!(f, "Amount is too large"),
        }
    }
}

impl std::error::Error for ProductValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(quantity: u32, threshold: u32) -> Product {
        Product::new(
            ProductId::from_number(1),
            "Monitor Stand",
            "Furniture",
            Money::from_cents(4575),
            quantity,
            threshold,
        )
    }

    #[test]
    fn test_status() {
        assert_eq!(product(0, 15).status(), StockStatus::OutOfStock);
        assert_eq!(product(8, 15).status(), StockStatus::LowStock);
        assert_eq!(product(15, 15).status(), StockStatus::LowStock);
        assert_eq!(product(16, 15).status(), StockStatus::InStock);
        assert_eq!(product(0, 0).status(), StockStatus::OutOfStock);
    }

    #[test]
    fn test_reorder_quantity() {
        assert_eq!(product(8, 15).reorder_quantity(), 7);
        assert_eq!(product(20, 15).reorder_quantity(), 0);
    }

    #[test]
    fn test_stock_value() {
        assert_eq!(product(8, 15).stock_value(), Money::from_cents(36_600));
    }

    #[test]
    fn test_matches_any_field() {
        let mut p = product(8, 15);
        p.supplier = "Acme Ergonomics".into();
        assert!(p.matches("acme"));
        assert!(p.matches("furn"));
        assert!(p.matches("p0001"));
        assert!(!p.matches("laptop"));
    }

    #[test]
    fn test_validate() {
        assert!(product(1, 1).validate().is_ok());

        let mut p = product(1, 1);
        p.name = "  ".into();
        assert_eq!(p.validate(), Err(ProductValidationError::EmptyName));

        let mut p = product(1, 1);
        p.price = Money::zero();
        assert_eq!(p.validate(), Err(ProductValidationError::NonPositivePrice));

        let mut p = product(3, 1);
        p.price = Money::from_cents(i64::MAX / 2);
        assert_eq!(p.validate(), Err(ProductValidationError::ValueTooLarge));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(StockStatus::parse("low"), Some(StockStatus::LowStock));
        assert_eq!(StockStatus::parse("out-of-stock"), Some(StockStatus::OutOfStock));
        assert_eq!(StockStatus::parse("bogus"), None);
    }

    #[test]
    fn test_legacy_field_names() {
        let json = r#"{
            "id": "P0002", "name": "Wireless Mouse", "category": "Accessories",
            "price": 2550, "quantity": 42, "min_stock": 20,
            "created_at": "2023-01-05T14:30:00Z", "last_updated": "2023-01-05T14:30:00Z"
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.threshold, 20);
        assert_eq!(p.description, "");
    }
}

//! Product service
//!
//! Catalogue maintenance and stock movements. Every mutation is attributed
//! to the acting user, appended to the inventory transaction log and
//! written to the audit log.

use crate::audit::EntityType;
use crate::config::settings::InventorySettings;
use crate::error::{KioskError, KioskResult};
use crate::models::{
    InventoryTransaction, Money, Product, ProductId, StockStatus, TransactionAction, User,
};
use crate::storage::Storage;

/// Fields for a new product
#[derive(Debug, Clone, Default)]
pub struct ProductInput {
    pub name: String,
    pub category: String,
    pub price: Money,
    pub quantity: u32,
    /// Falls back to the configured default when absent
    pub threshold: Option<u32>,
    pub description: String,
    pub supplier: String,
}

/// Changes to an existing product; `None` leaves a field as it is
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Money>,
    pub quantity: Option<u32>,
    pub threshold: Option<u32>,
    pub description: Option<String>,
    pub supplier: Option<String>,
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
            && self.threshold.is_none()
            && self.description.is_none()
            && self.supplier.is_none()
    }
}

/// Convert a user-entered count, rejecting negatives with a readable message
pub fn non_negative(value: i64, field: &str) -> KioskResult<u32> {
    if value < 0 {
        return Err(KioskError::Validation(format!("{} cannot be negative", field)));
    }
    u32::try_from(value)
        .map_err(|_| KioskError::Validation(format!("{} is too large", field)))
}

/// Service for product management
pub struct ProductService<'a> {
    storage: &'a Storage,
    settings: &'a InventorySettings,
}

impl<'a> ProductService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a InventorySettings) -> Self {
        Self { storage, settings }
    }

    /// Add a product to the catalogue
    pub fn create(&self, actor: &User, input: ProductInput) -> KioskResult<Product> {
        let name = input.name.trim();
        if self.storage.products.name_exists(name, None)? {
            return Err(KioskError::Duplicate {
                entity_type: "Product",
                identifier: name.to_string(),
            });
        }

        let id = self.storage.products.next_id()?;
        let mut product = Product::new(
            id,
            name,
            input.category.trim(),
            input.price,
            input.quantity,
            input.threshold.unwrap_or(self.settings.default_threshold),
        );
        product.description = input.description.trim().to_string();
        product.supplier = input.supplier.trim().to_string();

        product
            .validate()
            .map_err(|e| KioskError::Validation(e.to_string()))?;

        self.storage.products.upsert(product.clone())?;
        self.storage.products.save()?;

        self.record(
            InventoryTransaction::new(&actor.username, TransactionAction::Create, id, &product.name)
                .with_quantity(product.quantity),
        )?;
        self.storage.log_create(
            &actor.username,
            EntityType::Product,
            id.to_string(),
            Some(product.name.clone()),
            &product,
        )?;

        tracing::info!(product = %id, name = %product.name, user = %actor.username, "product created");
        Ok(product)
    }

    /// Apply changes to a product
    pub fn update(&self, actor: &User, id: ProductId, changes: ProductUpdate) -> KioskResult<Product> {
        let before = self.require(id)?;
        if changes.is_empty() {
            return Err(KioskError::Validation("Nothing to update".into()));
        }

        let mut product = before.clone();
        if let Some(name) = changes.name {
            let name = name.trim();
            if self.storage.products.name_exists(name, Some(id))? {
                return Err(KioskError::Duplicate {
                    entity_type: "Product",
                    identifier: name.to_string(),
                });
            }
            product.name = name.to_string();
        }
        if let Some(category) = changes.category {
            product.category = category.trim().to_string();
        }
        if let Some(price) = changes.price {
            product.price = price;
        }
        if let Some(quantity) = changes.quantity {
            product.quantity = quantity;
        }
        if let Some(threshold) = changes.threshold {
            product.threshold = threshold;
        }
        if let Some(description) = changes.description {
            product.description = description.trim().to_string();
        }
        if let Some(supplier) = changes.supplier {
            product.supplier = supplier.trim().to_string();
        }

        product
            .validate()
            .map_err(|e| KioskError::Validation(e.to_string()))?;
        product.touch();

        self.storage.products.upsert(product.clone())?;
        self.storage.products.save()?;

        let diff = self.storage.log_update(
            &actor.username,
            EntityType::Product,
            id.to_string(),
            Some(product.name.clone()),
            &before,
            &product,
        )?;
        self.record(
            InventoryTransaction::new(&actor.username, TransactionAction::Update, id, &product.name)
                .with_details(diff),
        )?;

        tracing::info!(product = %id, user = %actor.username, "product updated");
        Ok(product)
    }

    /// Remove a product from the catalogue (admins only)
    pub fn delete(&self, actor: &User, id: ProductId) -> KioskResult<Product> {
        if !actor.role.is_admin() {
            return Err(KioskError::PermissionDenied(
                "Only administrators can delete products".into(),
            ));
        }

        let product = self
            .storage
            .products
            .delete(id)?
            .ok_or_else(|| KioskError::product_not_found(id.to_string()))?;
        self.storage.products.save()?;

        self.record(
            InventoryTransaction::new(&actor.username, TransactionAction::Delete, id, &product.name)
                .with_quantity(product.quantity),
        )?;
        self.storage.log_delete(
            &actor.username,
            EntityType::Product,
            id.to_string(),
            Some(product.name.clone()),
            &product,
        )?;

        tracing::info!(product = %id, user = %actor.username, "product deleted");
        Ok(product)
    }

    /// Receive stock
    pub fn add_stock(
        &self,
        actor: &User,
        id: ProductId,
        quantity: u32,
        notes: &str,
    ) -> KioskResult<Product> {
        if quantity == 0 {
            return Err(KioskError::Validation(
                "Quantity must be greater than 0".into(),
            ));
        }
        let before = self.require(id)?;
        let mut product = before.clone();
        product.quantity = product.quantity.checked_add(quantity).ok_or_else(|| {
            KioskError::Validation("Quantity is too large".into())
        })?;
        product
            .validate()
            .map_err(|e| KioskError::Validation(e.to_string()))?;

        self.move_stock(actor, before, product, TransactionAction::Add, quantity, notes)
    }

    /// Issue stock; the quantity on hand can never go below zero
    pub fn remove_stock(
        &self,
        actor: &User,
        id: ProductId,
        quantity: u32,
        notes: &str,
    ) -> KioskResult<Product> {
        if quantity == 0 {
            return Err(KioskError::Validation(
                "Quantity must be greater than 0".into(),
            ));
        }
        let before = self.require(id)?;
        if quantity > before.quantity {
            tracing::info!(product = %id, requested = quantity, on_hand = before.quantity, "stock removal refused");
            return Err(KioskError::InsufficientStock {
                product: before.name.clone(),
                requested: quantity,
                available: before.quantity,
            });
        }
        let mut product = before.clone();
        product.quantity -= quantity;

        self.move_stock(actor, before, product, TransactionAction::Remove, quantity, notes)
    }

    fn move_stock(
        &self,
        actor: &User,
        before: Product,
        mut product: Product,
        action: TransactionAction,
        quantity: u32,
        notes: &str,
    ) -> KioskResult<Product> {
        product.touch();
        self.storage.products.upsert(product.clone())?;
        self.storage.products.save()?;

        self.record(
            InventoryTransaction::new(&actor.username, action, product.id, &product.name)
                .with_quantity(quantity)
                .with_details(Some(format!("{} -> {}", before.quantity, product.quantity)))
                .with_notes(notes.trim()),
        )?;
        self.storage.log_update(
            &actor.username,
            EntityType::Product,
            product.id.to_string(),
            Some(product.name.clone()),
            &before,
            &product,
        )?;

        tracing::info!(
            product = %product.id,
            action = %action,
            quantity,
            on_hand = product.quantity,
            user = %actor.username,
            "stock moved"
        );
        Ok(product)
    }

    pub fn get(&self, id: ProductId) -> KioskResult<Option<Product>> {
        self.storage.products.get(id)
    }

    /// Find a product by ID ("P0002") or by name
    pub fn find(&self, identifier: &str) -> KioskResult<Option<Product>> {
        if let Ok(id) = identifier.trim().parse::<ProductId>() {
            if let Some(product) = self.storage.products.get(id)? {
                return Ok(Some(product));
            }
        }
        self.storage.products.get_by_name(identifier)
    }

    /// Like [`find`](Self::find), but a missing product is an error
    pub fn resolve(&self, identifier: &str) -> KioskResult<Product> {
        self.find(identifier)?
            .ok_or_else(|| KioskError::product_not_found(identifier.trim()))
    }

    /// All products, ordered by ID
    pub fn list(&self) -> KioskResult<Vec<Product>> {
        self.storage.products.get_all()
    }

    pub fn categories(&self) -> KioskResult<Vec<String>> {
        self.storage.products.categories()
    }

    /// Case-insensitive substring search across the text fields
    pub fn search(&self, query: &str) -> KioskResult<Vec<Product>> {
        let needle = query.trim().to_lowercase();
        let products = self.list()?;
        if needle.is_empty() {
            return Ok(products);
        }
        Ok(products.into_iter().filter(|p| p.matches(&needle)).collect())
    }

    pub fn filter_by_category(&self, category: &str) -> KioskResult<Vec<Product>> {
        let category = category.trim();
        Ok(self
            .list()?
            .into_iter()
            .filter(|p| p.category.eq_ignore_ascii_case(category))
            .collect())
    }

    pub fn filter_by_status(&self, status: StockStatus) -> KioskResult<Vec<Product>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|p| p.status() == status)
            .collect())
    }

    fn require(&self, id: ProductId) -> KioskResult<Product> {
        self.storage
            .products
            .get(id)?
            .ok_or_else(|| KioskError::product_not_found(id.to_string()))
    }

    fn record(&self, txn: InventoryTransaction) -> KioskResult<()> {
        self.storage.transactions.append(txn)?;
        self.storage.transactions.save()
    }
}

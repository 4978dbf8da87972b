//! Product repository
//!
//! Holds the catalogue from `inventory.json` keyed by product ID.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::KioskResult;
use crate::models::{Product, ProductId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_poisoned;

/// On-disk layout of inventory.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct InventoryData {
    pub(crate) products: Vec<Product>,
}

/// Repository for product persistence
pub struct ProductRepository {
    path: PathBuf,
    data: RwLock<BTreeMap<ProductId, Product>>,
}

impl ProductRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load products from disk
    pub fn load(&self) -> KioskResult<()> {
        let file_data: InventoryData = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_poisoned)?;
        data.clear();
        for product in file_data.products {
            data.insert(product.id, product);
        }
        Ok(())
    }

    /// Save products to disk, ordered by ID
    pub fn save(&self) -> KioskResult<()> {
        let data = self.data.read().map_err(lock_poisoned)?;
        let file_data = InventoryData {
            products: data.values().cloned().collect(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: ProductId) -> KioskResult<Option<Product>> {
        Ok(self.data.read().map_err(lock_poisoned)?.get(&id).cloned())
    }

    /// All products, ordered by ID
    pub fn get_all(&self) -> KioskResult<Vec<Product>> {
        Ok(self.data.read().map_err(lock_poisoned)?.values().cloned().collect())
    }

    /// Look up a product by name (case-insensitive, surrounding whitespace ignored)
    pub fn get_by_name(&self, name: &str) -> KioskResult<Option<Product>> {
        let wanted = name.trim().to_lowercase();
        Ok(self
            .data
            .read()
            .map_err(lock_poisoned)?
            .values()
            .find(|p| p.name.to_lowercase() == wanted)
            .cloned())
    }

    /// Whether another product already uses `name`
    pub fn name_exists(&self, name: &str, exclude: Option<ProductId>) -> KioskResult<bool> {
        Ok(self
            .get_by_name(name)?
            .is_some_and(|p| Some(p.id) != exclude))
    }

    /// Distinct category names, sorted
    pub fn categories(&self) -> KioskResult<Vec<String>> {
        let data = self.data.read().map_err(lock_poisoned)?;
        let set: BTreeSet<String> = data.values().map(|p| p.category.clone()).collect();
        Ok(set.into_iter().collect())
    }

    /// One past the highest ID in use (P0001 for an empty catalogue)
    pub fn next_id(&self) -> KioskResult<ProductId> {
        let data = self.data.read().map_err(lock_poisoned)?;
        Ok(data
            .keys()
            .next_back()
            .map(ProductId::next)
            .unwrap_or(ProductId::from_number(1)))
    }

    pub fn upsert(&self, product: Product) -> KioskResult<()> {
        self.data
            .write()
            .map_err(lock_poisoned)?
            .insert(product.id, product);
        Ok(())
    }

    /// Remove a product, returning it if it existed
    pub fn delete(&self, id: ProductId) -> KioskResult<Option<Product>> {
        Ok(self.data.write().map_err(lock_poisoned)?.remove(&id))
    }

    pub fn count(&self) -> KioskResult<usize> {
        Ok(self.data.read().map_err(lock_poisoned)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn repo() -> (ProductRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let repo = ProductRepository::new(temp_dir.path().join("inventory.json"));
        repo.load().unwrap();
        (repo, temp_dir)
    }

    fn product(number: u32, name: &str, category: &str) -> Product {
        Product::new(
            ProductId::from_number(number),
            name,
            category,
            Money::from_dollars(10),
            5,
            2,
        )
    }

    #[test]
    fn test_next_id_is_max_plus_one() {
        let (repo, _temp) = repo();
        assert_eq!(repo.next_id().unwrap().to_string(), "P0001");

        repo.upsert(product(1, "A", "X")).unwrap();
        repo.upsert(product(7, "B", "X")).unwrap();
        repo.upsert(product(3, "C", "X")).unwrap();
        assert_eq!(repo.next_id().unwrap().to_string(), "P0008");

        repo.delete(ProductId::from_number(7)).unwrap();
        assert_eq!(repo.next_id().unwrap().to_string(), "P0004");
    }

    #[test]
    fn test_name_lookup_case_insensitive() {
        let (repo, _temp) = repo();
        repo.upsert(product(1, "Wireless Mouse", "Accessories")).unwrap();

        assert!(repo.get_by_name(" wireless MOUSE ").unwrap().is_some());
        assert!(repo.name_exists("WIRELESS mouse", None).unwrap());
        assert!(!repo
            .name_exists("Wireless Mouse", Some(ProductId::from_number(1)))
            .unwrap());
    }

    #[test]
    fn test_categories_sorted_unique() {
        let (repo, _temp) = repo();
        repo.upsert(product(1, "A", "Furniture")).unwrap();
        repo.upsert(product(2, "B", "Electronics")).unwrap();
        repo.upsert(product(3, "C", "Furniture")).unwrap();

        assert_eq!(repo.categories().unwrap(), vec!["Electronics", "Furniture"]);
    }

    #[test]
    fn test_save_and_reload() {
        let (repo, temp) = repo();
        repo.upsert(product(2, "B", "X")).unwrap();
        repo.upsert(product(1, "A", "X")).unwrap();
        repo.save().unwrap();

        let reloaded = ProductRepository::new(temp.path().join("inventory.json"));
        reloaded.load().unwrap();
        let all = reloaded.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "A");
    }
}

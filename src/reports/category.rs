//! Category analysis report

use std::collections::BTreeMap;
use std::io::Write;

use crate::error::KioskResult;
use crate::models::{Money, Product};
use crate::storage::Storage;

use super::summary::{decimal, share};

#[derive(Debug, Clone)]
pub struct CategoryRow {
    pub category: String,
    pub product_count: usize,
    pub total_units: u64,
    pub total_value: Money,
    pub low_stock_count: usize,
    pub value_percentage: f64,
}

/// Per-category counts and values, largest categories first
#[derive(Debug, Clone)]
pub struct CategoryAnalysisReport {
    pub rows: Vec<CategoryRow>,
    pub total_value: Money,
}

impl CategoryAnalysisReport {
    pub fn generate(storage: &Storage) -> KioskResult<Self> {
        Ok(Self::from_products(&storage.products.get_all()?))
    }

    pub fn from_products(products: &[Product]) -> Self {
        let total_value: Money = products.iter().map(Product::stock_value).sum();

        let mut grouped: BTreeMap<&str, Vec<&Product>> = BTreeMap::new();
        for product in products {
            grouped.entry(product.category.as_str()).or_default().push(product);
        }

        let mut rows: Vec<CategoryRow> = grouped
            .into_iter()
            .map(|(category, items)| {
                let value: Money = items.iter().map(|p| p.stock_value()).sum();
                CategoryRow {
                    category: category.to_string(),
                    product_count: items.len(),
                    total_units: items.iter().map(|p| u64::from(p.quantity)).sum(),
                    total_value: value,
                    low_stock_count: items.iter().filter(|p| p.is_low_stock()).count(),
                    value_percentage: share(value, total_value),
                }
            })
            .collect();

        rows.sort_by(|a, b| {
            b.product_count
                .cmp(&a.product_count)
                .then_with(|| a.category.cmp(&b.category))
        });

        Self { rows, total_value }
    }

    pub fn format_terminal(&self) -> String {
        let mut output = String::new();
        output.push_str("Category Analysis\n");
        output.push_str(&"=".repeat(72));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No products in inventory.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<22} {:>8} {:>8} {:>16} {:>6} {:>7}\n",
            "Category", "Products", "Units", "Value", "Low", "%"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');
        for row in &self.rows {
            output.push_str(&format!(
                "{:<22} {:>8} {:>8} {:>16} {:>6} {:>6.1}%\n",
                row.category,
                row.product_count,
                row.total_units,
                row.total_value.to_string(),
                row.low_stock_count,
                row.value_percentage
            ));
        }
        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!("{:<22} {:>34}\n", "TOTAL", self.total_value.to_string()));
        output
    }

    pub fn export_csv<W: Write>(&self, writer: W) -> KioskResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Category", "Products", "Units", "Value", "Low Stock", "Percentage"])?;
        for row in &self.rows {
            csv.write_record([
                row.category.clone(),
                row.product_count.to_string(),
                row.total_units.to_string(),
                decimal(row.total_value),
                row.low_stock_count.to_string(),
                format!("{:.2}", row.value_percentage),
            ])?;
        }
        csv.flush()?;
        Ok(())
    }
}

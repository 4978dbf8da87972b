//! Value distribution report
//!
//! Ranks products by the value of the stock on hand. The terminal view adds
//! a proportional bar per product.

use std::io::Write;

use crate::error::KioskResult;
use crate::models::{Money, Product, ProductId};
use crate::storage::Storage;

use super::summary::{decimal, share};

const BAR_WIDTH: usize = 30;

#[derive(Debug, Clone)]
pub struct ValueRow {
    pub id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub value: Money,
    pub percentage: f64,
}

/// Value distribution report
#[derive(Debug, Clone)]
pub struct ValueDistributionReport {
    /// Sorted by value, highest first
    pub rows: Vec<ValueRow>,
    pub total_value: Money,
}

impl ValueDistributionReport {
    pub fn generate(storage: &Storage) -> KioskResult<Self> {
        Ok(Self::from_products(&storage.products.get_all()?))
    }

    pub fn from_products(products: &[Product]) -> Self {
        let total_value: Money = products.iter().map(Product::stock_value).sum();

        let mut rows: Vec<ValueRow> = products
            .iter()
            .map(|p| ValueRow {
                id: p.id,
                name: p.name.clone(),
                quantity: p.quantity,
                unit_price: p.price,
                value: p.stock_value(),
                percentage: share(p.stock_value(), total_value),
            })
            .collect();
        rows.sort_by(|a, b| b.value.cmp(&a.value).then(a.id.cmp(&b.id)));

        Self { rows, total_value }
    }

    /// The product holding the most value, if there are any products
    pub fn most_valuable(&self) -> Option<&ValueRow> {
        self.rows.first()
    }

    pub fn product_count(&self) -> usize {
        self.rows.len()
    }

    pub fn format_terminal(&self) -> String {
        let mut output = String::new();
        output.push_str("Value Distribution\n");
        output.push_str(&"=".repeat(80));
        output.push('\n');

        let Some(top) = self.most_valuable() else {
            output.push_str("No products in inventory.\n");
            return output;
        };

        output.push_str(&format!("Total Value:    {}\n", self.total_value));
        output.push_str(&format!("Products:       {}\n", self.product_count()));
        output.push_str(&format!("Most Valuable:  {} ({})\n\n", top.name, top.value));

        let scale = i128::from(top.value.cents().max(1));
        for row in &self.rows {
            let filled = (i128::from(row.value.cents().max(0)) * BAR_WIDTH as i128 / scale) as usize;
            output.push_str(&format!(
                "{:<24} {:>14} {:>6.1}% {}\n",
                super::low_stock::truncate(&row.name, 24),
                row.value.to_string(),
                row.percentage,
                "#".repeat(filled)
            ));
        }
        output
    }

    pub fn export_csv<W: Write>(&self, writer: W) -> KioskResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["ID", "Name", "Quantity", "Unit Price", "Value", "Percentage"])?;
        for row in &self.rows {
            csv.write_record([
                row.id.to_string(),
                row.name.clone(),
                row.quantity.to_string(),
                decimal(row.unit_price),
                decimal(row.value),
                format!("{:.2}", row.percentage),
            ])?;
        }
        csv.flush()?;
        Ok(())
    }
}

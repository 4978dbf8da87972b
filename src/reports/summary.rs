//! Inventory summary report
//!
//! Headline numbers for the whole catalogue plus stock value per category.

use std::collections::BTreeMap;
use std::io::Write;

use crate::error::KioskResult;
use crate::models::{Money, Product, StockStatus};
use crate::storage::Storage;

/// Stock value held in one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryValue {
    pub category: String,
    pub value: Money,
    /// Share of the total inventory value, 0-100
    pub percentage: f64,
}

/// Inventory summary report
#[derive(Debug, Clone)]
pub struct InventorySummaryReport {
    pub total_products: usize,
    pub total_units: u64,
    pub total_value: Money,
    /// Products at or below their threshold (includes out of stock)
    pub low_stock_count: usize,
    pub out_of_stock_count: usize,
    pub category_count: usize,
    /// Sorted by value, highest first
    pub by_category: Vec<CategoryValue>,
}

impl InventorySummaryReport {
    pub fn generate(storage: &Storage) -> KioskResult<Self> {
        Ok(Self::from_products(&storage.products.get_all()?))
    }

    pub fn from_products(products: &[Product]) -> Self {
        let total_value: Money = products.iter().map(Product::stock_value).sum();

        let mut values: BTreeMap<&str, Money> = BTreeMap::new();
        for product in products {
            *values.entry(product.category.as_str()).or_default() += product.stock_value();
        }

        let mut by_category: Vec<CategoryValue> = values
            .into_iter()
            .map(|(category, value)| CategoryValue {
                category: category.to_string(),
                value,
                percentage: share(value, total_value),
            })
            .collect();
        by_category.sort_by(|a, b| b.value.cmp(&a.value).then(a.category.cmp(&b.category)));

        Self {
            total_products: products.len(),
            total_units: products.iter().map(|p| u64::from(p.quantity)).sum(),
            total_value,
            low_stock_count: products.iter().filter(|p| p.is_low_stock()).count(),
            out_of_stock_count: products
                .iter()
                .filter(|p| p.status() == StockStatus::OutOfStock)
                .count(),
            category_count: by_category.len(),
            by_category,
        }
    }

    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Inventory Summary\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("Total Products:   {}\n", self.total_products));
        output.push_str(&format!("Total Units:      {}\n", self.total_units));
        output.push_str(&format!("Total Value:      {}\n", self.total_value));
        output.push_str(&format!("Low Stock Items:  {}\n", self.low_stock_count));
        output.push_str(&format!("Out of Stock:     {}\n", self.out_of_stock_count));
        output.push_str(&format!("Categories:       {}\n\n", self.category_count));

        if self.by_category.is_empty() {
            output.push_str("No products in inventory.\n");
            return output;
        }

        output.push_str(&format!("{:<30} {:>16} {:>8}\n", "Category", "Value", "%"));
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for row in &self.by_category {
            output.push_str(&format!(
                "{:<30} {:>16} {:>7.1}%\n",
                row.category,
                row.value.to_string(),
                row.percentage
            ));
        }

        output
    }

    pub fn export_csv<W: Write>(&self, writer: W) -> KioskResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Category", "Value", "Percentage"])?;
        for row in &self.by_category {
            csv.write_record([
                row.category.clone(),
                decimal(row.value),
                format!("{:.2}", row.percentage),
            ])?;
        }
        csv.write_record([
            "TOTAL".to_string(),
            decimal(self.total_value),
            if self.total_value.is_zero() { "0.00" } else { "100.00" }.to_string(),
        ])?;
        csv.flush()?;
        Ok(())
    }
}

/// Percentage of `part` in `whole`; zero when `whole` is zero
pub(crate) fn share(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        0.0
    } else {
        part.cents() as f64 / whole.cents() as f64 * 100.0
    }
}

/// Plain decimal amount for CSV cells ("1234.50")
pub(crate) fn decimal(amount: Money) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    format!("{}{}.{:02}", sign, amount.dollars().abs(), amount.cents_part())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::tests::sample_products;

    #[test]
    fn test_totals() {
        let report = InventorySummaryReport::from_products(&sample_products());

        assert_eq!(report.total_products, 4);
        // 15*999.99 + 42*25.50 + 8*45.75 + 0*12.00
        assert_eq!(report.total_value, Money::from_cents(1_499_985 + 107_100 + 36_600));
        assert_eq!(report.total_units, 65);
        assert_eq!(report.low_stock_count, 2);
        assert_eq!(report.out_of_stock_count, 1);
        assert_eq!(report.category_count, 3);
    }

    #[test]
    fn test_category_values_sorted() {
        let report = InventorySummaryReport::from_products(&sample_products());
        let names: Vec<_> = report.by_category.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Electronics", "Accessories", "Furniture"]);

        let sum: Money = report.by_category.iter().map(|c| c.value).sum();
        assert_eq!(sum, report.total_value);
    }

    #[test]
    fn test_empty_inventory() {
        let report = InventorySummaryReport::from_products(&[]);
        assert_eq!(report.total_value, Money::zero());
        assert!(report.format_terminal().contains("No products"));
    }

    #[test]
    fn test_csv_export() {
        let report = InventorySummaryReport::from_products(&sample_products());
        let mut buf = Vec::new();
        report.export_csv(&mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Category,Value,Percentage\n"));
        assert!(text.contains("Furniture,366.00,"));
        assert!(text.ends_with("TOTAL,16436.85,100.00\n"));
    }

    #[test]
    fn test_huge_values_saturate() {
        use crate::models::ProductId;

        let mut products = sample_products();
        products.push(Product::new(
            ProductId::from_number(9),
            "Vault",
            "Safes",
            Money::from_cents(i64::MAX / 2),
            3,
            0,
        ));

        let report = InventorySummaryReport::from_products(&products);
        assert_eq!(report.total_value, Money::from_cents(i64::MAX));
        assert_eq!(report.by_category[0].category, "Safes");
        assert!(report.format_terminal().contains("Inventory Summary"));
    }

    #[test]
    fn test_decimal() {
        assert_eq!(decimal(Money::from_cents(5)), "0.05");
        assert_eq!(decimal(Money::from_cents(-1250)), "-12.50");
    }
}

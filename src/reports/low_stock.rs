//! Low stock report
//!
//! Items at or below their reorder threshold, most urgent first.

use std::io::Write;

use crate::error::KioskResult;
use crate::models::{Product, ProductId, StockStatus};
use crate::storage::Storage;

#[derive(Debug, Clone)]
pub struct LowStockRow {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub threshold: u32,
    pub to_order: u32,
    pub status: StockStatus,
    /// quantity / threshold; 0 when the threshold is 0
    pub ratio: f64,
}

/// Low stock report
#[derive(Debug, Clone)]
pub struct LowStockReport {
    pub rows: Vec<LowStockRow>,
}

impl LowStockReport {
    pub fn generate(storage: &Storage) -> KioskResult<Self> {
        Ok(Self::from_products(&storage.products.get_all()?))
    }

    pub fn from_products(products: &[Product]) -> Self {
        let mut rows: Vec<LowStockRow> = products
            .iter()
            .filter(|p| p.is_low_stock())
            .map(|p| LowStockRow {
                id: p.id,
                name: p.name.clone(),
                category: p.category.clone(),
                quantity: p.quantity,
                threshold: p.threshold,
                to_order: p.reorder_quantity(),
                status: p.status(),
                ratio: if p.threshold == 0 {
                    0.0
                } else {
                    f64::from(p.quantity) / f64::from(p.threshold)
                },
            })
            .collect();

        rows.sort_by(|a, b| a.ratio.total_cmp(&b.ratio).then(a.id.cmp(&b.id)));
        Self { rows }
    }

    /// Total units needed to bring every listed item back to its threshold
    pub fn total_to_order(&self) -> u64 {
        self.rows.iter().map(|r| u64::from(r.to_order)).sum()
    }

    pub fn format_terminal(&self) -> String {
        let mut output = String::new();
        output.push_str("Low Stock Report\n");
        output.push_str(&"=".repeat(78));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("All products are above their reorder threshold.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<6} {:<26} {:<14} {:>7} {:>9} {:>9}\n",
            "ID", "Name", "Category", "On Hand", "Threshold", "To Order"
        ));
        output.push_str(&"-".repeat(78));
        output.push('\n');
        for row in &self.rows {
            output.push_str(&format!(
                "{:<6} {:<26} {:<14} {:>7} {:>9} {:>9}{}\n",
                row.id.to_string(),
                truncate(&row.name, 26),
                truncate(&row.category, 14),
                row.quantity,
                row.threshold,
                row.to_order,
                if row.status == StockStatus::OutOfStock { "  OUT" } else { "" }
            ));
        }
        output.push_str(&"-".repeat(78));
        output.push('\n');
        output.push_str(&format!(
            "{} item(s) need attention, {} unit(s) to order\n",
            self.rows.len(),
            self.total_to_order()
        ));
        output
    }

    pub fn export_csv<W: Write>(&self, writer: W) -> KioskResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["ID", "Name", "Category", "Quantity", "Threshold", "To Order", "Status"])?;
        for row in &self.rows {
            csv.write_record([
                row.id.to_string(),
                row.name.clone(),
                row.category.clone(),
                row.quantity.to_string(),
                row.threshold.to_string(),
                row.to_order.to_string(),
                row.status.to_string(),
            ])?;
        }
        csv.flush()?;
        Ok(())
    }
}

pub(crate) fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let head: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::tests::sample_products;

    #[test]
    fn test_only_low_items_most_urgent_first() {
        let report = LowStockReport::from_products(&sample_products());
        let names: Vec<_> = report.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["HDMI Cable", "Monitor Stand"]);

        assert_eq!(report.rows[0].to_order, 5);
        assert_eq!(report.rows[1].to_order, 7);
        assert_eq!(report.total_to_order(), 12);
    }

    #[test]
    fn test_zero_threshold() {
        let mut products = sample_products();
        products[3].threshold = 0;
        let report = LowStockReport::from_products(&products);

        let cable = report.rows.iter().find(|r| r.name == "HDMI Cable").unwrap();
        assert_eq!(cable.ratio, 0.0);
        assert_eq!(cable.to_order, 0);
    }

    #[test]
    fn test_terminal_and_csv() {
        let report = LowStockReport::from_products(&sample_products());
        assert!(report.format_terminal().contains("12 unit(s) to order"));

        let mut buf = Vec::new();
        report.export_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("P0003,Monitor Stand,Furniture,8,15,7,Low Stock"));
    }

    #[test]
    fn test_nothing_low() {
        let report = LowStockReport::from_products(&sample_products()[..2]);
        assert!(report.rows.is_empty());
        assert!(report.format_terminal().contains("above their reorder threshold"));
    }
}

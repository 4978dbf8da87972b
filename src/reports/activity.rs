//! Recent inventory activity

use std::io::Write;

use crate::error::KioskResult;
use crate::export::csv::write_transactions_csv;
use crate::models::InventoryTransaction;
use crate::storage::Storage;

/// The latest inventory transactions, newest first
#[derive(Debug, Clone)]
pub struct ActivityReport {
    pub entries: Vec<InventoryTransaction>,
}

impl ActivityReport {
    pub fn generate(storage: &Storage, limit: usize) -> KioskResult<Self> {
        Ok(Self {
            entries: storage.transactions.recent(limit)?,
        })
    }

    pub fn format_terminal(&self, date_format: &str) -> String {
        let mut output = String::new();
        output.push_str("Recent Activity\n");
        output.push_str(&"=".repeat(80));
        output.push('\n');

        if self.entries.is_empty() {
            output.push_str("No activity recorded yet.\n");
            return output;
        }

        for txn in &self.entries {
            let quantity = txn.quantity.map(|q| format!(" x{}", q)).unwrap_or_default();
            output.push_str(&format!(
                "{:>5}  {}  {:<12} {:<13} {} {}{}\n",
                txn.id,
                txn.timestamp.format(date_format),
                txn.user,
                txn.action.to_string(),
                txn.product_id,
                txn.product_name,
                quantity
            ));
            if let Some(details) = &txn.details {
                output.push_str(&format!("       {}\n", details));
            }
            if !txn.notes.is_empty() {
                output.push_str(&format!("       note: {}\n", txn.notes));
            }
        }
        output
    }

    pub fn export_csv<W: Write>(&self, writer: W) -> KioskResult<()> {
        write_transactions_csv(&self.entries, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::KioskPaths;
    use crate::models::{ProductId, TransactionAction};
    use tempfile::TempDir;

    #[test]
    fn test_newest_first_with_limit() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::open(KioskPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        for i in 1..=12 {
            storage
                .transactions
                .append(
                    InventoryTransaction::new("admin", TransactionAction::Add, ProductId::from_number(i), "Item")
                        .with_quantity(i),
                )
                .unwrap();
        }

        let report = ActivityReport::generate(&storage, 10).unwrap();
        assert_eq!(report.entries.len(), 10);
        assert_eq!(report.entries[0].id, 12);
        assert_eq!(report.entries[9].id, 3);

        let text = report.format_terminal("%Y-%m-%d");
        assert!(text.contains("STOCK_ADD"));
        assert!(text.contains("P0012 Item x12"));
    }

    #[test]
    fn test_empty() {
        let report = ActivityReport { entries: vec![] };
        assert!(report.format_terminal("%Y").contains("No activity"));
    }
}

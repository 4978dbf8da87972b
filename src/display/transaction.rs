//! Inventory transaction display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::InventoryTransaction;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "#")]
    id: u64,
    #[tabled(rename = "When")]
    timestamp: String,
    #[tabled(rename = "User")]
    user: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Product")]
    product: String,
    #[tabled(rename = "Qty")]
    quantity: String,
    #[tabled(rename = "Details")]
    details: String,
}

/// Format inventory transactions as a table in the given order
pub fn format_transaction_table(transactions: &[InventoryTransaction], date_format: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions.iter().map(|txn| {
        let mut details = txn.details.clone().unwrap_or_default();
        if !txn.notes.is_empty() {
            if !details.is_empty() {
                details.push_str("; ");
            }
            details.push_str(&txn.notes);
        }
        TransactionRow {
            id: txn.id,
            timestamp: txn.timestamp.format(date_format).to_string(),
            user: txn.user.clone(),
            action: txn.action.to_string(),
            product: format!("{} {}", txn.product_id, txn.product_name),
            quantity: txn.quantity.map(|q| q.to_string()).unwrap_or_default(),
            details,
        }
    });

    let mut output = Table::new(rows).with(Style::psql()).to_string();
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProductId, TransactionAction};

    #[test]
    fn test_transaction_table() {
        let mut txn = InventoryTransaction::new(
            "clerk",
            TransactionAction::Remove,
            ProductId::from_number(2),
            "Wireless Mouse",
        )
        .with_quantity(5)
        .with_details(Some("42 -> 37".into()))
        .with_notes("damaged");
        txn.id = 3;

        let table = format_transaction_table(&[txn], "%Y-%m-%d");
        assert!(table.contains("STOCK_REMOVE"));
        assert!(table.contains("P0002 Wireless Mouse"));
        assert!(table.contains("42 -> 37; damaged"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(format_transaction_table(&[], "%Y"), "No transactions found.\n");
    }
}

//! CSV Export functionality
//!
//! Exports the product catalogue and the inventory transaction log in a
//! spreadsheet-friendly layout. Amounts are plain decimals without a
//! currency symbol.

use std::io::Write;

use crate::error::KioskResult;
use crate::models::InventoryTransaction;
use crate::reports::summary::decimal;
use crate::storage::Storage;

/// Export every product, ordered by ID
pub fn export_products_csv<W: Write>(storage: &Storage, writer: W) -> KioskResult<()> {
    let products = storage.products.get_all()?;

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "ID",
        "Name",
        "Category",
        "Price",
        "Quantity",
        "Min Stock",
        "Status",
        "Stock Value",
        "Supplier",
        "Description",
        "Created",
        "Last Updated",
    ])?;

    for product in &products {
        csv.write_record([
            product.id.to_string(),
            product.name.clone(),
            product.category.clone(),
            decimal(product.price),
            product.quantity.to_string(),
            product.threshold.to_string(),
            product.status().to_string(),
            decimal(product.stock_value()),
            product.supplier.clone(),
            product.description.clone(),
            product.created_at.to_rfc3339(),
            product.updated_at.to_rfc3339(),
        ])?;
    }
    csv.flush()?;

    tracing::debug!(rows = products.len(), "exported products to CSV");
    Ok(())
}

/// Export the whole inventory transaction log, oldest first
pub fn export_transactions_csv<W: Write>(storage: &Storage, writer: W) -> KioskResult<()> {
    let transactions = storage.transactions.get_all()?;
    write_transactions_csv(&transactions, writer)?;
    tracing::debug!(rows = transactions.len(), "exported transactions to CSV");
    Ok(())
}

/// Write inventory transactions in the given order
pub fn write_transactions_csv<W: Write>(
    transactions: &[InventoryTransaction],
    writer: W,
) -> KioskResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "ID",
        "Timestamp",
        "User",
        "Action",
        "Product ID",
        "Product",
        "Quantity",
        "Details",
        "Notes",
    ])?;

    for txn in transactions {
        csv.write_record([
            txn.id.to_string(),
            txn.timestamp.to_rfc3339(),
            txn.user.clone(),
            txn.action.to_string(),
            txn.product_id.to_string(),
            txn.product_name.clone(),
            txn.quantity.map(|q| q.to_string()).unwrap_or_default(),
            txn.details.clone().unwrap_or_default(),
            txn.notes.clone(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

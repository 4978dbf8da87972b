//! Product display formatting
//!
//! Formats the catalogue for terminal output in table and detail views.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::Product;

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Min")]
    threshold: u32,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price.to_string(),
            quantity: product.quantity,
            threshold: product.threshold,
            status: product.status().to_string(),
        }
    }
}

/// Format products as a table, one row per product
pub fn format_product_table(products: &[Product]) -> String {
    if products.is_empty() {
        return "No products found.\n".to_string();
    }

    let mut table = Table::new(products.iter().map(ProductRow::from));
    table
        .with(Style::psql())
        .modify(Columns::new(3..6), Alignment::right());

    let mut output = table.to_string();
    output.push_str(&format!("\n{} product(s)\n", products.len()));
    output
}

/// Format a single product's details
pub fn format_product_details(product: &Product, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Product: {}\n", product.name));
    output.push_str(&format!("  ID:          {}\n", product.id));
    output.push_str(&format!("  Category:    {}\n", product.category));
    output.push_str(&format!("  Price:       {}\n", product.price));
    output.push_str(&format!("  Quantity:    {}\n", product.quantity));
    output.push_str(&format!("  Min Stock:   {}\n", product.threshold));
    output.push_str(&format!("  Status:      {}\n", product.status()));
    output.push_str(&format!("  Stock Value: {}\n", product.stock_value()));

    if !product.supplier.is_empty() {
        output.push_str(&format!("  Supplier:    {}\n", product.supplier));
    }
    if !product.description.is_empty() {
        output.push('\n');
        output.push_str(&format!("  {}\n", product.description));
    }

    output.push('\n');
    output.push_str(&format!(
        "  Created:  {}\n",
        product.created_at.format(date_format)
    ));
    output.push_str(&format!(
        "  Modified: {}\n",
        product.updated_at.format(date_format)
    ));

    output
}

/// Format category names, one per line
pub fn format_category_list(categories: &[String]) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    let mut output = String::new();
    for category in categories {
        output.push_str(&format!("  {}\n", category));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, ProductId};

    fn product(number: u32, name: &str, quantity: u32, threshold: u32) -> Product {
        Product::new(
            ProductId::from_number(number),
            name,
            "Electronics",
            Money::from_cents(2550),
            quantity,
            threshold,
        )
    }

    #[test]
    fn test_product_table() {
        let products = vec![
            product(1, "Wireless Mouse", 42, 20),
            product(2, "Monitor Stand", 8, 15),
            product(3, "HDMI Cable", 0, 5),
        ];

        let table = format_product_table(&products);
        assert!(table.contains("Wireless Mouse"));
        assert!(table.contains("P0002"));
        assert!(table.contains("$25.50"));
        assert!(table.contains("In Stock"));
        assert!(table.contains("Low Stock"));
        assert!(table.contains("Out of Stock"));
        assert!(table.contains("3 product(s)"));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_product_table(&[]), "No products found.\n");
    }

    #[test]
    fn test_product_details() {
        let mut p = product(7, "USB-C Hub", 12, 10);
        p.supplier = "Acme".into();
        let details = format_product_details(&p, "%Y-%m-%d");

        assert!(details.contains("Product: USB-C Hub"));
        assert!(details.contains("ID:          P0007"));
        assert!(details.contains("Supplier:    Acme"));
        assert!(details.contains("Stock Value: $306.00"));
    }
}

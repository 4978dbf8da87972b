//! Product CLI commands
//!
//! Implements CLI commands for catalogue management.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_category_list, format_product_details, format_product_table};
use crate::error::{KioskError, KioskResult};
use crate::models::money::MoneyParseError;
use crate::models::{Money, StockStatus, User};
use crate::services::product::non_negative;
use crate::services::{ProductInput, ProductService, ProductUpdate};
use crate::storage::Storage;

/// Product subcommands
#[derive(Subcommand)]
pub enum ProductCommands {
    /// Add a product to the catalogue
    Add {
        /// Product name (must be unique)
        name: String,
        /// Category
        #[arg(short, long)]
        category: String,
        /// Unit price (e.g., "25.50" or "$25.50")
        #[arg(short, long)]
        price: String,
        /// Opening quantity
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        quantity: i64,
        /// Reorder threshold (defaults to the configured value)
        #[arg(short = 'm', long = "min-stock", allow_negative_numbers = true)]
        min_stock: Option<i64>,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
        /// Supplier
        #[arg(short, long)]
        supplier: Option<String>,
    },
    /// Edit a product
    Edit {
        /// Product ID or name
        product: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New unit price
        #[arg(short, long)]
        price: Option<String>,
        /// Set the quantity on hand directly
        #[arg(short, long, allow_negative_numbers = true)]
        quantity: Option<i64>,
        /// New reorder threshold
        #[arg(short = 'm', long = "min-stock", allow_negative_numbers = true)]
        min_stock: Option<i64>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New supplier
        #[arg(short, long)]
        supplier: Option<String>,
    },
    /// Delete a product (administrators only)
    Delete {
        /// Product ID or name
        product: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// List products
    List {
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
        /// Only this stock status (in-stock, low-stock, out-of-stock)
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Show product details
    Show {
        /// Product ID or name
        product: String,
    },
    /// Search names, categories, descriptions and suppliers
    Search {
        /// Text to look for
        query: String,
    },
    /// List categories in use
    Categories,
}

/// Handle a product command
pub fn handle_product_command(
    storage: &Storage,
    settings: &Settings,
    user: &User,
    cmd: ProductCommands,
) -> KioskResult<()> {
    let service = ProductService::new(storage, &settings.inventory);

    match cmd {
        ProductCommands::Add {
            name,
            category,
            price,
            quantity,
            min_stock,
            description,
            supplier,
        } => {
            let input = ProductInput {
                name,
                category,
                price: parse_price(&price)?,
                quantity: non_negative(quantity, "Quantity")?,
                threshold: min_stock.map(|m| non_negative(m, "Minimum stock")).transpose()?,
                description: description.unwrap_or_default(),
                supplier: supplier.unwrap_or_default(),
            };
            let product = service.create(user, input)?;

            println!("Added product: {}", product.name);
            println!("  ID: {}", product.id);
            println!("  Price: {}", product.price);
            println!("  Quantity: {} (min {})", product.quantity, product.threshold);
        }

        ProductCommands::Edit {
            product,
            name,
            category,
            price,
            quantity,
            min_stock,
            description,
            supplier,
        } => {
            let found = service.resolve(&product)?;
            let changes = ProductUpdate {
                name,
                category,
                price: price.as_deref().map(parse_price).transpose()?,
                quantity: quantity.map(|q| non_negative(q, "Quantity")).transpose()?,
                threshold: min_stock.map(|m| non_negative(m, "Minimum stock")).transpose()?,
                description,
                supplier,
            };

            if changes.is_empty() {
                println!("No changes specified. Use --name, --category, --price, --quantity, --min-stock, --description or --supplier.");
                return Ok(());
            }

            let updated = service.update(user, found.id, changes)?;
            println!("Updated product: {} ({})", updated.name, updated.id);
        }

        ProductCommands::Delete { product, force } => {
            let found = service.resolve(&product)?;
            if !force {
                println!("This will permanently delete {} ({}).", found.name, found.id);
                println!("To proceed, run again with --force:");
                println!("  kiosk product delete {} --force", found.id);
                return Ok(());
            }

            let deleted = service.delete(user, found.id)?;
            println!("Deleted product: {} ({})", deleted.name, deleted.id);
        }

        ProductCommands::List { category, status } => {
            let mut products = match &category {
                Some(category) => service.filter_by_category(category)?,
                None => service.list()?,
            };
            if let Some(status) = status {
                let status = StockStatus::parse(&status).ok_or_else(|| {
                    KioskError::Validation(format!(
                        "Invalid status: '{}'. Valid statuses: in-stock, low-stock, out-of-stock",
                        status
                    ))
                })?;
                products.retain(|p| p.status() == status);
            }
            print!("{}", format_product_table(&products));
        }

        ProductCommands::Show { product } => {
            let found = service.resolve(&product)?;
            print!("{}", format_product_details(&found, &settings.date_format));
        }

        ProductCommands::Search { query } => {
            let products = service.search(&query)?;
            print!("{}", format_product_table(&products));
        }

        ProductCommands::Categories => {
            print!("{}", format_category_list(&service.categories()?));
        }
    }

    Ok(())
}

fn parse_price(input: &str) -> KioskResult<Money> {
    Money::parse(input).map_err(|err| match err {
        MoneyParseError::TooLarge(_) => KioskError::Validation("Amount is too large".into()),
        MoneyParseError::InvalidFormat(_) => KioskError::Validation(format!(
            "Invalid price format: '{}'. Use format like '25.50' or '25'",
            input.trim()
        )),
    })
}

//! Stock movement CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::KioskResult;
use crate::models::User;
use crate::services::product::non_negative;
use crate::services::ProductService;
use crate::storage::Storage;

/// Stock subcommands
#[derive(Subcommand)]
pub enum StockCommands {
    /// Receive units into stock
    Add {
        /// Product ID or name
        product: String,
        /// Number of units
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
        /// Note stored with the transaction
        #[arg(short, long, default_value = "")]
        notes: String,
    },
    /// Take units out of stock
    Remove {
        /// Product ID or name
        product: String,
        /// Number of units
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
        /// Note stored with the transaction
        #[arg(short, long, default_value = "")]
        notes: String,
    },
}

/// Handle a stock command
pub fn handle_stock_command(
    storage: &Storage,
    settings: &Settings,
    user: &User,
    cmd: StockCommands,
) -> KioskResult<()> {
    let service = ProductService::new(storage, &settings.inventory);

    match cmd {
        StockCommands::Add {
            product,
            quantity,
            notes,
        } => {
            let found = service.resolve(&product)?;
            let quantity = non_negative(quantity, "Quantity")?;
            let updated = service.add_stock(user, found.id, quantity, &notes)?;
            println!(
                "Added {} unit(s) to {}: {} -> {}",
                quantity, updated.name, found.quantity, updated.quantity
            );
        }

        StockCommands::Remove {
            product,
            quantity,
            notes,
        } => {
            let found = service.resolve(&product)?;
            let quantity = non_negative(quantity, "Quantity")?;
            let updated = service.remove_stock(user, found.id, quantity, &notes)?;
            println!(
                "Removed {} unit(s) from {}: {} -> {}",
                quantity, updated.name, found.quantity, updated.quantity
            );
            if updated.is_low_stock() {
                println!("Warning: {} is now {}", updated.name, updated.status());
            }
        }
    }

    Ok(())
}

//! CLI commands for data export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::error::{KioskError, KioskResult};
use crate::export::{csv, json, yaml};
use crate::storage::Storage;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export the product catalogue to CSV
    CsvProducts {
        /// Output file path
        output: PathBuf,
    },

    /// Export the inventory transaction log to CSV
    CsvTransactions {
        /// Output file path
        output: PathBuf,
    },

    /// Export products, transactions and users to JSON
    Json {
        /// Output file path
        output: PathBuf,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export products, transactions and users to YAML
    Yaml {
        /// Output file path
        output: PathBuf,
    },
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> KioskResult<()> {
    match cmd {
        ExportCommands::CsvProducts { output } => {
            write_file(&output, |w| csv::export_products_csv(storage, w))?;
            println!(
                "Exported {} products to: {}",
                storage.products.count()?,
                output.display()
            );
        }
        ExportCommands::CsvTransactions { output } => {
            write_file(&output, |w| csv::export_transactions_csv(storage, w))?;
            println!(
                "Exported {} transactions to: {}",
                storage.transactions.count()?,
                output.display()
            );
        }
        ExportCommands::Json { output, pretty } => {
            write_file(&output, |w| json::export_full_json(storage, w, pretty))?;
            println!("Full database exported to: {}", output.display());
        }
        ExportCommands::Yaml { output } => {
            write_file(&output, |w| yaml::export_full_yaml(storage, w))?;
            println!("Full database exported to: {}", output.display());
        }
    }
    Ok(())
}

fn write_file<F>(path: &Path, export: F) -> KioskResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> KioskResult<()>,
{
    let file = File::create(path).map_err(|e| {
        KioskError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    export(&mut writer)?;
    writer.flush()?;
    Ok(())
}

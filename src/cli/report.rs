//! Report CLI commands
//!
//! Each report prints to the terminal, or with `--output` is written to a
//! CSV file instead.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::{KioskError, KioskResult};
use crate::reports::{
    ActivityReport, CategoryAnalysisReport, InventorySummaryReport, LowStockReport,
    ValueDistributionReport,
};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Inventory totals and value by category
    Summary {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Products at or below their reorder threshold
    #[command(alias = "low")]
    LowStock {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Product counts, units and value per category
    Categories {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Stock value per product, largest first
    Value {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Most recent inventory transactions
    Activity {
        /// Number of transactions to show (defaults to the configured value)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(storage: &Storage, settings: &Settings, cmd: ReportCommands) -> KioskResult<()> {
    match cmd {
        ReportCommands::Summary { output } => {
            let report = InventorySummaryReport::generate(storage)?;
            match output {
                Some(path) => export_to(&path, |w| report.export_csv(w))?,
                None => println!("{}", report.format_terminal()),
            }
        }

        ReportCommands::LowStock { output } => {
            let report = LowStockReport::generate(storage)?;
            match output {
                Some(path) => export_to(&path, |w| report.export_csv(w))?,
                None => println!("{}", report.format_terminal()),
            }
        }

        ReportCommands::Categories { output } => {
            let report = CategoryAnalysisReport::generate(storage)?;
            match output {
                Some(path) => export_to(&path, |w| report.export_csv(w))?,
                None => println!("{}", report.format_terminal()),
            }
        }

        ReportCommands::Value { output } => {
            let report = ValueDistributionReport::generate(storage)?;
            match output {
                Some(path) => export_to(&path, |w| report.export_csv(w))?,
                None => println!("{}", report.format_terminal()),
            }
        }

        ReportCommands::Activity { limit, output } => {
            let limit = limit.unwrap_or(settings.inventory.recent_activity);
            let report = ActivityReport::generate(storage, limit)?;
            match output {
                Some(path) => export_to(&path, |w| report.export_csv(w))?,
                None => println!("{}", report.format_terminal(&settings.date_format)),
            }
        }
    }

    Ok(())
}

/// Create `path` and hand a buffered writer to `export`
fn export_to<F>(path: &Path, export: F) -> KioskResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> KioskResult<()>,
{
    let file = File::create(path).map_err(|e| {
        KioskError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    export(&mut writer)?;
    writer.flush()?;

    println!("Report exported to: {}", path.display());
    Ok(())
}

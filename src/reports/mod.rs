//! Inventory reports
//!
//! Each report is computed from the current catalogue (or transaction log),
//! renders itself for the terminal and exports to CSV.

pub mod activity;
pub mod category;
pub mod low_stock;
pub mod summary;
pub mod value;

pub use activity::ActivityReport;
pub use category::{CategoryAnalysisReport, CategoryRow};
pub use low_stock::{LowStockReport, LowStockRow};
pub use summary::{CategoryValue, InventorySummaryReport};
pub use value::{ValueDistributionReport, ValueRow};

//! Configuration module for kiosk-cli
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence
//! - ATM and inventory business rules

pub mod paths;
pub mod settings;

pub use paths::KioskPaths;
pub use settings::Settings;

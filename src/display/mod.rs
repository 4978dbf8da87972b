//! Display formatting for terminal output
//!
//! Tables for products, inventory transactions and users (built with
//! `tabled`), detail views, and the ATM statement text shared by the keypad
//! session and the one-shot `atm statement` command.

pub mod atm;
pub mod product;
pub mod transaction;
pub mod user;

pub use atm::{format_statement, statement_lines};
pub use product::{format_category_list, format_product_details, format_product_table};
pub use transaction::format_transaction_table;
pub use user::format_user_table;

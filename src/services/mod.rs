//! Service layer for kiosk-cli
//!
//! Services hold the business rules. They validate input, update the
//! repositories, persist immediately and record what happened.

pub mod atm;
pub mod product;
pub mod user;

pub use atm::{AtmService, Statement};
pub use product::{ProductInput, ProductService, ProductUpdate};
pub use user::UserService;

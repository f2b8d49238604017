//! `shop` crate — the main menu and the ten workflow operations.
//!
//! A [`Session`] bundles the database gateway, the console, and the report
//! thresholds; every operation is a method on it.  [`menu::run_menu`]
//! drives a session until the user exits.

pub mod config;
pub mod error;
pub mod menu;
pub mod operations;
pub mod session;
pub mod table;

pub use config::ShopConfig;
pub use error::ShopError;
pub use menu::{run_menu, MenuChoice, MenuOutcome, MenuState};
pub use operations::requests::RequestOutcome;
pub use session::Session;

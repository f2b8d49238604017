//! `db` crate — the shop's database gateway.
//!
//! Provides the single Postgres connection, typed row structs, repository
//! functions for every table in the mechanic-shop schema, and the
//! [`ShopStore`] trait that workflow code talks to.  No menu or prompt logic
//! lives here.

pub mod error;
pub mod pool;
pub mod repository;
pub mod models;
pub mod store;
pub mod memory;

pub use pool::{ConnectionConfig, DbPool};
pub use error::DbError;
pub use store::{PgStore, ShopStore};
pub use memory::MemoryStore;

#[cfg(test)]
mod memory_tests;

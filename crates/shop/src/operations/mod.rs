//! The ten workflow operations, as methods on [`crate::Session`].
//!
//! Each one is a short sequential script: prompt, validate, call the store,
//! print a status line or a table.  Nothing is shared between operations.

pub mod people;
pub mod cars;
pub mod requests;
pub mod reports;

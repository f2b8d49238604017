//! `console` crate — the line-oriented terminal the shop menu talks through.
//!
//! Workflow code only sees the [`Console`] trait; the binary plugs in
//! [`StdConsole`] and tests plug in [`mock::ScriptedConsole`].  The
//! [`Prompt`] extension trait carries the input validation helpers.

pub mod error;
pub mod traits;
pub mod prompt;
pub mod mock;

pub use error::ConsoleError;
pub use traits::{Console, LineConsole, StdConsole};
pub use prompt::Prompt;

//! sheaf CLI - strip stylesheet directives from the command line.
//!
//! - [`cli`] - Argument definitions (clap)
//! - [`commands`] - `css`, `check` and `clean`
//! - [`error`] - Error types rendered through miette
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - Status messages and summaries
//!
//! # Example
//!
//! ```rust
//! use sheaf_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result, ResultExt};

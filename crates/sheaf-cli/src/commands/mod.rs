//! Command implementations for the sheaf CLI.
//!
//! - [`css`] - Process stylesheets
//! - [`check`] - Configuration validation
//! - [`clean`] - Remove the output directory
//!
//! Each command provides an `execute` function that takes the parsed command
//! arguments and the shared project arguments.

pub mod check;
pub mod clean;
pub mod css;
pub(crate) mod utils;

// Re-export execute functions for convenience
pub use check::execute as check_execute;
pub use clean::execute as clean_execute;
pub use css::execute as css_execute;

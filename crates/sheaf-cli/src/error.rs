//! Error handling for the sheaf CLI.
//!
//! Library errors (`sheaf_config::ConfigError`, `sheaf_plugin_css::CssError`)
//! convert into [`CliError`] automatically; [`cli_error_to_miette`] renders
//! them for the terminal.
//!
//! # Example
//!
//! ```rust,no_run
//! use sheaf_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_stylesheet(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).with_path(path)
//! }
//! ```

mod report;

use std::path::PathBuf;
use thiserror::Error;

pub use report::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration loading or validation failed
    #[error("Configuration error: {0}")]
    Config(#[from] sheaf_config::ConfigError),

    /// A stylesheet could not be read, parsed or minified
    #[error(transparent)]
    Css(#[from] sheaf_plugin_css::CssError),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal errors
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// Some stylesheets failed; each failure has already been reported
    #[error("{failed} of {total} stylesheets failed to process")]
    Failed { failed: usize, total: usize },

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Report missing files as [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Prefix the error message with `msg`.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            match err {
                CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                    CliError::FileNotFound(path.as_ref().to_path_buf())
                }
                other => other,
            }
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}

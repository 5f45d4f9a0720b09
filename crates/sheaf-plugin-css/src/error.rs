//! Error types for CSS processing

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while processing a stylesheet
#[derive(Error, Debug, Diagnostic)]
pub enum CssError {
    /// Stylesheet could not be read from disk
    #[error("Failed to read CSS file {}: {source}", path.display())]
    #[diagnostic(code(sheaf::css::read_failed))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stylesheet could not be parsed
    #[error("Failed to parse CSS from {}", path.display())]
    #[diagnostic(code(sheaf::css::parse_failed))]
    Parse {
        path: PathBuf,
        #[source]
        #[diagnostic_source]
        source: sheaf_css::ParseError,
    },

    /// lightningcss rejected the processed stylesheet
    #[error("Failed to minify CSS from {}: {message}", path.display())]
    #[diagnostic(
        code(sheaf::css::minify_failed),
        help("Run without --minify to inspect the processed output")
    )]
    Minify { path: PathBuf, message: String },

    /// lightningcss could not print the minified stylesheet
    #[error("Failed to print CSS from {}: {message}", path.display())]
    #[diagnostic(code(sheaf::css::print_failed))]
    Print { path: PathBuf, message: String },
}

impl CssError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: sheaf_css::ParseError) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    pub fn minify(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Minify {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn print(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Print {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Path of the stylesheet that failed
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Read { path, .. }
            | Self::Parse { path, .. }
            | Self::Minify { path, .. }
            | Self::Print { path, .. } => path,
        }
    }
}

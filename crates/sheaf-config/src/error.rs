//! Error types for configuration validation and loading.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Filesystem validation errors (for CLI use)
    #[error("alias `{alias}` points to a missing path: {}", path.display())]
    AliasTargetNotFound { alias: String, path: PathBuf },

    // Config parsing/loading errors
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid config value for `{field}`{}", with_hint(.hint))]
    InvalidValue { field: String, hint: Option<String> },

    // Schema validation errors (no filesystem checks)
    #[error("schema validation failed: {message}{}", with_hint(.hint))]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    #[error("package `{package}` is assigned to both `{first}` and `{second}` chunks")]
    DuplicateChunkPackage {
        package: String,
        first: String,
        second: String,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub(crate) fn schema(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::SchemaValidation {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Remediation hint, when the error carries one
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::InvalidValue { hint, .. } | Self::SchemaValidation { hint, .. } => {
                hint.as_deref()
            }
            Self::DuplicateChunkPackage { .. } => {
                Some("Each package may appear in at most one manual chunk")
            }
            Self::AliasTargetNotFound { .. } => {
                Some("Alias targets are resolved relative to the project root")
            }
            _ => None,
        }
    }
}

fn with_hint(hint: &Option<String>) -> String {
    hint.as_ref().map(|h| format!(" ({h})")).unwrap_or_default()
}

//! Configuration for sheaf
//!
//! Defines the [`SheafConfig`] schema, finds config files in a project root,
//! merges them with `package.json` and environment overrides, and validates
//! the result.

pub mod config;
pub mod discovery;
pub mod error;
pub mod loading;
pub mod validation;

// Re-export main types
pub use config::*;
pub use error::*;

// Re-export discovery, loading and validation
pub use discovery::{CONFIG_FILES, ConfigDiscovery, discover};
pub use loading::{ConfigLoader, ENV_PREFIX, load};
pub use validation::{ConfigValidator, FsValidator, SchemaValidator, validate_fs, validate_schema};

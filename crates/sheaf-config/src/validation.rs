//! Pluggable config validation strategies
//!
//! Separates filesystem validation (for CLI use) from schema validation (for library use).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::SheafConfig;
use crate::error::{ConfigError, Result};

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    fn validate(&self, config: &SheafConfig) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use sheaf_config::{ConfigValidator, SchemaValidator, SheafConfig};
///
/// let config = SheafConfig::default();
/// SchemaValidator.validate(&config).unwrap();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &SheafConfig) -> Result<()> {
        for key in config.resolve.alias.keys() {
            if key.trim().is_empty() {
                return Err(ConfigError::schema(
                    "alias keys cannot be empty",
                    "Remove the empty key from 'resolve.alias'",
                ));
            }
        }

        let build = &config.build;
        if build.out_dir.as_os_str().is_empty() {
            return Err(ConfigError::schema(
                "build.outDir cannot be empty",
                "Set 'build.outDir' to a directory such as \"dist\"",
            ));
        }

        if build.chunk_size_warning_limit == 0 {
            return Err(ConfigError::schema(
                "build.chunkSizeWarningLimit must be greater than 0",
                "The limit is expressed in KiB, the default is 2048",
            ));
        }

        let mut owners: HashMap<&str, &str> = HashMap::new();
        for (chunk, packages) in &build.manual_chunks {
            if chunk.trim().is_empty() {
                return Err(ConfigError::schema(
                    "manual chunk names cannot be empty",
                    "Give every entry in 'build.manualChunks' a name",
                ));
            }
            if packages.is_empty() {
                return Err(ConfigError::schema(
                    format!("manual chunk `{chunk}` lists no packages"),
                    "Remove the chunk or add at least one package",
                ));
            }
            for package in packages {
                if package.trim().is_empty() {
                    return Err(ConfigError::schema(
                        format!("manual chunk `{chunk}` contains an empty package name"),
                        "Remove empty strings from the chunk",
                    ));
                }
                if let Some(first) = owners.insert(package.as_str(), chunk.as_str()) {
                    return Err(ConfigError::DuplicateChunkPackage {
                        package: package.clone(),
                        first: first.to_string(),
                        second: chunk.clone(),
                    });
                }
            }
        }

        if config.minify.pure.iter().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::schema(
                "minify.pure entries cannot be empty",
                "Remove empty strings from the 'minify.pure' array",
            ));
        }

        if config.server.port == Some(0) {
            return Err(ConfigError::schema(
                "server.port cannot be 0",
                "Omit the port to use the default, or pick a port between 1 and 65535",
            ));
        }

        Ok(())
    }
}

/// Filesystem validation (for CLI use)
///
/// Checks that every alias target exists relative to the project root.
#[derive(Debug, Clone)]
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &SheafConfig) -> Result<()> {
        for (alias, target) in &config.resolve.alias {
            let path = self.root.join(target);
            if !path.exists() {
                return Err(ConfigError::AliasTargetNotFound {
                    alias: alias.clone(),
                    path,
                });
            }
        }
        Ok(())
    }
}

/// Run [`SchemaValidator`] (convenience function)
pub fn validate_schema(config: &SheafConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Run [`SchemaValidator`] then [`FsValidator`] rooted at the config's root
pub fn validate_fs(config: &SheafConfig) -> Result<()> {
    SchemaValidator.validate(config)?;
    FsValidator::new(config.root()).validate(config)
}

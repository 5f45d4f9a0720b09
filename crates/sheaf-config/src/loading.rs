//! Layered configuration loading
//!
//! Sources are merged with figment, later layers overriding earlier ones:
//! defaults, `package.json` env, the config file, `SHEAF_` environment
//! variables, then explicit overrides.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized, Toml},
};
use serde_json::Value;

use crate::config::SheafConfig;
use crate::discovery::ConfigDiscovery;
use crate::error::{ConfigError, Result};

/// Prefix of environment variables read by the loader
///
/// Nested keys are separated by `__`, e.g. `SHEAF_SERVER__PORT=3000`.
pub const ENV_PREFIX: &str = "SHEAF_";

/// Lowercased key paths and the camelCase names the schema expects
const CAMEL_CASE_KEYS: &[(&str, &str)] = &[
    ("clearscreen", "clearScreen"),
    ("build.outdir", "build.outDir"),
    ("build.emptyoutdir", "build.emptyOutDir"),
    ("build.chunksizewarninglimit", "build.chunkSizeWarningLimit"),
    ("build.reportcompressedsize", "build.reportCompressedSize"),
    ("build.manualchunks", "build.manualChunks"),
    ("minify.legalcomments", "minify.legalComments"),
    ("css.stripcharset", "css.stripCharset"),
];

/// Figment key path for an environment variable name with the prefix removed
///
/// `BUILD__OUTDIR` becomes `build.outDir`. Segments below a known key, such
/// as chunk names under `build.manualChunks`, stay lowercased.
pub(crate) fn env_key(name: &str) -> String {
    let key = name.to_ascii_lowercase().replace("__", ".");
    for (lower, camel) in CAMEL_CASE_KEYS {
        if key == *lower {
            return (*camel).to_string();
        }
        if let Some(rest) = key.strip_prefix(lower).and_then(|r| r.strip_prefix('.')) {
            return format!("{camel}.{rest}");
        }
    }
    key
}

/// Builder for loading a [`SheafConfig`] from a project root
///
/// # Example
///
/// ```no_run
/// use sheaf_config::ConfigLoader;
///
/// let config = ConfigLoader::new(".").load().unwrap();
/// println!("writing to {}", config.out_dir().display());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    root: PathBuf,
    file: Option<PathBuf>,
    env: bool,
    overrides: Option<Value>,
}

impl ConfigLoader {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            file: None,
            env: true,
            overrides: None,
        }
    }

    /// Load this file instead of discovering one; it must exist
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.file = Some(if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        });
        self
    }

    /// Skip `SHEAF_` environment variables
    pub fn without_env(mut self) -> Self {
        self.env = false;
        self
    }

    /// Partial document merged over every other source
    pub fn with_overrides(mut self, overrides: Value) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// Config file the loader would read, if any
    pub fn config_file(&self) -> Result<Option<PathBuf>> {
        match &self.file {
            Some(path) if path.is_file() => Ok(Some(path.clone())),
            Some(path) => Err(ConfigError::NotFound(path.clone())),
            None => Ok(ConfigDiscovery::new(&self.root).find()),
        }
    }

    /// Merge every source and extract the configuration
    pub fn load(&self) -> Result<SheafConfig> {
        let discovery = ConfigDiscovery::new(&self.root);
        let mut figment = Figment::new().merge(Serialized::defaults(SheafConfig::default()));

        if let Some(env) = discovery.package_env()? {
            figment = figment.merge(Serialized::defaults(env));
        }

        if let Some(path) = self.config_file()? {
            tracing::debug!(path = %path.display(), "loading config file");
            figment = match path.extension().and_then(|ext| ext.to_str()) {
                Some("json") => figment.merge(Json::file(&path)),
                Some("toml") => figment.merge(Toml::file(&path)),
                other => {
                    return Err(ConfigError::UnsupportedFormat(
                        other.unwrap_or("<none>").to_string(),
                    ));
                }
            };
        }

        if self.env {
            // Env lowercases keys by default, which would hide every camelCase field
            figment = figment.merge(
                Env::prefixed(ENV_PREFIX)
                    .map(|name| env_key(name.as_str()).into())
                    .lowercase(false),
            );
        }

        if let Some(overrides) = &self.overrides {
            figment = figment.merge(Serialized::defaults(overrides));
        }

        let mut config: SheafConfig =
            figment
                .extract()
                .map_err(|e| ConfigError::InvalidValue {
                    field: "configuration".to_string(),
                    hint: Some(e.to_string()),
                })?;

        config.root = Some(match config.root.take() {
            Some(root) if root.is_relative() => self.root.join(root),
            Some(root) => root,
            None => self.root.clone(),
        });

        Ok(config)
    }
}

/// Load the configuration of `root` with discovery and environment (convenience function)
pub fn load(root: impl AsRef<Path>) -> Result<SheafConfig> {
    ConfigLoader::new(root).load()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_key_restores_camel_case() {
        assert_eq!(env_key("BUILD__OUTDIR"), "build.outDir");
        assert_eq!(env_key("CLEARSCREEN"), "clearScreen");
        assert_eq!(env_key("CSS__STRIPCHARSET"), "css.stripCharset");
        assert_eq!(env_key("SERVER__PORT"), "server.port");
    }

    #[test]
    fn env_key_keeps_nested_map_keys() {
        assert_eq!(env_key("BUILD__MANUALCHUNKS__VUE"), "build.manualChunks.vue");
        assert_eq!(env_key("BUILD__OUTDIRECTORY"), "build.outdirectory");
    }
}

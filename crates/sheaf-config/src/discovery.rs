//! File-based config discovery for CLI use
//!
//! Handles finding sheaf configuration files and the `env` block of
//! `package.json` in a project root.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};

/// Config file names, in lookup order
pub const CONFIG_FILES: &[&str] = &["sheaf.config.json", "sheaf.toml"];

/// File-based configuration discovery
///
/// # Example
///
/// ```no_run
/// use sheaf_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// if let Some(path) = discovery.find() {
///     println!("using {}", path.display());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    /// Create a new config discovery with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. JSON config: sheaf.config.json
    /// 2. TOML config: sheaf.toml
    pub fn find(&self) -> Option<PathBuf> {
        CONFIG_FILES
            .iter()
            .map(|name| self.root.join(name))
            .find(|path| path.is_file())
    }

    /// Server settings taken from the `env` field of `package.json`
    ///
    /// Returns a partial document shaped like the config schema
    /// (`{"server": {"host": .., "port": ..}}`) holding only the keys that are
    /// present, or `None` when there is nothing to contribute. A `host` of
    /// `true` means all interfaces.
    pub fn package_env(&self) -> Result<Option<Value>> {
        let pkg_path = self.root.join("package.json");
        if !pkg_path.is_file() {
            return Ok(None);
        }

        let content = fs::read_to_string(&pkg_path).map_err(|source| ConfigError::Read {
            path: pkg_path.clone(),
            source,
        })?;
        let parsed: Value =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
                field: "package.json".to_string(),
                hint: Some(format!("Invalid JSON: {}", e)),
            })?;

        let Some(env) = parsed.get("env").and_then(Value::as_object) else {
            return Ok(None);
        };

        let mut server = Map::new();
        match env.get("host") {
            Some(Value::String(host)) if !host.is_empty() => {
                server.insert("host".into(), Value::String(host.clone()));
            }
            Some(Value::Bool(true)) => {
                server.insert("host".into(), Value::String("0.0.0.0".into()));
            }
            _ => {}
        }

        if let Some(port) = env.get("port").map(parse_port).transpose()? {
            server.insert("port".into(), Value::from(port));
        }

        if server.is_empty() {
            return Ok(None);
        }

        tracing::debug!(path = %pkg_path.display(), "using server settings from package.json env");
        let mut document = Map::new();
        document.insert("server".into(), Value::Object(server));
        Ok(Some(Value::Object(document)))
    }
}

fn parse_port(value: &Value) -> Result<u16> {
    let port = match value {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u16>().ok(),
        _ => None,
    };

    port.ok_or_else(|| ConfigError::InvalidValue {
        field: "env.port".to_string(),
        hint: Some(format!("expected a port number, got {value}")),
    })
}

/// Find the config file of `root` (convenience function)
///
/// # Example
///
/// ```no_run
/// use sheaf_config::discover;
///
/// let path = discover(".");
/// ```
pub fn discover(root: impl AsRef<Path>) -> Option<PathBuf> {
    ConfigDiscovery::new(root).find()
}

//! Shared utilities for command implementations.

use crate::cli::ProjectArgs;
use crate::error::{CliError, Result, ResultExt};
use serde_json::Value;
use sheaf_config::{ConfigLoader, SheafConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve a path relative to a working directory.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

pub fn get_cwd() -> Result<PathBuf> {
    std::env::current_dir().map_err(CliError::from)
}

/// Project root from `--cwd`, or the current directory
pub fn project_root(project: &ProjectArgs) -> Result<PathBuf> {
    let cwd = get_cwd()?;
    Ok(match &project.cwd {
        Some(dir) => resolve_path(dir, &cwd),
        None => cwd,
    })
}

/// Config loader honoring `--config`, with optional CLI overrides
pub fn config_loader(project: &ProjectArgs, root: &Path, overrides: Option<Value>) -> ConfigLoader {
    let mut loader = ConfigLoader::new(root);
    if let Some(path) = &project.config {
        loader = loader.with_file(path);
    }
    if let Some(overrides) = overrides {
        loader = loader.with_overrides(overrides);
    }
    loader
}

/// Load and schema-validate the project configuration
pub fn load_config(project: &ProjectArgs, overrides: Option<Value>) -> Result<SheafConfig> {
    let root = project_root(project)?;
    let config = config_loader(project, &root, overrides).load()?;
    sheaf_config::validate_schema(&config)?;
    tracing::debug!(root = %config.root().display(), "configuration loaded");
    Ok(config)
}

/// Overrides document setting `build.outDir`
pub fn out_dir_override(out_dir: Option<&Path>) -> Option<Value> {
    out_dir.map(|dir| serde_json::json!({ "build": { "outDir": dir } }))
}

/// Remove `dir` recursively.
///
/// Returns `false` when there was nothing to remove. Refuses to remove a
/// directory that contains the project root.
pub fn clean_dir(dir: &Path, root: &Path) -> Result<bool> {
    if !dir.exists() {
        return Ok(false);
    }

    let dir_abs = dir.canonicalize().with_path(dir)?;
    let root_abs = root.canonicalize().with_path(root)?;
    if root_abs.starts_with(&dir_abs) {
        return Err(CliError::InvalidArgument(format!(
            "refusing to remove {}: it contains the project root",
            dir.display()
        )));
    }

    fs::remove_dir_all(dir).with_path(dir)?;
    tracing::debug!(dir = %dir.display(), "removed output directory");
    Ok(true)
}

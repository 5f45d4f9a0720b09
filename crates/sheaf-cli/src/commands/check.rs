//! Check command implementation.
//!
//! Validates configuration without processing any stylesheet.

use crate::cli::{CheckArgs, ProjectArgs};
use crate::commands::utils;
use crate::error::Result;
use crate::ui;
use sheaf_config::{ConfigValidator, FsValidator, SchemaValidator, SheafConfig};

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Locate and load the configuration
/// 2. Schema validation (chunks, limits, ports)
/// 3. Filesystem validation of alias targets (unless `--schema-only`)
/// 4. Report the effective aliases and manual chunks
pub fn execute(args: CheckArgs, project: &ProjectArgs) -> Result<()> {
    ui::info("Checking configuration...");

    let root = utils::project_root(project)?;
    let loader = utils::config_loader(project, &root, None);

    match loader.config_file()? {
        Some(path) => ui::info(&format!("Using {}", path.display())),
        None => ui::warning("No sheaf.config.json or sheaf.toml found, using defaults"),
    }

    let config = loader.load()?;
    SchemaValidator.validate(&config)?;
    ui::success("Configuration is valid!");

    if !args.schema_only {
        ui::info("Checking alias targets...");
        FsValidator::new(config.root()).validate(&config)?;
    }

    report(&config);

    ui::success("All checks passed!");
    Ok(())
}

fn report(config: &SheafConfig) {
    for (alias, target) in &config.resolve.alias {
        ui::success(&format!("  {} → {}", alias, target.display()));
    }

    for (chunk, packages) in &config.build.manual_chunks {
        ui::info(&format!("  chunk {}: {}", chunk, packages.join(", ")));
    }

    if config.build.report_compressed_size {
        ui::warning("build.reportCompressedSize is not reported for stylesheets");
    }
    if !config.minify.pure.is_empty() || !config.minify.drop.is_empty() {
        ui::warning("minify.pure and minify.drop only apply to scripts");
    }
}

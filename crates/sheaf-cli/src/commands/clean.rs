//! Clean command implementation.

use crate::cli::{CleanArgs, ProjectArgs};
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Execute the clean command.
///
/// Removes the configured output directory. A missing directory is not an error.
pub fn execute(args: CleanArgs, project: &ProjectArgs) -> Result<()> {
    let overrides = utils::out_dir_override(args.out_dir.as_deref());
    let config = utils::load_config(project, overrides)?;
    let out_dir = config.out_dir();

    if utils::clean_dir(&out_dir, config.root())? {
        ui::success(&format!("Removed {}", out_dir.display()));
    } else {
        ui::info(&format!("Nothing to clean at {}", out_dir.display()));
    }
    Ok(())
}

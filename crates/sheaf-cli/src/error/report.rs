//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use miette::Report;
use sheaf_config::ConfigError;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Css(e) => Report::new(e),
        CliError::Config(e) => config_error_to_miette(e),
        CliError::FileNotFound(path) => miette::miette!(
            code = "sheaf::file_not_found",
            help = "Pass existing stylesheets or directories, relative to --cwd",
            "File not found: {}",
            path.display()
        ),
        _ => miette::miette!("{}", err),
    }
}

/// Convert sheaf-config errors to miette Report, carrying their hint as help
pub fn config_error_to_miette(err: ConfigError) -> Report {
    match err.hint().map(str::to_string) {
        Some(hint) => miette::miette!(
            code = "sheaf::config",
            help = hint,
            "Configuration error: {}",
            err
        ),
        None => miette::miette!(code = "sheaf::config", "Configuration error: {}", err),
    }
}

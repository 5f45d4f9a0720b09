//! Command-line interface definition for sheaf.
//!
//! # Command Structure
//!
//! - `sheaf css` - Strip directives from stylesheets and write them to the output directory
//! - `sheaf check` - Validate configuration
//! - `sheaf clean` - Remove the output directory

mod commands;
#[cfg(test)]
mod tests;

use clap::{Args, Parser};
use std::path::PathBuf;

pub use commands::{CheckArgs, CleanArgs, Command, CssArgs};

/// sheaf - stylesheet directive stripper
#[derive(Parser, Debug)]
#[command(
    name = "sheaf",
    version,
    about = "Strip @charset and other directives from stylesheets",
    long_about = "sheaf parses stylesheets, removes @charset at-rules at any depth,\n\
                  optionally drops comments and minifies, then writes the results\n\
                  to the configured output directory."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(flatten)]
    pub project: ProjectArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Where to find the project and its configuration
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Config file to load instead of sheaf.config.json / sheaf.toml
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Project root (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

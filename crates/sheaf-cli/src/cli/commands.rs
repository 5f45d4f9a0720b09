use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Available sheaf subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Process stylesheets
    ///
    /// Collects `.css` files from the given paths, removes `@charset`
    /// at-rules, applies the configured comment policy and optional
    /// minification, and mirrors the files into the output directory.
    Css(CssArgs),

    /// Validate configuration
    ///
    /// Loads the configuration, checks its schema and verifies that alias
    /// targets exist on disk.
    Check(CheckArgs),

    /// Remove the output directory
    Clean(CleanArgs),
}

/// Arguments for the css command
#[derive(Args, Debug, Clone)]
pub struct CssArgs {
    /// Stylesheets or directories to process
    ///
    /// Examples:
    ///   sheaf css
    ///   sheaf css src/styles theme.css
    #[arg(value_name = "PATH", default_value = "src")]
    pub paths: Vec<PathBuf>,

    /// Output directory (overrides build.outDir)
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Minify output with lightningcss
    #[arg(short, long)]
    pub minify: bool,

    /// Empty the output directory first, even when build.emptyOutDir is false
    #[arg(long)]
    pub clean: bool,

    /// Leave @charset at-rules in place
    #[arg(long)]
    pub keep_charset: bool,
}

/// Arguments for the check command
#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Skip filesystem checks (alias targets)
    #[arg(long)]
    pub schema_only: bool,
}

/// Arguments for the clean command
#[derive(Args, Debug, Clone, Default)]
pub struct CleanArgs {
    /// Output directory to remove (overrides build.outDir)
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

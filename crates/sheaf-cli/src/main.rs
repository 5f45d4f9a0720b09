//! sheaf CLI entry point.
//!
//! Parses arguments, initializes logging and colors, and dispatches to the
//! selected command.

use clap::Parser;
use miette::Result;
use sheaf_cli::{cli, commands, error, logger, ui};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Css(css_args) => commands::css_execute(css_args, &args.project),
        cli::Command::Check(check_args) => commands::check_execute(check_args, &args.project),
        cli::Command::Clean(clean_args) => commands::clean_execute(clean_args, &args.project),
    };

    // Convert CLI errors to miette diagnostics for error reporting
    result.map_err(error::cli_error_to_miette)
}

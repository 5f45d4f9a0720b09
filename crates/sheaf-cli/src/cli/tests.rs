use crate::cli::{Cli, Command};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_css_defaults() {
    let cli = Cli::try_parse_from(["sheaf", "css"]).unwrap();
    match cli.command {
        Command::Css(args) => {
            assert_eq!(args.paths, vec![PathBuf::from("src")]);
            assert!(args.out_dir.is_none());
            assert!(!args.minify);
            assert!(!args.clean);
            assert!(!args.keep_charset);
        }
        other => panic!("expected css command, got {other:?}"),
    }
}

#[test]
fn test_css_all_flags() {
    let cli = Cli::try_parse_from([
        "sheaf",
        "css",
        "styles",
        "theme.css",
        "--out-dir",
        "public",
        "--minify",
        "--clean",
        "--keep-charset",
    ])
    .unwrap();

    match cli.command {
        Command::Css(args) => {
            assert_eq!(
                args.paths,
                vec![PathBuf::from("styles"), PathBuf::from("theme.css")]
            );
            assert_eq!(args.out_dir, Some(PathBuf::from("public")));
            assert!(args.minify && args.clean && args.keep_charset);
        }
        other => panic!("expected css command, got {other:?}"),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "sheaf",
        "check",
        "--verbose",
        "--no-color",
        "--config",
        "custom.toml",
        "--cwd",
        "app",
    ])
    .unwrap();

    assert!(cli.verbose);
    assert!(cli.no_color);
    assert_eq!(cli.project.config, Some(PathBuf::from("custom.toml")));
    assert_eq!(cli.project.cwd, Some(PathBuf::from("app")));
    assert!(matches!(cli.command, Command::Check(_)));
}

#[test]
fn test_verbose_conflicts_with_quiet() {
    assert!(Cli::try_parse_from(["sheaf", "-v", "-q", "clean"]).is_err());
}

#[test]
fn test_subcommand_required() {
    assert!(Cli::try_parse_from(["sheaf"]).is_err());
}

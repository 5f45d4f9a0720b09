//! Css command implementation.
//!
//! Collects stylesheets, runs them through [`SheafCssPlugin`] in parallel and
//! mirrors the results into the output directory.

use crate::cli::{CssArgs, ProjectArgs};
use crate::commands::utils;
use crate::error::{self, CliError, Result, ResultExt};
use crate::ui::{self, SummaryEntry};
use rayon::prelude::*;
use sheaf_config::{LegalComments, SheafConfig};
use sheaf_css::CommentPolicy;
use sheaf_plugin_css::{CssPluginOptions, SheafCssPlugin};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

/// A stylesheet to process and where it lands under the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssInput {
    pub source: PathBuf,
    pub relative: PathBuf,
}

/// Execute the css command.
///
/// # Steps
///
/// 1. Load configuration (`--out-dir` overrides `build.outDir`)
/// 2. Collect `.css` files from every path, filtered by `css.include` / `css.exclude`
/// 3. Empty the output directory when `--clean` or `build.emptyOutDir` is set
/// 4. Process and write each stylesheet in parallel
/// 5. Warn about outputs above `build.chunkSizeWarningLimit` and print a summary
///
/// # Errors
///
/// Returns [`CliError::Failed`] when any stylesheet fails; each failure is
/// reported as it is collected.
pub fn execute(args: CssArgs, project: &ProjectArgs) -> Result<()> {
    let overrides = utils::out_dir_override(args.out_dir.as_deref());
    let config = utils::load_config(project, overrides)?;
    ui::clear_screen(config.clear_screen);

    let root = config.root().to_path_buf();
    let out_dir = config.out_dir();
    let plugin = SheafCssPlugin::with_options(plugin_options(&config, &args));

    let inputs = collect_stylesheets(&args.paths, &root, &out_dir, &plugin)?;
    if inputs.is_empty() {
        ui::warning("No stylesheets found");
        return Ok(());
    }

    if args.clean || config.build.empty_out_dir {
        utils::clean_dir(&out_dir, &root)?;
    }

    ui::info(&format!(
        "Processing {} stylesheet{}...",
        inputs.len(),
        if inputs.len() == 1 { "" } else { "s" }
    ));

    let started = Instant::now();
    let results: Vec<Result<SummaryEntry>> = inputs
        .par_iter()
        .map(|input| process_one(&plugin, input, &out_dir))
        .collect();
    let elapsed = started.elapsed();

    let limit = config.build.chunk_size_warning_bytes();
    let total = results.len();
    let mut entries = Vec::with_capacity(total);
    let mut failed = 0;

    for result in results {
        match result {
            Ok(entry) => {
                if entry.output_bytes > limit {
                    ui::warning(&format!(
                        "{} is {}, above the {} chunk size warning limit",
                        entry.name,
                        ui::format_size(entry.output_bytes),
                        ui::format_size(limit)
                    ));
                }
                entries.push(entry);
            }
            Err(err) => {
                failed += 1;
                eprintln!("{:?}", error::cli_error_to_miette(err));
            }
        }
    }

    ui::print_css_summary(&entries, elapsed);

    if failed > 0 {
        return Err(CliError::Failed { failed, total });
    }

    let removed: usize = entries.iter().map(|entry| entry.removed).sum();
    ui::success(&format!(
        "Processed {} stylesheets into {} ({} nodes removed)",
        entries.len(),
        out_dir.display(),
        removed
    ));
    Ok(())
}

/// Plugin options from the configuration and command-line flags
pub fn plugin_options(config: &SheafConfig, args: &CssArgs) -> CssPluginOptions {
    let mut options = CssPluginOptions::new()
        .with_minify(args.minify)
        .with_strip_charset(config.css.strip_charset && !args.keep_charset);

    if let Some(legal) = config.minify.legal_comments {
        options = options.with_comments(comment_policy(legal));
    }

    options.include = config.css.include.clone();
    options.exclude = config.css.exclude.clone();
    options
}

fn comment_policy(legal: LegalComments) -> CommentPolicy {
    match legal {
        LegalComments::None => CommentPolicy::DiscardAll,
        LegalComments::Inline => CommentPolicy::KeepLegal,
    }
}

/// Expand `paths` into the stylesheets to process.
///
/// Files are taken as given and land at the top of the output directory;
/// directories are walked in file-name order and keep their layout. Anything
/// under `out_dir` is skipped while walking, and naming a path inside it is an
/// error.
pub fn collect_stylesheets(
    paths: &[PathBuf],
    root: &Path,
    out_dir: &Path,
    plugin: &SheafCssPlugin,
) -> Result<Vec<CssInput>> {
    let mut inputs = Vec::new();

    for path in paths {
        let path = utils::resolve_path(path, root);

        // The output directory may be emptied before anything is read
        if path.starts_with(out_dir) {
            return Err(CliError::InvalidArgument(format!(
                "{} is inside the output directory {}",
                path.display(),
                out_dir.display()
            )));
        }

        if path.is_file() {
            if !is_css(&path) {
                return Err(CliError::InvalidArgument(format!(
                    "{} is not a .css file",
                    path.display()
                )));
            }
            let Some(name) = path.file_name() else {
                continue;
            };
            let relative = PathBuf::from(name);
            inputs.push(CssInput {
                source: path,
                relative,
            });
        } else if path.is_dir() {
            let walker = WalkDir::new(&path)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| entry.path() != out_dir);

            for entry in walker {
                let entry = entry?;
                if !entry.file_type().is_file() || !is_css(entry.path()) {
                    continue;
                }
                let Ok(relative) = entry.path().strip_prefix(&path) else {
                    continue;
                };
                inputs.push(CssInput {
                    relative: relative.to_path_buf(),
                    source: entry.into_path(),
                });
            }
        } else {
            return Err(CliError::FileNotFound(path));
        }
    }

    inputs.retain(|input| plugin.should_process(&pattern_path(&input.source, root)));

    let mut seen = HashSet::new();
    for input in &inputs {
        if !seen.insert(input.relative.as_path()) {
            return Err(CliError::InvalidArgument(format!(
                "more than one input would be written to {}",
                input.relative.display()
            )));
        }
    }

    tracing::debug!(count = inputs.len(), "collected stylesheets");
    Ok(inputs)
}

/// Path matched against `css.include` / `css.exclude`: relative to the project
/// root when possible, with `/` separators.
fn pattern_path(source: &Path, root: &Path) -> String {
    source
        .strip_prefix(root)
        .unwrap_or(source)
        .to_string_lossy()
        .replace('\\', "/")
}

fn is_css(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "css")
}

fn process_one(plugin: &SheafCssPlugin, input: &CssInput, out_dir: &Path) -> Result<SummaryEntry> {
    let started = Instant::now();
    let processed = plugin.process_file(&input.source)?;

    let target = out_dir.join(&input.relative);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .context(format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&target, &processed.code).context(format!("Failed to write {}", target.display()))?;

    tracing::debug!(
        source = %input.source.display(),
        target = %target.display(),
        removed = processed.stats.removed,
        "wrote stylesheet"
    );

    Ok(SummaryEntry {
        name: input.relative.to_string_lossy().replace('\\', "/"),
        input_bytes: processed.input_bytes as u64,
        output_bytes: processed.code.len() as u64,
        removed: processed.stats.removed,
        duration: started.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn css_args() -> CssArgs {
        CssArgs {
            paths: vec![PathBuf::from("src")],
            out_dir: None,
            minify: false,
            clean: false,
            keep_charset: false,
        }
    }

    #[test]
    fn test_plugin_options_from_config() {
        let mut config = SheafConfig::default();
        config.minify.legal_comments = Some(LegalComments::Inline);
        config.css.exclude = vec!["vendor/".into()];

        let options = plugin_options(&config, &css_args());
        assert!(options.strip_charset);
        assert!(!options.minify);
        assert_eq!(options.comments, Some(CommentPolicy::KeepLegal));
        assert_eq!(options.exclude, vec!["vendor/".to_string()]);
    }

    #[test]
    fn test_keep_charset_flag_wins() {
        let config = SheafConfig::default();
        let args = CssArgs {
            keep_charset: true,
            minify: true,
            ..css_args()
        };

        let options = plugin_options(&config, &args);
        assert!(!options.strip_charset);
        assert!(options.minify);
        assert!(options.comments.is_none());
    }

    #[test]
    fn test_collect_walks_sorted_and_filters() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(src.join("theme")).unwrap();
        fs::write(src.join("b.css"), "b{}").unwrap();
        fs::write(src.join("a.css"), "a{}").unwrap();
        fs::write(src.join("lib.min.css"), "x{}").unwrap();
        fs::write(src.join("main.ts"), "").unwrap();
        fs::write(src.join("theme/dark.css"), "d{}").unwrap();

        let plugin = SheafCssPlugin::new();
        let inputs = collect_stylesheets(
            &[PathBuf::from("src")],
            temp.path(),
            &temp.path().join("dist"),
            &plugin,
        )
        .unwrap();

        let relative: Vec<_> = inputs.iter().map(|i| i.relative.clone()).collect();
        assert_eq!(
            relative,
            vec![
                PathBuf::from("a.css"),
                PathBuf::from("b.css"),
                PathBuf::from("theme/dark.css")
            ]
        );
    }

    #[test]
    fn test_collect_skips_out_dir() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("dist")).unwrap();
        fs::write(temp.path().join("dist/old.css"), "o{}").unwrap();
        fs::write(temp.path().join("app.css"), "a{}").unwrap();

        let inputs = collect_stylesheets(
            &[PathBuf::from(".")],
            temp.path(),
            &temp.path().join("./dist"),
            &SheafCssPlugin::new(),
        )
        .unwrap();

        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].relative, PathBuf::from("app.css"));
    }

    #[test]
    fn test_collect_missing_path() {
        let temp = TempDir::new().unwrap();
        let err = collect_stylesheets(
            &[PathBuf::from("nope")],
            temp.path(),
            &temp.path().join("dist"),
            &SheafCssPlugin::new(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_collect_rejects_paths_inside_out_dir() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("dist/nested")).unwrap();
        fs::write(temp.path().join("dist/app.css"), "a{}").unwrap();

        for path in ["dist/app.css", "dist/nested", "./dist"] {
            let err = collect_stylesheets(
                &[PathBuf::from(path)],
                temp.path(),
                &temp.path().join("dist"),
                &SheafCssPlugin::new(),
            )
            .unwrap_err();
            assert!(matches!(err, CliError::InvalidArgument(_)), "{path}");
        }
    }

    #[test]
    fn test_patterns_ignore_directories_above_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("vendor/src/app");
        fs::create_dir_all(root.join("styles")).unwrap();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("styles/a.css"), "a{}").unwrap();
        fs::write(root.join("src/b.css"), "b{}").unwrap();

        let excluding = SheafCssPlugin::with_options(CssPluginOptions::new().exclude("vendor/"));
        let inputs = collect_stylesheets(
            &[PathBuf::from("styles"), PathBuf::from("src")],
            &root,
            &root.join("dist"),
            &excluding,
        )
        .unwrap();
        assert_eq!(inputs.len(), 2);

        let including = SheafCssPlugin::with_options(CssPluginOptions::new().include("src/"));
        let inputs = collect_stylesheets(
            &[PathBuf::from("styles"), PathBuf::from("src")],
            &root,
            &root.join("dist"),
            &including,
        )
        .unwrap();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].source, root.join("src/b.css"));
    }

    #[test]
    fn test_collect_rejects_colliding_outputs() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("a")).unwrap();
        fs::create_dir_all(temp.path().join("b")).unwrap();
        fs::write(temp.path().join("a/x.css"), "a{}").unwrap();
        fs::write(temp.path().join("b/x.css"), "b{}").unwrap();

        let err = collect_stylesheets(
            &[PathBuf::from("a"), PathBuf::from("b")],
            temp.path(),
            &temp.path().join("dist"),
            &SheafCssPlugin::new(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }
}

//! Rolldown plugin implementation for sheaf CSS processing
//!
//! This module provides a Rolldown plugin that runs the sheaf stylesheet
//! pipeline inside the Rolldown bundler. It uses the `load` hook to intercept
//! `.css` files, strips directives such as `@charset`, and optionally minifies
//! the result with lightningcss.
//!
//! ## Features
//!
//! - **Charset Removal**: Drop every `@charset` at-rule, at any depth
//! - **Comment Stripping**: Discard all comments or keep only legal ones
//! - **Minification**: Optimize CSS size through lightningcss
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use sheaf_plugin_css::SheafCssPlugin;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Use with your Rolldown bundler configuration
//! let plugin = Arc::new(SheafCssPlugin::new());
//! # Ok(())
//! # }
//! ```

use lightningcss::{
    printer::PrinterOptions,
    stylesheet::{MinifyOptions, ParserOptions, StyleSheet},
};
use rolldown_common::ModuleType;
use rolldown_plugin::{HookLoadArgs, HookLoadOutput, HookLoadReturn, Plugin, PluginContext};
use sheaf_css::{
    CHARSET_KEYWORD, CharsetRemoval, CommentRemoval, Node, ProcessStats, Processor, Stylesheet,
};
use std::borrow::Cow;
use std::path::Path;

mod config;
mod error;

pub use config::CssPluginOptions;
pub use error::CssError;

/// Result of running one stylesheet through the plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedCss {
    /// Output CSS text
    pub code: String,
    /// What the directive-stripping pass did
    pub stats: ProcessStats,
    /// Size of the original source in bytes
    pub input_bytes: usize,
}

/// Rolldown plugin that processes CSS files through the sheaf pipeline
///
/// # Architecture
///
/// ```text
/// .css file → load() hook → parse → strip directives → print → [lightningcss minify] → CSS
/// ```
#[derive(Debug, Clone)]
pub struct SheafCssPlugin {
    /// Configuration options for CSS processing
    options: CssPluginOptions,
    /// Stylesheet plugins derived from `options`
    processor: Processor,
}

impl SheafCssPlugin {
    /// Create a new SheafCssPlugin with default options
    ///
    /// # Example
    ///
    /// ```rust
    /// use sheaf_plugin_css::SheafCssPlugin;
    ///
    /// let plugin = SheafCssPlugin::new();
    /// ```
    pub fn new() -> Self {
        Self::with_options(CssPluginOptions::default())
    }

    /// Create a new SheafCssPlugin with custom options
    ///
    /// # Example
    ///
    /// ```rust
    /// use sheaf_plugin_css::{CssPluginOptions, SheafCssPlugin};
    ///
    /// let options = CssPluginOptions::new()
    ///     .with_minify(true)
    ///     .exclude("vendor/");
    ///
    /// let plugin = SheafCssPlugin::with_options(options);
    /// ```
    pub fn with_options(options: CssPluginOptions) -> Self {
        let processor = build_processor(&options);
        Self { options, processor }
    }

    pub fn options(&self) -> &CssPluginOptions {
        &self.options
    }

    /// The stylesheet processor built from the options
    pub fn processor(&self) -> &Processor {
        &self.processor
    }

    /// Process CSS source text
    ///
    /// # Arguments
    ///
    /// * `path` - Path of the stylesheet, used in diagnostics
    /// * `source` - CSS source code
    pub fn process_css(&self, path: &Path, source: &str) -> Result<ProcessedCss, CssError> {
        let name = path.to_string_lossy();
        let mut stylesheet =
            sheaf_css::parse_named(&name, source).map_err(|e| CssError::parse(path, e))?;

        let stats = self.processor.process(&mut stylesheet);

        let mut code = stylesheet.to_css();
        if self.options.minify {
            let charset = leading_charset(&stylesheet).filter(|_| !self.options.strip_charset);
            code = minify(path, &code)?;
            // lightningcss parses `@charset` but never prints it
            if let Some(params) = charset.filter(|_| !code.starts_with("@charset")) {
                code.insert_str(0, &format!("@{CHARSET_KEYWORD} {params};"));
            }
        }

        Ok(ProcessedCss {
            code,
            stats,
            input_bytes: source.len(),
        })
    }

    /// Read a CSS file from disk and process it
    pub fn process_file(&self, path: &Path) -> Result<ProcessedCss, CssError> {
        let source = std::fs::read_to_string(path).map_err(|e| CssError::read(path, e))?;
        self.process_css(path, &source)
    }

    /// Check if a file should be processed based on include/exclude patterns
    pub fn should_process(&self, path: &str) -> bool {
        // Skip if explicitly excluded
        if self
            .options
            .exclude
            .iter()
            .any(|pattern| path.contains(pattern.as_str()))
        {
            return false;
        }

        // If include patterns are specified, file must match one
        if !self.options.include.is_empty() {
            return self
                .options
                .include
                .iter()
                .any(|pattern| path.contains(pattern.as_str()));
        }

        true
    }
}

impl Default for SheafCssPlugin {
    fn default() -> Self {
        Self::new()
    }
}

fn build_processor(options: &CssPluginOptions) -> Processor {
    let mut processor = Processor::new();
    if options.strip_charset {
        processor.add_plugin(CharsetRemoval);
    }
    if let Some(policy) = options.comments {
        processor.add_plugin(CommentRemoval::new(policy));
    }
    processor
}

/// Params of a `@charset` statement that opens the stylesheet
fn leading_charset(stylesheet: &Stylesheet) -> Option<&str> {
    match stylesheet.nodes().first() {
        Some(Node::AtRule(at_rule))
            if at_rule.name == CHARSET_KEYWORD && at_rule.nodes.is_none() =>
        {
            Some(at_rule.params.as_str())
        }
        _ => None,
    }
}

fn minify(path: &Path, css: &str) -> Result<String, CssError> {
    let mut stylesheet = StyleSheet::parse(
        css,
        ParserOptions {
            filename: path.to_string_lossy().to_string(),
            ..Default::default()
        },
    )
    .map_err(|e| CssError::minify(path, e.to_string()))?;

    stylesheet
        .minify(MinifyOptions::default())
        .map_err(|e| CssError::minify(path, e.to_string()))?;

    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..Default::default()
        })
        .map_err(|e| CssError::print(path, e.to_string()))?;

    Ok(result.code)
}

impl Plugin for SheafCssPlugin {
    /// Returns the plugin name for debugging and logging
    fn name(&self) -> Cow<'static, str> {
        "sheaf-css".into()
    }

    /// Declare which hooks this plugin uses
    ///
    /// This allows Rolldown to optimize by skipping unused hooks.
    fn register_hook_usage(&self) -> rolldown_plugin::HookUsage {
        use rolldown_plugin::HookUsage;
        HookUsage::Load
    }

    /// Load hook - intercepts `.css` files and processes them
    ///
    /// # Returns
    ///
    /// - `Ok(Some(output))` - Successfully processed CSS file
    /// - `Ok(None)` - Not a CSS file or excluded, let Rolldown handle it
    /// - `Err(e)` - Read, parse or minify error
    fn load(
        &self,
        _ctx: &PluginContext,
        args: &HookLoadArgs<'_>,
    ) -> impl std::future::Future<Output = HookLoadReturn> + Send {
        // Capture data needed for async block to avoid lifetime issues
        let id = args.id.to_string();
        let plugin = self.clone();

        async move {
            if !id.ends_with(".css") {
                return Ok(None);
            }

            if !plugin.should_process(&id) {
                tracing::debug!(id = %id, "skipping excluded stylesheet");
                return Ok(None);
            }

            let processed = plugin.process_file(Path::new(&id))?;

            tracing::debug!(
                id = %id,
                input_bytes = processed.input_bytes,
                output_bytes = processed.code.len(),
                removed = processed.stats.removed,
                minify = plugin.options.minify,
                "processed stylesheet"
            );

            // module_type must be Css so Rolldown routes the output to its CSS pipeline
            Ok(Some(HookLoadOutput {
                code: processed.code.into(),
                module_type: Some(ModuleType::Css),
                ..Default::default()
            }))
        }
    }
}

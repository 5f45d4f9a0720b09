//! CSS processing configuration types

use sheaf_css::CommentPolicy;

/// Configuration options for CSS processing
///
/// Controls which directive-stripping plugins run over each stylesheet and
/// whether the result is minified by lightningcss.
#[derive(Debug, Clone)]
pub struct CssPluginOptions {
    /// Enable CSS minification
    ///
    /// When enabled, the processed CSS is handed to lightningcss:
    /// - Merge longhand properties into shorthands
    /// - Remove unnecessary whitespace
    /// - Merge duplicate rules
    pub minify: bool,

    /// Remove `@charset` at-rules (default: on)
    pub strip_charset: bool,

    /// Comment stripping policy, `None` leaves comments untouched
    pub comments: Option<CommentPolicy>,

    /// Patterns to exclude from processing
    ///
    /// Substring patterns for CSS files to skip.
    /// Example: `vec![".min.css", "vendor/"]`
    pub exclude: Vec<String>,

    /// Patterns to include for processing
    ///
    /// If empty, all `.css` files are processed.
    /// Example: `vec!["src/"]`
    pub include: Vec<String>,
}

impl Default for CssPluginOptions {
    fn default() -> Self {
        Self {
            minify: false,
            strip_charset: true,
            comments: None,
            exclude: vec![".min.css".to_string()],
            include: Vec::new(),
        }
    }
}

impl CssPluginOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable minification
    pub fn with_minify(mut self, enabled: bool) -> Self {
        self.minify = enabled;
        self
    }

    /// Toggle `@charset` removal
    pub fn with_strip_charset(mut self, enabled: bool) -> Self {
        self.strip_charset = enabled;
        self
    }

    /// Strip comments according to `policy`
    pub fn with_comments(mut self, policy: CommentPolicy) -> Self {
        self.comments = Some(policy);
        self
    }

    /// Add exclusion pattern
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude.push(pattern.into());
        self
    }

    /// Add inclusion pattern
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include.push(pattern.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = CssPluginOptions::default();
        assert!(!opts.minify);
        assert!(opts.strip_charset);
        assert!(opts.comments.is_none());
        assert_eq!(opts.exclude, vec![".min.css".to_string()]);
        assert!(opts.include.is_empty());
    }

    #[test]
    fn test_builder_pattern() {
        let opts = CssPluginOptions::new()
            .with_minify(true)
            .with_strip_charset(false)
            .with_comments(CommentPolicy::KeepLegal);

        assert!(opts.minify);
        assert!(!opts.strip_charset);
        assert_eq!(opts.comments, Some(CommentPolicy::KeepLegal));
    }

    #[test]
    fn test_exclusion_patterns() {
        let opts = CssPluginOptions::new()
            .exclude("vendor/")
            .exclude("node_modules/");

        assert!(opts.exclude.iter().any(|p| p.contains("vendor")));
        assert_eq!(opts.exclude.len(), 3);
    }
}

//! Configuration schema
//!
//! Every section deserializes from camelCase keys and falls back to its
//! defaults when absent, so an empty document is a valid configuration.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Default alias key pointing at the source directory
pub const DEFAULT_ALIAS: &str = "@";
/// Default output directory for processed assets
pub const DEFAULT_OUT_DIR: &str = "dist";
/// Default chunk size warning threshold in KiB
pub const DEFAULT_CHUNK_SIZE_WARNING_LIMIT: u64 = 2048;

/// Top-level sheaf configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SheafConfig {
    /// Project root, filled in by the loader when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    pub resolve: ResolveOptions,
    pub server: ServerOptions,
    pub build: BuildOptions,
    pub minify: MinifyOptions,
    pub css: CssOptions,
    /// Clear the terminal before running a command
    pub clear_screen: bool,
}

impl SheafConfig {
    /// Project root, or the current directory when none was recorded
    pub fn root(&self) -> &Path {
        self.root.as_deref().unwrap_or_else(|| Path::new("."))
    }

    /// Output directory resolved against the project root
    pub fn out_dir(&self) -> PathBuf {
        self.root().join(&self.build.out_dir)
    }

    /// Resolve an import specifier through `resolve.alias`, relative to the root
    pub fn resolve_alias(&self, specifier: &str) -> Option<PathBuf> {
        self.resolve
            .resolve_alias(specifier)
            .map(|path| self.root().join(path))
    }
}

/// Module resolution settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolveOptions {
    /// Specifier prefix to path mapping, in declaration order
    pub alias: IndexMap<String, PathBuf>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        let mut alias = IndexMap::new();
        alias.insert(DEFAULT_ALIAS.to_string(), PathBuf::from("./src"));
        Self { alias }
    }
}

impl ResolveOptions {
    /// Map `specifier` through the alias table
    ///
    /// A key matches the specifier exactly or as a `key/` prefix. When several
    /// keys match, the longest one wins. The returned path is relative to the
    /// project root unless the alias target is absolute.
    ///
    /// ```
    /// use sheaf_config::ResolveOptions;
    /// use std::path::PathBuf;
    ///
    /// let resolve = ResolveOptions::default();
    /// assert_eq!(
    ///     resolve.resolve_alias("@/views/home.css"),
    ///     Some(PathBuf::from("./src/views/home.css"))
    /// );
    /// assert_eq!(resolve.resolve_alias("@scope/pkg"), None);
    /// ```
    pub fn resolve_alias(&self, specifier: &str) -> Option<PathBuf> {
        let (key, target) = self
            .alias
            .iter()
            .filter(|(key, _)| alias_matches(key, specifier))
            .max_by_key(|(key, _)| key.len())?;

        let rest = specifier[key.len()..].trim_start_matches('/');
        if rest.is_empty() {
            Some(target.clone())
        } else {
            Some(target.join(rest))
        }
    }
}

fn alias_matches(key: &str, specifier: &str) -> bool {
    if key.is_empty() {
        return false;
    }
    specifier
        .strip_prefix(key)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Development server settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerOptions {
    /// Open a browser once the server is listening
    pub open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

/// Production build settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildOptions {
    pub out_dir: PathBuf,
    /// Remove the output directory before writing
    pub empty_out_dir: bool,
    /// Warn for outputs larger than this many KiB
    pub chunk_size_warning_limit: u64,
    /// Report gzip sizes in the summary
    pub report_compressed_size: bool,
    /// Chunk name to the packages grouped into it
    pub manual_chunks: IndexMap<String, Vec<String>>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            empty_out_dir: true,
            chunk_size_warning_limit: DEFAULT_CHUNK_SIZE_WARNING_LIMIT,
            report_compressed_size: false,
            manual_chunks: IndexMap::new(),
        }
    }
}

impl BuildOptions {
    /// Name of the manual chunk that owns `module_id`, if any
    ///
    /// ```
    /// use sheaf_config::BuildOptions;
    ///
    /// let mut build = BuildOptions::default();
    /// build.manual_chunks.insert("vue".into(), vec!["vue".into(), "vue-router".into()]);
    ///
    /// assert_eq!(build.manual_chunk_for("/app/node_modules/vue-router/dist/index.js"), Some("vue"));
    /// assert_eq!(build.manual_chunk_for("./src/main.ts"), None);
    /// ```
    pub fn manual_chunk_for(&self, module_id: &str) -> Option<&str> {
        let package = package_name(module_id)?;
        self.manual_chunks
            .iter()
            .find(|(_, packages)| packages.iter().any(|p| p == package))
            .map(|(name, _)| name.as_str())
    }

    /// Chunk size warning limit in bytes
    pub fn chunk_size_warning_bytes(&self) -> u64 {
        self.chunk_size_warning_limit.saturating_mul(1024)
    }
}

/// Package name of a bare specifier or a path inside `node_modules`
///
/// Scoped packages keep their scope (`@scope/name`). Relative and absolute
/// paths outside `node_modules` have no package.
pub fn package_name(module_id: &str) -> Option<&str> {
    const NODE_MODULES: &str = "node_modules/";

    let tail = match module_id.rfind(NODE_MODULES) {
        Some(index) => &module_id[index + NODE_MODULES.len()..],
        None if module_id.starts_with('.') || module_id.starts_with('/') => return None,
        None => module_id,
    };

    let mut segments = tail.split('/');
    let first = segments.next().filter(|s| !s.is_empty())?;
    if !first.starts_with('@') {
        return Some(first);
    }

    // `@` alone is an alias prefix, not a scope
    if first.len() == 1 {
        return None;
    }
    let second = segments.next().filter(|s| !s.is_empty())?;
    Some(&tail[..first.len() + 1 + second.len()])
}

/// JavaScript minifier settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MinifyOptions {
    /// Calls treated as side-effect free
    pub pure: Vec<String>,
    /// Statements dropped from the output
    pub drop: Vec<DropTarget>,
    /// Comment handling; absent leaves comments untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_comments: Option<LegalComments>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropTarget {
    Console,
    Debugger,
}

/// What to do with comments in processed output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegalComments {
    /// Drop every comment
    None,
    /// Keep legal comments (`/*!`, `@license`, `@preserve`) in place
    Inline,
}

/// Stylesheet pipeline settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CssOptions {
    /// Remove `@charset` at-rules
    pub strip_charset: bool,
    /// Substring patterns a stylesheet path must match, empty matches all
    pub include: Vec<String>,
    /// Substring patterns that skip a stylesheet
    pub exclude: Vec<String>,
}

impl Default for CssOptions {
    fn default() -> Self {
        Self {
            strip_charset: true,
            include: Vec::new(),
            exclude: vec![".min.css".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SheafConfig::default();
        assert_eq!(
            config.resolve.alias.get("@"),
            Some(&PathBuf::from("./src"))
        );
        assert!(!config.server.open);
        assert_eq!(config.build.out_dir, PathBuf::from("dist"));
        assert!(config.build.empty_out_dir);
        assert_eq!(config.build.chunk_size_warning_limit, 2048);
        assert!(!config.build.report_compressed_size);
        assert!(config.css.strip_charset);
        assert!(!config.clear_screen);
        assert!(config.minify.legal_comments.is_none());
    }

    #[test]
    fn test_empty_document_is_default() {
        let config: SheafConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SheafConfig::default());
    }

    #[test]
    fn test_camel_case_keys() {
        let config: SheafConfig = serde_json::from_value(serde_json::json!({
            "clearScreen": true,
            "build": { "outDir": "public", "chunkSizeWarningLimit": 500, "emptyOutDir": false },
            "css": { "stripCharset": false },
            "minify": { "pure": ["console.log"], "drop": ["debugger"], "legalComments": "none" }
        }))
        .unwrap();

        assert!(config.clear_screen);
        assert_eq!(config.build.out_dir, PathBuf::from("public"));
        assert_eq!(config.build.chunk_size_warning_limit, 500);
        assert!(!config.build.empty_out_dir);
        assert!(!config.css.strip_charset);
        assert_eq!(config.minify.drop, vec![DropTarget::Debugger]);
        assert_eq!(config.minify.legal_comments, Some(LegalComments::None));
        // untouched sections keep their defaults
        assert!(config.resolve.alias.contains_key("@"));
    }

    #[test]
    fn test_alias_exact_and_prefix() {
        let resolve = ResolveOptions::default();
        assert_eq!(resolve.resolve_alias("@"), Some(PathBuf::from("./src")));
        assert_eq!(
            resolve.resolve_alias("@/a/b.css"),
            Some(PathBuf::from("./src/a/b.css"))
        );
        assert_eq!(resolve.resolve_alias("@element-plus/icons-vue"), None);
        assert_eq!(resolve.resolve_alias("vue"), None);
    }

    #[test]
    fn test_alias_longest_key_wins() {
        let mut resolve = ResolveOptions::default();
        resolve
            .alias
            .insert("@/styles".into(), PathBuf::from("./assets/css"));

        assert_eq!(
            resolve.resolve_alias("@/styles/main.css"),
            Some(PathBuf::from("./assets/css/main.css"))
        );
        assert_eq!(
            resolve.resolve_alias("@/stylesheet.css"),
            Some(PathBuf::from("./src/stylesheet.css"))
        );
    }

    #[test]
    fn test_config_resolves_alias_against_root() {
        let config = SheafConfig {
            root: Some(PathBuf::from("/project")),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_alias("@/main.css"),
            Some(PathBuf::from("/project/./src/main.css"))
        );
        assert_eq!(config.out_dir(), PathBuf::from("/project/dist"));
    }

    #[test]
    fn test_package_name() {
        assert_eq!(package_name("vue"), Some("vue"));
        assert_eq!(package_name("vue/dist/vue.esm.js"), Some("vue"));
        assert_eq!(package_name("@vueuse/core"), Some("@vueuse/core"));
        assert_eq!(
            package_name("/repo/node_modules/.pnpm/x/node_modules/@vueuse/core/index.mjs"),
            Some("@vueuse/core")
        );
        assert_eq!(package_name("./src/main.ts"), None);
        assert_eq!(package_name("/abs/main.ts"), None);
        assert_eq!(package_name("@/views/home"), None);
        assert_eq!(package_name("@scope"), None);
        assert_eq!(package_name(""), None);
    }

    #[test]
    fn test_manual_chunk_lookup() {
        let mut build = BuildOptions::default();
        build
            .manual_chunks
            .insert("vue".into(), vec!["vue".into(), "vue-router".into(), "pinia".into()]);
        build
            .manual_chunks
            .insert("ui".into(), vec!["element-plus".into(), "@element-plus/icons-vue".into()]);

        assert_eq!(build.manual_chunk_for("pinia"), Some("vue"));
        assert_eq!(
            build.manual_chunk_for("/a/node_modules/@element-plus/icons-vue/dist/index.js"),
            Some("ui")
        );
        assert_eq!(build.manual_chunk_for("lodash"), None);
        assert_eq!(build.chunk_size_warning_bytes(), 2048 * 1024);
    }
}

//! Stylesheet processing core for sheaf.
//!
//! This crate provides a small, postcss-style pipeline for stylesheets:
//!
//! - [`ast`] - tagged-variant node tree (`AtRule`, `Rule`, `Declaration`, `Comment`)
//! - [`parser`] - tolerant structural parser producing a [`Stylesheet`]
//! - [`printer`] - serializer back to CSS text
//! - [`visitor`] - [`Processor`] that dispatches nodes to [`Plugin`]s by kind
//! - [`plugins`] - built-in plugins such as [`CharsetRemoval`]
//!
//! ## Architecture
//!
//! ```text
//! source → parse() → Stylesheet → Processor::process() → to_css() → output
//!                                   │
//!                                   └── plugins keyed by node kind / at-rule name
//! ```
//!
//! ## Example
//!
//! ```rust
//! use sheaf_css::{parse, strip_charset};
//!
//! let mut sheet = parse("@charset \"UTF-8\";\n.a { color: red; }").unwrap();
//! strip_charset(&mut sheet);
//! assert_eq!(sheet.to_css(), ".a {\n  color: red;\n}\n");
//! ```

pub mod ast;
pub mod error;
pub mod parser;
pub mod plugins;
pub mod printer;
pub mod visitor;

pub use ast::{AtRule, Comment, Declaration, Location, Node, NodeKind, Rule, Stylesheet};
pub use error::{ParseError, ParseErrorKind};
pub use parser::{parse, parse_named};
pub use plugins::{CHARSET_KEYWORD, CharsetRemoval, CommentPolicy, CommentRemoval, strip_charset};
pub use visitor::{Action, Listener, Plugin, ProcessStats, Processor};

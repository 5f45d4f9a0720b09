//! Plugin dispatch over a stylesheet tree.
//!
//! A [`Processor`] holds an ordered list of [`Plugin`]s. Each plugin declares the
//! node kinds it listens to (and, for at-rules, optionally the exact keyword).
//! The processor builds a dispatch table once and then walks each document in a
//! single depth-first pass, calling only the handlers registered for the node at
//! hand.
//!
//! ```text
//! Stylesheet ── walk ──▶ node ── kind/name ──▶ [plugin handlers] ──▶ Keep | Remove
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::ast::{AtRule, Comment, Declaration, Node, Rule, Stylesheet};

/// Outcome of a handler for the visited node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    #[default]
    Keep,
    /// Detach the node from its parent. Its children are not visited.
    Remove,
}

/// Node selector a plugin subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    /// Every at-rule regardless of keyword
    AnyAtRule,
    /// At-rules whose keyword equals the given name exactly
    AtRule(&'static str),
    Rule,
    Declaration,
    Comment,
}

/// A stylesheet transformation stage.
///
/// Handlers default to [`Action::Keep`]; implement only the ones matching
/// [`Plugin::listeners`]. Handlers for kinds a plugin does not list are never
/// called.
pub trait Plugin: Send + Sync {
    /// Returns the plugin name for debugging and logging
    fn name(&self) -> Cow<'static, str>;

    fn listeners(&self) -> &'static [Listener];

    fn at_rule(&self, _at_rule: &mut AtRule) -> Action {
        Action::Keep
    }

    fn rule(&self, _rule: &mut Rule) -> Action {
        Action::Keep
    }

    fn declaration(&self, _decl: &mut Declaration) -> Action {
        Action::Keep
    }

    fn comment(&self, _comment: &mut Comment) -> Action {
        Action::Keep
    }
}

/// Counters from one [`Processor::process`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessStats {
    /// Nodes inspected, including removed ones
    pub visited: usize,
    pub removed: usize,
}

impl std::ops::AddAssign for ProcessStats {
    fn add_assign(&mut self, rhs: Self) {
        self.visited += rhs.visited;
        self.removed += rhs.removed;
    }
}

/// Plugin indices per listener, each list in registration order.
#[derive(Debug, Default, Clone)]
struct Dispatch {
    any_at_rule: Vec<usize>,
    at_rule_by_name: FxHashMap<&'static str, Vec<usize>>,
    rule: Vec<usize>,
    declaration: Vec<usize>,
    comment: Vec<usize>,
}

impl Dispatch {
    fn register(&mut self, index: usize, listener: Listener) {
        let slot = match listener {
            Listener::AnyAtRule => &mut self.any_at_rule,
            Listener::AtRule(name) => self.at_rule_by_name.entry(name).or_default(),
            Listener::Rule => &mut self.rule,
            Listener::Declaration => &mut self.declaration,
            Listener::Comment => &mut self.comment,
        };
        // A plugin listing the same listener twice still runs once
        if slot.last() != Some(&index) {
            slot.push(index);
        }
    }

    /// Handlers for an at-rule named `name`: keyword-specific and catch-all,
    /// merged back into registration order.
    fn at_rule_handlers(&self, name: &str) -> Vec<usize> {
        let named = self
            .at_rule_by_name
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        let mut merged = Vec::with_capacity(named.len() + self.any_at_rule.len());
        let (mut i, mut j) = (0, 0);
        while i < named.len() || j < self.any_at_rule.len() {
            let next = match (named.get(i), self.any_at_rule.get(j)) {
                (Some(&a), Some(&b)) if a < b => {
                    i += 1;
                    a
                }
                (Some(&a), Some(&b)) if a == b => {
                    i += 1;
                    j += 1;
                    a
                }
                (_, Some(&b)) => {
                    j += 1;
                    b
                }
                (Some(&a), None) => {
                    i += 1;
                    a
                }
                (None, None) => break,
            };
            merged.push(next);
        }
        merged
    }

    fn is_empty(&self) -> bool {
        self.any_at_rule.is_empty()
            && self.at_rule_by_name.is_empty()
            && self.rule.is_empty()
            && self.declaration.is_empty()
            && self.comment.is_empty()
    }
}

/// Runs registered plugins over stylesheets.
///
/// A processor holds no per-document state and can be shared across threads
/// to process independent documents concurrently.
///
/// # Example
///
/// ```rust
/// use sheaf_css::{CharsetRemoval, Processor, parse};
///
/// let processor = Processor::new().with_plugin(CharsetRemoval);
/// let mut sheet = parse("@charset \"UTF-8\"; .a { color: red }").unwrap();
/// let stats = processor.process(&mut sheet);
///
/// assert_eq!(stats.removed, 1);
/// assert_eq!(sheet.len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct Processor {
    plugins: Vec<Arc<dyn Plugin>>,
    dispatch: Dispatch,
}

impl Processor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin, builder style.
    pub fn with_plugin<P: Plugin + 'static>(mut self, plugin: P) -> Self {
        self.add_plugin(plugin);
        self
    }

    pub fn add_plugin<P: Plugin + 'static>(&mut self, plugin: P) {
        self.add_shared(Arc::new(plugin));
    }

    /// Register an already shared plugin.
    pub fn add_shared(&mut self, plugin: Arc<dyn Plugin>) {
        let index = self.plugins.len();
        for &listener in plugin.listeners() {
            self.dispatch.register(index, listener);
        }
        self.plugins.push(plugin);
    }

    pub fn plugin_names(&self) -> Vec<Cow<'static, str>> {
        self.plugins.iter().map(|plugin| plugin.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Walk `sheet` once in document order, applying every registered handler.
    pub fn process(&self, sheet: &mut Stylesheet) -> ProcessStats {
        let mut stats = ProcessStats::default();
        if self.dispatch.is_empty() {
            return stats;
        }

        self.walk(sheet.nodes_mut(), &mut stats);

        tracing::debug!(
            source = sheet.source_name().unwrap_or("<input>"),
            visited = stats.visited,
            removed = stats.removed,
            "processed stylesheet"
        );
        stats
    }

    fn walk(&self, nodes: &mut Vec<Node>, stats: &mut ProcessStats) {
        nodes.retain_mut(|node| {
            stats.visited += 1;

            if self.visit(node) == Action::Remove {
                stats.removed += 1;
                return false;
            }

            if let Some(children) = node.children_mut() {
                self.walk(children, stats);
            }
            true
        });
    }

    fn visit(&self, node: &mut Node) -> Action {
        match node {
            Node::AtRule(at_rule) => {
                for index in self.dispatch.at_rule_handlers(&at_rule.name) {
                    let plugin = &self.plugins[index];
                    if plugin.at_rule(at_rule) == Action::Remove {
                        tracing::trace!(
                            plugin = %plugin.name(),
                            name = %at_rule.name,
                            location = %at_rule.source,
                            "removed at-rule"
                        );
                        return Action::Remove;
                    }
                }
                Action::Keep
            }
            Node::Rule(rule) => self.run(&self.dispatch.rule, |plugin| plugin.rule(rule)),
            Node::Declaration(decl) => {
                self.run(&self.dispatch.declaration, |plugin| plugin.declaration(decl))
            }
            Node::Comment(comment) => {
                self.run(&self.dispatch.comment, |plugin| plugin.comment(comment))
            }
        }
    }

    fn run(&self, handlers: &[usize], mut call: impl FnMut(&dyn Plugin) -> Action) -> Action {
        for &index in handlers {
            if call(self.plugins[index].as_ref()) == Action::Remove {
                return Action::Remove;
            }
        }
        Action::Keep
    }
}

impl std::fmt::Debug for Processor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Processor")
            .field("plugins", &self.plugin_names())
            .finish()
    }
}

//! Stylesheet node tree.
//!
//! A [`Stylesheet`] owns an ordered list of [`Node`]s. Block nodes own their
//! children directly, so removing a node is a plain `Vec` removal on the parent
//! and never needs a back-reference.

use std::fmt;

/// Start position of a node in its source text.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// 1-based line
    pub line: u32,
    /// 1-based column, counted in characters
    pub column: u32,
    /// Byte offset into the source
    pub offset: usize,
}

impl Location {
    pub fn new(line: u32, column: u32, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}:{})", self.line, self.column)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Node kinds used for visitor dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    AtRule,
    Rule,
    Declaration,
    Comment,
}

/// A directive starting with `@`, e.g. `@charset "UTF-8";` or `@media print { … }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtRule {
    /// Directive keyword without the leading `@`
    pub name: String,
    /// Everything between the name and the terminating `;` or `{`, trimmed
    pub params: String,
    /// `None` for statement at-rules, `Some` for block at-rules (even when empty)
    pub nodes: Option<Vec<Node>>,
    pub source: Location,
}

impl AtRule {
    pub fn new(name: impl Into<String>, params: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: params.into(),
            nodes: None,
            source: Location::default(),
        }
    }

    /// Turn this at-rule into a block at-rule with the given children.
    pub fn with_nodes(mut self, nodes: Vec<Node>) -> Self {
        self.nodes = Some(nodes);
        self
    }
}

/// A qualified rule: `selector { … }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub selector: String,
    pub nodes: Vec<Node>,
    pub source: Location,
}

impl Rule {
    pub fn new(selector: impl Into<String>, nodes: Vec<Node>) -> Self {
        Self {
            selector: selector.into(),
            nodes,
            source: Location::default(),
        }
    }
}

/// A `prop: value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub prop: String,
    pub value: String,
    pub important: bool,
    pub source: Location,
}

impl Declaration {
    pub fn new(prop: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            prop: prop.into(),
            value: value.into(),
            important: false,
            source: Location::default(),
        }
    }
}

/// A `/* … */` comment. `text` excludes the delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub source: Location,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: Location::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    AtRule(AtRule),
    Rule(Rule),
    Declaration(Declaration),
    Comment(Comment),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::AtRule(_) => NodeKind::AtRule,
            Node::Rule(_) => NodeKind::Rule,
            Node::Declaration(_) => NodeKind::Declaration,
            Node::Comment(_) => NodeKind::Comment,
        }
    }

    pub fn source(&self) -> Location {
        match self {
            Node::AtRule(n) => n.source,
            Node::Rule(n) => n.source,
            Node::Declaration(n) => n.source,
            Node::Comment(n) => n.source,
        }
    }

    /// Children of a block node. Statement at-rules, declarations and comments have none.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::AtRule(at_rule) => at_rule.nodes.as_deref(),
            Node::Rule(rule) => Some(&rule.nodes),
            Node::Declaration(_) | Node::Comment(_) => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::AtRule(at_rule) => at_rule.nodes.as_mut(),
            Node::Rule(rule) => Some(&mut rule.nodes),
            Node::Declaration(_) | Node::Comment(_) => None,
        }
    }

    /// Exact, case-sensitive check against the at-rule keyword.
    pub fn is_at_rule(&self, name: &str) -> bool {
        matches!(self, Node::AtRule(at_rule) if at_rule.name == name)
    }
}

impl From<AtRule> for Node {
    fn from(value: AtRule) -> Self {
        Node::AtRule(value)
    }
}

impl From<Rule> for Node {
    fn from(value: Rule) -> Self {
        Node::Rule(value)
    }
}

impl From<Declaration> for Node {
    fn from(value: Declaration) -> Self {
        Node::Declaration(value)
    }
}

impl From<Comment> for Node {
    fn from(value: Comment) -> Self {
        Node::Comment(value)
    }
}

/// A parsed stylesheet document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    nodes: Vec<Node>,
    source_name: Option<String>,
}

impl Stylesheet {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            source_name: None,
        }
    }

    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut Vec<Node> {
        &mut self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    /// Number of top-level nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every at-rule in the document, depth-first in document order.
    pub fn at_rules(&self) -> AtRules<'_> {
        AtRules {
            stack: vec![self.nodes.iter()],
        }
    }
}

/// Iterator returned by [`Stylesheet::at_rules`].
pub struct AtRules<'a> {
    stack: Vec<std::slice::Iter<'a, Node>>,
}

impl<'a> Iterator for AtRules<'a> {
    type Item = &'a AtRule;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(top) = self.stack.last_mut() {
            let Some(node) = top.next() else {
                self.stack.pop();
                continue;
            };

            if let Some(children) = node.children() {
                self.stack.push(children.iter());
            }

            if let Node::AtRule(at_rule) = node {
                return Some(at_rule);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Stylesheet {
        Stylesheet::new(vec![
            AtRule::new("charset", "\"UTF-8\"").into(),
            AtRule::new("media", "print")
                .with_nodes(vec![
                    AtRule::new("charset", "\"x\"").into(),
                    Rule::new(".a", vec![Declaration::new("color", "red").into()]).into(),
                ])
                .into(),
            Comment::new(" hi ").into(),
        ])
    }

    #[test]
    fn at_rules_walks_depth_first() {
        let sheet = sample();
        let names: Vec<_> = sheet.at_rules().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["charset", "media", "charset"]);
    }

    #[test]
    fn children_only_for_blocks() {
        let sheet = sample();
        assert!(sheet.nodes()[0].children().is_none());
        assert_eq!(sheet.nodes()[1].children().map(<[Node]>::len), Some(2));
        assert!(sheet.nodes()[2].children().is_none());
    }

    #[test]
    fn is_at_rule_is_case_sensitive() {
        let node: Node = AtRule::new("CHARSET", "\"UTF-8\"").into();
        assert!(!node.is_at_rule("charset"));
        assert!(node.is_at_rule("CHARSET"));
        assert_eq!(node.kind(), NodeKind::AtRule);
    }

    #[test]
    fn location_display() {
        assert_eq!(Location::new(3, 7, 42).to_string(), "3:7");
    }
}

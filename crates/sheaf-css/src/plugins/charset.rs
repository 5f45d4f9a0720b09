//! Removal of `@charset` directives.
//!
//! Once stylesheets are concatenated or inlined, a `@charset` anywhere but the
//! very first byte of a file is invalid, and the bundle is served as UTF-8
//! anyway. This plugin drops every `@charset` at-rule, at any depth, leaving
//! sibling nodes in their original order.

use std::borrow::Cow;

use crate::ast::{AtRule, Stylesheet};
use crate::visitor::{Action, Listener, Plugin, Processor};

/// At-rule keyword matched by [`CharsetRemoval`], without the `@`.
pub const CHARSET_KEYWORD: &str = "charset";

pub const CHARSET_REMOVAL_PLUGIN: &str = "internal:charset-removal";

/// Drops `@charset` at-rules.
///
/// Matching is exact and case-sensitive: `@CHARSET` is left alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct CharsetRemoval;

impl Plugin for CharsetRemoval {
    fn name(&self) -> Cow<'static, str> {
        CHARSET_REMOVAL_PLUGIN.into()
    }

    fn listeners(&self) -> &'static [Listener] {
        &[Listener::AtRule(CHARSET_KEYWORD)]
    }

    fn at_rule(&self, at_rule: &mut AtRule) -> Action {
        if at_rule.name == CHARSET_KEYWORD {
            Action::Remove
        } else {
            Action::Keep
        }
    }
}

/// Remove every `@charset` at-rule from `sheet` in place.
pub fn strip_charset(sheet: &mut Stylesheet) {
    Processor::new().with_plugin(CharsetRemoval).process(sheet);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn removes_leading_charset() {
        let mut sheet = parse("@charset \"UTF-8\";\n.a{color:red}").unwrap();
        strip_charset(&mut sheet);
        assert_eq!(sheet.to_css(), ".a {\n  color: red;\n}\n");
    }

    #[test]
    fn handler_rejects_other_names() {
        let mut media = AtRule::new("media", "print");
        assert_eq!(CharsetRemoval.at_rule(&mut media), Action::Keep);

        let mut empty = AtRule::new("", "");
        assert_eq!(CharsetRemoval.at_rule(&mut empty), Action::Keep);

        let mut charset = AtRule::new("charset", "\"UTF-8\"");
        assert_eq!(CharsetRemoval.at_rule(&mut charset), Action::Remove);
    }

    #[test]
    fn plugin_identity() {
        assert_eq!(CharsetRemoval.name(), "internal:charset-removal");
        assert_eq!(CharsetRemoval.listeners(), &[Listener::AtRule("charset")]);
    }
}

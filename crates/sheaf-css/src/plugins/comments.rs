//! Comment stripping.

use std::borrow::Cow;

use crate::ast::Comment;
use crate::visitor::{Action, Listener, Plugin};

/// Which comments [`CommentRemoval`] drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentPolicy {
    /// Drop every comment, legal ones included
    DiscardAll,
    /// Drop ordinary comments, keep legal ones in place
    KeepLegal,
}

/// Legal comments start with `!` or carry a `@license` / `@preserve` marker.
pub fn is_legal_comment(text: &str) -> bool {
    text.starts_with('!') || text.contains("@license") || text.contains("@preserve")
}

#[derive(Debug, Clone, Copy)]
pub struct CommentRemoval {
    policy: CommentPolicy,
}

impl CommentRemoval {
    pub fn new(policy: CommentPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> CommentPolicy {
        self.policy
    }
}

impl Plugin for CommentRemoval {
    fn name(&self) -> Cow<'static, str> {
        "internal:comment-removal".into()
    }

    fn listeners(&self) -> &'static [Listener] {
        &[Listener::Comment]
    }

    fn comment(&self, comment: &mut Comment) -> Action {
        match self.policy {
            CommentPolicy::DiscardAll => Action::Remove,
            CommentPolicy::KeepLegal if is_legal_comment(&comment.text) => Action::Keep,
            CommentPolicy::KeepLegal => Action::Remove,
        }
    }
}

//! Built-in stylesheet plugins.

mod charset;
mod comments;

pub use charset::{CHARSET_KEYWORD, CHARSET_REMOVAL_PLUGIN, CharsetRemoval, strip_charset};
pub use comments::{CommentPolicy, CommentRemoval, is_legal_comment};

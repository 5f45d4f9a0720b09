//! Parse errors with source-labelled diagnostics.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::ast::Location;

/// What went wrong while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unclosed block")]
    UnclosedBlock,

    #[error("unclosed comment")]
    UnclosedComment,

    #[error("unclosed string")]
    UnclosedString,

    #[error("unclosed bracket")]
    UnclosedBracket,

    #[error("unexpected `}}`")]
    UnexpectedCloseBrace,

    #[error("unknown word `{0}`")]
    UnknownWord(String),
}

impl ParseErrorKind {
    fn help(&self) -> &'static str {
        match self {
            ParseErrorKind::UnclosedBlock => "add the missing `}`",
            ParseErrorKind::UnclosedComment => "close the comment with `*/`",
            ParseErrorKind::UnclosedString => "add the missing closing quote",
            ParseErrorKind::UnclosedBracket => "add the missing `)`",
            ParseErrorKind::UnexpectedCloseBrace => "remove the extra `}`",
            ParseErrorKind::UnknownWord(_) => {
                "declarations need a `:` between property and value, rules need a `{ … }` block"
            }
        }
    }
}

/// Error returned by [`crate::parse`].
#[derive(Debug, Error, Diagnostic)]
#[error("{kind} at {location}")]
#[diagnostic(code(sheaf::css::parse_error))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub location: Location,

    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,
}

impl ParseError {
    pub(crate) fn new(
        kind: ParseErrorKind,
        location: Location,
        len: usize,
        name: &str,
        source: &str,
    ) -> Self {
        let help = Some(kind.help().to_string());
        Self {
            kind,
            location,
            src: NamedSource::new(name, source.to_string()),
            span: SourceSpan::from((location.offset, len.max(1))),
            help,
        }
    }
}

//! Tolerant structural stylesheet parser.
//!
//! The parser only recovers the shape of a stylesheet: at-rules, rules,
//! declarations and comments. Selectors, at-rule params and declaration values
//! are kept as trimmed source text. Strings, escapes, parentheses and comments are
//! honored while looking for the `;`, `{` and `}` that delimit nodes, so
//! `url(a;b)` or `content: "}"` never split a node.

use crate::ast::{AtRule, Comment, Declaration, Location, Node, Rule, Stylesheet};
use crate::error::{ParseError, ParseErrorKind};

const ANONYMOUS_SOURCE: &str = "<input>";

/// Parse stylesheet text into a [`Stylesheet`].
///
/// # Example
///
/// ```rust
/// use sheaf_css::{NodeKind, parse};
///
/// let sheet = parse("@charset \"UTF-8\";\n.a { color: red }").unwrap();
/// assert_eq!(sheet.len(), 2);
/// assert_eq!(sheet.nodes()[0].kind(), NodeKind::AtRule);
/// ```
pub fn parse(source: &str) -> Result<Stylesheet, ParseError> {
    Parser::new(ANONYMOUS_SOURCE, source).parse_stylesheet()
}

/// Parse stylesheet text, recording `name` (usually a file path) for diagnostics.
pub fn parse_named(name: &str, source: &str) -> Result<Stylesheet, ParseError> {
    let sheet = Parser::new(name, source).parse_stylesheet()?;
    Ok(sheet.with_source_name(name))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    Semicolon,
    OpenBrace,
    CloseBrace,
    Eof,
}

struct Parser<'a> {
    name: &'a str,
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line_starts: Vec<usize>,
}

impl<'a> Parser<'a> {
    fn new(name: &'a str, source: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(source.match_indices('\n').map(|(idx, _)| idx + 1));

        Self {
            name,
            source,
            bytes: source.as_bytes(),
            pos: 0,
            line_starts,
        }
    }

    fn parse_stylesheet(mut self) -> Result<Stylesheet, ParseError> {
        tracing::trace!(source = self.name, bytes = self.bytes.len(), "parsing stylesheet");
        let nodes = self.parse_nodes(None)?;
        Ok(Stylesheet::new(nodes))
    }

    /// Parse nodes until the closing `}` of the block opened at `open_brace`,
    /// or until end of input for the top level.
    fn parse_nodes(&mut self, open_brace: Option<usize>) -> Result<Vec<Node>, ParseError> {
        let mut nodes = Vec::new();

        loop {
            self.skip_whitespace();

            let Some(byte) = self.peek() else {
                return match open_brace {
                    Some(offset) => Err(self.error(ParseErrorKind::UnclosedBlock, offset, 1)),
                    None => Ok(nodes),
                };
            };

            match byte {
                b'}' => {
                    if open_brace.is_some() {
                        self.pos += 1;
                        return Ok(nodes);
                    }
                    return Err(self.error(ParseErrorKind::UnexpectedCloseBrace, self.pos, 1));
                }
                // Stray semicolons between nodes carry no meaning
                b';' => self.pos += 1,
                b'/' if self.peek_at(1) == Some(b'*') => nodes.push(self.parse_comment()?),
                b'@' => nodes.push(self.parse_at_rule()?),
                _ => nodes.push(self.parse_rule_or_declaration()?),
            }
        }
    }

    fn parse_comment(&mut self) -> Result<Node, ParseError> {
        let start = self.pos;
        let body_start = start + 2;

        let Some(len) = self.source[body_start..].find("*/") else {
            return Err(self.error(ParseErrorKind::UnclosedComment, start, 2));
        };

        let body_end = body_start + len;
        self.pos = body_end + 2;

        Ok(Comment {
            text: self.source[body_start..body_end].to_string(),
            source: self.location(start),
        }
        .into())
    }

    fn parse_at_rule(&mut self) -> Result<Node, ParseError> {
        let start = self.pos;
        self.pos += 1;

        let name_start = self.pos;
        while let Some(byte) = self.peek() {
            if byte == b'\\' {
                self.bump_escape();
            } else if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' || byte >= 0x80 {
                self.pos += 1;
            } else {
                break;
            }
        }
        let name_end = self.pos;

        let (params_end, terminator) = self.scan_prelude()?;
        let nodes = match terminator {
            Terminator::OpenBrace => Some(self.parse_nodes(Some(params_end))?),
            Terminator::Semicolon | Terminator::CloseBrace | Terminator::Eof => None,
        };

        Ok(AtRule {
            name: self.source[name_start..name_end].to_string(),
            params: self.source[name_end..params_end].trim().to_string(),
            nodes,
            source: self.location(start),
        }
        .into())
    }

    fn parse_rule_or_declaration(&mut self) -> Result<Node, ParseError> {
        let source_text = self.source;
        let start = self.pos;
        let (end, terminator) = self.scan_prelude()?;
        let text = source_text[start..end].trim_end();
        let source = self.location(start);

        if terminator == Terminator::OpenBrace {
            let nodes = self.parse_nodes(Some(end))?;
            return Ok(Rule {
                selector: text.to_string(),
                nodes,
                source,
            }
            .into());
        }

        let prop = text.find(':').map(|colon| (text[..colon].trim(), colon));
        let Some((prop, colon)) = prop.filter(|(prop, _)| !prop.is_empty()) else {
            let word = text.split_whitespace().next().unwrap_or(text).to_string();
            return Err(self.error(ParseErrorKind::UnknownWord(word), start, text.len()));
        };

        let (value, important) = split_important(text[colon + 1..].trim());

        Ok(Declaration {
            prop: prop.to_string(),
            value,
            important,
            source,
        }
        .into())
    }

    /// Advance to the next top-level `;`, `{` or `}`.
    ///
    /// Returns the offset where the prelude ends and what ended it. `;` and `{`
    /// are consumed; `}` is left for the enclosing block.
    fn scan_prelude(&mut self) -> Result<(usize, Terminator), ParseError> {
        let mut paren_depth = 0usize;
        let mut paren_open = 0usize;

        while let Some(byte) = self.peek() {
            match byte {
                b'"' | b'\'' => self.skip_string(byte)?,
                b'/' if self.peek_at(1) == Some(b'*') => self.skip_comment()?,
                b'\\' => self.bump_escape(),
                b'(' => {
                    if paren_depth == 0 {
                        paren_open = self.pos;
                    }
                    paren_depth += 1;
                    self.pos += 1;
                }
                b')' => {
                    paren_depth = paren_depth.saturating_sub(1);
                    self.pos += 1;
                }
                b';' if paren_depth == 0 => {
                    let end = self.pos;
                    self.pos += 1;
                    return Ok((end, Terminator::Semicolon));
                }
                b'{' if paren_depth == 0 => {
                    let end = self.pos;
                    self.pos += 1;
                    return Ok((end, Terminator::OpenBrace));
                }
                b'}' if paren_depth == 0 => return Ok((self.pos, Terminator::CloseBrace)),
                _ => self.pos += 1,
            }
        }

        if paren_depth > 0 {
            return Err(self.error(ParseErrorKind::UnclosedBracket, paren_open, 1));
        }

        Ok((self.pos, Terminator::Eof))
    }

    fn skip_string(&mut self, quote: u8) -> Result<(), ParseError> {
        let start = self.pos;
        self.pos += 1;

        loop {
            match self.peek() {
                None => return Err(self.error(ParseErrorKind::UnclosedString, start, 1)),
                Some(b'\\') => self.bump_escape(),
                Some(byte) if byte == quote => {
                    self.pos += 1;
                    return Ok(());
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn skip_comment(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        match self.source[start + 2..].find("*/") {
            Some(len) => {
                self.pos = start + 2 + len + 2;
                Ok(())
            }
            None => Err(self.error(ParseErrorKind::UnclosedComment, start, 2)),
        }
    }

    /// Skip a backslash and the whole character it escapes.
    fn bump_escape(&mut self) {
        self.pos += 1;
        if let Some(ch) = self.source[self.pos..].chars().next() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(byte) if byte.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    fn location(&self, offset: usize) -> Location {
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };
        let line_start = self.line_starts[line_idx];
        let column = self
            .source
            .get(line_start..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(offset - line_start);

        Location::new(line_idx as u32 + 1, column as u32 + 1, offset)
    }

    fn error(&self, kind: ParseErrorKind, offset: usize, len: usize) -> ParseError {
        ParseError::new(kind, self.location(offset), len, self.name, self.source)
    }
}

fn split_important(value: &str) -> (String, bool) {
    if let Some(bang) = value.rfind('!') {
        if value[bang + 1..].trim().eq_ignore_ascii_case("important") {
            return (value[..bang].trim_end().to_string(), true);
        }
    }
    (value.to_string(), false)
}

//! Stylesheet serializer.
//!
//! Output is normalized: two-space indentation, one node per line, `;` after
//! every declaration. Parsing the output again yields the same tree (apart from
//! source locations).

use std::fmt::{self, Write};

use crate::ast::{Node, Stylesheet};

const INDENT: &str = "  ";

impl Stylesheet {
    /// Serialize to CSS text. An empty stylesheet yields an empty string.
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in self.nodes() {
            write_node(f, node, 0)?;
            f.write_char('\n')?;
        }
        Ok(())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self, 0)
    }
}

fn write_node<W: Write>(out: &mut W, node: &Node, depth: usize) -> fmt::Result {
    write_indent(out, depth)?;

    match node {
        Node::AtRule(at_rule) => {
            write!(out, "@{}", at_rule.name)?;
            if !at_rule.params.is_empty() {
                write!(out, " {}", at_rule.params)?;
            }
            match &at_rule.nodes {
                Some(children) => write_block(out, children, depth),
                None => out.write_char(';'),
            }
        }
        Node::Rule(rule) => {
            out.write_str(&rule.selector)?;
            write_block(out, &rule.nodes, depth)
        }
        Node::Declaration(decl) => {
            write!(out, "{}: {}", decl.prop, decl.value)?;
            if decl.important {
                out.write_str(" !important")?;
            }
            out.write_char(';')
        }
        Node::Comment(comment) => write!(out, "/*{}*/", comment.text),
    }
}

fn write_block<W: Write>(out: &mut W, children: &[Node], depth: usize) -> fmt::Result {
    if children.is_empty() {
        return out.write_str(" {}");
    }

    out.write_str(" {\n")?;
    for child in children {
        write_node(out, child, depth + 1)?;
        out.write_char('\n')?;
    }
    write_indent(out, depth)?;
    out.write_char('}')
}

fn write_indent<W: Write>(out: &mut W, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        out.write_str(INDENT)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::ast::{AtRule, Comment, Declaration, Rule, Stylesheet};
    use crate::parse;

    #[test]
    fn prints_empty_stylesheet_as_empty_string() {
        assert_eq!(Stylesheet::default().to_css(), "");
    }

    #[test]
    fn prints_nested_tree() {
        let mut important = Declaration::new("margin", "0");
        important.important = true;

        let sheet = Stylesheet::new(vec![
            AtRule::new("charset", "\"UTF-8\"").into(),
            AtRule::new("media", "print")
                .with_nodes(vec![Rule::new(
                    ".a",
                    vec![Declaration::new("color", "red").into(), important.into()],
                )
                .into()])
                .into(),
            Comment::new(" done ").into(),
            Rule::new(".empty", vec![]).into(),
        ]);

        assert_eq!(
            sheet.to_css(),
            "@charset \"UTF-8\";\n\
             @media print {\n  .a {\n    color: red;\n    margin: 0 !important;\n  }\n}\n\
             /* done */\n\
             .empty {}\n"
        );
    }

    #[test]
    fn at_rule_without_params_has_no_trailing_space() {
        let sheet = Stylesheet::new(vec![AtRule::new("font-face", "").with_nodes(vec![]).into()]);
        assert_eq!(sheet.to_css(), "@font-face {}\n");
    }

    #[test]
    fn output_reparses_to_same_output() {
        let input = "@import url(\"a.css\");@media screen{.a{color:red;b:c!important}}/*x*/.b{}";
        let first = parse(input).unwrap().to_css();
        let second = parse(&first).unwrap().to_css();
        assert_eq!(first, second);
    }
}

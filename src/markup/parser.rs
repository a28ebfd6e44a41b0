// SPDX-License-Identifier: Apache-2.0

//! A forgiving parser for markup fragments.
//!
//! The parser never fails. A `<` that does not start a well-formed tag is
//! text, closing tags without a matching open element are dropped, and
//! elements left open at the end of the input are closed there.

use crate::markup::{Element, Node, Tag};
use crate::text;
use log::{trace, warn};

/// Parses a markup fragment into a list of top-level nodes.
///
/// Character references in text and attribute values are decoded.
///
/// # Examples
///
/// ```
/// use formatted_text::markup::{parse, Element, Node, Tag};
///
/// let nodes = parse("<b>bold</b> &amp; plain");
/// assert_eq!(nodes, vec![
///     Element::new(Tag::B).with_children([Node::text("bold")]).into(),
///     Node::text(" & plain"),
/// ]);
/// ```
pub fn parse(markup: &str) -> Vec<Node> {
    Parser::new(markup).parse()
}

#[derive(Debug)]
struct Parser<'a> {
    input: &'a str,
    cursor: usize,
    text: String,
    open: Vec<Element>,
    nodes: Vec<Node>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            cursor: 0,
            text: String::new(),
            open: Vec::new(),
            nodes: Vec::new(),
        }
    }

    fn parse(mut self) -> Vec<Node> {
        while self.cursor < self.input.len() {
            let consumed = self.comment() || self.close_tag() || self.open_tag();
            if !consumed {
                self.plain_char();
            }
        }
        self.flush_text();
        while let Some(element) = self.open.pop() {
            trace!("closing <{}> at end of input", element.tag.name());
            self.append(element.into());
        }
        self.nodes
    }

    fn rest(&self) -> &'a str {
        &self.input[self.cursor..]
    }

    fn append(&mut self, node: Node) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.nodes.push(node),
        }
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let raw = std::mem::take(&mut self.text);
            self.append(Node::Text(text::convert_html_entities(&raw)));
        }
    }

    fn plain_char(&mut self) {
        if let Some(ch) = self.rest().chars().next() {
            self.text.push(ch);
            self.cursor += ch.len_utf8();
        }
    }

    fn comment(&mut self) -> bool {
        let Some(body) = self.rest().strip_prefix("<!--") else {
            return false;
        };
        self.flush_text();
        let (comment, consumed) = match body.find("-->") {
            Some(end) => (&body[..end], "<!--".len() + end + "-->".len()),
            None => (body, self.rest().len()),
        };
        self.append(Node::Comment(comment.to_string()));
        self.cursor += consumed;
        true
    }

    fn close_tag(&mut self) -> bool {
        let Some(after) = self.rest().strip_prefix("</") else {
            return false;
        };
        let name_len = tag_name_len(after);
        if name_len == 0 {
            return false;
        }
        let Some(end) = after.find('>') else {
            return false;
        };

        self.flush_text();
        let tag = Tag::from_name(&after[..name_len]);
        self.cursor += "</".len() + end + 1;

        match self.open.iter().rposition(|element| element.tag == tag) {
            Some(position) => {
                while self.open.len() > position {
                    if let Some(element) = self.open.pop() {
                        self.append(element.into());
                    }
                }
            }
            None => warn!("dropping unmatched </{}>", tag.name()),
        }
        true
    }

    fn open_tag(&mut self) -> bool {
        let Some((element, self_closing, consumed)) = open_tag(self.rest()) else {
            return false;
        };
        self.flush_text();
        self.cursor += consumed;
        trace!("opening <{}>", element.tag.name());

        if self_closing || element.tag.is_void() {
            self.append(element.into());
        } else {
            self.open.push(element);
        }
        true
    }
}

/// Length of the tag name at the start of `s`, which must begin with an
/// ASCII letter.
fn tag_name_len(s: &str) -> usize {
    if !s.starts_with(|ch: char| ch.is_ascii_alphabetic()) {
        return 0;
    }
    s.find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '-' || ch == ':' || ch == '_'))
        .unwrap_or(s.len())
}

/// Parses an opening tag at the start of `s`.
///
/// Returns the element, whether it was written self-closing (`<br/>`), and
/// the number of bytes consumed, or `None` if `s` does not start with a
/// complete opening tag.
fn open_tag(s: &str) -> Option<(Element, bool, usize)> {
    let after = s.strip_prefix('<')?;
    let name_len = tag_name_len(after);
    if name_len == 0 {
        return None;
    }

    let mut element = Element::new(Tag::from_name(&after[..name_len]));
    let mut position = 1 + name_len;

    loop {
        let rest = &s[position..];
        let trimmed = rest.trim_start();
        position += rest.len() - trimmed.len();

        if trimmed.starts_with('>') {
            return Some((element, false, position + 1));
        }
        if trimmed.starts_with("/>") {
            return Some((element, true, position + 2));
        }
        if trimmed.is_empty() {
            return None;
        }

        let (attr, consumed) = attribute(trimmed)?;
        position += consumed;
        if let Some((name, value)) = attr {
            element.attrs.push((name, value));
        }
    }
}

/// Parses one attribute at the start of `s`.
///
/// Returns the attribute (or `None` for a stray character that is skipped)
/// and the number of bytes consumed, or `None` overall if a quoted value is
/// never closed.
fn attribute(s: &str) -> Option<(Option<(String, String)>, usize)> {
    let name_len = s
        .find(|ch: char| ch.is_whitespace() || ch == '=' || ch == '>' || ch == '/')
        .unwrap_or(s.len());
    if name_len == 0 {
        // A '/' or '=' that is not part of anything useful.
        return Some((None, 1));
    }
    let name = s[..name_len].to_ascii_lowercase();

    let rest = &s[name_len..];
    let trimmed = rest.trim_start();
    let Some(value_part) = trimmed.strip_prefix('=') else {
        return Some((Some((name, String::new())), name_len));
    };
    let value_start = value_part.trim_start();
    let mut consumed = s.len() - value_start.len();

    let raw = match value_start.chars().next() {
        Some(quote @ ('\'' | '"')) => {
            let end = value_start[1..].find(quote)?;
            consumed += end + 2;
            &value_start[1..1 + end]
        }
        _ => {
            let end = value_start
                .find(|ch: char| ch.is_whitespace() || ch == '>')
                .unwrap_or(value_start.len());
            consumed += end;
            &value_start[..end]
        }
    };

    Some((Some((name, text::convert_html_entities(raw))), consumed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::do_logging;
    use pretty_assertions::assert_eq;

    fn element(name: &str, children: Vec<Node>) -> Node {
        Element::new(Tag::from_name(name)).with_children(children).into()
    }

    #[test]
    fn it_parses_plain_text() {
        assert_eq!(parse("just text"), vec![Node::text("just text")]);
    }

    #[test]
    fn it_parses_nothing_from_empty_input() {
        assert_eq!(parse(""), vec![]);
    }

    #[test]
    fn it_parses_nested_elements() {
        let nodes = parse("<b>a<i>b</i>c</b>");
        assert_eq!(
            nodes,
            vec![element(
                "b",
                vec![Node::text("a"), element("i", vec![Node::text("b")]), Node::text("c")]
            )]
        );
    }

    #[test]
    fn it_parses_quoted_and_unquoted_attributes() {
        let nodes = parse(r#"<pre data-language='js' class="x y" hidden id=main>code</pre>"#);
        let expected = Element::new(Tag::Pre)
            .with_attr("data-language", "js")
            .with_attr("class", "x y")
            .with_attr("hidden", "")
            .with_attr("id", "main")
            .with_children([Node::text("code")]);
        assert_eq!(nodes, vec![expected.into()]);
    }

    #[test]
    fn it_decodes_references_in_attributes_and_text() {
        let nodes = parse("<a href='https://example.com/?a=1&amp;b=2'>&lt;x&gt;</a>");
        let expected = Element::new(Tag::A)
            .with_attr("href", "https://example.com/?a=1&b=2")
            .with_children([Node::text("<x>")]);
        assert_eq!(nodes, vec![expected.into()]);
    }

    #[test]
    fn it_never_gives_children_to_void_elements() {
        let nodes = parse("<img alt='x' data-document-id='1'>after<br>");
        let img = Element::new(Tag::Img)
            .with_attr("alt", "x")
            .with_attr("data-document-id", "1");
        assert_eq!(
            nodes,
            vec![img.into(), Node::text("after"), Element::new(Tag::Br).into()]
        );
    }

    #[test]
    fn it_honors_self_closing_syntax() {
        let nodes = parse("<span/>x");
        assert_eq!(nodes, vec![element("span", vec![]), Node::text("x")]);
    }

    #[test]
    fn it_treats_a_stray_angle_bracket_as_text() {
        assert_eq!(parse("a < b > c"), vec![Node::text("a < b > c")]);
        assert_eq!(parse("1 <2"), vec![Node::text("1 <2")]);
    }

    #[test]
    fn it_treats_an_unterminated_tag_as_text() {
        assert_eq!(parse("x <b class='y"), vec![Node::text("x <b class='y")]);
        assert_eq!(parse("x <b"), vec![Node::text("x <b")]);
    }

    #[test]
    fn it_drops_unmatched_closing_tags() {
        do_logging();
        assert_eq!(parse("a</b>c"), vec![Node::text("a"), Node::text("c")]);
    }

    #[test]
    fn it_closes_open_elements_at_the_end_of_input() {
        let nodes = parse("<b><i>x");
        assert_eq!(
            nodes,
            vec![element("b", vec![element("i", vec![Node::text("x")])])]
        );
    }

    #[test]
    fn it_closes_intervening_elements_on_a_matching_closer() {
        let nodes = parse("<b><i>x</b>y");
        assert_eq!(
            nodes,
            vec![
                element("b", vec![element("i", vec![Node::text("x")])]),
                Node::text("y"),
            ]
        );
    }

    #[test]
    fn it_parses_comments() {
        let nodes = parse("a<!-- note -->b<!-- open");
        assert_eq!(
            nodes,
            vec![
                Node::text("a"),
                Node::Comment(String::from(" note ")),
                Node::text("b"),
                Node::Comment(String::from(" open")),
            ]
        );
    }

    #[test]
    fn it_matches_tag_names_case_insensitively() {
        let nodes = parse("<B>x</b>");
        assert_eq!(nodes, vec![element("b", vec![Node::text("x")])]);
    }
}

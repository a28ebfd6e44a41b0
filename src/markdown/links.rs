// SPDX-License-Identifier: Apache-2.0

//! Expands link shorthand.
//!
//! `[label](target)` becomes a link tag. The label is kept as opaque text
//! and nothing else is touched: style markers, code and custom emoji
//! shorthand (`[alt](customEmoji:id)`) all pass through for
//! [`ast::build()`](crate::markdown::ast::build) to handle afterwards.

use crate::markdown::ast::Node;
use crate::markdown::render::render;
use log::trace;

const LINK_SEPARATOR: &str = "](";
const CUSTOM_EMOJI_SCHEME: &str = "customEmoji:";

/// Expands every `[label](target)` span in `input` into a link tag.
///
/// # Examples
///
/// ```
/// use formatted_text::markdown::links::expand;
///
/// assert_eq!(
///     expand("see **[docs](docs.rs)**"),
///     "see **<a href='https://docs.rs'>docs</a>**",
/// );
/// assert_eq!(expand("[a] (b)"), "[a] (b)");
/// ```
pub fn expand(input: &str) -> String {
    render(&build(input))
}

/// Builds a tree of plain text and links from `input`.
///
/// Text between links is kept verbatim, so rendering the tree reproduces
/// `input` exactly outside the link spans. A link whose `)` is missing takes
/// the rest of the input as its target.
pub fn build(input: &str) -> Node {
    let mut nodes = Vec::new();
    let mut text = String::new();
    let mut rest = input;

    while let Some(ch) = rest.chars().next() {
        if ch == '[' {
            if let Some((label, target, consumed)) = link(rest) {
                if !text.is_empty() {
                    nodes.push(Node::Text(std::mem::take(&mut text)));
                }
                let node = Node::link(label, target);
                trace!("link: {node:?}");
                nodes.push(node);
                rest = &rest[consumed..];
                continue;
            }
        }
        text.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    if !text.is_empty() {
        nodes.push(Node::Text(text));
    }
    Node::Root(nodes)
}

/// Recognizes a link at the start of `rest`, which begins with `[`.
///
/// Returns the label, the raw target, and the number of bytes consumed.
fn link(rest: &str) -> Option<(&str, &str, usize)> {
    let label_end = 1 + rest[1..].find(']')?;
    let after_label = &rest[label_end..];
    if !after_label.starts_with(LINK_SEPARATOR) {
        return None;
    }

    let target_start = label_end + LINK_SEPARATOR.len();
    let target_rest = &rest[target_start..];
    if target_rest.starts_with(CUSTOM_EMOJI_SCHEME) {
        return None;
    }

    let (target, consumed) = match target_rest.find(')') {
        Some(end) => (&target_rest[..end], target_start + end + 1),
        None => (target_rest, rest.len()),
    };
    Some((&rest[1..label_end], target, consumed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::ast;
    use crate::parse_assert_eq;
    use pretty_assertions::assert_eq;

    fn parse(input: &str) -> String {
        expand(input)
    }

    #[test]
    fn it_does_not_touch_normal_text() {
        let text = "no links **here** [at all]";
        parse_assert_eq!(text, text);
    }

    #[test]
    fn it_expands_a_web_link() {
        parse_assert_eq!(
            "go to [site](example.com) now",
            "go to <a href='https://example.com'>site</a> now"
        );
    }

    #[test]
    fn it_keeps_targets_with_a_scheme() {
        parse_assert_eq!(
            "[ftp](ftp://example.com/file)",
            "<a href='ftp://example.com/file'>ftp</a>"
        );
    }

    #[test]
    fn it_expands_an_email_link() {
        parse_assert_eq!(
            "[a@b.com](a@b.com)",
            "<a href='mailto:a@b.com'>a@b.com</a>"
        );
    }

    #[test]
    fn it_leaves_custom_emoji_shorthand_alone() {
        let text = "[:wave:](customEmoji:123) and [x](y.org)";
        parse_assert_eq!(text, "[:wave:](customEmoji:123) and <a href='https://y.org'>x</a>");
    }

    #[test]
    fn it_does_not_parse_markers_in_labels() {
        parse_assert_eq!("[**b**](b.com)", "<a href='https://b.com'>**b**</a>");
    }

    #[test]
    fn it_requires_the_target_to_follow_the_label() {
        parse_assert_eq!("[a] (b.com) [c]", "[a] (b.com) [c]");
    }

    #[test]
    fn it_takes_the_rest_of_the_input_for_an_unterminated_target() {
        parse_assert_eq!("see [a](b.com", "see <a href='https://b.com'>a</a>");
    }

    #[test]
    fn it_escapes_targets() {
        parse_assert_eq!(
            "[q](example.com/?a=1&b=2)",
            "<a href='https://example.com/?a=1&amp;b=2'>q</a>"
        );
    }

    #[test]
    fn it_builds_text_and_link_nodes() {
        let tree = build("a [b](c.io) d");
        assert_eq!(
            tree,
            Node::Root(vec![
                Node::Text(String::from("a ")),
                Node::link("b", "c.io"),
                Node::Text(String::from(" d")),
            ])
        );
    }

    #[test]
    fn it_hands_the_rest_to_the_builder() {
        let tree = ast::build(&expand("**[site](example.com)**"));
        assert_eq!(
            tree,
            Node::Root(vec![Node::Bold(vec![Node::Text(String::from(
                "<a href='https://example.com'>site</a>"
            ))])])
        );
    }
}

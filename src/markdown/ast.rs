// SPDX-License-Identifier: Apache-2.0

//! The inline markup syntax tree and the builder that produces it.
//!
//! The syntax is deliberately small:
//!
//! | Markup                          | Node                     |
//! |---------------------------------|--------------------------|
//! | `` ```lang\ncode``` ``          | [`Node::Pre`]            |
//! | `` `code` ``                    | [`Node::Code`]           |
//! | `[alt](customEmoji:id)`         | [`Node::EmojiRef`]       |
//! | `**bold**`                      | [`Node::Bold`]           |
//! | `__italic__`                    | [`Node::Italic`]         |
//! | `~~strike~~`                    | [`Node::Strikethrough`]  |
//! | `\|\|spoiler\|\|`               | [`Node::Spoiler`]        |
//! | `<br>`, `<div>`                 | a `"\n"` [`Node::Text`]  |
//!
//! Links (`[label](target)`) are recognized by a separate pass; see
//! [`crate::markdown::links`].
//!
//! The builder is total: every string produces a tree, and unterminated
//! constructs simply swallow the rest of the input.

use log::trace;

/// Delimits a fenced code block.
const FENCE: &str = "```";

/// Delimits inline code.
const INLINE_FENCE: char = '`';

/// Marks the target of a custom emoji shorthand.
const CUSTOM_EMOJI_MARKER: &str = "](customEmoji:";

/// Paired style markers, in the order they are tried.
const STYLE_MARKERS: [(&str, StyleKind); 4] = [
    ("**", StyleKind::Bold),
    ("__", StyleKind::Italic),
    ("~~", StyleKind::Strikethrough),
    ("||", StyleKind::Spoiler),
];

/// A node in the inline markup syntax tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// The top of a tree.
    Root(Vec<Node>),

    /// A run of plain text.
    Text(String),

    /// Inline code.
    Code(String),

    /// A fenced code block.
    ///
    /// `language` is only present if a language tag was given on the line
    /// of the opening fence.
    Pre {
        content: String,
        language: Option<String>,
    },

    /// A custom emoji reference with its fallback text.
    EmojiRef { alt: String, document_id: String },

    Bold(Vec<Node>),
    Italic(Vec<Node>),
    Strikethrough(Vec<Node>),
    Spoiler(Vec<Node>),

    /// A hyperlink. Build these with [`Node::link()`] so the target is
    /// normalized.
    Link { label: String, target: String },
}

impl Node {
    /// Creates a link node, normalizing `target`.
    ///
    /// Targets with a scheme are used verbatim, targets that look like an
    /// email address become `mailto:` links, and everything else is assumed
    /// to be a web address.
    ///
    /// # Examples
    ///
    /// ```
    /// use formatted_text::markdown::ast::Node;
    ///
    /// let link = Node::link("site", "example.com");
    /// assert_eq!(link, Node::Link {
    ///     label: String::from("site"),
    ///     target: String::from("https://example.com"),
    /// });
    ///
    /// let link = Node::link("me", "me@example.com");
    /// assert!(matches!(link, Node::Link { target, .. } if target == "mailto:me@example.com"));
    /// ```
    pub fn link(label: impl Into<String>, target: &str) -> Self {
        let target = if target.contains("://") {
            target.to_string()
        } else if target.contains('@') {
            format!("mailto:{target}")
        } else {
            format!("https://{target}")
        };
        Node::Link {
            label: label.into(),
            target,
        }
    }

    /// The child nodes of a container node, or `None` for leaves.
    pub fn children(&self) -> Option<&Vec<Node>> {
        match self {
            Node::Root(children)
            | Node::Bold(children)
            | Node::Italic(children)
            | Node::Strikethrough(children)
            | Node::Spoiler(children) => Some(children),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StyleKind {
    Bold,
    Italic,
    Strikethrough,
    Spoiler,
}

impl StyleKind {
    fn node(self, children: Vec<Node>) -> Node {
        match self {
            StyleKind::Bold => Node::Bold(children),
            StyleKind::Italic => Node::Italic(children),
            StyleKind::Strikethrough => Node::Strikethrough(children),
            StyleKind::Spoiler => Node::Spoiler(children),
        }
    }
}

/// Builds a syntax tree from inline markup.
///
/// Always returns a [`Node::Root`].
///
/// # Examples
///
/// ```
/// use formatted_text::markdown::ast::{build, Node};
///
/// let tree = build("hi **there**");
/// assert_eq!(tree, Node::Root(vec![
///     Node::Text(String::from("hi ")),
///     Node::Bold(vec![Node::Text(String::from("there"))]),
/// ]));
/// ```
pub fn build(input: &str) -> Node {
    Builder::new(input).build()
}

/// Scans markup left to right with a byte cursor that only moves forward.
#[derive(Debug)]
struct Builder<'a> {
    input: &'a str,
    cursor: usize,
    text: String,
    nodes: Vec<Node>,
}

impl<'a> Builder<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            cursor: 0,
            text: String::new(),
            nodes: Vec::new(),
        }
    }

    fn build(mut self) -> Node {
        while self.cursor < self.input.len() {
            let consumed = self.fenced_code()
                || self.inline_code()
                || self.custom_emoji()
                || self.style_marker()
                || self.line_break();
            if !consumed {
                self.plain_char();
            }
        }
        self.flush_text();
        Node::Root(self.nodes)
    }

    fn rest(&self) -> &'a str {
        &self.input[self.cursor..]
    }

    /// Moves the cursor to `end`, returning everything it skipped over.
    fn take_until(&mut self, end: usize) -> &'a str {
        let taken = &self.input[self.cursor..end];
        self.cursor = end;
        taken
    }

    /// Position of `needle` in the rest of the input, or the end of the input.
    fn end_of(&self, needle: &str) -> usize {
        self.rest()
            .find(needle)
            .map_or(self.input.len(), |position| self.cursor + position)
    }

    /// Moves the cursor past `len` bytes without running off the end.
    fn skip(&mut self, len: usize) {
        self.cursor = (self.cursor + len).min(self.input.len());
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let text = std::mem::take(&mut self.text);
            trace!("text run: {text:?}");
            self.nodes.push(Node::Text(text));
        }
    }

    fn push(&mut self, node: Node) {
        self.flush_text();
        trace!("node: {node:?}");
        self.nodes.push(node);
    }

    fn plain_char(&mut self) {
        if let Some(ch) = self.rest().chars().next() {
            self.text.push(ch);
            self.cursor += ch.len_utf8();
        }
    }

    fn fenced_code(&mut self) -> bool {
        if !self.rest().starts_with(FENCE) {
            return false;
        }
        self.flush_text();
        self.skip(FENCE.len());

        let end = self.end_of(FENCE);
        let body = self.take_until(end);
        self.skip(FENCE.len());

        let (language, content) = match body.find(['\n', '\r']) {
            Some(line_end) => {
                let language = body[..line_end].trim();
                let language = (!language.is_empty()).then(|| language.to_string());
                (language, &body[line_end..])
            }
            None => (None, body),
        };

        self.push(Node::Pre {
            content: content.trim_matches(['\n', '\r']).to_string(),
            language,
        });
        true
    }

    fn inline_code(&mut self) -> bool {
        let mut chars = self.rest().chars();
        if chars.next() != Some(INLINE_FENCE) || chars.next() == Some(INLINE_FENCE) {
            return false;
        }
        self.flush_text();
        self.skip(1);

        let end = self.end_of("`");
        let code = self.take_until(end).to_string();
        self.skip(1);

        self.push(Node::Code(code));
        true
    }

    fn custom_emoji(&mut self) -> bool {
        let rest = self.rest();
        if !rest.starts_with('[') || !rest.contains(CUSTOM_EMOJI_MARKER) {
            return false;
        }
        let Some(label_len) = rest[1..].find(']') else {
            return false;
        };
        if !rest[1 + label_len..].starts_with(CUSTOM_EMOJI_MARKER) {
            return false;
        }

        self.flush_text();
        self.skip(1);
        let alt = self.take_until(self.cursor + label_len).to_string();
        self.skip(CUSTOM_EMOJI_MARKER.len());

        let end = self.end_of(")");
        let document_id = self.take_until(end).to_string();
        self.skip(1);

        self.push(Node::EmojiRef { alt, document_id });
        true
    }

    fn style_marker(&mut self) -> bool {
        let rest = self.rest();
        let Some((marker, kind)) = STYLE_MARKERS
            .iter()
            .find(|(marker, _)| rest.starts_with(marker))
        else {
            return false;
        };

        self.flush_text();
        self.skip(marker.len());

        let (content_len, closed) = balanced_content(self.rest(), marker);
        let content = self.take_until(self.cursor + content_len);
        if closed {
            self.skip(marker.len());
        }

        let children = match build(content) {
            Node::Root(children) => children,
            other => vec![other],
        };
        self.push(kind.node(children));
        true
    }

    fn line_break(&mut self) -> bool {
        let rest = self.rest();
        if is_tag_open(rest, "<br") || is_tag_open(rest, "<div") {
            let end = self
                .rest()
                .find('>')
                .map_or(self.input.len(), |position| self.cursor + position + 1);
            self.take_until(end);
            self.push(Node::Text(String::from("\n")));
            true
        } else if rest.starts_with("</div>") {
            trace!("discarding paragraph closer");
            self.flush_text();
            self.skip("</div>".len());
            true
        } else {
            false
        }
    }
}

/// True if `rest` opens the tag `name` (which includes its `<`).
fn is_tag_open(rest: &str, name: &str) -> bool {
    rest.strip_prefix(name)
        .and_then(|after| after.chars().next())
        .is_some_and(|ch| ch == '>' || ch == '/' || ch.is_whitespace())
}

/// Finds the end of the content following an opening style `marker`.
///
/// Another occurrence of `marker` opens a nested span when it sits at the
/// start of a word (preceded by whitespace or the start of the content, and
/// followed by a non-whitespace character); any other occurrence closes one.
/// Returns the content length in bytes and whether a closing marker was
/// found. Unclosed content runs to the end of `rest`.
fn balanced_content(rest: &str, marker: &str) -> (usize, bool) {
    let mut depth = 1;
    let mut position = 0;

    while position < rest.len() {
        let here = &rest[position..];
        if here.starts_with(marker) {
            let before = rest[..position].chars().next_back();
            let after = here[marker.len()..].chars().next();
            let opens = before.is_none_or(char::is_whitespace)
                && after.is_some_and(|ch| !ch.is_whitespace());
            if opens {
                depth += 1;
            } else {
                depth -= 1;
                if depth == 0 {
                    return (position, true);
                }
            }
            position += marker.len();
        } else {
            position += here.chars().next().map_or(1, char::len_utf8);
        }
    }

    (rest.len(), false)
}

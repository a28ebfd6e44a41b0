// SPDX-License-Identifier: Apache-2.0

//! Renders an inline markup syntax tree as markup.
//!
//! The tags and attributes written here are exactly the ones that
//! [`resolve()`](crate::entity::resolve) understands, so every styled node
//! comes back out of extraction as the matching entity.

use crate::entity::EntityKind;
use crate::markdown::ast::Node;
use crate::markdown::{TextAppendable, Visitable, Visitor};
use crate::markup::{ATTR_ALT, ATTR_DOCUMENT_ID, ATTR_ENTITY_TYPE, ATTR_HREF, ATTR_LANGUAGE};
use crate::text::escape_html;
use log::trace;

/// Renders `node` and all its children as markup.
///
/// Plain text is copied through untouched, so any markup it contains is
/// preserved. The contents of code spans and blocks are escaped.
///
/// # Examples
///
/// ```
/// use formatted_text::markdown::ast::build;
/// use formatted_text::markdown::render::render;
///
/// assert_eq!(render(&build("a `<b>` ||c||")),
///     "a <code>&lt;b&gt;</code> <span data-entity-type='MessageEntitySpoiler'>c</span>");
/// ```
pub fn render(node: &Node) -> String {
    let mut visitor = MarkupVisitor::new();
    node.accept(&mut visitor);
    visitor.text()
}

#[derive(Debug)]
struct MarkupVisitor {
    text: String,
}

impl MarkupVisitor {
    fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    fn visit_wrapped(&mut self, open: &str, close: &str, node: &Node) {
        self.push_text(open);
        node.accept_children(self);
        self.push_text(close);
    }

    fn visit_pre(&mut self, content: &str, language: Option<&str>) {
        match language {
            Some(language) => {
                let open = format!("<pre {ATTR_LANGUAGE}='{}'>", escape_html(language));
                self.push_text(&open);
            }
            None => self.push_text("<pre>"),
        }
        self.push_text(&escape_html(content));
        self.push_text("</pre>");
    }

    fn visit_code(&mut self, content: &str) {
        self.push_text("<code>");
        self.push_text(&escape_html(content));
        self.push_text("</code>");
    }

    fn visit_emoji(&mut self, alt: &str, document_id: &str) {
        let tag = format!(
            "<img {ATTR_ALT}='{}' {ATTR_DOCUMENT_ID}='{}'>",
            escape_html(alt),
            escape_html(document_id),
        );
        self.push_text(&tag);
    }

    fn visit_link(&mut self, label: &str, target: &str) {
        let tag = format!("<a {ATTR_HREF}='{}'>", escape_markers(&escape_html(target)));
        self.push_text(&tag);
        self.push_text(label);
        self.push_text("</a>");
    }
}

/// Encodes the characters the builder treats as markup, so a link target
/// survives the builder untouched.
fn escape_markers(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '*' | '_' | '~' | '|' | '`' | '[' => format!("&#{};", ch as u32),
            _ => ch.to_string(),
        })
        .collect()
}

impl Visitor for MarkupVisitor {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn visit(&mut self, node: &Node) {
        match node {
            Node::Root(_) => self.swallow(node),
            Node::Text(text) => self.push_text(text),
            Node::Code(content) => self.visit_code(content),
            Node::Pre { content, language } => self.visit_pre(content, language.as_deref()),
            Node::EmojiRef { alt, document_id } => self.visit_emoji(alt, document_id),
            Node::Bold(_) => self.visit_wrapped("<b>", "</b>", node),
            Node::Italic(_) => self.visit_wrapped("<i>", "</i>", node),
            Node::Strikethrough(_) => self.visit_wrapped("<s>", "</s>", node),
            Node::Spoiler(_) => {
                let open = format!("<span {ATTR_ENTITY_TYPE}='{}'>", EntityKind::Spoiler);
                self.visit_wrapped(&open, "</span>", node)
            }
            Node::Link { label, target } => self.visit_link(label, target),
        }
    }
}

impl TextAppendable for MarkupVisitor {
    fn push_text(&mut self, text: &str) {
        trace!("appending markup: {text:?}");
        self.text += text;
    }
}

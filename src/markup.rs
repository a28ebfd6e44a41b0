// SPDX-License-Identifier: Apache-2.0

//! The markup tree.
//!
//! Markup produced by the [`markdown`](crate::markdown) renderer (or supplied
//! directly by a caller) is materialized into a tree of [`Node`]s before
//! entities are extracted from it. The tree understands a small, fixed tag
//! vocabulary ([`Tag`]) and a handful of `data-*` attributes; anything else
//! is carried along but otherwise ignored.

mod parser;
mod render;

pub use parser::parse;
pub use render::from_formatted_text;

use itertools::Itertools;

/// Explicit entity type of an element.
pub const ATTR_ENTITY_TYPE: &str = "data-entity-type";

/// Language of a code block.
pub const ATTR_LANGUAGE: &str = "data-language";

/// Custom emoji referenced by a placeholder image.
pub const ATTR_DOCUMENT_ID: &str = "data-document-id";

/// User referenced by a mention link.
pub const ATTR_USER_ID: &str = "data-user-id";

/// Target of a link.
pub const ATTR_HREF: &str = "href";

/// Fallback text of a placeholder image.
pub const ATTR_ALT: &str = "alt";

/// The name of an element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tag {
    B,
    Strong,
    I,
    Em,
    U,
    Ins,
    S,
    Strike,
    Del,
    Code,
    Pre,
    Blockquote,
    A,
    Span,
    Img,
    Br,
    Div,
    /// Any other element, by lower-case name.
    Other(String),
}

impl Tag {
    /// Looks up a tag by name, ignoring ASCII case.
    ///
    /// # Examples
    ///
    /// ```
    /// use formatted_text::markup::Tag;
    /// assert_eq!(Tag::from_name("STRONG"), Tag::Strong);
    /// assert_eq!(Tag::from_name("marquee"), Tag::Other(String::from("marquee")));
    /// ```
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "b" => Tag::B,
            "strong" => Tag::Strong,
            "i" => Tag::I,
            "em" => Tag::Em,
            "u" => Tag::U,
            "ins" => Tag::Ins,
            "s" => Tag::S,
            "strike" => Tag::Strike,
            "del" => Tag::Del,
            "code" => Tag::Code,
            "pre" => Tag::Pre,
            "blockquote" => Tag::Blockquote,
            "a" => Tag::A,
            "span" => Tag::Span,
            "img" => Tag::Img,
            "br" => Tag::Br,
            "div" => Tag::Div,
            other => Tag::Other(other.to_string()),
        }
    }

    /// The lower-case name of the tag.
    pub fn name(&self) -> &str {
        match self {
            Tag::B => "b",
            Tag::Strong => "strong",
            Tag::I => "i",
            Tag::Em => "em",
            Tag::U => "u",
            Tag::Ins => "ins",
            Tag::S => "s",
            Tag::Strike => "strike",
            Tag::Del => "del",
            Tag::Code => "code",
            Tag::Pre => "pre",
            Tag::Blockquote => "blockquote",
            Tag::A => "a",
            Tag::Span => "span",
            Tag::Img => "img",
            Tag::Br => "br",
            Tag::Div => "div",
            Tag::Other(name) => name,
        }
    }

    /// True for elements that never have children.
    pub fn is_void(&self) -> bool {
        match self {
            Tag::Img | Tag::Br => true,
            Tag::Other(name) => matches!(
                name.as_str(),
                "area" | "col" | "embed" | "hr" | "input" | "link" | "meta" | "source" | "wbr"
            ),
            _ => false,
        }
    }
}

/// A node in a markup tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

impl Node {
    /// Creates a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// The text of this node and all its descendants, in document order.
    ///
    /// Comments contribute no text.
    pub fn text_content(&self) -> String {
        match self {
            Node::Element(element) => element.text_content(),
            Node::Text(text) => text.clone(),
            Node::Comment(_) => String::new(),
        }
    }

    /// The child nodes, which only elements have.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(element) => element.children(),
            _ => &[],
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// An element in a markup tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub tag: Tag,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    /// Creates an empty element.
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Adds child nodes.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// The value of the attribute `name`, ignoring ASCII case in the name.
    ///
    /// If an attribute is repeated, the first one wins.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The child nodes of the element.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// The text of all descendants, in document order.
    ///
    /// A line break element reads as a newline.
    pub fn text_content(&self) -> String {
        if self.tag == Tag::Br {
            return String::from("\n");
        }
        self.children.iter().map(Node::text_content).join("")
    }
}

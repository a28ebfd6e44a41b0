// SPDX-License-Identifier: Apache-2.0

//! Normalizes placeholder images in a markup tree.
//!
//! Emoji are often written as `<img>` placeholders with fallback `alt`
//! text. Entity extraction works on text, so placeholders have to carry
//! their fallback text before extraction:
//!
//! - a custom emoji placeholder (one with a `data-document-id`) stays an
//!   element, but its content becomes its fallback text;
//! - any other placeholder is replaced outright by its fallback text.

use crate::markup::{ATTR_ALT, ATTR_DOCUMENT_ID, Element, Node, Tag};
use log::trace;

/// Normalizes every placeholder image in `nodes`, at any depth.
///
/// Normalizing an already normalized tree changes nothing.
///
/// # Examples
///
/// ```
/// use formatted_text::images::normalize;
/// use formatted_text::markup::{Element, Node, Tag};
///
/// let nodes = vec![Element::new(Tag::Img).with_attr("alt", "🙂").into()];
/// assert_eq!(normalize(nodes), vec![Node::text("🙂")]);
/// ```
pub fn normalize(nodes: Vec<Node>) -> Vec<Node> {
    nodes.into_iter().map(normalize_node).collect()
}

fn normalize_node(node: Node) -> Node {
    match node {
        Node::Element(element) if element.tag == Tag::Img => normalize_image(element),
        Node::Element(mut element) => {
            element.children = normalize(element.children);
            Node::Element(element)
        }
        other => other,
    }
}

fn normalize_image(mut image: Element) -> Node {
    let alt = image.attr(ATTR_ALT).unwrap_or_default().to_string();
    if image.attr(ATTR_DOCUMENT_ID).is_some_and(|id| !id.is_empty()) {
        trace!("custom emoji placeholder reads as {alt:?}");
        image.children = vec![Node::Text(alt)];
        Node::Element(image)
    } else {
        trace!("replacing image placeholder with {alt:?}");
        Node::Text(alt)
    }
}

// SPDX-License-Identifier: Apache-2.0

//! Extracts formatted text from a markup tree.
//!
//! Extraction flattens the tree into plain text, then walks it in document
//! order with a cursor into that text. Every node that
//! [resolves](crate::entity::resolve) to an entity is located by searching
//! for its text at or after the cursor; everything else just moves the
//! cursor along.
//!
//! The flattened text is trimmed and stripped of zero-width spaces, so the
//! cursor starts out shifted back by however much was trimmed from the
//! front. Offsets are always clamped to the text, so a node whose text was
//! trimmed away still produces a valid (if shortened) entity.

use crate::entity::{Entity, FormattedText, resolve};
use crate::markup::Node;
use crate::text::{Utf16Text, strip_zero_width, utf16_len};
use itertools::Itertools;
use log::{debug, trace};

/// Nodes nested deeper than this below a top-level node are not visited.
pub const MAX_TAG_DEPTH: usize = 3;

/// Extracts plain text and entities from a list of top-level nodes.
///
/// Placeholder images should already be [normalized](crate::images::normalize).
///
/// # Examples
///
/// ```
/// use formatted_text::entity::{Entity, EntityKind};
/// use formatted_text::extract::extract;
/// use formatted_text::markup::parse;
///
/// let formatted = extract(&parse("say <b>hello</b>"));
/// assert_eq!(formatted.text, "say hello");
/// assert_eq!(formatted.entities, vec![Entity::new(EntityKind::Bold, 4, 5)]);
/// ```
pub fn extract(nodes: &[Node]) -> FormattedText {
    let raw = strip_zero_width(&nodes.iter().map(Node::text_content).join(""));
    let text = raw.trim();
    let trim_shift = utf16_len(&raw[..raw.len() - raw.trim_start().len()]);
    debug!("extracting entities from {text:?} (trimmed {trim_shift} leading units)");

    let mut extractor = Extractor::new(text, trim_shift);
    for node in nodes {
        extractor.visit(node, 1);
    }
    FormattedText::new(text, extractor.entities)
}

#[derive(Debug)]
struct Extractor {
    text: Utf16Text,
    /// Position in the text, in UTF-16 units. Negative while still inside
    /// trimmed leading whitespace.
    cursor: isize,
    entities: Vec<Entity>,
}

impl Extractor {
    fn new(text: &str, trim_shift: usize) -> Self {
        Self {
            text: Utf16Text::new(text),
            cursor: -(trim_shift as isize),
            entities: Vec::new(),
        }
    }

    /// Visits `node`, which sits `depth` levels below the root.
    fn visit(&mut self, node: &Node, depth: usize) {
        if let Node::Comment(_) = node {
            return;
        }

        let content = strip_zero_width(&node.text_content());
        let content_len = utf16_len(&content) as isize;
        let descend = depth < MAX_TAG_DEPTH && !node.children().is_empty();

        match resolve(node).filter(|_| !content.is_empty()) {
            Some(resolved) => {
                let index = self.locate(&content);
                let offset = self.clamp(index);
                let length = (content_len as usize).min(self.text.len() - offset);
                trace!("{} at {offset}+{length}: {content:?}", resolved.kind);

                self.entities
                    .push(Entity::new(resolved.kind, offset, length).with_payload(resolved.payload));
                self.cursor = index;
                if !descend {
                    self.cursor += content_len;
                }
            }
            None if descend => {}
            None => {
                if self.cursor == 0 && content.trim().is_empty() {
                    trace!("skipping leading whitespace {content:?}");
                    return;
                }
                self.cursor += content_len;
            }
        }

        if descend {
            for child in node.children() {
                self.visit(child, depth + 1);
            }
        } else if !node.children().is_empty() {
            trace!("not descending below depth {depth}");
        }
    }

    /// Finds `content` at or after the cursor, falling back to the cursor
    /// itself when it cannot be found (typically because trailing whitespace
    /// was trimmed away).
    fn locate(&self, content: &str) -> isize {
        self.text
            .find(content, self.clamp(self.cursor))
            .map_or(self.cursor, |index| index as isize)
    }

    fn clamp(&self, index: isize) -> usize {
        index.clamp(0, self.text.len() as isize) as usize
    }
}

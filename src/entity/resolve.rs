// SPDX-License-Identifier: Apache-2.0

//! Decides which entity, if any, a markup node represents.

use crate::entity::{EntityKind, Payload};
use crate::markup::{
    ATTR_DOCUMENT_ID, ATTR_ENTITY_TYPE, ATTR_HREF, ATTR_LANGUAGE, ATTR_USER_ID, Element, Node, Tag,
};
use log::warn;

/// The entity kind and payload resolved for a node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolved {
    pub kind: EntityKind,
    pub payload: Option<Payload>,
}

/// Resolves the entity represented by `node`.
///
/// Rules, first match wins:
///
/// 1. An explicit `data-entity-type` attribute naming a known kind.
/// 2. The tag itself: `b`/`strong`, `i`/`em`, `u`/`ins`, `s`/`strike`/`del`,
///    `code`, `pre` and `blockquote`.
/// 3. Links: `mailto:` targets are emails, `tel:` targets are phone
///    numbers, links whose text differs from the target are text URLs, and
///    all others are plain URLs.
/// 4. Placeholder images carrying a `data-document-id` are custom emoji.
///
/// Text, comments and everything else resolve to nothing.
///
/// # Examples
///
/// ```
/// use formatted_text::entity::{resolve, EntityKind};
/// use formatted_text::markup::{Element, Node, Tag};
///
/// let node: Node = Element::new(Tag::Strong).with_children([Node::text("x")]).into();
/// assert_eq!(resolve(&node).map(|resolved| resolved.kind), Some(EntityKind::Bold));
/// assert_eq!(resolve(&Node::text("x")), None);
/// ```
pub fn resolve(node: &Node) -> Option<Resolved> {
    let Node::Element(element) = node else {
        return None;
    };
    let kind = explicit_kind(element).or_else(|| implicit_kind(element))?;
    Some(Resolved {
        kind,
        payload: payload(kind, element),
    })
}

fn explicit_kind(element: &Element) -> Option<EntityKind> {
    let name = element.attr(ATTR_ENTITY_TYPE)?;
    match name.parse() {
        Ok(kind) => Some(kind),
        Err(err) => {
            warn!("ignoring {ATTR_ENTITY_TYPE} on <{}>: {err}", element.tag.name());
            None
        }
    }
}

fn implicit_kind(element: &Element) -> Option<EntityKind> {
    match &element.tag {
        Tag::B | Tag::Strong => Some(EntityKind::Bold),
        Tag::I | Tag::Em => Some(EntityKind::Italic),
        Tag::U | Tag::Ins => Some(EntityKind::Underline),
        Tag::S | Tag::Strike | Tag::Del => Some(EntityKind::Strike),
        Tag::Code => Some(EntityKind::Code),
        Tag::Pre => Some(EntityKind::Pre),
        Tag::Blockquote => Some(EntityKind::Blockquote),
        Tag::A => Some(link_kind(element)),
        Tag::Img => element
            .attr(ATTR_DOCUMENT_ID)
            .filter(|id| !id.is_empty())
            .map(|_| EntityKind::CustomEmoji),
        Tag::Span | Tag::Br | Tag::Div | Tag::Other(_) => None,
    }
}

fn link_kind(element: &Element) -> EntityKind {
    let href = element.attr(ATTR_HREF).unwrap_or_default();
    if href.starts_with("mailto:") {
        EntityKind::Email
    } else if href.starts_with("tel:") {
        EntityKind::Phone
    } else if href != element.text_content() {
        EntityKind::TextUrl
    } else {
        EntityKind::Url
    }
}

fn payload(kind: EntityKind, element: &Element) -> Option<Payload> {
    let attr = |name| {
        element
            .attr(name)
            .filter(|value| !value.is_empty())
            .map(String::from)
    };
    match kind {
        EntityKind::TextUrl => attr(ATTR_HREF).map(Payload::Url),
        EntityKind::MentionName => attr(ATTR_USER_ID).map(Payload::UserId),
        EntityKind::Pre => attr(ATTR_LANGUAGE).map(Payload::Language),
        EntityKind::CustomEmoji => attr(ATTR_DOCUMENT_ID).map(Payload::DocumentId),
        _ => None,
    }
}

// SPDX-License-Identifier: Apache-2.0

//! Renders formatted text back into markup.
//!
//! This is the inverse of [`resolve()`](crate::entity::resolve): every
//! entity kind is written as the tag (and attributes) that resolves back to
//! that same kind, so extracting entities from the output reproduces the
//! input.

use crate::entity::{Entity, EntityKind, FormattedText};
use crate::markup::{ATTR_ALT, ATTR_DOCUMENT_ID, ATTR_ENTITY_TYPE, ATTR_HREF, ATTR_LANGUAGE, ATTR_USER_ID};
use crate::text::{Utf16Text, escape_html};
use log::trace;

/// Renders formatted text as markup.
///
/// Entities are expected to nest. An entity that runs past the end of the
/// entity enclosing it is clipped to that end, and entities starting inside
/// a custom emoji are dropped, since the emoji is rendered as a void
/// placeholder image.
///
/// # Examples
///
/// ```
/// use formatted_text::entity::{Entity, EntityKind, FormattedText};
/// use formatted_text::markup::from_formatted_text;
///
/// let text = FormattedText::new("hello world", vec![Entity::new(EntityKind::Bold, 6, 5)]);
/// assert_eq!(from_formatted_text(&text), "hello <b>world</b>");
/// ```
pub fn from_formatted_text(formatted: &FormattedText) -> String {
    let text = Utf16Text::new(&formatted.text);
    let mut order: Vec<&Entity> = formatted.entities.iter().collect();
    order.sort_by(|a, b| a.offset.cmp(&b.offset).then(b.end().cmp(&a.end())));

    let mut out = String::new();
    let mut position = 0;
    // Open entities and their clipped ends.
    let mut open: Vec<(&Entity, usize)> = Vec::new();

    for entity in order {
        let start = entity.offset.min(text.len());
        close_until(&mut out, &text, &mut position, &mut open, start);

        if start < position {
            trace!("dropping {} inside a placeholder", entity.kind);
            continue;
        }
        let end = open
            .last()
            .map_or(entity.end(), |(_, end)| entity.end().min(*end))
            .min(text.len());

        out.push_str(&escape_html(&text.slice_lossy(position, start)));
        position = start;

        if entity.kind == EntityKind::CustomEmoji {
            let alt = text.slice_lossy(start, end);
            out.push_str(&format!(
                "<img {ATTR_ALT}='{}' {ATTR_DOCUMENT_ID}='{}'>",
                escape_html(&alt),
                escape_html(entity.document_id().unwrap_or_default()),
            ));
            position = end;
        } else {
            let visible = text.slice_lossy(start, end);
            out.push_str(&open_tag(entity, &visible));
            open.push((entity, end));
        }
    }

    close_until(&mut out, &text, &mut position, &mut open, usize::MAX);
    out.push_str(&escape_html(&text.slice_lossy(position, text.len())));
    out
}

/// Closes every open entity that ends at or before `limit`, writing the text
/// up to each closing point.
fn close_until(
    out: &mut String,
    text: &Utf16Text,
    position: &mut usize,
    open: &mut Vec<(&Entity, usize)>,
    limit: usize,
) {
    while let Some((entity, end)) = open.last() {
        if *end > limit {
            break;
        }
        let end = (*end).max(*position);
        out.push_str(&escape_html(&text.slice_lossy(*position, end)));
        out.push_str(&format!("</{}>", tag_name(entity.kind)));
        *position = end;
        open.pop();
    }
}

fn tag_name(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Bold => "b",
        EntityKind::Italic => "i",
        EntityKind::Underline => "u",
        EntityKind::Strike => "s",
        EntityKind::Code => "code",
        EntityKind::Pre => "pre",
        EntityKind::Blockquote => "blockquote",
        EntityKind::TextUrl
        | EntityKind::Url
        | EntityKind::Email
        | EntityKind::Phone
        | EntityKind::MentionName => "a",
        EntityKind::CustomEmoji => "img",
        EntityKind::Mention
        | EntityKind::Hashtag
        | EntityKind::Cashtag
        | EntityKind::BotCommand
        | EntityKind::Spoiler => "span",
    }
}

fn open_tag(entity: &Entity, visible: &str) -> String {
    let name = tag_name(entity.kind);
    match entity.kind {
        EntityKind::Pre => match entity.language() {
            Some(language) => format!("<pre {ATTR_LANGUAGE}='{}'>", escape_html(language)),
            None => String::from("<pre>"),
        },
        EntityKind::TextUrl => link(entity.url().unwrap_or(visible)),
        EntityKind::Url => link(visible),
        EntityKind::Email => link(&format!("mailto:{visible}")),
        EntityKind::Phone => link(&format!("tel:{visible}")),
        EntityKind::MentionName => format!(
            "<a {ATTR_ENTITY_TYPE}='{}' {ATTR_USER_ID}='{}'>",
            entity.kind,
            escape_html(entity.user_id().unwrap_or_default()),
        ),
        EntityKind::Mention
        | EntityKind::Hashtag
        | EntityKind::Cashtag
        | EntityKind::BotCommand
        | EntityKind::Spoiler => format!("<span {ATTR_ENTITY_TYPE}='{}'>", entity.kind),
        _ => format!("<{name}>"),
    }
}

fn link(href: &str) -> String {
    format!("<a {ATTR_HREF}='{}'>", escape_html(href))
}

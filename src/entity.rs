// SPDX-License-Identifier: Apache-2.0

//! Formatted text and its entities.
//!
//! A [`FormattedText`] is plain text plus an ordered list of [`Entity`]
//! annotations. Each entity covers a span of the text, measured in UTF-16
//! code units, and may carry a kind-specific [`Payload`].

mod resolve;

pub use resolve::{Resolved, resolve};

use crate::text::Utf16Text;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The kind of an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum EntityKind {
    #[serde(rename = "MessageEntityBold")]
    Bold,
    #[serde(rename = "MessageEntityItalic")]
    Italic,
    #[serde(rename = "MessageEntityUnderline")]
    Underline,
    #[serde(rename = "MessageEntityStrike")]
    Strike,
    #[serde(rename = "MessageEntityCode")]
    Code,
    #[serde(rename = "MessageEntityPre")]
    Pre,
    #[serde(rename = "MessageEntityBlockquote")]
    Blockquote,
    #[serde(rename = "MessageEntityTextUrl")]
    TextUrl,
    #[serde(rename = "MessageEntityUrl")]
    Url,
    #[serde(rename = "MessageEntityEmail")]
    Email,
    #[serde(rename = "MessageEntityPhone")]
    Phone,
    #[serde(rename = "MessageEntityMention")]
    Mention,
    #[serde(rename = "MessageEntityMentionName")]
    MentionName,
    #[serde(rename = "MessageEntityHashtag")]
    Hashtag,
    #[serde(rename = "MessageEntityCashtag")]
    Cashtag,
    #[serde(rename = "MessageEntityBotCommand")]
    BotCommand,
    #[serde(rename = "MessageEntitySpoiler")]
    Spoiler,
    #[serde(rename = "MessageEntityCustomEmoji")]
    CustomEmoji,
}

impl EntityKind {
    /// Every entity kind.
    pub const ALL: [EntityKind; 18] = [
        EntityKind::Bold,
        EntityKind::Italic,
        EntityKind::Underline,
        EntityKind::Strike,
        EntityKind::Code,
        EntityKind::Pre,
        EntityKind::Blockquote,
        EntityKind::TextUrl,
        EntityKind::Url,
        EntityKind::Email,
        EntityKind::Phone,
        EntityKind::Mention,
        EntityKind::MentionName,
        EntityKind::Hashtag,
        EntityKind::Cashtag,
        EntityKind::BotCommand,
        EntityKind::Spoiler,
        EntityKind::CustomEmoji,
    ];

    /// The canonical name of this kind, as used in `data-entity-type`
    /// attributes and serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Bold => "MessageEntityBold",
            EntityKind::Italic => "MessageEntityItalic",
            EntityKind::Underline => "MessageEntityUnderline",
            EntityKind::Strike => "MessageEntityStrike",
            EntityKind::Code => "MessageEntityCode",
            EntityKind::Pre => "MessageEntityPre",
            EntityKind::Blockquote => "MessageEntityBlockquote",
            EntityKind::TextUrl => "MessageEntityTextUrl",
            EntityKind::Url => "MessageEntityUrl",
            EntityKind::Email => "MessageEntityEmail",
            EntityKind::Phone => "MessageEntityPhone",
            EntityKind::Mention => "MessageEntityMention",
            EntityKind::MentionName => "MessageEntityMentionName",
            EntityKind::Hashtag => "MessageEntityHashtag",
            EntityKind::Cashtag => "MessageEntityCashtag",
            EntityKind::BotCommand => "MessageEntityBotCommand",
            EntityKind::Spoiler => "MessageEntitySpoiler",
            EntityKind::CustomEmoji => "MessageEntityCustomEmoji",
        }
    }

    /// The short, lower-case alias of this kind (`"bold"`, `"spoiler"`, ...).
    pub fn alias(&self) -> &'static str {
        match self {
            EntityKind::Bold => "bold",
            EntityKind::Italic => "italic",
            EntityKind::Underline => "underline",
            EntityKind::Strike => "strike",
            EntityKind::Code => "code",
            EntityKind::Pre => "pre",
            EntityKind::Blockquote => "blockquote",
            EntityKind::TextUrl => "textUrl",
            EntityKind::Url => "url",
            EntityKind::Email => "email",
            EntityKind::Phone => "phone",
            EntityKind::Mention => "mention",
            EntityKind::MentionName => "mentionName",
            EntityKind::Hashtag => "hashtag",
            EntityKind::Cashtag => "cashtag",
            EntityKind::BotCommand => "botCommand",
            EntityKind::Spoiler => "spoiler",
            EntityKind::CustomEmoji => "customEmoji",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entity type name that is not part of the vocabulary.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown entity type: {0:?}")]
pub struct UnknownEntityKind(pub String);

impl FromStr for EntityKind {
    type Err = UnknownEntityKind;

    /// Parses either the canonical name or the alias, ignoring ASCII case.
    ///
    /// # Examples
    ///
    /// ```
    /// use formatted_text::entity::EntityKind;
    /// assert_eq!("MessageEntitySpoiler".parse(), Ok(EntityKind::Spoiler));
    /// assert_eq!("spoiler".parse(), Ok(EntityKind::Spoiler));
    /// assert!("blink".parse::<EntityKind>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s) || kind.alias().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownEntityKind(s.to_string()))
    }
}

/// Kind-specific data attached to an entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Payload {
    /// The target of a [`EntityKind::TextUrl`].
    Url(String),

    /// The user referenced by a [`EntityKind::MentionName`].
    UserId(String),

    /// The language of a [`EntityKind::Pre`] block.
    Language(String),

    /// The custom emoji referenced by a [`EntityKind::CustomEmoji`].
    DocumentId(String),
}

/// A typed annotation over a span of text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub kind: EntityKind,

    /// Start of the span, in UTF-16 code units.
    pub offset: usize,

    /// Length of the span, in UTF-16 code units.
    pub length: usize,

    #[serde(flatten)]
    pub payload: Option<Payload>,
}

impl Entity {
    /// Creates an entity without a payload.
    pub fn new(kind: EntityKind, offset: usize, length: usize) -> Self {
        Self {
            kind,
            offset,
            length,
            payload: None,
        }
    }

    /// Attaches a payload to the entity.
    pub fn with_payload(mut self, payload: Option<Payload>) -> Self {
        self.payload = payload;
        self
    }

    /// The end of the span, in UTF-16 code units.
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// The URL carried by this entity, if any.
    pub fn url(&self) -> Option<&str> {
        match &self.payload {
            Some(Payload::Url(url)) => Some(url),
            _ => None,
        }
    }

    /// The user ID carried by this entity, if any.
    pub fn user_id(&self) -> Option<&str> {
        match &self.payload {
            Some(Payload::UserId(user_id)) => Some(user_id),
            _ => None,
        }
    }

    /// The code language carried by this entity, if any.
    pub fn language(&self) -> Option<&str> {
        match &self.payload {
            Some(Payload::Language(language)) => Some(language),
            _ => None,
        }
    }

    /// The custom emoji document ID carried by this entity, if any.
    pub fn document_id(&self) -> Option<&str> {
        match &self.payload {
            Some(Payload::DocumentId(document_id)) => Some(document_id),
            _ => None,
        }
    }
}

/// Plain text with its entities.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FormattedText {
    pub text: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<Entity>,
}

impl FormattedText {
    /// Creates formatted text from its parts.
    pub fn new(text: impl Into<String>, entities: Vec<Entity>) -> Self {
        Self {
            text: text.into(),
            entities,
        }
    }

    /// Creates formatted text without any entities.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Vec::new())
    }

    /// The entities, or `None` if there are none.
    pub fn entities(&self) -> Option<&[Entity]> {
        (!self.entities.is_empty()).then_some(self.entities.as_slice())
    }

    /// The span of text covered by `entity`.
    ///
    /// Returns `None` if the entity falls outside the text or splits a
    /// surrogate pair.
    ///
    /// # Examples
    ///
    /// ```
    /// use formatted_text::entity::{Entity, EntityKind, FormattedText};
    /// let text = FormattedText::new("say 👋 hi", vec![Entity::new(EntityKind::Bold, 4, 2)]);
    /// assert_eq!(text.entity_text(&text.entities[0]), Some(String::from("👋")));
    /// ```
    pub fn entity_text(&self, entity: &Entity) -> Option<String> {
        Utf16Text::new(&self.text).slice(entity.offset, entity.end())
    }
}

// SPDX-License-Identifier: Apache-2.0

//! Helpful utilities for working with text.
//!
//! Entity offsets are measured in UTF-16 code units, the metric used by the
//! messaging protocol, so most of the helpers here work on a UTF-16 view of
//! a string rather than on its bytes.

use htmlentity::entity::{self, CharacterSet, EncodeType, ICodedDataTrait};

/// The zero-width space, which is stripped from all extracted text.
pub const ZERO_WIDTH_SPACE: char = '\u{200b}';

/// Converts HTML entities into their single-character equivalents.
///
/// Unlike a full HTML decoder this leaves malformed references alone, so a
/// bare `&` survives untouched.
///
/// # Examples
///
/// ```
/// use formatted_text::text::convert_html_entities;
/// let raw = "&lt;This &amp; That&gt;";
/// let converted = convert_html_entities(raw);
/// assert_eq!(converted, "<This & That>");
/// ```
///
/// ```
/// use formatted_text::text::convert_html_entities;
/// let raw = "fish & chips";
/// assert_eq!(convert_html_entities(raw), raw);
/// ```
pub fn convert_html_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    entity::decode(text.as_bytes())
        .to_string()
        .unwrap_or(text.to_string())
}

/// Escapes the characters that are significant in markup (`<`, `>`, `&`,
/// and both quote characters).
///
/// # Examples
///
/// ```
/// use formatted_text::text::escape_html;
/// assert_eq!(escape_html("a < b"), "a &lt; b");
/// assert!(!escape_html("it's").contains('\''));
/// assert_eq!(escape_html("plain"), "plain");
/// ```
pub fn escape_html(text: &str) -> String {
    if !text.contains(['<', '>', '&', '\'', '"']) {
        return text.to_string();
    }
    entity::encode(
        text.as_bytes(),
        &EncodeType::NamedOrHex,
        &CharacterSet::SpecialChars,
    )
    .to_string()
    .unwrap_or(text.to_string())
    // Attribute values are single-quoted.
    .replace('\'', "&#39;")
    .replace('"', "&#34;")
}

/// Removes every zero-width space from `text`.
pub fn strip_zero_width(text: &str) -> String {
    text.replace(ZERO_WIDTH_SPACE, "")
}

/// The length of a string in UTF-16 code units.
///
/// # Examples
///
/// ```
/// use formatted_text::text::utf16_len;
/// assert_eq!(utf16_len("hello"), 5);
/// assert_eq!(utf16_len("👋"), 2);
/// ```
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// A string viewed as a sequence of UTF-16 code units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utf16Text {
    units: Vec<u16>,
}

impl Utf16Text {
    /// Creates a UTF-16 view of `text`.
    pub fn new(text: &str) -> Self {
        Self {
            units: text.encode_utf16().collect(),
        }
    }

    /// Number of code units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// True if the text has no code units.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Finds the first occurrence of `needle` starting at or after `from`,
    /// returning its position in code units.
    ///
    /// An empty needle is found at `from` as long as `from` is within the
    /// text.
    ///
    /// # Examples
    ///
    /// ```
    /// use formatted_text::text::Utf16Text;
    /// let text = Utf16Text::new("abcabc");
    /// assert_eq!(text.find("bc", 0), Some(1));
    /// assert_eq!(text.find("bc", 2), Some(4));
    /// assert_eq!(text.find("bc", 5), None);
    /// ```
    pub fn find(&self, needle: &str, from: usize) -> Option<usize> {
        let needle: Vec<u16> = needle.encode_utf16().collect();
        if from > self.units.len() {
            return None;
        }
        if needle.is_empty() {
            return Some(from);
        }
        self.units[from..]
            .windows(needle.len())
            .position(|window| window == needle.as_slice())
            .map(|position| position + from)
    }

    /// Extracts the code units in `start..end` as a string.
    ///
    /// Returns `None` if the range is out of bounds or splits a surrogate
    /// pair.
    pub fn slice(&self, start: usize, end: usize) -> Option<String> {
        if start > end || end > self.units.len() {
            return None;
        }
        String::from_utf16(&self.units[start..end]).ok()
    }

    /// Like [`Utf16Text::slice()`], but clamps the range to the text and
    /// replaces a split surrogate pair with U+FFFD.
    pub fn slice_lossy(&self, start: usize, end: usize) -> String {
        let end = end.min(self.units.len());
        let start = start.min(end);
        String::from_utf16_lossy(&self.units[start..end])
    }
}

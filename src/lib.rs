// SPDX-License-Identifier: Apache-2.0

//! formatted-text converts lightweight message markup into *formatted text*:
//! plain text plus a list of typed, positioned entities, the way messaging
//! protocols transmit rich text.
//!
//! Conversion runs as a pipeline:
//!
//! 1. Optionally, `[label](target)` link shorthand is
//!    [expanded](markdown::links::expand) into link tags.
//! 2. The inline markup (`**bold**`, `` `code` ``, fenced code blocks, custom
//!    emoji shorthand, and so on) is [built](markdown::ast::build) into a
//!    syntax tree and [rendered](markdown::render::render) as markup.
//! 3. The markup is [parsed](markup::parse) into a tree, placeholder images
//!    are [normalized](images::normalize), and finally the tree is
//!    [flattened](extract::extract) into text and entities.
//!
//! Steps 1 and 2 can be skipped for input that is already markup.
//!
//! # Examples
//!
//! ```
//! use formatted_text::{ParseOptions, parse_html_as_formatted_text};
//! use formatted_text::entity::EntityKind;
//!
//! let opts = ParseOptions::build().expand_links(true).build();
//! let formatted = parse_html_as_formatted_text("**[site](example.com)**", &opts);
//!
//! assert_eq!(formatted.text, "site");
//! assert_eq!(formatted.entities[0].kind, EntityKind::Bold);
//! assert_eq!(formatted.entities[1].url(), Some("https://example.com"));
//! ```
//!
//! Offsets and lengths are measured in UTF-16 code units. The conversion is
//! total: malformed input never fails, it just produces fewer entities.
//!
//! A command-line front end, `formatted-text`, prints the result as JSON:
//!
//! ```bash
//! echo '**hello** world' | formatted-text entities --pretty
//! ```
//!
//! # License
//!
//! formatted-text is licensed under the terms of the [Apache License 2.0].
//!
//! [Apache License 2.0]: https://www.apache.org/licenses/LICENSE-2.0

pub mod cli;
pub mod entity;
pub mod extract;
pub mod images;
pub mod markdown;
pub mod markup;
pub mod text;

#[cfg(test)]
mod test_utils;

use entity::FormattedText;
use log::debug;

/// Options for [`parse_html_as_formatted_text()`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    expand_links: bool,
    skip_markdown: bool,
}

impl ParseOptions {
    /// Incrementally builds a new set of parse options.
    ///
    /// # Examples
    ///
    /// ```
    /// use formatted_text::ParseOptions;
    /// let opts = ParseOptions::build().expand_links(true).skip_markdown(false).build();
    /// assert!(opts.expands_links());
    /// ```
    pub fn build() -> ParseOptionsBuilder {
        ParseOptionsBuilder::default()
    }

    /// True if `[label](target)` shorthand is expanded.
    pub fn expands_links(&self) -> bool {
        self.expand_links
    }

    /// True if the input is treated as finished markup.
    pub fn skips_markdown(&self) -> bool {
        self.skip_markdown
    }
}

/// A builder for parse options.
///
/// You probably don't want to use this directly; call [`ParseOptions::build()`]
/// and construct it incrementally instead.
#[derive(Debug, Default)]
#[must_use]
pub struct ParseOptionsBuilder {
    expand_links: bool,
    skip_markdown: bool,
}

impl ParseOptionsBuilder {
    /// Sets the "expand links" option to true or false.
    pub fn expand_links(mut self, expand_links: bool) -> Self {
        self.expand_links = expand_links;
        self
    }

    /// Sets the "skip markdown" option to true or false.
    ///
    /// When set, link shorthand is not expanded either.
    pub fn skip_markdown(mut self, skip_markdown: bool) -> Self {
        self.skip_markdown = skip_markdown;
        self
    }

    /// Builds the parse options.
    pub fn build(self) -> ParseOptions {
        ParseOptions {
            expand_links: self.expand_links,
            skip_markdown: self.skip_markdown,
        }
    }
}

/// Converts `input` into formatted text.
///
/// Unless `options` skip it, `input` is first converted from inline markup;
/// see the [crate documentation](crate) for the full pipeline.
pub fn parse_html_as_formatted_text(input: &str, options: &ParseOptions) -> FormattedText {
    let markup = if options.skip_markdown {
        debug!("skipping inline markup");
        input.to_string()
    } else {
        markdown::to_markup(input, options.expand_links)
    };

    let nodes = images::normalize(markup::parse(&markup));
    debug!("parsed {} top-level markup nodes", nodes.len());

    let formatted = extract::extract(&nodes);
    debug!(
        "extracted {} entities from {} UTF-16 units",
        formatted.entities.len(),
        text::utf16_len(&formatted.text)
    );
    formatted
}

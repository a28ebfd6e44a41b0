use formatted_text::entity::{EntityKind, FormattedText};
use formatted_text::extract::MAX_TAG_DEPTH;
use formatted_text::markup::{self, from_formatted_text};
use formatted_text::{ParseOptions, images, parse_html_as_formatted_text};
use pretty_assertions::assert_eq;
use seq_macro::seq;

const INPUTS: [&str; 9] = [
    "plain text",
    "a **b __c__** `d` [x](y.com)",
    "**[site](example.com)** and [me@example.com](me@example.com)",
    "```py\nprint('hi')\n``` then ||spoiled||",
    "héllo 👋 **wörld** [:wave:](customEmoji:7)",
    "<br><br>__lead__ ~~tail~~",
    "**outer **inner** tail** `x & y`",
    "[https://a.io](https://a.io) ~~a __b **c ||d||**__~~",
    "[it's](customEmoji:1) [q](a.io/it's) ```x'y\nz```",
];

fn parse(input: &str) -> FormattedText {
    let opts = ParseOptions::build().expand_links(true).build();
    parse_html_as_formatted_text(input, &opts)
}

fn markup_only() -> ParseOptions {
    ParseOptions::build().skip_markdown(true).build()
}

#[test]
fn it_keeps_every_entity_inside_the_text() {
    for input in INPUTS {
        let formatted = parse(input);
        let len = formatted.text.encode_utf16().count();
        for entity in &formatted.entities {
            assert!(entity.end() <= len, "{entity:?} in {input:?}");
            assert!(entity.length > 0, "{entity:?} in {input:?}");
            assert!(formatted.entity_text(entity).is_some(), "{entity:?} in {input:?}");
        }
    }
}

#[test]
fn it_covers_the_source_text_of_each_entity() {
    let formatted = parse("a **b __c__** `d` [x](y.com) [:e:](customEmoji:1)");
    let covered = formatted
        .entities
        .iter()
        .map(|entity| formatted.entity_text(entity).unwrap_or_default())
        .collect::<Vec<_>>();
    assert_eq!(covered, vec!["b c", "c", "d", "x", ":e:"]);
}

#[test]
fn it_round_trips_through_markup() {
    for input in INPUTS {
        let formatted = parse(input);
        let rendered = from_formatted_text(&formatted);
        let reparsed = parse_html_as_formatted_text(&rendered, &markup_only());
        assert_eq!(reparsed, formatted, "{input:?} rendered as {rendered:?}");
    }
}

#[test]
fn it_normalizes_images_idempotently() {
    let markup = "<b><img alt=':a:' data-document-id='1'> <img alt='🙂'></b><img>";
    let once = images::normalize(markup::parse(markup));
    let twice = images::normalize(once.clone());
    assert_eq!(twice, once);
}

#[test]
fn it_caps_style_marker_nesting() {
    let formatted = parse("**__~~||`x`||~~__** **__~~||`y`||~~__**");
    assert_eq!(formatted.text, "x y");
    let kinds = formatted
        .entities
        .iter()
        .map(|entity| (entity.kind, entity.offset))
        .collect::<Vec<_>>();
    assert_eq!(
        kinds,
        vec![
            (EntityKind::Bold, 0),
            (EntityKind::Italic, 0),
            (EntityKind::Strike, 0),
            (EntityKind::Bold, 2),
            (EntityKind::Italic, 2),
            (EntityKind::Strike, 2),
        ]
    );
}

seq!(N in 1..=5 {
    #[test]
    fn it_extracts_at_most_the_depth_cap_from_nesting_depth_~N() {
        let markup = format!("{}x{}", "<u>".repeat(N), "</u>".repeat(N));
        let formatted = parse_html_as_formatted_text(&markup, &markup_only());
        assert_eq!(formatted.text, "x");
        assert_eq!(formatted.entities.len(), usize::min(N, MAX_TAG_DEPTH));
    }
});

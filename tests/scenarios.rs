use formatted_text::entity::{Entity, EntityKind, FormattedText, Payload};
use formatted_text::{ParseOptions, parse_html_as_formatted_text};
use indoc::indoc;
use pretty_assertions::assert_eq;
use serde_json::json;

fn parse(input: &str) -> FormattedText {
    parse_html_as_formatted_text(input, &ParseOptions::default())
}

fn parse_with_links(input: &str) -> FormattedText {
    let opts = ParseOptions::build().expand_links(true).build();
    parse_html_as_formatted_text(input, &opts)
}

#[test]
fn it_converts_a_bold_link() {
    let formatted = parse_with_links("**[site](example.com)**");
    assert_eq!(formatted.text, "site");
    assert_eq!(
        formatted.entities,
        vec![
            Entity::new(EntityKind::Bold, 0, 4),
            Entity::new(EntityKind::TextUrl, 0, 4)
                .with_payload(Some(Payload::Url(String::from("https://example.com")))),
        ]
    );
}

#[test]
fn it_converts_fenced_code_with_a_language() {
    let formatted = parse("```js\nconsole.log(1)\n```");
    assert_eq!(formatted.text, "console.log(1)");
    assert_eq!(
        formatted.entities,
        vec![Entity::new(EntityKind::Pre, 0, 14)
            .with_payload(Some(Payload::Language(String::from("js"))))]
    );
}

#[test]
fn it_converts_a_multiline_code_block() {
    let input = indoc! {"
        ```rust
        fn main() {
            println!(\"<hi>\");
        }
        ```
    "};
    let formatted = parse(input);
    assert_eq!(formatted.text, "fn main() {\n    println!(\"<hi>\");\n}");
    assert_eq!(formatted.entities.len(), 1);
    assert_eq!(formatted.entities[0].language(), Some("rust"));
    assert_eq!(
        formatted.entity_text(&formatted.entities[0]),
        Some(formatted.text.clone())
    );
}

#[test]
fn it_converts_custom_emoji_shorthand() {
    let formatted = parse("[:wave:](customEmoji:123)");
    assert_eq!(formatted.text, ":wave:");
    assert_eq!(
        formatted.entities,
        vec![Entity::new(EntityKind::CustomEmoji, 0, 6)
            .with_payload(Some(Payload::DocumentId(String::from("123"))))]
    );
}

#[test]
fn it_keeps_quotes_in_custom_emoji_labels() {
    let formatted = parse("[it's](customEmoji:1)");
    assert_eq!(formatted.text, "it's");
    assert_eq!(
        formatted.entities,
        vec![Entity::new(EntityKind::CustomEmoji, 0, 4)
            .with_payload(Some(Payload::DocumentId(String::from("1"))))]
    );
}

#[test]
fn it_keeps_quotes_in_link_targets() {
    let formatted = parse_with_links("[x](example.com/it's)");
    assert_eq!(formatted.text, "x");
    assert_eq!(formatted.entities[0].url(), Some("https://example.com/it's"));
}

#[test]
fn it_keeps_quotes_in_code_languages() {
    let formatted = parse("a ```x'y\nz```");
    assert_eq!(formatted.text, "a z");
    assert_eq!(formatted.entities[0].language(), Some("x'y"));
}

#[test]
fn it_keeps_markers_in_link_targets() {
    let formatted = parse_with_links("[x](example.com/a__b__c) [y](z.io/~~*|`)");
    assert_eq!(formatted.text, "x y");
    assert_eq!(formatted.entities[0].url(), Some("https://example.com/a__b__c"));
    assert_eq!(formatted.entities[1].url(), Some("https://z.io/~~*|`"));
}

#[test]
fn it_treats_custom_emoji_without_a_document_id_as_text() {
    let formatted = parse("[:x:](customEmoji:)");
    assert_eq!(formatted, FormattedText::plain(":x:"));

    let opts = ParseOptions::build().skip_markdown(true).build();
    let formatted =
        parse_html_as_formatted_text("a <img alt=':x:' data-document-id=''>", &opts);
    assert_eq!(formatted, FormattedText::plain("a :x:"));
}

#[test]
fn it_nests_a_bold_marker_that_starts_a_word() {
    let formatted = parse("**a **b");
    assert_eq!(formatted.text, "a b");
    assert_eq!(
        formatted.entities,
        vec![Entity::new(EntityKind::Bold, 0, 3), Entity::new(EntityKind::Bold, 2, 1)]
    );
}

#[test]
fn it_converts_custom_emoji_shorthand_with_links_enabled() {
    let formatted = parse_with_links("[:wave:](customEmoji:123) [x](y.org)");
    assert_eq!(formatted.text, ":wave: x");
    assert_eq!(formatted.entities[0].document_id(), Some("123"));
    assert_eq!(formatted.entities[1].url(), Some("https://y.org"));
}

#[test]
fn it_converts_plain_text() {
    let formatted = parse("hello");
    assert_eq!(formatted, FormattedText::plain("hello"));
    assert_eq!(formatted.entities(), None);
}

#[test]
fn it_omits_empty_entities_from_json() {
    let json = serde_json::to_value(parse("hello")).expect("could not serialize");
    assert_eq!(json, json!({"text": "hello"}));
}

#[test]
fn it_serializes_entities_with_their_payloads() {
    let json = serde_json::to_value(parse("[:wave:](customEmoji:123)"))
        .expect("could not serialize");
    assert_eq!(
        json,
        json!({
            "text": ":wave:",
            "entities": [
                {"type": "MessageEntityCustomEmoji", "offset": 0, "length": 6, "documentId": "123"},
            ],
        })
    );
}

#[test]
fn it_infers_email_links() {
    let formatted = parse_with_links("[a@b.com](a@b.com)");
    assert_eq!(formatted.text, "a@b.com");
    assert_eq!(formatted.entities, vec![Entity::new(EntityKind::Email, 0, 7)]);
}

#[test]
fn it_infers_plain_urls() {
    let formatted = parse_with_links("[https://example.com](https://example.com)");
    assert_eq!(formatted.entities, vec![Entity::new(EntityKind::Url, 0, 19)]);
}

#[test]
fn it_converts_every_style_marker() {
    let formatted = parse("**b** __i__ ~~s~~ ||p|| `c`");
    assert_eq!(formatted.text, "b i s p c");
    assert_eq!(
        formatted.entities,
        vec![
            Entity::new(EntityKind::Bold, 0, 1),
            Entity::new(EntityKind::Italic, 2, 1),
            Entity::new(EntityKind::Strike, 4, 1),
            Entity::new(EntityKind::Spoiler, 6, 1),
            Entity::new(EntityKind::Code, 8, 1),
        ]
    );
}

#[test]
fn it_handles_leading_line_breaks() {
    let formatted = parse("<br><br>**x** y");
    assert_eq!(formatted.text, "x y");
    assert_eq!(formatted.entities, vec![Entity::new(EntityKind::Bold, 0, 1)]);
}

#[test]
fn it_handles_interior_line_breaks() {
    let formatted = parse("**a**<br>__b__<div>~~c~~</div>");
    assert_eq!(formatted.text, "a\nb\nc");
    assert_eq!(
        formatted.entities,
        vec![
            Entity::new(EntityKind::Bold, 0, 1),
            Entity::new(EntityKind::Italic, 2, 1),
            Entity::new(EntityKind::Strike, 4, 1),
        ]
    );
}

#[test]
fn it_keeps_code_content_literal() {
    let formatted = parse("`<b>not bold</b>`");
    assert_eq!(formatted.text, "<b>not bold</b>");
    assert_eq!(formatted.entities, vec![Entity::new(EntityKind::Code, 0, 15)]);
}

#[test]
fn it_accepts_finished_markup() {
    let opts = ParseOptions::build().skip_markdown(true).build();
    let formatted = parse_html_as_formatted_text(
        "<a data-entity-type='MessageEntityMentionName' data-user-id='42'>Bob</a> hi",
        &opts,
    );
    assert_eq!(formatted.text, "Bob hi");
    assert_eq!(
        formatted.entities,
        vec![Entity::new(EntityKind::MentionName, 0, 3)
            .with_payload(Some(Payload::UserId(String::from("42"))))]
    );
}

#[test]
fn it_survives_unterminated_constructs() {
    for input in ["**a", "```", "`", "[x](customEmoji:", "a<br", "<div x", "||"] {
        let formatted = parse_with_links(input);
        for entity in &formatted.entities {
            assert!(entity.end() <= formatted.text.encode_utf16().count(), "{input:?}");
        }
    }
}

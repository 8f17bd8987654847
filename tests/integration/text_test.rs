//! Integration tests for markup, wrapping and justification

use super::helpers::render_plain;
use spangle::render::Constrain;
use spangle::style::Attribute;
use spangle::{escape, parse_markup, JustifyMethod, OverflowMethod, Style, Text};

#[test]
fn markup_spans_cover_tagged_characters() {
    let text = Text::from_markup("plain [bold]loud[/bold] [italic]soft[/]").unwrap();
    assert_eq!(text.plain(), "plain loud soft");
    assert_eq!(text.get_style_at_offset(7).get(Attribute::Bold), Some(true));
    assert_eq!(text.get_style_at_offset(12).get(Attribute::Italic), Some(true));
    assert!(text.get_style_at_offset(0).is_null());
}

#[test]
fn escaped_markup_is_literal() {
    let source = format!("{} ok", escape("[red]not a tag[/red]"));
    let text = parse_markup(&source).unwrap();
    assert_eq!(text.plain(), "[red]not a tag[/red] ok");
    assert!(text.spans().is_empty());
}

#[test]
fn mismatched_close_is_an_error() {
    let err = parse_markup("[bold]x[/italic]").unwrap_err();
    assert!(err.to_string().contains("italic"), "unexpected error: {}", err);
    assert!(parse_markup("x[/]").is_err());
}

#[test]
fn wraps_at_word_boundaries() {
    let text = Text::new("the quick brown fox jumps");
    let lines = text.wrap(10, None, None, 8, None);
    assert_eq!(lines.plain_lines(), vec!["the quick ", "brown fox ", "jumps"]);
}

#[test]
fn folds_words_longer_than_width() {
    let text = Text::new("abcdefghij");
    let lines = text.wrap(4, None, Some(OverflowMethod::Fold), 8, None);
    assert_eq!(lines.plain_lines(), vec!["abcd", "efgh", "ij"]);
}

#[test]
fn ellipsis_marks_cut_lines() {
    let text = Text::new("abcdefghij").with_no_wrap(true);
    let lines = text.wrap(5, None, Some(OverflowMethod::Ellipsis), 8, None);
    assert_eq!(lines.plain_lines(), vec!["abcd…"]);
}

#[test]
fn justification_pads_to_width() {
    let text = Text::new("hello world");
    let test_cases = [
        (JustifyMethod::Left, "hello world         "),
        (JustifyMethod::Center, "    hello world     "),
        (JustifyMethod::Right, "         hello world"),
    ];
    for (justify, expected) in test_cases {
        let lines = text.wrap(20, Some(justify), None, 8, None);
        assert_eq!(lines.plain_lines(), vec![expected], "Failed for {:?}", justify);
    }
}

#[test]
fn full_justify_stretches_all_but_last_line() {
    let text = Text::new("aa bb cc dd ee");
    let lines = text.wrap(8, Some(JustifyMethod::Full), None, 8, None);
    assert_eq!(lines.plain_lines(), vec!["aa bb cc", "dd ee"]);

    let text = Text::new("a b cc dd");
    let lines = text.wrap(7, Some(JustifyMethod::Full), None, 8, None);
    assert_eq!(lines.plain_lines(), vec!["a b  cc", "dd"]);
}

#[test]
fn wide_characters_count_two_cells() {
    let text = Text::new("日本語テキスト");
    assert_eq!(text.cell_len(), 14);
    let lines = text.wrap(6, None, None, 8, None);
    assert_eq!(lines.plain_lines(), vec!["日本語", "テキス", "ト"]);
}

#[test]
fn styles_survive_wrapping() {
    let text = Text::from_markup("one [red]two three[/red] four").unwrap();
    let lines = text.wrap(9, None, None, 8, None);
    assert_eq!(lines.plain_lines(), vec!["one two ", "three ", "four"]);
    let red = Style::parse("red").unwrap();
    let second = lines.get(1).unwrap();
    assert_eq!(second.get_style_at_offset(0), red);
    let third = lines.get(2).unwrap();
    assert!(third.get_style_at_offset(0).is_null());
}

#[test]
fn tabs_expand_to_next_stop() {
    let mut text = Text::new("a\tbc\td");
    text.expand_tabs(Some(4));
    assert_eq!(text.plain(), "a   bc  d");
}

#[test]
fn constrained_text_renders_within_width() {
    let constrained = Constrain::new(Text::new("aaaa bbbb"), Some(5));
    let rendered = render_plain(&constrained, 40);
    insta::assert_snapshot!(format!("{:?}", rendered), @r#""aaaa \nbbbb\n""#);
}

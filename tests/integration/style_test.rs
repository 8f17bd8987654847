//! Integration tests for style parsing, combination and rendering

use spangle::style::{Attribute, StyleStack};
use spangle::{ColorSystem, Style};

#[test]
fn renders_attributes_then_colors() {
    let style = Style::parse("bold red on blue").unwrap();
    let rendered = style.render("x", Some(ColorSystem::TrueColor));
    insta::assert_snapshot!(format!("{:?}", rendered), @r#""\u{1b}[1;31;44mx\u{1b}[0m""#);
}

#[test]
fn truecolor_style_downgrades_for_the_sink() {
    let style = Style::parse("#ff0000").unwrap();
    assert_eq!(
        style.render("x", Some(ColorSystem::TrueColor)),
        "\x1b[38;2;255;0;0mx\x1b[0m"
    );
    assert_eq!(
        style.render("x", Some(ColorSystem::EightBit)),
        "\x1b[38;5;196mx\x1b[0m"
    );
    assert_eq!(style.render("x", Some(ColorSystem::Standard)), "\x1b[31mx\x1b[0m");
    assert_eq!(style.render("x", None), "x");
}

#[test]
fn later_style_wins_when_combined() {
    let base = Style::parse("bold green").unwrap();
    let overlay = Style::parse("not bold underline").unwrap();
    let combined = base.combine(&overlay);
    assert_eq!(combined.get(Attribute::Bold), Some(false));
    assert_eq!(combined.get(Attribute::Underline), Some(true));
    assert_eq!(combined.color().map(|c| c.name()), Some("green"));
}

#[test]
fn display_parses_back_to_same_style() {
    for definition in ["bold", "italic not dim magenta", "underline on color(22)", "none"] {
        let style = Style::parse(definition).unwrap();
        let reparsed = Style::parse(&style.to_string()).unwrap();
        assert_eq!(reparsed, style, "Failed for {:?}", definition);
    }
}

#[test]
fn invalid_definitions_report_the_word() {
    let test_cases = [
        ("bold on", "on"),
        ("not sparkly", "sparkly"),
        ("bold purplish", "purplish"),
    ];
    for (definition, word) in test_cases {
        let err = Style::parse(definition).unwrap_err();
        assert!(
            err.to_string().contains(word),
            "Expected {:?} in error for {:?}: {}",
            word,
            definition,
            err
        );
    }
}

#[test]
fn style_stack_layers_and_restores() {
    let mut stack = StyleStack::new(Style::parse("red").unwrap());
    stack.push(&Style::parse("bold").unwrap());
    assert_eq!(stack.current(), &Style::parse("bold red").unwrap());
    stack.pop().unwrap();
    assert_eq!(stack.current(), &Style::parse("red").unwrap());
    assert!(stack.pop().is_err());
    assert_eq!(stack.depth(), 0);
}

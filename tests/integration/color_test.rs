//! Integration tests for color parsing and downgrading

use spangle::color::{ColorTriplet, ColorType};
use spangle::{Color, ColorSystem};

#[test]
fn parses_every_definition_form() {
    let test_cases = [
        ("red", ColorType::Standard(1)),
        ("  Bright_Blue ", ColorType::Standard(12)),
        ("color(200)", ColorType::EightBit(200)),
        ("7", ColorType::Standard(7)),
        ("#ff8000", ColorType::TrueColor(ColorTriplet::new(255, 128, 0))),
        ("rgb(1, 2, 3)", ColorType::TrueColor(ColorTriplet::new(1, 2, 3))),
        ("default", ColorType::Default),
    ];
    for (definition, expected) in test_cases {
        let color = Color::parse(definition).unwrap();
        assert_eq!(color.kind(), expected, "Failed for {:?}", definition);
    }
}

#[test]
fn rejects_out_of_range_and_unknown_colors() {
    for definition in ["", "#ff00", "rgb(256,0,0)", "color(256)", "mauve-ish"] {
        assert!(
            Color::parse(definition).is_err(),
            "Expected error for {:?}",
            definition
        );
    }
}

#[test]
fn truecolor_downgrades_step_by_step() {
    let red = Color::parse("#ff0000").unwrap();
    assert_eq!(red.system(), ColorSystem::TrueColor);

    let eight_bit = red.downgrade(ColorSystem::EightBit);
    assert_eq!(eight_bit.number(), Some(196));

    let standard = red.downgrade(ColorSystem::Standard);
    assert_eq!(standard.kind(), ColorType::Standard(1));
    assert_eq!(standard.get_ansi_codes(true), vec!["31".to_string()]);
}

#[test]
fn downgrade_to_richer_system_is_identity() {
    let color = Color::from_ansi(3);
    assert_eq!(color.downgrade(ColorSystem::TrueColor), color);
}

#[test]
fn ansi_codes_per_color_type() {
    let test_cases = [
        (Color::from_ansi(2), false, vec!["42"]),
        (Color::from_ansi(9), true, vec!["91"]),
        (Color::from_ansi(100), true, vec!["38", "5", "100"]),
        (Color::from_rgb(10, 20, 30), false, vec!["48", "2", "10", "20", "30"]),
        (Color::default_color(), true, vec!["39"]),
    ];
    for (color, foreground, expected) in test_cases {
        assert_eq!(
            color.get_ansi_codes(foreground),
            expected,
            "Failed for {} (foreground={})",
            color,
            foreground
        );
    }
}

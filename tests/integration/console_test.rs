//! Integration tests for Console output

use std::fs;

use super::helpers::{plain_console, terminal_console};
use spangle::config::ColorChoice;
use spangle::render::{Group, Padding};
use spangle::{ColorSystem, Console, ConsoleConfig, ConsoleError, Text};

#[test]
fn terminal_output_carries_styles() {
    let (mut console, buffer) = terminal_console(80, 25);
    console.print_str("[bold]hi[/bold] [red]there[/]").unwrap();
    insta::assert_snapshot!(
        format!("{:?}", buffer.contents()),
        @r#""\u{1b}[1mhi\u{1b}[0m \u{1b}[31mthere\u{1b}[0m\n""#
    );
}

#[test]
fn no_color_keeps_attributes() {
    let (console, buffer) = terminal_console(80, 25);
    let mut console = console.with_no_color(true);
    console.print_str("[bold green]ok[/]").unwrap();
    assert_eq!(buffer.contents(), "\x1b[1mok\x1b[0m\n");
}

#[test]
fn non_terminal_output_is_plain() {
    let (mut console, buffer) = plain_console(80);
    console.print_str("[bold red]warning[/]: disk full").unwrap();
    console.show_cursor(false).unwrap();
    assert_eq!(buffer.contents(), "warning: disk full\n");
}

#[test]
fn file_sink_receives_no_escape_codes() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("out.txt");
    let file = fs::File::create(&path).unwrap();

    let mut console = Console::new(file)
        .with_color_system(Some(ColorSystem::TrueColor))
        .with_size(20, 10);
    console.print_str("[underline]one[/] two").unwrap();
    console.line(1).unwrap();
    drop(console);

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, "one two\n\n");
    assert!(!written.contains('\x1b'));

    drop(temp_dir);
}

#[test]
fn text_wraps_to_console_width() {
    let (mut console, buffer) = plain_console(11);
    console
        .print(&Text::new("lorem ipsum dolor sit amet"))
        .unwrap();
    assert_eq!(buffer.contents(), "lorem ipsum\ndolor sit \namet\n");
}

#[test]
fn capture_matches_what_print_writes() {
    let (mut console, buffer) = terminal_console(40, 10);
    let mut group = Group::default();
    group.push(Text::from_markup("[italic]first[/]").unwrap());
    group.push(Padding::indent(Text::new("second"), 2));

    let captured = console.capture(&group).unwrap();
    console.print(&group).unwrap();
    assert_eq!(captured, buffer.contents());
    assert!(captured.ends_with("  second\n"));
}

#[test]
fn invalid_markup_is_reported() {
    let (mut console, buffer) = plain_console(80);
    let err = console.print_str("[bold]x[/red]").unwrap_err();
    assert!(matches!(err, ConsoleError::Markup(_)), "unexpected error: {:?}", err);
    assert_eq!(buffer.contents(), "");
}

#[test]
fn markup_can_be_disabled() {
    let (console, buffer) = plain_console(80);
    let mut console = console.with_markup(false);
    console.print_str("[bold]x[/red]").unwrap();
    assert_eq!(buffer.contents(), "[bold]x[/red]\n");
}

#[test]
fn ascii_encoding_rejects_non_ascii_output() {
    let (console, buffer) = plain_console(80);
    let mut console = console.with_encoding("ascii");
    let err = console.print_str("café").unwrap_err();
    assert!(matches!(err, ConsoleError::Encoding { .. }), "unexpected error: {:?}", err);
    assert_eq!(buffer.contents(), "");

    console.print_str("cafe").unwrap();
    assert_eq!(buffer.contents(), "cafe\n");
}

#[test]
fn dynamic_values_must_be_renderable() {
    let (mut console, buffer) = plain_console(80);
    console.print_any(&String::from("from a string")).unwrap();
    assert_eq!(buffer.take(), "from a string\n");

    let err = console.print_any(&42u32).unwrap_err();
    assert!(matches!(err, ConsoleError::NotRenderable(_)), "unexpected error: {:?}", err);
}

#[test]
fn config_builds_console() {
    let config = ConsoleConfig::from_toml(
        r#"
        width = 30
        height = 12
        color_system = "standard"
        force_terminal = true
        "#,
    )
    .unwrap();
    assert_eq!(config.color_system, ColorChoice::Standard);

    let buffer = spangle::render::CaptureBuffer::new();
    let mut console = Console::from_config(&config, buffer.clone(), false);
    assert!(console.is_terminal());
    assert_eq!(console.size(), (30, 12));
    assert_eq!(console.color_system(), Some(ColorSystem::Standard));

    console.print_str("[#ff0000]x[/]").unwrap();
    assert_eq!(buffer.contents(), "\x1b[31mx\x1b[0m\n");
}

//! Integration tests for live displays

use std::sync::Arc;

use super::helpers::{plain_console, shared, terminal_console};
use spangle::live::VerticalOverflow;
use spangle::{Live, Text};

#[test]
fn crop_keeps_region_within_console_height() {
    let (console, buffer) = terminal_console(10, 2);
    let mut live = Live::new(Text::new("a\nb\nc"), shared(console))
        .with_auto_refresh(false)
        .with_vertical_overflow(VerticalOverflow::Crop);
    live.start(true).unwrap();
    insta::assert_snapshot!(format!("{:?}", buffer.take()), @r#""\u{1b}[?25la\nb""#);
    live.stop().unwrap();
}

#[test]
fn log_lines_scroll_above_the_region() {
    let (console, buffer) = terminal_console(20, 10);
    let console = shared(console);
    let mut live = Live::new(Text::new("status"), Arc::clone(&console)).with_auto_refresh(false);
    live.start(true).unwrap();
    buffer.take();

    console.lock().unwrap().print_str("[bold]step 1[/]").unwrap();
    let output = buffer.take();
    assert!(output.starts_with("\r\x1b[2K"), "unexpected output: {:?}", output);
    assert!(output.ends_with("\x1b[1mstep 1\x1b[0m\nstatus"), "unexpected output: {:?}", output);

    live.stop().unwrap();
    assert!(buffer.contents().ends_with("status\n\x1b[?25h"));
}

#[test]
fn transient_display_leaves_nothing_in_a_file() {
    let (console, buffer) = plain_console(40);
    let mut live = Live::new(Text::new("working"), shared(console))
        .with_auto_refresh(false)
        .with_transient(true);
    live.start(true).unwrap();
    live.update(Text::new("done"), true).unwrap();
    live.stop().unwrap();
    assert_eq!(buffer.contents(), "");
}

#[test]
fn dropping_a_started_display_restores_the_cursor() {
    let (console, buffer) = terminal_console(20, 10);
    {
        let mut live = Live::new(Text::new("x"), shared(console)).with_auto_refresh(false);
        live.start(false).unwrap();
    }
    let output = buffer.contents();
    assert!(output.starts_with("\x1b[?25l"));
    assert!(output.ends_with("x\n\x1b[?25h"), "unexpected output: {:?}", output);
}

//! Shared helpers for integration tests.

use std::sync::{Arc, Mutex};

use spangle::render::{CaptureBuffer, SharedConsole};
use spangle::{ColorSystem, Console, RenderOptions, Renderable};

/// A truecolor terminal console writing into a capture buffer.
pub fn terminal_console(width: usize, height: usize) -> (Console, CaptureBuffer) {
    let buffer = CaptureBuffer::new();
    let console = Console::new(buffer.clone())
        .with_terminal(true)
        .with_color_system(Some(ColorSystem::TrueColor))
        .with_size(width, height);
    (console, buffer)
}

/// A plain console, as used for files and pipes.
pub fn plain_console(width: usize) -> (Console, CaptureBuffer) {
    let buffer = CaptureBuffer::new();
    let console = Console::new(buffer.clone()).with_size(width, 25);
    (console, buffer)
}

pub fn shared(console: Console) -> SharedConsole {
    Arc::new(Mutex::new(console))
}

/// Concatenated text of everything a renderable produces.
pub fn render_plain(renderable: &dyn Renderable, width: usize) -> String {
    renderable
        .render(&RenderOptions::new(width))
        .map(|segment| segment.text)
        .collect()
}

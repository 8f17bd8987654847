//! Cursor and screen control sequences.
//!
//! Sequences are produced by `crossterm` commands and wrapped in control
//! segments, so they take up no cells and are dropped on non-terminal sinks.

use crossterm::{cursor, terminal, Command};

use crate::render::{RenderOptions, Renderable, Segments};
use crate::segment::Segment;

/// A single terminal control operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlCode {
    Bell,
    CarriageReturn,
    Home,
    Clear,
    ShowCursor,
    HideCursor,
    EnableAltScreen,
    DisableAltScreen,
    CursorUp(u16),
    CursorDown(u16),
    CursorForward(u16),
    CursorBackward(u16),
    /// Zero-based column.
    CursorMoveToColumn(u16),
    /// Zero-based column and row.
    CursorMoveTo { x: u16, y: u16 },
    /// Erase the whole current line.
    EraseLine,
    /// Erase from the cursor to the end of the line.
    EraseToLineEnd,
    SetWindowTitle(String),
}

impl ControlCode {
    /// The escape sequence for this code.
    pub fn to_ansi(&self) -> String {
        match self {
            Self::Bell => "\x07".to_string(),
            Self::CarriageReturn => "\r".to_string(),
            Self::Home => ansi(cursor::MoveTo(0, 0)),
            Self::Clear => ansi(terminal::Clear(terminal::ClearType::All)),
            Self::ShowCursor => ansi(cursor::Show),
            Self::HideCursor => ansi(cursor::Hide),
            Self::EnableAltScreen => ansi(terminal::EnterAlternateScreen),
            Self::DisableAltScreen => ansi(terminal::LeaveAlternateScreen),
            Self::CursorUp(n) => ansi(cursor::MoveUp(*n)),
            Self::CursorDown(n) => ansi(cursor::MoveDown(*n)),
            Self::CursorForward(n) => ansi(cursor::MoveRight(*n)),
            Self::CursorBackward(n) => ansi(cursor::MoveLeft(*n)),
            Self::CursorMoveToColumn(x) => ansi(cursor::MoveToColumn(*x)),
            Self::CursorMoveTo { x, y } => ansi(cursor::MoveTo(*x, *y)),
            Self::EraseLine => ansi(terminal::Clear(terminal::ClearType::CurrentLine)),
            Self::EraseToLineEnd => ansi(terminal::Clear(terminal::ClearType::UntilNewLine)),
            Self::SetWindowTitle(title) => ansi(terminal::SetTitle(title.as_str())),
        }
    }
}

fn ansi(command: impl Command) -> String {
    let mut buf = String::new();
    // fmt::Write for String is infallible
    let _ = command.write_ansi(&mut buf);
    buf
}

/// A renderable sequence of control codes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Control {
    codes: Vec<ControlCode>,
    segment: Segment,
}

impl Control {
    pub fn new(codes: impl IntoIterator<Item = ControlCode>) -> Self {
        let codes: Vec<ControlCode> = codes.into_iter().collect();
        let sequence: String = codes.iter().map(ControlCode::to_ansi).collect();
        Self {
            codes,
            segment: Segment::control(sequence),
        }
    }

    pub fn bell() -> Self {
        Self::new([ControlCode::Bell])
    }

    pub fn home() -> Self {
        Self::new([ControlCode::Home])
    }

    pub fn clear() -> Self {
        Self::new([ControlCode::Clear])
    }

    /// Move the cursor by a relative offset.
    pub fn move_by(x: i32, y: i32) -> Self {
        let mut codes = Vec::new();
        let clamp = |n: i32| u16::try_from(n.unsigned_abs()).unwrap_or(u16::MAX);
        if x > 0 {
            codes.push(ControlCode::CursorForward(clamp(x)));
        } else if x < 0 {
            codes.push(ControlCode::CursorBackward(clamp(x)));
        }
        if y > 0 {
            codes.push(ControlCode::CursorDown(clamp(y)));
        } else if y < 0 {
            codes.push(ControlCode::CursorUp(clamp(y)));
        }
        Self::new(codes)
    }

    pub fn move_to(x: u16, y: u16) -> Self {
        Self::new([ControlCode::CursorMoveTo { x, y }])
    }

    pub fn move_to_column(x: u16) -> Self {
        Self::new([ControlCode::CursorMoveToColumn(x)])
    }

    pub fn show_cursor(show: bool) -> Self {
        Self::new([if show {
            ControlCode::ShowCursor
        } else {
            ControlCode::HideCursor
        }])
    }

    pub fn alt_screen(enable: bool) -> Self {
        if enable {
            Self::new([ControlCode::EnableAltScreen, ControlCode::Home])
        } else {
            Self::new([ControlCode::DisableAltScreen])
        }
    }

    /// Set the window title. Bell and cursor-moving characters are removed
    /// so the title cannot end the escape sequence early.
    pub fn title(title: impl AsRef<str>) -> Self {
        Self::new([ControlCode::SetWindowTitle(strip_control_codes(title.as_ref()))])
    }

    pub fn codes(&self) -> &[ControlCode] {
        &self.codes
    }

    /// The combined escape sequence.
    pub fn as_str(&self) -> &str {
        &self.segment.text
    }

    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Renderable for Control {
    fn render<'a>(&'a self, _options: &RenderOptions) -> Segments<'a> {
        if self.is_empty() {
            return Box::new(std::iter::empty());
        }
        Box::new(std::iter::once(self.segment.clone()))
    }
}

/// Remove characters that would move the cursor or ring the bell.
pub fn strip_control_codes(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\x07' | '\x08' | '\x0b' | '\x0c' | '\r'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_render_expected_sequences() {
        let test_cases = [
            (ControlCode::Bell, "\x07"),
            (ControlCode::CarriageReturn, "\r"),
            (ControlCode::Home, "\x1b[1;1H"),
            (ControlCode::ShowCursor, "\x1b[?25h"),
            (ControlCode::HideCursor, "\x1b[?25l"),
            (ControlCode::CursorUp(3), "\x1b[3A"),
            (ControlCode::CursorDown(2), "\x1b[2B"),
            (ControlCode::CursorForward(4), "\x1b[4C"),
            (ControlCode::CursorBackward(1), "\x1b[1D"),
            (ControlCode::CursorMoveToColumn(0), "\x1b[1G"),
            (ControlCode::EraseLine, "\x1b[2K"),
            (ControlCode::EraseToLineEnd, "\x1b[K"),
        ];
        for (code, expected) in test_cases {
            assert_eq!(code.to_ansi(), expected, "Failed for {:?}", code);
        }
    }

    #[test]
    fn control_concatenates_codes() {
        let control = Control::new([
            ControlCode::CarriageReturn,
            ControlCode::CursorUp(2),
            ControlCode::EraseLine,
        ]);
        assert_eq!(control.as_str(), "\r\x1b[2A\x1b[2K");
        assert!(control.segment().is_control);
        assert_eq!(control.segment().cell_length(), 0);
    }

    #[test]
    fn move_by_picks_directions() {
        assert_eq!(
            Control::move_by(2, -3).codes(),
            &[ControlCode::CursorForward(2), ControlCode::CursorUp(3)]
        );
        assert_eq!(
            Control::move_by(-1, 1).codes(),
            &[ControlCode::CursorBackward(1), ControlCode::CursorDown(1)]
        );
        assert!(Control::move_by(0, 0).is_empty());
    }

    #[test]
    fn empty_control_renders_nothing() {
        let options = RenderOptions::new(80);
        assert_eq!(Control::default().render(&options).count(), 0);
        assert_eq!(Control::bell().render(&options).count(), 1);
    }

    #[test]
    fn strip_control_codes_removes_cursor_movers() {
        assert_eq!(strip_control_codes("a\rb\x07c\x08d"), "abcd");
        assert_eq!(strip_control_codes("keep\ttabs\n"), "keep\ttabs\n");
    }

    #[test]
    fn title_drops_bell_inside_text() {
        let control = Control::title("build\x07 done\r");
        assert_eq!(control.as_str(), "\x1b]0;build done\x07");
        assert_eq!(
            control.codes(),
            &[ControlCode::SetWindowTitle("build done".to_string())]
        );
    }
}

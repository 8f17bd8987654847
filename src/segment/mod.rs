//! Segments: the atomic unit of styled output.
//!
//! Every render produces a flat stream of [`Segment`]s. A segment is a run of
//! text with one optional style; control segments carry raw escape sequences
//! that take up no cells. Line and shape operations on segment streams live
//! in [`lines`].

pub mod lines;

pub use lines::{
    adjust_line_length, apply_style, divide, filter_control, get_line_length, get_shape,
    remove_color, set_shape, simplify, split_and_crop_lines, split_lines, strip_links,
    strip_styles,
};

use crate::cells::{cell_len, char_width};
use crate::style::Style;

/// A piece of text with an optional style.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Segment {
    pub text: String,
    pub style: Option<Style>,
    /// Control segments hold escape sequences, not printable text.
    pub is_control: bool,
}

impl Segment {
    /// An unstyled segment.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
            is_control: false,
        }
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style: Some(style),
            is_control: false,
        }
    }

    pub fn with_style(text: impl Into<String>, style: Option<Style>) -> Self {
        Self {
            text: text.into(),
            style,
            is_control: false,
        }
    }

    /// A segment holding a newline.
    pub fn line() -> Self {
        Self::new("\n")
    }

    /// A control segment carrying a raw escape sequence.
    pub fn control(sequence: impl Into<String>) -> Self {
        Self {
            text: sequence.into(),
            style: None,
            is_control: true,
        }
    }

    /// Cells this segment occupies. Control segments occupy none.
    pub fn cell_length(&self) -> usize {
        if self.is_control {
            0
        } else {
            cell_len(&self.text)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Split into two segments at a cell offset.
    ///
    /// A wide glyph straddling `cut` is replaced by a space on each side, so
    /// both halves keep their exact cell widths.
    pub fn split_at_cell(&self, cut: usize) -> (Segment, Segment) {
        let rebuild = |text: String| Segment {
            text,
            style: self.style.clone(),
            is_control: self.is_control,
        };
        if cut >= self.cell_length() {
            return (self.clone(), rebuild(String::new()));
        }

        let mut width = 0;
        for (index, c) in self.text.char_indices() {
            let w = char_width(c);
            if width == cut && w > 0 {
                return (
                    rebuild(self.text[..index].to_string()),
                    rebuild(self.text[index..].to_string()),
                );
            }
            if width + w > cut {
                let after = index + c.len_utf8();
                return (
                    rebuild(format!("{} ", &self.text[..index])),
                    rebuild(format!(" {}", &self.text[after..])),
                );
            }
            width += w;
        }
        (self.clone(), rebuild(String::new()))
    }
}

impl From<&str> for Segment {
    fn from(text: &str) -> Self {
        Segment::new(text)
    }
}

impl From<String> for Segment {
    fn from(text: String) -> Self {
        Segment::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_length_ignores_control() {
        assert_eq!(Segment::new("中a").cell_length(), 3);
        assert_eq!(Segment::control("\x1b[2K").cell_length(), 0);
        assert_eq!(Segment::default().cell_length(), 0);
    }

    #[test]
    fn split_at_cell_ascii() {
        let style = Style::parse("bold").unwrap();
        let segment = Segment::styled("Hello", style.clone());
        let (before, after) = segment.split_at_cell(2);
        assert_eq!(before, Segment::styled("He", style.clone()));
        assert_eq!(after, Segment::styled("llo", style));
    }

    #[test]
    fn split_at_cell_edges() {
        let segment = Segment::new("abc");
        assert_eq!(segment.split_at_cell(0), (Segment::new(""), Segment::new("abc")));
        assert_eq!(segment.split_at_cell(3), (Segment::new("abc"), Segment::new("")));
        assert_eq!(segment.split_at_cell(10), (Segment::new("abc"), Segment::new("")));
    }

    #[test]
    fn split_at_cell_never_halves_wide_glyph() {
        let segment = Segment::new("早乙女");
        assert_eq!(
            segment.split_at_cell(2),
            (Segment::new("早"), Segment::new("乙女"))
        );
        assert_eq!(
            segment.split_at_cell(3),
            (Segment::new("早 "), Segment::new(" 女"))
        );
    }

    #[test]
    fn split_at_cell_preserves_widths() {
        let segment = Segment::new("a中b文c");
        for cut in 0..=segment.cell_length() {
            let (before, after) = segment.split_at_cell(cut);
            assert_eq!(before.cell_length(), cut, "Failed for cut {}", cut);
            assert_eq!(
                before.cell_length() + after.cell_length(),
                segment.cell_length()
            );
        }
    }
}

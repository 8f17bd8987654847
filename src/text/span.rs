//! Style spans over a text buffer.

use crate::style::Style;

/// A style applied to the half-open character range `start..end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub style: Style,
}

impl Span {
    pub fn new(start: usize, end: usize, style: Style) -> Self {
        Self { start, end, style }
    }

    /// Check if the span covers no characters.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Split at `offset`.
    ///
    /// Returns the span unchanged (and `None`) when `offset` is outside it.
    pub fn split(&self, offset: usize) -> (Span, Option<Span>) {
        if offset < self.start || offset >= self.end {
            return (self.clone(), None);
        }
        (
            Span::new(self.start, offset, self.style.clone()),
            Some(Span::new(offset, self.end, self.style.clone())),
        )
    }

    /// Shift right by `offset` characters.
    pub fn move_right(&self, offset: usize) -> Span {
        Span::new(self.start + offset, self.end + offset, self.style.clone())
    }

    /// Shift left by `offset` characters, saturating at zero.
    pub fn move_left(&self, offset: usize) -> Span {
        Span::new(
            self.start.saturating_sub(offset),
            self.end.saturating_sub(offset),
            self.style.clone(),
        )
    }

    /// Clamp the end to `offset`.
    pub fn right_crop(&self, offset: usize) -> Span {
        if offset >= self.end {
            return self.clone();
        }
        Span::new(self.start, offset.max(self.start), self.style.clone())
    }

    /// Grow the end by `cells` characters.
    pub fn extend(&self, cells: usize) -> Span {
        Span::new(self.start, self.end + cells, self.style.clone())
    }
}

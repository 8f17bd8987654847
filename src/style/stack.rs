//! A stack of nested styles.

use super::{Style, StyleStackError};

/// Tracks the effective style while nested styles are pushed and popped.
///
/// Each entry is the combination of everything below it, so reading the
/// current style and popping are both O(1).
#[derive(Debug, Clone)]
pub struct StyleStack {
    stack: Vec<Style>,
}

impl StyleStack {
    pub fn new(base: Style) -> Self {
        Self { stack: vec![base] }
    }

    /// The effective style at the top of the stack.
    pub fn current(&self) -> &Style {
        // the base entry is never popped
        &self.stack[self.stack.len() - 1]
    }

    /// Layer `style` over the current style.
    pub fn push(&mut self, style: &Style) {
        let combined = self.current().combine(style);
        self.stack.push(combined);
    }

    /// Restore the previous style, returning the one removed.
    pub fn pop(&mut self) -> Result<Style, StyleStackError> {
        if self.stack.len() <= 1 {
            return Err(StyleStackError::PopBase);
        }
        self.stack.pop().ok_or(StyleStackError::PopBase)
    }

    /// Number of pushed styles above the base.
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }
}

impl Default for StyleStack {
    fn default() -> Self {
        Self::new(Style::null())
    }
}

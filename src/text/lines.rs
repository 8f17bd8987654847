//! A list of text lines produced by wrapping.

use super::{JustifyMethod, OverflowMethod, Text};
use crate::cells::cell_len;
use crate::render::{Measurement, RenderOptions, Renderable, Segments};
use crate::segment::Segment;

/// Lines of text, typically the output of [`Text::wrap`] or [`Text::divide`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Lines {
    lines: Vec<Text>,
}

impl Lines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn push(&mut self, line: Text) {
        self.lines.push(line);
    }

    pub fn pop(&mut self) -> Option<Text> {
        self.lines.pop()
    }

    pub fn extend(&mut self, other: Lines) {
        self.lines.extend(other.lines);
    }

    pub fn get(&self, index: usize) -> Option<&Text> {
        self.lines.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Text> {
        self.lines.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Text> {
        self.lines.iter_mut()
    }

    /// Plain text of every line.
    pub fn plain_lines(&self) -> Vec<&str> {
        self.lines.iter().map(Text::plain).collect()
    }

    /// Align every line within `width` cells.
    ///
    /// Full justification stretches the gaps between words so each line
    /// except the last is exactly `width` cells.
    pub fn justify(&mut self, width: usize, justify: JustifyMethod, overflow: OverflowMethod) {
        match justify {
            JustifyMethod::Default => {}
            JustifyMethod::Left => {
                for line in &mut self.lines {
                    line.truncate(width, Some(overflow), true);
                }
            }
            JustifyMethod::Center => {
                for line in &mut self.lines {
                    line.rstrip();
                    line.truncate(width, Some(overflow), false);
                    line.pad_left(width.saturating_sub(line.cell_len()) / 2, ' ');
                    line.pad_right(width.saturating_sub(line.cell_len()), ' ');
                }
            }
            JustifyMethod::Right => {
                for line in &mut self.lines {
                    line.rstrip();
                    line.truncate(width, Some(overflow), false);
                    line.pad_left(width.saturating_sub(line.cell_len()), ' ');
                }
            }
            JustifyMethod::Full => {
                let last = self.lines.len().saturating_sub(1);
                for line in self.lines.iter_mut().take(last) {
                    *line = full_justify(line, width);
                }
            }
        }
    }
}

/// Stretch the gaps between words so the line fills `width` cells.
///
/// Extra spaces are handed out to gaps from the right. A gap takes the style
/// of its neighbours when they agree, otherwise the line's base style.
fn full_justify(line: &Text, width: usize) -> Text {
    let words = line.split(" ", false, false);
    let words_size: usize = words.iter().map(Text::cell_len).sum();
    let mut spaces = vec![1usize; words.len().saturating_sub(1)];
    let mut num_spaces = spaces.len();
    let mut index = 0;
    if !spaces.is_empty() {
        while words_size + num_spaces < width {
            let gap = spaces.len() - index - 1;
            spaces[gap] += 1;
            num_spaces += 1;
            index = (index + 1) % spaces.len();
        }
    }

    let mut tokens: Vec<Text> = Vec::with_capacity(words.len() * 2);
    for (index, word) in words.iter().enumerate() {
        tokens.push(word.clone());
        if let Some(count) = spaces.get(index) {
            let style = word.get_style_at_offset(word.len().saturating_sub(1));
            let next_style = words
                .get(index + 1)
                .map_or_else(|| line.style.clone(), |next| next.get_style_at_offset(0));
            let space_style = if style == next_style {
                style
            } else {
                line.style.clone()
            };
            tokens.push(Text::styled(" ".repeat(*count), space_style));
        }
    }
    Text::new("").join(tokens.iter())
}

impl From<Vec<Text>> for Lines {
    fn from(lines: Vec<Text>) -> Self {
        Self { lines }
    }
}

impl IntoIterator for Lines {
    type Item = Text;
    type IntoIter = std::vec::IntoIter<Text>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}

impl<'a> IntoIterator for &'a Lines {
    type Item = &'a Text;
    type IntoIter = std::slice::Iter<'a, Text>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

impl FromIterator<Text> for Lines {
    fn from_iter<I: IntoIterator<Item = Text>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

impl std::ops::Index<usize> for Lines {
    type Output = Text;

    fn index(&self, index: usize) -> &Text {
        &self.lines[index]
    }
}

impl Renderable for Lines {
    fn render<'a>(&'a self, options: &RenderOptions) -> Segments<'a> {
        let options = options.clone();
        Box::new(self.lines.iter().flat_map(move |line| {
            let mut segments: Vec<Segment> = line.render(&options).collect();
            if segments.last().map_or(true, |s| s.text != "\n") {
                segments.push(Segment::line());
            }
            segments
        }))
    }

    fn measure(&self, options: &RenderOptions) -> Measurement {
        let minimum = self
            .lines
            .iter()
            .map(|line| line.measure(options).minimum)
            .max()
            .unwrap_or(0);
        Measurement::new(minimum, max_line_width(self))
    }
}

/// Width of the widest line.
pub(crate) fn max_line_width(lines: &Lines) -> usize {
    lines.iter().map(|line| cell_len(line.plain())).max().unwrap_or(0)
}

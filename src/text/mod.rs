//! Styled text: a string plus overlapping style spans.
//!
//! [`Text`] owns one plain buffer and a list of [`Span`]s over character
//! offsets. Later spans layer on top of earlier ones. Wrapping, dividing and
//! splitting redistribute spans so that every resulting line carries exactly
//! the styles its characters had before.

mod lines;
mod span;
pub mod wrap;

pub use lines::Lines;
pub use span::Span;

use std::collections::HashMap;
use std::fmt;

use crate::cells::{cell_len, set_cell_size};
use crate::markup::MarkupError;
use crate::render::{Measurement, RenderOptions, Renderable, Segments};
use crate::segment::Segment;
use crate::style::Style;

/// Horizontal alignment of wrapped lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JustifyMethod {
    /// Leave lines as wrapped.
    #[default]
    Default,
    Left,
    Center,
    Right,
    /// Stretch gaps between words so lines fill the width.
    Full,
}

/// What to do with a word that does not fit on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OverflowMethod {
    /// Break the word across lines.
    #[default]
    Fold,
    /// Cut the word at the line end.
    Crop,
    /// Cut the word and end the line with `…`.
    Ellipsis,
    /// Never wrap or cut.
    Ignore,
}

const ELLIPSIS: char = '…';
const DEFAULT_TAB_SIZE: usize = 8;

/// A string with style spans and layout hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    plain: String,
    length: usize,
    spans: Vec<Span>,
    /// Base style under every span.
    pub style: Style,
    pub justify: Option<JustifyMethod>,
    pub overflow: Option<OverflowMethod>,
    pub no_wrap: Option<bool>,
    /// Appended after the last line when rendered.
    pub end: String,
    pub tab_size: Option<usize>,
}

impl Default for Text {
    fn default() -> Self {
        Self::new("")
    }
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self::styled(text, Style::null())
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        let plain = text.into();
        Self {
            length: plain.chars().count(),
            plain,
            spans: Vec::new(),
            style,
            justify: None,
            overflow: None,
            no_wrap: None,
            end: "\n".to_string(),
            tab_size: None,
        }
    }

    /// Build text from console markup such as `"[bold]Hello[/bold]"`.
    pub fn from_markup(markup: &str) -> Result<Self, MarkupError> {
        crate::markup::parse_markup(markup)
    }

    /// Build text from segments, keeping each segment's style as a span.
    ///
    /// Control segments are skipped.
    pub fn from_segments<'a>(segments: impl IntoIterator<Item = &'a Segment>) -> Self {
        let mut text = Text::new("");
        for segment in segments {
            if !segment.is_control {
                text.append(&segment.text, segment.style.clone());
            }
        }
        text
    }

    pub fn with_justify(mut self, justify: JustifyMethod) -> Self {
        self.justify = Some(justify);
        self
    }

    pub fn with_overflow(mut self, overflow: OverflowMethod) -> Self {
        self.overflow = Some(overflow);
        self
    }

    pub fn with_no_wrap(mut self, no_wrap: bool) -> Self {
        self.no_wrap = Some(no_wrap);
        self
    }

    pub fn with_end(mut self, end: impl Into<String>) -> Self {
        self.end = end.into();
        self
    }

    pub fn with_tab_size(mut self, tab_size: usize) -> Self {
        self.tab_size = Some(tab_size);
        self
    }

    pub fn plain(&self) -> &str {
        &self.plain
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Width in terminal cells.
    pub fn cell_len(&self) -> usize {
        cell_len(&self.plain)
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Replace the plain text, cropping spans that run past the new end.
    pub fn set_plain(&mut self, plain: impl Into<String>) {
        let plain = plain.into();
        if plain != self.plain {
            self.length = plain.chars().count();
            self.plain = plain;
            self.trim_spans();
        }
    }

    /// A copy with the same style and hints but different text and no spans.
    pub fn blank_copy(&self, plain: &str) -> Text {
        Text {
            plain: plain.to_string(),
            length: plain.chars().count(),
            spans: Vec::new(),
            style: self.style.clone(),
            justify: self.justify,
            overflow: self.overflow,
            no_wrap: self.no_wrap,
            end: self.end.clone(),
            tab_size: self.tab_size,
        }
    }

    /// Apply `style` to characters `start..end`.
    ///
    /// The range is clamped to the text; an empty range is ignored.
    pub fn stylize(&mut self, style: Style, start: usize, end: usize) {
        let end = end.min(self.length);
        if start >= end {
            return;
        }
        self.spans.push(Span::new(start, end, style));
    }

    /// Apply `style` to the whole text.
    pub fn stylize_all(&mut self, style: Style) {
        self.stylize(style, 0, self.length);
    }

    /// Append a string with an optional style.
    pub fn append(&mut self, text: &str, style: Option<Style>) {
        if text.is_empty() {
            return;
        }
        let offset = self.length;
        let length = text.chars().count();
        self.plain.push_str(text);
        self.length += length;
        if let Some(style) = style.filter(|s| !s.is_null()) {
            self.spans.push(Span::new(offset, offset + length, style));
        }
    }

    /// Append another text, keeping its base style and spans.
    pub fn append_text(&mut self, text: &Text) {
        let offset = self.length;
        self.plain.push_str(&text.plain);
        self.length += text.length;
        if !text.style.is_null() && text.length > 0 {
            self.spans
                .push(Span::new(offset, offset + text.length, text.style.clone()));
        }
        self.spans
            .extend(text.spans.iter().map(|span| span.move_right(offset)));
    }

    /// Join `lines` with this text as the separator.
    pub fn join<'a>(&self, lines: impl IntoIterator<Item = &'a Text>) -> Text {
        let mut joined = self.blank_copy("");
        let mut first = true;
        for line in lines {
            if !first && !self.plain.is_empty() {
                joined.append_text(self);
            }
            joined.append_text(line);
            first = false;
        }
        joined
    }

    /// Split at every occurrence of `separator`.
    ///
    /// # Arguments
    /// * `separator` - The string to split on
    /// * `include_separator` - Keep the separator at the end of each line
    /// * `allow_blank` - Keep the empty line after a trailing separator
    pub fn split(&self, separator: &str, include_separator: bool, allow_blank: bool) -> Lines {
        if separator.is_empty() || !self.plain.contains(separator) {
            return Lines::from(vec![self.clone()]);
        }

        let separator_length = separator.chars().count();
        let mut matches = Vec::new();
        let mut last_byte = 0;
        let mut last_char = 0;
        for (byte, _) in self.plain.match_indices(separator) {
            last_char += self.plain[last_byte..byte].chars().count();
            last_byte = byte;
            matches.push((last_char, last_char + separator_length));
        }

        let mut lines = if include_separator {
            self.divide(matches.iter().map(|&(_, end)| end))
        } else {
            self.divide(matches.iter().flat_map(|&(start, end)| [start, end]))
                .into_iter()
                .filter(|line| line.plain != separator)
                .collect()
        };

        if !allow_blank && self.plain.ends_with(separator) {
            lines.pop();
        }
        lines
    }

    /// Cut the text at character offsets, without wrapping.
    ///
    /// Offsets are sorted and clamped to the text length. A span crossing a
    /// cut is split in two, each half rebased to its own line, so joining the
    /// lines back restores both text and styles exactly.
    pub fn divide(&self, offsets: impl IntoIterator<Item = usize>) -> Lines {
        let mut bounds: Vec<usize> = offsets
            .into_iter()
            .map(|offset| offset.min(self.length))
            .collect();
        if bounds.is_empty() {
            return Lines::from(vec![self.clone()]);
        }
        bounds.sort_unstable();
        bounds.insert(0, 0);
        bounds.push(self.length);

        let byte_at = char_byte_offsets(&self.plain);
        let ranges: Vec<(usize, usize)> = bounds.windows(2).map(|w| (w[0], w[1])).collect();
        let mut lines: Vec<Text> = ranges
            .iter()
            .map(|&(start, end)| self.blank_copy(&self.plain[byte_at[start]..byte_at[end]]))
            .collect();

        for span in &self.spans {
            if span.is_empty() || span.start >= self.length {
                continue;
            }
            // first line whose end lies beyond the span start
            let mut index = ranges.partition_point(|&(_, end)| end <= span.start);
            let mut remaining = span.clone();
            while index < ranges.len() {
                let (line_start, line_end) = ranges[index];
                let (head, tail) = remaining.split(line_end);
                if !head.is_empty() {
                    lines[index].spans.push(head.move_left(line_start));
                }
                match tail {
                    Some(tail) => remaining = tail,
                    None => break,
                }
                index += 1;
            }
        }
        Lines::from(lines)
    }

    /// Remove `amount` characters from the end.
    pub fn right_crop(&mut self, amount: usize) {
        if amount == 0 {
            return;
        }
        let new_length = self.length.saturating_sub(amount);
        let byte_at = char_byte_offsets(&self.plain);
        self.plain.truncate(byte_at[new_length]);
        self.length = new_length;
        self.trim_spans();
    }

    /// Remove trailing whitespace.
    pub fn rstrip(&mut self) {
        let trimmed = self.plain.trim_end().to_string();
        self.set_plain(trimmed);
    }

    /// Remove trailing whitespace that extends past `size` cells.
    pub fn rstrip_end(&mut self, size: usize) {
        let width = self.cell_len();
        if width <= size {
            return;
        }
        let excess = width - size;
        let whitespace = self.plain.chars().rev().take_while(|c| c.is_whitespace()).count();
        if whitespace > 0 {
            self.right_crop(whitespace.min(excess));
        }
    }

    /// Pad or truncate to exactly `new_length` characters.
    pub fn set_length(&mut self, new_length: usize) {
        if self.length < new_length {
            self.pad_right(new_length - self.length, ' ');
        } else {
            self.right_crop(self.length - new_length);
        }
    }

    pub fn pad_left(&mut self, count: usize, character: char) {
        if count == 0 {
            return;
        }
        let padding: String = std::iter::repeat(character).take(count).collect();
        self.plain.insert_str(0, &padding);
        self.length += count;
        self.spans = self.spans.iter().map(|span| span.move_right(count)).collect();
    }

    pub fn pad_right(&mut self, count: usize, character: char) {
        if count == 0 {
            return;
        }
        self.plain.extend(std::iter::repeat(character).take(count));
        self.length += count;
    }

    /// Pad both sides with `count` characters.
    pub fn pad(&mut self, count: usize, character: char) {
        self.pad_left(count, character);
        self.pad_right(count, character);
    }

    /// Append spaces, growing spans that reach the end to cover them.
    pub fn extend_style(&mut self, spaces: usize) {
        if spaces == 0 {
            return;
        }
        let end = self.length;
        for span in &mut self.spans {
            if span.end >= end {
                *span = span.extend(spaces);
            }
        }
        self.pad_right(spaces, ' ');
    }

    /// Replace tabs with spaces up to the next tab stop.
    ///
    /// Tab stops are measured in cells from the start of the text.
    pub fn expand_tabs(&mut self, tab_size: Option<usize>) {
        if !self.plain.contains('\t') {
            return;
        }
        let tab_size = tab_size.or(self.tab_size).unwrap_or(DEFAULT_TAB_SIZE).max(1);
        let mut expanded = self.blank_copy("");
        let mut cell_position = 0;
        for mut part in self.split("\t", true, true) {
            if part.plain.ends_with('\t') {
                part.plain.pop();
                part.plain.push(' ');
                cell_position += part.cell_len();
                let remainder = cell_position % tab_size;
                if remainder > 0 {
                    let spaces = tab_size - remainder;
                    part.extend_style(spaces);
                    cell_position += spaces;
                }
            } else {
                cell_position += part.cell_len();
            }
            expanded.spans.extend(part.spans.iter().map(|s| s.move_right(expanded.length)));
            expanded.plain.push_str(&part.plain);
            expanded.length += part.length;
        }
        self.plain = expanded.plain;
        self.length = expanded.length;
        self.spans = expanded.spans;
    }

    /// Fit the text into `max_width` cells according to `overflow`.
    ///
    /// With `pad`, shorter text is padded with spaces to `max_width`.
    pub fn truncate(&mut self, max_width: usize, overflow: Option<OverflowMethod>, pad: bool) {
        let overflow = overflow.or(self.overflow).unwrap_or_default();
        if overflow != OverflowMethod::Ignore {
            let width = self.cell_len();
            if width > max_width {
                let cropped = if overflow == OverflowMethod::Ellipsis && max_width > 0 {
                    let mut cropped = set_cell_size(&self.plain, max_width - 1);
                    cropped.push(ELLIPSIS);
                    cropped
                } else {
                    set_cell_size(&self.plain, max_width)
                };
                self.set_plain(cropped);
            }
        }
        let width = self.cell_len();
        if pad && width < max_width {
            self.pad_right(max_width - width, ' ');
        }
    }

    /// The resolved style of the character at `offset`.
    pub fn get_style_at_offset(&self, offset: usize) -> Style {
        self.spans
            .iter()
            .filter(|span| span.start <= offset && offset < span.end)
            .fold(self.style.clone(), |style, span| style.combine(&span.style))
    }

    /// Style every occurrence of each word, returning the number of matches.
    ///
    /// Without `case_sensitive`, ASCII letters match regardless of case.
    pub fn highlight_words(&mut self, words: &[&str], style: &Style, case_sensitive: bool) -> usize {
        let haystack = if case_sensitive {
            self.plain.clone()
        } else {
            self.plain.to_ascii_lowercase()
        };
        let mut found = Vec::new();
        for word in words.iter().filter(|w| !w.is_empty()) {
            let needle = if case_sensitive {
                word.to_string()
            } else {
                word.to_ascii_lowercase()
            };
            let word_length = needle.chars().count();
            for (byte, _) in haystack.match_indices(&needle) {
                let start = haystack[..byte].chars().count();
                found.push((start, start + word_length));
            }
        }
        for &(start, end) in &found {
            self.stylize(style.clone(), start, end);
        }
        found.len()
    }

    /// Word-wrap into lines of at most `width` cells.
    ///
    /// Explicit newlines always break. Each logical line is divided at word
    /// boundaries, trailing whitespace past the width is dropped, the lines
    /// are justified and finally cut to the width by the overflow method.
    pub fn wrap(
        &self,
        width: usize,
        justify: Option<JustifyMethod>,
        overflow: Option<OverflowMethod>,
        tab_size: usize,
        no_wrap: Option<bool>,
    ) -> Lines {
        let justify = justify.or(self.justify).unwrap_or_default();
        let overflow = overflow.or(self.overflow).unwrap_or_default();
        let no_wrap =
            no_wrap.or(self.no_wrap).unwrap_or(false) || overflow == OverflowMethod::Ignore;

        let mut lines = Lines::new();
        for mut line in self.split("\n", false, true) {
            if line.plain.contains('\t') {
                line.expand_tabs(Some(tab_size));
            }
            let mut new_lines = if no_wrap {
                Lines::from(vec![line])
            } else {
                let offsets = wrap::divide_line(&line.plain, width, overflow == OverflowMethod::Fold);
                line.divide(offsets)
            };
            for new_line in new_lines.iter_mut() {
                new_line.rstrip_end(width);
            }
            new_lines.justify(width, justify, overflow);
            for new_line in new_lines.iter_mut() {
                new_line.truncate(width, Some(overflow), false);
            }
            lines.extend(new_lines);
        }
        lines
    }

    /// Resolve spans into segments, one per run of identical style.
    ///
    /// `end` is emitted as a final unstyled segment when non-empty.
    pub fn to_segments(&self, end: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        if self.spans.is_empty() {
            if !self.plain.is_empty() {
                segments.push(Segment::with_style(self.plain.clone(), non_null(&self.style)));
            }
        } else {
            let mut events: Vec<(usize, bool, usize)> = Vec::with_capacity(self.spans.len() * 2 + 2);
            events.push((0, false, 0));
            for (index, span) in self.spans.iter().enumerate() {
                events.push((span.start, false, index + 1));
                events.push((span.end, true, index + 1));
            }
            events.push((self.length, true, 0));
            events.sort_by_key(|&(offset, leaving, _)| (offset, leaving));

            let style_of = |id: usize| {
                if id == 0 {
                    &self.style
                } else {
                    &self.spans[id - 1].style
                }
            };
            let byte_at = char_byte_offsets(&self.plain);
            let mut stack: Vec<usize> = Vec::new();
            let mut cache: HashMap<Vec<usize>, Style> = HashMap::new();

            for pair in events.windows(2) {
                let (offset, leaving, id) = pair[0];
                let next_offset = pair[1].0;
                if leaving {
                    if let Some(position) = stack.iter().position(|&s| s == id) {
                        stack.remove(position);
                    }
                } else {
                    stack.push(id);
                }
                if next_offset > offset {
                    let mut ids = stack.clone();
                    ids.sort_unstable();
                    let style = cache
                        .entry(ids)
                        .or_insert_with_key(|ids| Style::combine_all(ids.iter().map(|&id| style_of(id))))
                        .clone();
                    let start = byte_at[offset.min(self.length)];
                    let stop = byte_at[next_offset.min(self.length)];
                    segments.push(Segment::with_style(&self.plain[start..stop], non_null(&style)));
                }
            }
        }
        if !end.is_empty() {
            segments.push(Segment::new(end));
        }
        segments
    }

    fn trim_spans(&mut self) {
        let length = self.length;
        self.spans = self
            .spans
            .iter()
            .filter(|span| span.start < length)
            .map(|span| span.right_crop(length))
            .collect();
    }
}

fn non_null(style: &Style) -> Option<Style> {
    if style.is_null() {
        None
    } else {
        Some(style.clone())
    }
}

/// Byte offset of every character, plus the total length at the end.
fn char_byte_offsets(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(index, _)| index)
        .chain(std::iter::once(text.len()))
        .collect()
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain)
    }
}

impl From<&str> for Text {
    fn from(text: &str) -> Self {
        Text::new(text)
    }
}

impl From<String> for Text {
    fn from(text: String) -> Self {
        Text::new(text)
    }
}

impl Renderable for Text {
    fn render<'a>(&'a self, options: &RenderOptions) -> Segments<'a> {
        let justify = self.justify.or(options.justify);
        let overflow = self.overflow.or(options.overflow);
        let no_wrap = self.no_wrap.or(options.no_wrap);
        let tab_size = self.tab_size.unwrap_or(options.tab_size);
        let lines = self.wrap(options.max_width, justify, overflow, tab_size, no_wrap);
        let joined = Text::new("\n").join(lines.iter());
        Box::new(joined.to_segments(&self.end).into_iter())
    }

    fn measure(&self, _options: &RenderOptions) -> Measurement {
        let max_width = self.plain.lines().map(cell_len).max().unwrap_or(0);
        let min_width = self
            .plain
            .split_whitespace()
            .map(cell_len)
            .max()
            .unwrap_or(max_width);
        Measurement::new(min_width, max_width)
    }
}

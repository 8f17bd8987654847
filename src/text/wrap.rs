//! Word-wrap break positions.
//!
//! A line is scanned as a sequence of chunks, each a word with its
//! surrounding whitespace. Breaks go before the first chunk that would
//! overflow the width. Trailing whitespace on a chunk does not count against
//! the width, so a line may overrun by its final spaces; callers crop those.

use crate::cells::{cell_len, chop_cells};

/// A word and the whitespace around it, in character offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
}

/// Split a line into chunks of `\s*\S+\s*`.
///
/// Whitespace after the last word is part of the last chunk; a line of only
/// whitespace has no chunks.
pub fn chunks(text: &str) -> Vec<Chunk<'_>> {
    let mut chunks = Vec::new();
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut pos = 0;

    while pos < chars.len() {
        let start = pos;
        while pos < chars.len() && chars[pos].1.is_whitespace() {
            pos += 1;
        }
        let word_start = pos;
        while pos < chars.len() && !chars[pos].1.is_whitespace() {
            pos += 1;
        }
        if pos == word_start {
            break;
        }
        while pos < chars.len() && chars[pos].1.is_whitespace() {
            pos += 1;
        }
        let byte_start = chars[start].0;
        let byte_end = chars.get(pos).map_or(text.len(), |(i, _)| *i);
        chunks.push(Chunk {
            start,
            end: pos,
            text: &text[byte_start..byte_end],
        });
    }
    chunks
}

/// Character offsets at which to break `text` so each line fits `width` cells.
///
/// With `fold`, a word wider than `width` is broken across lines. Without
/// it, the word gets a line of its own and is left for the caller to crop.
pub fn divide_line(text: &str, width: usize, fold: bool) -> Vec<usize> {
    let width = width.max(1);
    let mut breaks = Vec::new();
    let mut cell_offset = 0usize;

    for chunk in chunks(text) {
        let word_width = cell_len(chunk.text);
        let chunk_width = cell_len(chunk.text.trim_end());
        let fits = cell_offset <= width && width - cell_offset >= chunk_width;

        if fits {
            cell_offset += word_width;
        } else if chunk_width > width {
            let mut start = chunk.start;
            if fold {
                let folded = chop_cells(chunk.text, width);
                let last_index = folded.len().saturating_sub(1);
                for (index, line) in folded.iter().enumerate() {
                    if start > 0 {
                        breaks.push(start);
                    }
                    if index == last_index {
                        cell_offset = cell_len(line);
                    } else {
                        start += line.chars().count();
                    }
                }
            } else {
                if start > 0 {
                    breaks.push(start);
                }
                cell_offset = word_width;
            }
        } else if cell_offset > 0 && chunk.start > 0 {
            breaks.push(chunk.start);
            cell_offset = word_width;
        }
    }
    breaks
}

//! Terminal cell-width measurement.
//!
//! Everything that lays out text works in cells, not bytes or chars: narrow
//! glyphs take one cell, East Asian wide glyphs take two and combining marks
//! take none. Widths come from `unicode-width`.

use unicode_width::UnicodeWidthChar;

use crate::cache::SharedCache;

/// Strings up to this many bytes have their width memoized.
const CACHED_LEN_LIMIT: usize = 512;

static CELL_LEN_CACHE: SharedCache<String, usize> = SharedCache::new(4096);

/// Number of cells a single character occupies.
///
/// Control characters report zero.
pub fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Check if every character in `text` is exactly one cell wide.
pub fn is_single_cell_widths(text: &str) -> bool {
    text.bytes().all(|b| (0x20..0x7f).contains(&b))
}

/// Number of cells `text` occupies when printed.
pub fn cell_len(text: &str) -> usize {
    if is_single_cell_widths(text) {
        return text.len();
    }
    if text.len() <= CACHED_LEN_LIMIT {
        return CELL_LEN_CACHE.get_or_insert_with(text.to_string(), |t| uncached_cell_len(t));
    }
    uncached_cell_len(text)
}

fn uncached_cell_len(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Crop or pad `text` so it occupies exactly `total` cells.
///
/// A wide glyph that would straddle the boundary is replaced by a space so
/// the result is never one cell short or one cell over.
pub fn set_cell_size(text: &str, total: usize) -> String {
    if is_single_cell_widths(text) {
        let size = text.len();
        if size < total {
            return format!("{}{}", text, " ".repeat(total - size));
        }
        return text[..total].to_string();
    }
    if total == 0 {
        return String::new();
    }

    let size = cell_len(text);
    if size == total {
        return text.to_string();
    }
    if size < total {
        return format!("{}{}", text, " ".repeat(total - size));
    }

    let mut out = String::with_capacity(text.len());
    let mut width = 0;
    for c in text.chars() {
        let w = char_width(c);
        if width + w > total {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push_str(&" ".repeat(total - width));
    out
}

/// Break `text` into lines of at most `width` cells.
///
/// A width of zero is treated as one. A glyph wider than `width` gets a line
/// of its own.
pub fn chop_cells(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines: Vec<String> = vec![String::new()];
    let mut line_width = 0;

    for c in text.chars() {
        let w = char_width(c);
        let current_empty = lines.last().map_or(true, |l| l.is_empty());
        if line_width + w > width && !current_empty {
            lines.push(c.to_string());
            line_width = w;
        } else if let Some(line) = lines.last_mut() {
            line.push(c);
            line_width += w;
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_width_classifies_glyphs() {
        let cases = [('a', 1), ('💩', 2), ('中', 2), ('\u{0301}', 0)];
        for (c, expected) in cases {
            assert_eq!(char_width(c), expected, "Failed for {:?}", c);
        }
    }

    #[test]
    fn cell_len_counts_wide_glyphs_twice() {
        assert_eq!(cell_len(""), 0);
        assert_eq!(cell_len("abc"), 3);
        assert_eq!(cell_len("💩"), 2);
        assert_eq!(cell_len("わさび"), 6);
        assert_eq!(cell_len("e\u{0301}"), 1);
    }

    #[test]
    fn cell_len_handles_long_strings_without_cache() {
        let long = "中".repeat(CACHED_LEN_LIMIT);
        assert_eq!(cell_len(&long), CACHED_LEN_LIMIT * 2);
    }

    #[test]
    fn set_cell_size_pads_and_crops_ascii() {
        assert_eq!(set_cell_size("foo", 5), "foo  ");
        assert_eq!(set_cell_size("foobar", 3), "foo");
        assert_eq!(set_cell_size("foo", 3), "foo");
        assert_eq!(set_cell_size("foo", 0), "");
    }

    #[test]
    fn set_cell_size_never_splits_wide_glyph() {
        assert_eq!(set_cell_size("😽😽", 4), "😽😽");
        assert_eq!(set_cell_size("😽😽", 3), "😽 ");
        assert_eq!(set_cell_size("😽😽", 2), "😽");
        assert_eq!(set_cell_size("😽😽", 1), " ");
        assert_eq!(set_cell_size("😽😽", 0), "");
        assert_eq!(set_cell_size("😽😽", 6), "😽😽  ");
    }

    #[test]
    fn set_cell_size_result_is_exact_width() {
        for total in 0..10 {
            assert_eq!(cell_len(&set_cell_size("a中b文c", total)), total);
        }
    }

    #[test]
    fn chop_cells_splits_on_width() {
        assert_eq!(chop_cells("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(chop_cells("ああaaa", 3), vec!["あ", "あa", "aa"]);
        assert_eq!(chop_cells("", 3), vec![""]);
    }

    #[test]
    fn chop_cells_zero_width_treated_as_one() {
        assert_eq!(chop_cells("ab", 0), vec!["a", "b"]);
    }

    #[test]
    fn chop_cells_wide_glyph_wider_than_line() {
        assert_eq!(chop_cells("中a", 1), vec!["中", "a"]);
    }
}

//! Line and shape operations over segment streams.
//!
//! A line is a `Vec<Segment>` without embedded newlines. All widths are in
//! terminal cells.

use super::Segment;
use crate::cells::set_cell_size;
use crate::style::Style;

/// Layer styles onto every non-control segment.
///
/// `style` goes underneath each segment's own style, `post_style` on top.
pub fn apply_style<'a, I>(
    segments: I,
    style: Option<&'a Style>,
    post_style: Option<&'a Style>,
) -> impl Iterator<Item = Segment> + 'a
where
    I: IntoIterator<Item = Segment>,
    I::IntoIter: 'a,
{
    segments.into_iter().map(move |mut segment| {
        if segment.is_control {
            return segment;
        }
        if let Some(base) = style {
            segment.style = Some(match &segment.style {
                Some(own) => base.combine(own),
                None => base.clone(),
            });
        }
        if let Some(post) = post_style {
            segment.style = Some(match &segment.style {
                Some(own) => own.combine(post),
                None => post.clone(),
            });
        }
        segment
    })
}

/// Split a segment stream into lines at every `\n`.
///
/// Newlines inside a segment's text are boundaries, never literal. A trailing
/// line is only produced when it has content.
pub fn split_lines(segments: impl IntoIterator<Item = Segment>) -> Vec<Vec<Segment>> {
    let mut lines = Vec::new();
    let mut line: Vec<Segment> = Vec::new();
    for segment in segments {
        if segment.is_control || !segment.text.contains('\n') {
            line.push(segment);
            continue;
        }
        let mut parts = segment.text.split('\n').peekable();
        while let Some(part) = parts.next() {
            if !part.is_empty() {
                line.push(Segment::with_style(part, segment.style.clone()));
            }
            if parts.peek().is_some() {
                lines.push(std::mem::take(&mut line));
            }
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Split into lines and crop or pad each one to `width`.
///
/// # Arguments
/// * `segments` - The stream to split
/// * `width` - Target cell width of each line
/// * `style` - Style for any padding
/// * `pad` - Pad short lines to `width`
/// * `include_new_lines` - Terminate each line except the last with a newline segment
pub fn split_and_crop_lines(
    segments: impl IntoIterator<Item = Segment>,
    width: usize,
    style: Option<&Style>,
    pad: bool,
    include_new_lines: bool,
) -> Vec<Vec<Segment>> {
    let mut lines = Vec::new();
    let mut line: Vec<Segment> = Vec::new();
    for segment in segments {
        if segment.is_control || !segment.text.contains('\n') {
            line.push(segment);
            continue;
        }
        let mut parts = segment.text.split('\n').peekable();
        while let Some(part) = parts.next() {
            if !part.is_empty() {
                line.push(Segment::with_style(part, segment.style.clone()));
            }
            if parts.peek().is_some() {
                let mut cropped = adjust_line_length(&line, width, style, pad);
                if include_new_lines {
                    cropped.push(Segment::line());
                }
                lines.push(cropped);
                line.clear();
            }
        }
    }
    if !line.is_empty() {
        lines.push(adjust_line_length(&line, width, style, pad));
    }
    lines
}

/// Crop or pad a line to exactly `width` cells.
///
/// Cropping never cuts a wide glyph in half. Control segments are always
/// kept while cropping. Without `pad`, short lines are left short.
pub fn adjust_line_length(
    line: &[Segment],
    width: usize,
    style: Option<&Style>,
    pad: bool,
) -> Vec<Segment> {
    let line_length = get_line_length(line);
    if line_length < width {
        let mut new_line = line.to_vec();
        if pad {
            new_line.push(Segment::with_style(
                " ".repeat(width - line_length),
                style.cloned(),
            ));
        }
        return new_line;
    }
    if line_length == width {
        return line.to_vec();
    }

    let mut new_line = Vec::with_capacity(line.len());
    let mut length = 0;
    for segment in line {
        let segment_length = segment.cell_length();
        if length + segment_length < width || segment.is_control {
            new_line.push(segment.clone());
            length += segment_length;
        } else {
            new_line.push(Segment::with_style(
                set_cell_size(&segment.text, width - length),
                segment.style.clone(),
            ));
            break;
        }
    }
    new_line
}

/// Cell width of a line.
pub fn get_line_length(line: &[Segment]) -> usize {
    line.iter().map(Segment::cell_length).sum()
}

/// The enclosing rectangle `(width, height)` of a block of lines.
///
/// An empty block is `(0, 0)`.
pub fn get_shape(lines: &[Vec<Segment>]) -> (usize, usize) {
    let width = lines
        .iter()
        .map(|line| get_line_length(line))
        .max()
        .unwrap_or(0);
    (width, lines.len())
}

/// Normalize a block of lines to exactly `width` x `height`.
///
/// Long lines are cropped, short lines padded, extra lines dropped and
/// missing lines filled with blanks in `style`. A `height` of `None` keeps
/// the current line count.
pub fn set_shape(
    lines: &[Vec<Segment>],
    width: usize,
    height: Option<usize>,
    style: Option<&Style>,
) -> Vec<Vec<Segment>> {
    let height = height.unwrap_or(lines.len());
    let mut shaped: Vec<Vec<Segment>> = lines
        .iter()
        .take(height)
        .map(|line| adjust_line_length(line, width, style, true))
        .collect();
    let blank = vec![Segment::with_style(" ".repeat(width), style.cloned())];
    shaped.resize(height, blank);
    shaped
}

/// Merge adjacent segments with identical styles.
pub fn simplify(segments: impl IntoIterator<Item = Segment>) -> Vec<Segment> {
    let mut simplified: Vec<Segment> = Vec::new();
    for segment in segments {
        match simplified.last_mut() {
            Some(last)
                if !last.is_control && !segment.is_control && last.style == segment.style =>
            {
                last.text.push_str(&segment.text);
            }
            _ => simplified.push(segment),
        }
    }
    simplified
}

/// Drop styles, keeping text and control segments.
pub fn strip_styles(segments: impl IntoIterator<Item = Segment>) -> impl Iterator<Item = Segment> {
    segments.into_iter().map(|mut segment| {
        segment.style = None;
        segment
    })
}

/// Drop hyperlinks from styles.
pub fn strip_links(segments: impl IntoIterator<Item = Segment>) -> impl Iterator<Item = Segment> {
    segments.into_iter().map(|mut segment| {
        if let Some(style) = &segment.style {
            if style.get_link().is_some() {
                segment.style = Some(style.without_link());
            }
        }
        segment
    })
}

/// Drop foreground and background colors, keeping attributes.
pub fn remove_color(segments: impl IntoIterator<Item = Segment>) -> impl Iterator<Item = Segment> {
    segments.into_iter().map(|mut segment| {
        if let Some(style) = &segment.style {
            segment.style = Some(style.without_color());
        }
        segment
    })
}

/// Keep only segments whose control flag differs from `is_control`.
///
/// `filter_control(segments, true)` removes every control segment.
pub fn filter_control(
    segments: impl IntoIterator<Item = Segment>,
    is_control: bool,
) -> impl Iterator<Item = Segment> {
    segments
        .into_iter()
        .filter(move |segment| segment.is_control != is_control)
}

/// Divide a line into pieces at ascending cell offsets.
///
/// Piece `n` covers the cells between cut `n - 1` (or 0) and cut `n`.
/// Content beyond the last cut is dropped. Wide glyphs on a cut are split
/// with [`Segment::split_at_cell`].
pub fn divide(segments: &[Segment], cuts: &[usize]) -> Vec<Vec<Segment>> {
    let mut pieces = Vec::with_capacity(cuts.len());
    let mut remaining = segments.iter().cloned();
    let mut pending = remaining.next();
    let mut pos = 0;

    for &cut in cuts {
        let mut piece = Vec::new();
        while pos < cut {
            let Some(segment) = pending.take() else {
                break;
            };
            let length = segment.cell_length();
            if pos + length <= cut {
                pos += length;
                piece.push(segment);
                pending = remaining.next();
            } else {
                let (before, after) = segment.split_at_cell(cut - pos);
                piece.push(before);
                pos = cut;
                pending = Some(after);
            }
        }
        pieces.push(piece);
        if pending.is_none() {
            break;
        }
    }
    pieces
}

//! Containers that arrange or decorate other renderables.

use super::{measure_renderables, Measurement, RenderOptions, Renderable, Segments};
use crate::segment::{self, Segment};
use crate::style::Style;

/// Renderables stacked vertically.
#[derive(Default)]
pub struct Group {
    renderables: Vec<Box<dyn Renderable>>,
}

impl Group {
    pub fn new(renderables: Vec<Box<dyn Renderable>>) -> Self {
        Self { renderables }
    }

    pub fn push(&mut self, renderable: impl Renderable + 'static) {
        self.renderables.push(Box::new(renderable));
    }

    pub fn len(&self) -> usize {
        self.renderables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderables.is_empty()
    }
}

impl Renderable for Group {
    fn render<'a>(&'a self, options: &RenderOptions) -> Segments<'a> {
        let options = options.clone();
        Box::new(
            self.renderables
                .iter()
                .flat_map(move |renderable| renderable.render(&options)),
        )
    }

    fn measure(&self, options: &RenderOptions) -> Measurement {
        measure_renderables(
            self.renderables.iter().map(|r| r.as_ref() as &dyn Renderable),
            options,
        )
    }
}

/// Caps the width offered to a renderable.
pub struct Constrain {
    renderable: Box<dyn Renderable>,
    width: Option<usize>,
}

impl Constrain {
    pub fn new(renderable: impl Renderable + 'static, width: Option<usize>) -> Self {
        Self {
            renderable: Box::new(renderable),
            width,
        }
    }
}

impl Renderable for Constrain {
    fn render<'a>(&'a self, options: &RenderOptions) -> Segments<'a> {
        match self.width {
            Some(width) => self
                .renderable
                .render(&options.update_width(width.min(options.max_width))),
            None => self.renderable.render(options),
        }
    }

    fn measure(&self, options: &RenderOptions) -> Measurement {
        match self.width {
            Some(width) => {
                Measurement::get(self.renderable.as_ref(), &options.update_width(width))
                    .with_maximum(width)
            }
            None => Measurement::get(self.renderable.as_ref(), options),
        }
    }
}

/// Space around a renderable, as (top, right, bottom, left) cells.
pub struct Padding {
    renderable: Box<dyn Renderable>,
    style: Option<Style>,
    top: usize,
    right: usize,
    bottom: usize,
    left: usize,
    /// Fill the available width rather than fitting the content.
    expand: bool,
}

impl Padding {
    pub fn new(renderable: impl Renderable + 'static, pad: (usize, usize, usize, usize)) -> Self {
        let (top, right, bottom, left) = pad;
        Self {
            renderable: Box::new(renderable),
            style: None,
            top,
            right,
            bottom,
            left,
            expand: true,
        }
    }

    /// Indent by `level` cells on the left only.
    pub fn indent(renderable: impl Renderable + 'static, level: usize) -> Self {
        Self::new(renderable, (0, 0, 0, level)).with_expand(false)
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }
}

impl Renderable for Padding {
    fn render<'a>(&'a self, options: &RenderOptions) -> Segments<'a> {
        let width = if self.expand {
            options.max_width
        } else {
            let content = Measurement::get(self.renderable.as_ref(), options).maximum;
            (content + self.left + self.right).min(options.max_width)
        };
        // Pads shrink before the content loses its last cell.
        let left = self.left.min(width.saturating_sub(1));
        let right = self.right.min(width.saturating_sub(1 + left));
        let mut child_options = options.update_width(width.saturating_sub(left + right).max(1));
        if let Some(height) = options.height {
            child_options = child_options.update_height(height.saturating_sub(self.top + self.bottom));
        }
        let style = self.style.as_ref();
        let lines = segment::split_and_crop_lines(
            self.renderable.render(&child_options),
            child_options.max_width,
            style,
            true,
            false,
        );

        let blank = |count: usize| Segment::with_style(" ".repeat(count), self.style.clone());
        let mut segments = Vec::new();
        for _ in 0..self.top {
            segments.push(blank(width));
            segments.push(Segment::line());
        }
        for line in lines {
            let mut row = Vec::with_capacity(line.len() + 2);
            if left > 0 {
                row.push(blank(left));
            }
            row.extend(line);
            if right > 0 {
                row.push(blank(right));
            }
            segments.extend(segment::adjust_line_length(&row, width, style, false));
            segments.push(Segment::line());
        }
        for _ in 0..self.bottom {
            segments.push(blank(width));
            segments.push(Segment::line());
        }
        Box::new(segments.into_iter())
    }

    fn measure(&self, options: &RenderOptions) -> Measurement {
        let max_width = options.max_width;
        let extra = self.left + self.right;
        if max_width <= extra {
            return Measurement::new(max_width, max_width);
        }
        let child = Measurement::get(self.renderable.as_ref(), &options.update_width(max_width - extra));
        Measurement::new(child.minimum + extra, child.maximum + extra).with_maximum(max_width)
    }
}

/// Applies a style underneath a renderable's own styles.
pub struct Styled {
    renderable: Box<dyn Renderable>,
    style: Style,
}

impl Styled {
    pub fn new(renderable: impl Renderable + 'static, style: Style) -> Self {
        Self {
            renderable: Box::new(renderable),
            style,
        }
    }
}

impl Renderable for Styled {
    fn render<'a>(&'a self, options: &RenderOptions) -> Segments<'a> {
        Box::new(segment::apply_style(
            self.renderable.render(options),
            Some(&self.style),
            None,
        ))
    }

    fn measure(&self, options: &RenderOptions) -> Measurement {
        self.renderable.measure(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::cell_len;
    use crate::text::Text;

    fn plain(renderable: &dyn Renderable, options: &RenderOptions) -> String {
        renderable.render(options).map(|s| s.text).collect()
    }

    #[test]
    fn group_stacks_children() {
        let mut group = Group::default();
        group.push(Text::new("ab cd"));
        group.push(Text::new("xyz"));
        let options = RenderOptions::new(80);
        assert_eq!(plain(&group, &options), "ab cd\nxyz\n");
        assert_eq!(group.measure(&options), Measurement::new(3, 5));
        assert_eq!(group.len(), 2);
    }

    #[test]
    fn constrain_narrows_width() {
        let constrained = Constrain::new(Text::new("aaa bbb ccc"), Some(4));
        let options = RenderOptions::new(80);
        assert_eq!(plain(&constrained, &options), "aaa \nbbb \nccc\n");
        assert_eq!(constrained.measure(&options), Measurement::new(3, 4));

        let unconstrained = Constrain::new(Text::new("aaa bbb"), None);
        assert_eq!(plain(&unconstrained, &options), "aaa bbb\n");
    }

    #[test]
    fn padding_surrounds_content() {
        let padded = Padding::new(Text::new("hi"), (1, 2, 1, 3)).with_expand(false);
        let options = RenderOptions::new(80);
        assert_eq!(
            plain(&padded, &options),
            "       \n   hi  \n       \n"
        );
        assert_eq!(padded.measure(&options), Measurement::new(7, 7));
    }

    #[test]
    fn padding_expands_to_width() {
        let padded = Padding::new(Text::new("hi"), (0, 1, 0, 1));
        let options = RenderOptions::new(6);
        assert_eq!(plain(&padded, &options), " hi   \n");
    }

    #[test]
    fn padding_wider_than_width_is_clamped() {
        let options = RenderOptions::new(5);
        let fitted = Padding::new(Text::new("hi"), (0, 4, 0, 4)).with_expand(false);
        let expanded = Padding::new(Text::new("hi"), (1, 4, 0, 4));
        for padded in [&fitted, &expanded] {
            let rendered = plain(padded, &options);
            for line in rendered.lines() {
                assert!(cell_len(line) <= 5, "{:?} exceeds width", line);
            }
        }
        assert_eq!(plain(&fitted, &options), "    h\n    i\n");
        assert_eq!(plain(&expanded, &options), "     \n    h\n    i\n");
    }

    #[test]
    fn indent_pads_left_only() {
        let indented = Padding::indent(Text::new("x"), 2);
        assert_eq!(plain(&indented, &RenderOptions::new(80)), "  x\n");
    }

    #[test]
    fn styled_applies_base_style() {
        let bold = Style::parse("bold").unwrap();
        let styled = Styled::new(Text::new("x"), bold.clone());
        let first = styled.render(&RenderOptions::new(80)).next().unwrap();
        assert_eq!(first, Segment::styled("x", bold));
    }
}

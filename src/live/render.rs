//! In-place rendering of one frame region.

use crate::color::Color;
use crate::control::{Control, ControlCode};
use crate::render::{RenderOptions, Renderable};
use crate::segment::{self, Segment};
use crate::style::Style;

/// What to do with a frame taller than the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalOverflow {
    /// Drop lines past the console height.
    Crop,
    /// Drop lines and show `...` on the last visible line.
    #[default]
    Ellipsis,
    /// Keep every line; the region may scroll out of reach.
    Visible,
}

/// Renders a renderable into a region that can be overwritten in place.
///
/// The region remembers its shape. It only ever grows: a frame smaller than
/// the last one is padded with blank cells so stale content is overwritten.
pub struct LiveRender {
    renderable: Box<dyn Renderable>,
    style: Option<Style>,
    vertical_overflow: VerticalOverflow,
    shape: (usize, usize),
}

impl LiveRender {
    pub fn new(renderable: Box<dyn Renderable>) -> Self {
        Self {
            renderable,
            style: None,
            vertical_overflow: VerticalOverflow::default(),
            shape: (0, 0),
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_vertical_overflow(mut self, vertical_overflow: VerticalOverflow) -> Self {
        self.vertical_overflow = vertical_overflow;
        self
    }

    pub fn set_renderable(&mut self, renderable: Box<dyn Renderable>) {
        self.renderable = renderable;
    }

    pub fn set_vertical_overflow(&mut self, vertical_overflow: VerticalOverflow) {
        self.vertical_overflow = vertical_overflow;
    }

    /// The region's current (width, height).
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Forget the region, as if nothing had been drawn.
    pub fn reset_shape(&mut self) {
        self.shape = (0, 0);
    }

    /// Move from the end of the drawn region to its first column and row,
    /// erasing each line on the way.
    ///
    /// Empty when nothing has been drawn yet.
    pub fn position_cursor(&self) -> Control {
        let (_, height) = self.shape;
        if height == 0 {
            return Control::default();
        }
        let mut codes = vec![ControlCode::CarriageReturn, ControlCode::EraseLine];
        for _ in 1..height {
            codes.push(ControlCode::CursorUp(1));
            codes.push(ControlCode::EraseLine);
        }
        Control::new(codes)
    }

    /// Erase the region from the line below it.
    ///
    /// Leaves the cursor where the region started.
    pub fn restore_cursor(&self) -> Control {
        let (_, height) = self.shape;
        if height == 0 {
            return Control::default();
        }
        let mut codes = vec![ControlCode::CarriageReturn];
        for _ in 0..height {
            codes.push(ControlCode::CursorUp(1));
            codes.push(ControlCode::EraseLine);
        }
        Control::new(codes)
    }

    /// Render the next frame, growing the stored shape to cover it.
    ///
    /// Lines are separated by newlines; the cursor is left at the end of the
    /// last line.
    pub fn render_frame(&mut self, options: &RenderOptions) -> Vec<Segment> {
        let style = self.style.as_ref();
        let mut lines = segment::split_and_crop_lines(
            self.renderable.render(options),
            options.max_width,
            style,
            false,
            false,
        );

        let max_height = options.size.1;
        if lines.len() > max_height {
            match self.vertical_overflow {
                VerticalOverflow::Crop => lines.truncate(max_height),
                VerticalOverflow::Ellipsis => {
                    lines.truncate(max_height.saturating_sub(1));
                    lines.push(ellipsis_line(options.max_width));
                }
                VerticalOverflow::Visible => {}
            }
        }

        let (new_width, new_height) = segment::get_shape(&lines);
        let (old_width, old_height) = self.shape;
        self.shape = (
            new_width.max(old_width.min(options.max_width)),
            new_height.max(old_height),
        );
        tracing::trace!(width = self.shape.0, height = self.shape.1, "live frame shape");

        let (width, height) = self.shape;
        let lines = segment::set_shape(&lines, width, Some(height), style);
        let mut segments = Vec::new();
        for (index, line) in lines.into_iter().enumerate() {
            if index > 0 {
                segments.push(Segment::line());
            }
            segments.extend(line);
        }
        segments
    }
}

fn ellipsis_line(width: usize) -> Vec<Segment> {
    let style = Style::null().bold(true).fg(Color::from_ansi(1));
    let padding = width.saturating_sub(3) / 2;
    let mut line = Vec::new();
    if padding > 0 {
        line.push(Segment::new(" ".repeat(padding)));
    }
    line.push(Segment::styled("...", style));
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Text;

    fn frame_lines(live: &mut LiveRender, options: &RenderOptions) -> Vec<String> {
        let text: String = live.render_frame(options).into_iter().map(|s| s.text).collect();
        text.split('\n').map(str::to_string).collect()
    }

    #[test]
    fn nothing_drawn_needs_no_repositioning() {
        let live = LiveRender::new(Box::new(Text::new("x")));
        assert!(live.position_cursor().is_empty());
        assert!(live.restore_cursor().is_empty());
        assert_eq!(live.shape(), (0, 0));
    }

    #[test]
    fn shrinking_frame_leaves_no_residue() {
        let options = RenderOptions::new(20);
        let mut live = LiveRender::new(Box::new(Text::new("one\ntwo\nthree")));
        assert_eq!(frame_lines(&mut live, &options), vec!["one  ", "two  ", "three"]);
        assert_eq!(live.shape(), (5, 3));

        live.set_renderable(Box::new(Text::new("x")));
        assert_eq!(frame_lines(&mut live, &options), vec!["x    ", "     ", "     "]);
        assert_eq!(live.shape(), (5, 3));
    }

    #[test]
    fn width_shrinks_with_console() {
        let mut live = LiveRender::new(Box::new(Text::new("abcdef")));
        frame_lines(&mut live, &RenderOptions::new(20));
        live.set_renderable(Box::new(Text::new("ab")));
        assert_eq!(frame_lines(&mut live, &RenderOptions::new(4)), vec!["ab  "]);
    }

    #[test]
    fn position_cursor_erases_each_line() {
        let mut live = LiveRender::new(Box::new(Text::new("a\nb\nc")));
        live.render_frame(&RenderOptions::new(10));
        assert_eq!(
            live.position_cursor().as_str(),
            "\r\x1b[2K\x1b[1A\x1b[2K\x1b[1A\x1b[2K"
        );
        assert_eq!(
            live.restore_cursor().as_str(),
            "\r\x1b[1A\x1b[2K\x1b[1A\x1b[2K\x1b[1A\x1b[2K"
        );
        live.reset_shape();
        assert!(live.position_cursor().is_empty());
    }

    #[test]
    fn vertical_overflow_methods() {
        let mut options = RenderOptions::new(7);
        options.size = (7, 2);
        let tall = || Box::new(Text::new("1\n2\n3\n4")) as Box<dyn Renderable>;

        let mut crop = LiveRender::new(tall()).with_vertical_overflow(VerticalOverflow::Crop);
        assert_eq!(frame_lines(&mut crop, &options), vec!["1", "2"]);

        let mut ellipsis = LiveRender::new(tall());
        assert_eq!(frame_lines(&mut ellipsis, &options), vec!["1    ", "  ..."]);

        let mut visible = LiveRender::new(tall()).with_vertical_overflow(VerticalOverflow::Visible);
        assert_eq!(frame_lines(&mut visible, &options).len(), 4);
    }
}

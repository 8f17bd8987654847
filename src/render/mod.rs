//! The render/measure protocol.
//!
//! Every node in a render tree implements [`Renderable`]: it can report the
//! range of widths it accepts and produce a stream of [`Segment`]s for a given
//! set of [`RenderOptions`]. Strings take part through the same trait as
//! plain text; markup enters a render tree through
//! [`Markup::parse`](crate::markup::Markup::parse), which fails on bad tags.

mod console;
mod containers;
mod error;
mod measure;
mod options;

pub use console::{global_console, same_hook, CaptureBuffer, Console, RenderHook, SharedConsole};
pub use containers::{Constrain, Group, Padding, Styled};
pub use error::{ConsoleError, NotRenderableError};
pub use measure::{measure_renderables, Measurement};
pub use options::RenderOptions;

use std::any::Any;

use crate::control::Control;
use crate::markup::Markup;
use crate::segment::Segment;
use crate::text::{Lines, Text};

/// A lazy, finite stream of segments borrowed from the renderable.
pub type Segments<'a> = Box<dyn Iterator<Item = Segment> + 'a>;

/// Something that can be measured and rendered to segments.
pub trait Renderable: Send + Sync {
    /// Render to segments within `options.max_width`.
    fn render<'a>(&'a self, options: &RenderOptions) -> Segments<'a>;

    /// The widths this renderable accepts.
    ///
    /// Renderables with no opinion take the full width offered.
    fn measure(&self, options: &RenderOptions) -> Measurement {
        Measurement::new(options.max_width, options.max_width)
    }
}

impl<T: Renderable + ?Sized> Renderable for &T {
    fn render<'a>(&'a self, options: &RenderOptions) -> Segments<'a> {
        (**self).render(options)
    }

    fn measure(&self, options: &RenderOptions) -> Measurement {
        (**self).measure(options)
    }
}

impl<T: Renderable + ?Sized> Renderable for Box<T> {
    fn render<'a>(&'a self, options: &RenderOptions) -> Segments<'a> {
        (**self).render(options)
    }

    fn measure(&self, options: &RenderOptions) -> Measurement {
        (**self).measure(options)
    }
}

impl Renderable for str {
    fn render<'a>(&'a self, options: &RenderOptions) -> Segments<'a> {
        let segments: Vec<Segment> = Text::new(self).render(options).collect();
        Box::new(segments.into_iter())
    }

    fn measure(&self, options: &RenderOptions) -> Measurement {
        Text::new(self).measure(options)
    }
}

impl Renderable for String {
    fn render<'a>(&'a self, options: &RenderOptions) -> Segments<'a> {
        self.as_str().render(options)
    }

    fn measure(&self, options: &RenderOptions) -> Measurement {
        self.as_str().measure(options)
    }
}

/// Adapt a dynamically typed value into a renderable.
///
/// # Errors
/// Returns [`NotRenderableError`] unless the value is a string or one of the
/// crate's renderable types. Strings render as plain text.
pub fn cast<T: Any>(value: &T) -> Result<&dyn Renderable, NotRenderableError> {
    let any: &dyn Any = value;
    if let Some(text) = any.downcast_ref::<String>() {
        return Ok(text);
    }
    if let Some(text) = any.downcast_ref::<&'static str>() {
        return Ok(text);
    }
    if let Some(text) = any.downcast_ref::<Text>() {
        return Ok(text);
    }
    if let Some(lines) = any.downcast_ref::<Lines>() {
        return Ok(lines);
    }
    if let Some(markup) = any.downcast_ref::<Markup>() {
        return Ok(markup);
    }
    if let Some(control) = any.downcast_ref::<Control>() {
        return Ok(control);
    }
    if let Some(renderable) = any.downcast_ref::<Box<dyn Renderable>>() {
        return Ok(renderable);
    }
    Err(NotRenderableError {
        type_name: std::any::type_name::<T>().to_string(),
    })
}

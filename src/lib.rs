//! Styled terminal rendering.
//!
//! `spangle` turns trees of renderables into width-constrained, ANSI-styled
//! terminal output:
//!
//! - [`color`] and [`style`] model terminal colors and text attributes,
//!   including downgrading truecolor to what a terminal supports.
//! - [`segment`] is the atomic unit of output, with line and shape operations.
//! - [`text`] holds span-styled text with Unicode-aware wrapping and
//!   justification; [`markup`] parses `[bold]console markup[/]` into it.
//! - [`render`] defines the [`Renderable`](render::Renderable) protocol and the
//!   [`Console`](render::Console) that writes rendered output to a sink.
//! - [`live`] redraws a region of the terminal in place.
//!
//! The library logs through `tracing` and never installs a subscriber.

pub mod cache;
pub mod cells;
pub mod color;
pub mod config;
pub mod control;
pub mod live;
pub mod markup;
pub mod render;
pub mod segment;
pub mod style;
pub mod text;

pub use color::{Color, ColorSystem};
pub use config::ConsoleConfig;
pub use control::Control;
pub use live::Live;
pub use markup::{escape, parse_markup, Markup, MarkupError};
pub use render::{Console, ConsoleError, Measurement, RenderOptions, Renderable};
pub use segment::Segment;
pub use style::Style;
pub use text::{JustifyMethod, OverflowMethod, Text};

//! Width negotiation between renderables.

use super::{RenderOptions, Renderable};

/// The range of widths a renderable accepts, in cells.
///
/// `minimum` is the narrowest width that loses no content beyond the
/// renderable's own overflow policy; `maximum` is the width at which nothing
/// wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Measurement {
    pub minimum: usize,
    pub maximum: usize,
}

impl Measurement {
    /// Build a measurement, lowering `minimum` to `maximum` if needed.
    pub fn new(minimum: usize, maximum: usize) -> Self {
        Self {
            minimum: minimum.min(maximum),
            maximum,
        }
    }

    /// Measure `renderable` within the options' maximum width.
    pub fn get(renderable: &dyn Renderable, options: &RenderOptions) -> Self {
        if options.max_width == 0 {
            return Self::new(0, 0);
        }
        renderable
            .measure(options)
            .normalize()
            .with_maximum(options.max_width)
    }

    /// Difference between maximum and minimum.
    pub fn span(&self) -> usize {
        self.maximum.saturating_sub(self.minimum)
    }

    pub fn normalize(&self) -> Self {
        Self::new(self.minimum, self.maximum)
    }

    /// Cap both bounds at `width`.
    pub fn with_maximum(&self, width: usize) -> Self {
        Self::new(self.minimum.min(width), self.maximum.min(width))
    }

    /// Raise both bounds to at least `width`.
    pub fn with_minimum(&self, width: usize) -> Self {
        Self::new(self.minimum.max(width), self.maximum.max(width))
    }

    /// Clamp into `min_width..=max_width`, each bound optional.
    pub fn clamp(&self, min_width: Option<usize>, max_width: Option<usize>) -> Self {
        let mut measurement = *self;
        if let Some(min_width) = min_width {
            measurement = measurement.with_minimum(min_width);
        }
        if let Some(max_width) = max_width {
            measurement = measurement.with_maximum(max_width);
        }
        measurement
    }
}

/// Combined measurement of renderables stacked vertically.
///
/// The result is the largest minimum and the largest maximum; an empty list
/// measures zero.
pub fn measure_renderables<'a>(
    renderables: impl IntoIterator<Item = &'a dyn Renderable>,
    options: &RenderOptions,
) -> Measurement {
    renderables
        .into_iter()
        .map(|renderable| Measurement::get(renderable, options))
        .fold(Measurement::new(0, 0), |acc, m| {
            Measurement::new(acc.minimum.max(m.minimum), acc.maximum.max(m.maximum))
        })
}

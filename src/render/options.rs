//! Options threaded through a render call.

use crate::text::{JustifyMethod, OverflowMethod};

/// Constraints and overrides for one render pass.
///
/// Children never mutate the options they receive; containers derive a fresh
/// copy with the `update_*` and `with_*` methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Console size as (width, height).
    pub size: (usize, usize),
    pub min_width: usize,
    pub max_width: usize,
    pub max_height: usize,
    /// Fixed height requested by a container, if any.
    pub height: Option<usize>,
    pub is_terminal: bool,
    pub encoding: String,
    pub justify: Option<JustifyMethod>,
    pub overflow: Option<OverflowMethod>,
    pub no_wrap: Option<bool>,
    pub tab_size: usize,
}

impl RenderOptions {
    /// Options for a non-terminal sink `max_width` cells wide.
    pub fn new(max_width: usize) -> Self {
        Self {
            size: (max_width, 25),
            min_width: 1,
            max_width,
            max_height: 25,
            height: None,
            is_terminal: false,
            encoding: "utf-8".to_string(),
            justify: None,
            overflow: None,
            no_wrap: None,
            tab_size: 8,
        }
    }

    /// Check if the sink can only represent ASCII.
    pub fn ascii_only(&self) -> bool {
        !self.encoding.to_ascii_lowercase().starts_with("utf")
    }

    /// Fix both minimum and maximum width.
    pub fn update_width(&self, width: usize) -> Self {
        Self {
            min_width: width,
            max_width: width,
            ..self.clone()
        }
    }

    pub fn update_height(&self, height: usize) -> Self {
        Self {
            max_height: height,
            height: Some(height),
            ..self.clone()
        }
    }

    /// Drop any fixed height.
    pub fn reset_height(&self) -> Self {
        Self {
            height: None,
            ..self.clone()
        }
    }

    pub fn update_dimensions(&self, width: usize, height: usize) -> Self {
        self.update_width(width).update_height(height)
    }

    pub fn with_justify(&self, justify: Option<JustifyMethod>) -> Self {
        Self {
            justify,
            ..self.clone()
        }
    }

    pub fn with_overflow(&self, overflow: Option<OverflowMethod>) -> Self {
        Self {
            overflow,
            ..self.clone()
        }
    }

    pub fn with_no_wrap(&self, no_wrap: Option<bool>) -> Self {
        Self {
            no_wrap,
            ..self.clone()
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new(80)
    }
}

//! Error types for rendering and console output.

use crate::markup::MarkupError;
use crate::style::StyleSyntaxError;

/// A value cannot be adapted into a renderable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unable to render {type_name}; a str, String or Renderable is required")]
pub struct NotRenderableError {
    pub type_name: String,
}

/// Errors from writing to a console.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("failed to write to console: {0}")]
    Io(#[from] std::io::Error),

    #[error("unable to write text the console encoding cannot represent; {guidance}")]
    Encoding { guidance: String },

    #[error(transparent)]
    Style(#[from] StyleSyntaxError),

    #[error(transparent)]
    Markup(#[from] MarkupError),

    #[error(transparent)]
    NotRenderable(#[from] NotRenderableError),
}

impl ConsoleError {
    pub(crate) fn encoding(encoding: &str, character: char) -> Self {
        Self::Encoding {
            guidance: format!(
                "{character:?} is not valid in {encoding:?}; switch the output to utf-8 \
                 (for example LANG=en_US.UTF-8)"
            ),
        }
    }
}

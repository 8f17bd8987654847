//! Error types for style definitions.

/// A style definition could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid style {definition:?} at {token:?}: {reason}")]
pub struct StyleSyntaxError {
    pub definition: String,
    /// The word that could not be interpreted.
    pub token: String,
    pub reason: String,
}

impl StyleSyntaxError {
    pub(crate) fn new(definition: &str, token: &str, reason: impl Into<String>) -> Self {
        Self {
            definition: definition.to_string(),
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors from [`StyleStack`](super::StyleStack) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleStackError {
    #[error("cannot pop the base style of a style stack")]
    PopBase,
}

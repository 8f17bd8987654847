//! Error types for console markup.

/// Markup tags do not balance.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("markup error at position {position} in tag {tag:?}: {reason}")]
pub struct MarkupError {
    /// Byte offset of the offending tag in the markup.
    pub position: usize,
    /// The tag as written, brackets included.
    pub tag: String,
    pub reason: String,
}

impl MarkupError {
    pub(crate) fn new(position: usize, tag: &str, reason: impl Into<String>) -> Self {
        Self {
            position,
            tag: tag.to_string(),
            reason: reason.into(),
        }
    }
}

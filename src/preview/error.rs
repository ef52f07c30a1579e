use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Unknown component: <{tag}>")]
    UnknownComponent { tag: String },

    #[error("Malformed markup at offset {offset}: {message}")]
    Malformed { message: String, offset: usize },

    #[error("Invalid props for <{component}>: {message}")]
    InvalidProps { component: String, message: String },
}

impl RenderError {
    /// Report a malformed-markup offset relative to a document that starts
    /// `base` bytes earlier.
    pub fn shifted(self, base: usize) -> Self {
        match self {
            RenderError::Malformed { message, offset } => RenderError::Malformed { message, offset: offset + base },
            other => other,
        }
    }
}

use thiserror::Error;

/// What a completion backend reports when it cannot produce a reply.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompletionError {
    /// Non-success status; `message` is the collaborator's own error text.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("could not decode completion reply: {0}")]
    Decode(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("prompt is empty")]
    EmptyPrompt,

    #[error("a generation is already in progress")]
    Busy,

    /// Collaborator error text, passed through unchanged.
    #[error("{message}")]
    Collaborator { status: Option<u16>, message: String },

    #[error("could not reach the completion service: {0}")]
    Transport(String),

    #[error("the generated form looks incomplete ({reason}); try asking for less")]
    Truncated { reason: String },

    #[error("invalid reply: {0}")]
    InvalidReply(String),
}

impl From<CompletionError> for GenerationError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Rejected { status, message } => GenerationError::Collaborator {
                status: Some(status),
                message,
            },
            CompletionError::Transport(msg) => GenerationError::Transport(msg),
            CompletionError::Decode(msg) => GenerationError::InvalidReply(msg),
        }
    }
}

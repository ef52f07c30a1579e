pub mod backend;
pub mod error;
pub mod orchestrator;

pub use backend::{
    ChatCompletionsBackend, CompletionBackend, CompletionReply, CompletionRequest, HttpProxyBackend,
    MockCompletionBackend,
};
pub use error::{CompletionError, GenerationError};
pub use orchestrator::{GenerationOrchestrator, GenerationOutcome};

pub mod error;
pub mod error_log;
pub mod interpreter;
pub mod registry;
pub mod renderer;

pub use error::RenderError;
pub use renderer::{PreviewOutcome, PreviewRenderer};

//! Form markup toolkit: splits generated component-library markup into field
//! blocks, tracks and edits them, previews the result and drives generation
//! through an external completion service.

pub mod cli;
pub mod editor;
pub mod generation;
pub mod history;
pub mod identity;
pub mod library;
pub mod logging;
pub mod markup;
pub mod preview;
pub mod session;

pub use markup::block::{FieldBlock, WidgetType};
pub use session::FormSession;

pub mod store;
pub mod version;

pub use store::VersionStore;
pub use version::{ChatMessage, Role, VersionSnapshot};

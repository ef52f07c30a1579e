pub mod tracked_input;
pub mod tracker;

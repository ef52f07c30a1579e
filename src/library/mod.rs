pub mod catalog;
pub mod profile;

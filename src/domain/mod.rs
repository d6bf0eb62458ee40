//! Document model for editor-authored resources.

pub mod blocks;
pub mod error;
pub mod resources;
pub mod types;

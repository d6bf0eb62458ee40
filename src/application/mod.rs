//! Application services: rendering, newsletter composition and the traits they depend on.

pub mod error;
pub mod newsletter;
pub mod render;
pub mod repos;

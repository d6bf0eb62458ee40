//! Compile editor resources into email-client-safe newsletter HTML.
//!
//! ```no_run
//! use newsletter_render::application::render::{RenderService, render_service};
//! use newsletter_render::domain::resources::RawResource;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let json = std::fs::read_to_string("resource.json")?;
//! let resource = RawResource::from_json(&json)?.normalize();
//! let output = render_service().render(&resource);
//! println!("{}", output.html);
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;

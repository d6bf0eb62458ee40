//! Email rendering for editor resources.
//!
//! The pipeline is pure: it borrows a normalised [`Resource`](crate::domain::resources::Resource),
//! walks its block tree once and returns deterministic HTML. Nothing here
//! performs I/O or fails; malformed blocks degrade to an inline placeholder.

mod service;
mod types;

pub use service::{
    ComrakMarkdown, EmailRenderService, MarkdownConverter, RenderConfigError,
    configure_render_service, escape_html, render_block, render_document, render_service, wrap,
    wrap_with,
};
pub use types::{EmailLayout, RenderOptions, RenderOutput, RenderService, RenderStats};

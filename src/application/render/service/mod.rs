mod assemble;
mod blocks;
mod config;
mod context;
mod document;
mod escape;
mod layout;
mod markdown;
mod node;
mod palette;
mod video;

use std::sync::Arc;

use ammonia::Builder as AmmoniaBuilder;
use once_cell::sync::{Lazy, OnceCell};
use thiserror::Error;
use tracing::debug;

use crate::application::render::types::{RenderOptions, RenderOutput, RenderService, RenderStats};
use crate::domain::{blocks::ContentBlock, resources::Resource};

pub use assemble::{wrap, wrap_with};
pub use escape::escape_html;
pub use markdown::{ComrakMarkdown, MarkdownConverter};

use config::build_rich_text_sanitizer;
use context::RenderContext;
use node::serialize;

/// Block-tree to email HTML renderer backed by Comrak and Ammonia.
pub struct EmailRenderService {
    options: RenderOptions,
    markdown: Box<dyn MarkdownConverter>,
    sanitizer: AmmoniaBuilder<'static>,
}

impl EmailRenderService {
    pub fn new(options: RenderOptions) -> Self {
        Self::with_markdown(options, Box::new(ComrakMarkdown::new()))
    }

    /// Use a different markdown converter for text blocks.
    pub fn with_markdown(options: RenderOptions, markdown: Box<dyn MarkdownConverter>) -> Self {
        Self {
            options,
            markdown,
            sanitizer: build_rich_text_sanitizer(),
        }
    }

    /// Render a single block as a standalone fragment.
    pub fn render_block(&self, block: &ContentBlock) -> String {
        let mut cx = self.context();
        let node = blocks::render_block(block, &mut cx);
        serialize(&[node])
    }

    /// Render the document body without the email shell.
    pub fn render_body(&self, resource: &Resource) -> (String, RenderStats) {
        let mut cx = self.context();
        let nodes = document::document_nodes(resource, &mut cx);
        (serialize(&nodes), cx.stats)
    }

    fn context(&self) -> RenderContext<'_> {
        RenderContext::new(&self.options, self.markdown.as_ref(), &self.sanitizer)
    }
}

impl Default for EmailRenderService {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl RenderService for EmailRenderService {
    fn render(&self, resource: &Resource) -> RenderOutput {
        let mut cx = self.context();
        let nodes = document::document_nodes(resource, &mut cx);
        let html = assemble::wrap_nodes(nodes, &self.options.layout);
        let stats = cx.stats;

        debug!(
            target = "application::render",
            tabs = stats.tabs,
            sections = stats.sections,
            blocks = stats.blocks_rendered,
            unsupported = stats.unsupported_blocks,
            max_depth = stats.max_depth,
            bytes = html.len(),
            "resource rendered"
        );

        RenderOutput { html, stats }
    }
}

static RENDER_SERVICE: Lazy<Arc<EmailRenderService>> =
    Lazy::new(|| Arc::new(EmailRenderService::new(active_render_options())));

/// Access the shared render service instance, initialised on first use.
pub fn render_service() -> Arc<EmailRenderService> {
    Arc::clone(&RENDER_SERVICE)
}

/// Render one block with the shared service.
pub fn render_block(block: &ContentBlock) -> String {
    render_service().render_block(block)
}

/// Render a resource body with the shared service, without the email shell.
pub fn render_document(resource: &Resource) -> String {
    render_service().render_body(resource).0
}

#[derive(Debug, Error)]
pub enum RenderConfigError {
    #[error("render service already configured")]
    AlreadyConfigured,
}

static RENDER_OPTIONS: OnceCell<RenderOptions> = OnceCell::new();

/// Install options for the shared service. Must run before its first use.
pub fn configure_render_service(options: RenderOptions) -> Result<(), RenderConfigError> {
    RENDER_OPTIONS
        .set(options)
        .map_err(|_| RenderConfigError::AlreadyConfigured)
}

fn active_render_options() -> RenderOptions {
    RENDER_OPTIONS.get().cloned().unwrap_or_default()
}

//! Turns a stored resource into the content body of a newsletter draft.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::application::render::{RenderService, RenderStats};
use crate::application::repos::{RepoError, ResourceStore};

const DEFAULT_SUBJECT: &str = "Newsletter";

/// Rendered newsletter body handed to the send pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsletterDraft {
    pub resource_id: String,
    pub subject: String,
    pub content_html: String,
    pub stats: RenderStats,
}

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("resource `{id}` not found")]
    NotFound { id: String },
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Clone)]
pub struct NewsletterComposer {
    store: Arc<dyn ResourceStore>,
    renderer: Arc<dyn RenderService>,
}

impl NewsletterComposer {
    pub fn new(store: Arc<dyn ResourceStore>, renderer: Arc<dyn RenderService>) -> Self {
        Self { store, renderer }
    }

    pub fn compose(&self, resource_id: &str) -> Result<NewsletterDraft, ComposeError> {
        let raw = self
            .store
            .resource_by_id(resource_id)?
            .ok_or_else(|| ComposeError::NotFound {
                id: resource_id.to_string(),
            })?;

        let resource = raw.normalize();
        let subject = match resource.title.trim() {
            "" => DEFAULT_SUBJECT.to_string(),
            title => title.to_string(),
        };
        let output = self.renderer.render(&resource);

        info!(
            target = "application::newsletter",
            resource_id,
            tabs = output.stats.tabs,
            blocks = output.stats.blocks_rendered,
            unsupported = output.stats.unsupported_blocks,
            bytes = output.html.len(),
            "newsletter draft composed"
        );

        Ok(NewsletterDraft {
            resource_id: resource_id.to_string(),
            subject,
            content_html: output.html,
            stats: output.stats,
        })
    }
}

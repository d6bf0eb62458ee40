//! Repository traits describing persistence adapters.

use thiserror::Error;

use crate::domain::resources::RawResource;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("invalid resource id `{id}`: {reason}")]
    InvalidId { id: String, reason: String },
    #[error("failed to read resource `{id}`: {source}")]
    Io {
        id: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode resource `{id}`: {message}")]
    Decode { id: String, message: String },
}

/// Source of editor resources. A missing resource is `Ok(None)`, not an error.
pub trait ResourceStore: Send + Sync {
    fn resource_by_id(&self, id: &str) -> Result<Option<RawResource>, RepoError>;
}

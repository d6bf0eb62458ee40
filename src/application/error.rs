use std::error::Error as StdError;

use thiserror::Error;

use crate::{
    application::{newsletter::ComposeError, render::RenderConfigError},
    config::LoadError,
    domain::error::DomainError,
    infra::error::InfraError,
};

/// Failure chain flattened for logging at the binary boundary.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(source: &'static str, error: &dyn StdError) -> Self {
        let mut messages = Vec::new();
        messages.push(error.to_string());
        let mut current = error.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        Self { source, messages }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Config(#[from] LoadError),
    #[error(transparent)]
    Compose(#[from] ComposeError),
    #[error(transparent)]
    RenderConfig(#[from] RenderConfigError),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) | AppError::RenderConfig(_) => 78,
            AppError::Domain(DomainError::Parse { .. }) => 65,
            AppError::Domain(DomainError::Validation { .. }) => 64,
            AppError::Compose(ComposeError::NotFound { .. }) => 66,
            AppError::Compose(ComposeError::Repo(_)) | AppError::Infra(InfraError::Io(_)) => 74,
            AppError::Infra(InfraError::Telemetry(_)) | AppError::Unexpected(_) => 70,
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport::from_error("application::error::AppError", self)
    }
}

//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid AI timeout")]
    InvalidAiTimeout,

    #[error("Invalid knowledge-search timeout")]
    InvalidKnowledgeTimeout,

    #[error("Conversation TTL must be non-zero")]
    InvalidConversationTtl,

    #[error("Conversation capacity must be non-zero")]
    InvalidConversationCapacity,
}

//! Bot Config Store Port - read access to per-organization bot config.
//!
//! Configuration persistence itself (dashboard CRUD, storage backend) is an
//! external collaborator; the pipeline only ever reads.

use async_trait::async_trait;

use crate::domain::bot::BotConfig;
use crate::domain::foundation::OrganizationId;

/// Port for loading bot configuration.
#[async_trait]
pub trait BotConfigStore: Send + Sync {
    /// Loads the configuration for an organization.
    ///
    /// Implementations may fall back to the default organization's config
    /// when the requested organization has none.
    async fn get(&self, org: &OrganizationId) -> Result<BotConfig, ConfigStoreError>;
}

/// Config store errors. These are the only errors allowed to fail a chat
/// HTTP call outright (500): without configuration there is no bot to
/// answer as.
#[derive(Debug, thiserror::Error)]
pub enum ConfigStoreError {
    /// No configuration exists for the organization (or the default).
    #[error("no bot configuration for organization {0:?}")]
    NotFound(String),

    /// The backing store is unreachable.
    #[error("config store unavailable: {0}")]
    Unavailable(String),
}

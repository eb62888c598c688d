//! In-memory bot-config store.
//!
//! Configuration persistence is an external collaborator in production;
//! this adapter serves single-server deployments and tests. Organizations
//! without their own configuration fall back to the default organization's
//! bot.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::bot::BotConfig;
use crate::domain::foundation::OrganizationId;
use crate::ports::{BotConfigStore, ConfigStoreError};

/// In-memory org-to-config map.
#[derive(Debug, Default)]
pub struct InMemoryBotConfigStore {
    configs: RwLock<HashMap<OrganizationId, BotConfig>>,
}

impl InMemoryBotConfigStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with a default-organization config.
    pub fn with_default_config(config: BotConfig) -> Self {
        let mut configs = HashMap::new();
        configs.insert(OrganizationId::default_org(), config);
        Self {
            configs: RwLock::new(configs),
        }
    }

    /// Inserts or replaces an organization's configuration.
    pub async fn insert(&self, org: OrganizationId, config: BotConfig) {
        self.configs.write().await.insert(org, config);
    }
}

#[async_trait]
impl BotConfigStore for InMemoryBotConfigStore {
    async fn get(&self, org: &OrganizationId) -> Result<BotConfig, ConfigStoreError> {
        let configs = self.configs.read().await;
        if let Some(config) = configs.get(org) {
            return Ok(config.clone());
        }
        configs
            .get(&OrganizationId::default_org())
            .cloned()
            .ok_or_else(|| ConfigStoreError::NotFound(org.to_string()))
    }
}

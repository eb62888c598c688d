//! Resolution pipeline configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Resolution pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ResolverConfig {
    /// Knowledge-search timeout in seconds
    #[serde(default = "default_knowledge_timeout")]
    pub knowledge_timeout_secs: u64,

    /// Idle conversations older than this are evicted
    #[serde(default = "default_conversation_ttl")]
    pub conversation_ttl_secs: u64,

    /// Maximum retained conversations
    #[serde(default = "default_max_conversations")]
    pub max_conversations: usize,
}

impl ResolverConfig {
    /// Get knowledge-search timeout as Duration
    pub fn knowledge_timeout(&self) -> Duration {
        Duration::from_secs(self.knowledge_timeout_secs)
    }

    /// Validate resolver configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.knowledge_timeout_secs == 0 || self.knowledge_timeout_secs > 60 {
            return Err(ValidationError::InvalidKnowledgeTimeout);
        }
        if self.conversation_ttl_secs == 0 {
            return Err(ValidationError::InvalidConversationTtl);
        }
        if self.max_conversations == 0 {
            return Err(ValidationError::InvalidConversationCapacity);
        }
        Ok(())
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            knowledge_timeout_secs: default_knowledge_timeout(),
            conversation_ttl_secs: default_conversation_ttl(),
            max_conversations: default_max_conversations(),
        }
    }
}

fn default_knowledge_timeout() -> u64 {
    10
}

fn default_conversation_ttl() -> u64 {
    6 * 60 * 60
}

fn default_max_conversations() -> usize {
    10_000
}

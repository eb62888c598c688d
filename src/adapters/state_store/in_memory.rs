//! In-memory conversation store.
//!
//! Keeps per-conversation state in a `HashMap` registry guarded by a
//! `tokio::sync::RwLock`, with a `tokio::sync::Mutex` per entry so updates
//! to the same conversation id are serialized without blocking unrelated
//! conversations. Entries are evicted by TTL on last activity and by a
//! bounded capacity dropping the least-recently-active conversation.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::{ConversationId, Timestamp};
use crate::domain::resolution::{ConversationState, ResponseSource};
use crate::ports::{ConversationStore, ConversationStoreError};

/// Eviction settings for the in-memory store.
#[derive(Debug, Clone, Copy)]
pub struct ConversationStoreConfig {
    /// Conversations idle longer than this are evicted.
    pub ttl_secs: u64,
    /// Maximum retained conversations; the least-recently-active entry is
    /// evicted when full.
    pub max_conversations: usize,
}

impl Default for ConversationStoreConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 6 * 60 * 60,
            max_conversations: 10_000,
        }
    }
}

type Entry = Arc<Mutex<ConversationState>>;

/// In-memory conversation store for single-server deployments.
#[derive(Debug)]
pub struct InMemoryConversationStore {
    config: ConversationStoreConfig,
    conversations: RwLock<HashMap<ConversationId, Entry>>,
}

impl InMemoryConversationStore {
    /// Creates a store with the given eviction settings.
    pub fn new(config: ConversationStoreConfig) -> Self {
        Self {
            config,
            conversations: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a store with default eviction settings.
    pub fn with_defaults() -> Self {
        Self::new(ConversationStoreConfig::default())
    }

    /// Number of retained conversations.
    pub async fn len(&self) -> usize {
        self.conversations.read().await.len()
    }

    /// Whether the store currently holds no conversations.
    pub async fn is_empty(&self) -> bool {
        self.conversations.read().await.is_empty()
    }

    /// Fetches or creates the entry for a conversation, evicting expired
    /// and excess entries while the write lock is held.
    async fn entry_for(&self, conversation_id: &ConversationId, now: Timestamp) -> Entry {
        if let Some(entry) = self.conversations.read().await.get(conversation_id) {
            return entry.clone();
        }

        let mut conversations = self.conversations.write().await;
        // Re-check: another task may have created the entry between locks.
        if let Some(entry) = conversations.get(conversation_id) {
            return entry.clone();
        }

        Self::evict(&mut conversations, &self.config, now).await;

        let entry = Arc::new(Mutex::new(ConversationState::new(
            conversation_id.clone(),
            now,
        )));
        conversations.insert(conversation_id.clone(), entry.clone());
        entry
    }

    async fn evict(
        conversations: &mut HashMap<ConversationId, Entry>,
        config: &ConversationStoreConfig,
        now: Timestamp,
    ) {
        // TTL pass. try_lock is safe here: an entry locked by a concurrent
        // update is by definition active and must not be evicted.
        let cutoff = Timestamp::from_unix_secs(now.as_unix_secs().saturating_sub(config.ttl_secs));
        let mut expired = Vec::new();
        for (id, entry) in conversations.iter() {
            if let Ok(state) = entry.try_lock() {
                if state.idle_since(cutoff) {
                    expired.push(id.clone());
                }
            }
        }
        for id in expired {
            conversations.remove(&id);
        }

        // Capacity pass: drop the least-recently-active until under cap.
        while conversations.len() >= config.max_conversations {
            let oldest = {
                let mut oldest: Option<(ConversationId, Timestamp)> = None;
                for (id, entry) in conversations.iter() {
                    if let Ok(state) = entry.try_lock() {
                        let replace = oldest
                            .as_ref()
                            .map(|(_, ts)| state.last_activity.is_before(ts))
                            .unwrap_or(true);
                        if replace {
                            oldest = Some((id.clone(), state.last_activity));
                        }
                    }
                }
                oldest
            };
            match oldest {
                Some((id, _)) => {
                    conversations.remove(&id);
                }
                None => break,
            }
        }
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn record_turn(
        &self,
        conversation_id: &ConversationId,
        source: ResponseSource,
        escalated: bool,
        now: Timestamp,
    ) -> Result<ConversationState, ConversationStoreError> {
        let entry = self.entry_for(conversation_id, now).await;
        // Per-key lock only; unrelated conversations proceed concurrently.
        let mut state = entry.lock().await;
        state.record_turn(source, escalated, now);
        Ok(state.clone())
    }

    async fn get(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Option<ConversationState>, ConversationStoreError> {
        let entry = {
            let conversations = self.conversations.read().await;
            conversations.get(conversation_id).cloned()
        };
        match entry {
            Some(entry) => Ok(Some(entry.lock().await.clone())),
            None => Ok(None),
        }
    }
}

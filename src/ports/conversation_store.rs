//! Conversation Store Port - serialized access to per-conversation state.
//!
//! Messages from different conversations resolve concurrently; updates to
//! the same conversation id must be serialized. Implementations key a lock
//! (or single-writer actor) by conversation id and must not require callers
//! to hold it across external calls: the pipeline resolves first and
//! records the turn afterwards.

use async_trait::async_trait;

use crate::domain::foundation::{ConversationId, Timestamp};
use crate::domain::resolution::{ConversationState, ResponseSource};

/// Port for per-conversation mutable state.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Records one resolved turn for a conversation, creating state on
    /// first use, and returns a snapshot of the updated state.
    async fn record_turn(
        &self,
        conversation_id: &ConversationId,
        source: ResponseSource,
        escalated: bool,
        now: Timestamp,
    ) -> Result<ConversationState, ConversationStoreError>;

    /// Returns a snapshot of a conversation's state, if it exists.
    async fn get(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Option<ConversationState>, ConversationStoreError>;
}

/// Conversation store errors.
///
/// A failed state update is tolerable (a leaked counter increment); the
/// caller must still surface a response to the end user.
#[derive(Debug, thiserror::Error)]
pub enum ConversationStoreError {
    /// The backing store is unreachable.
    #[error("conversation store unavailable: {0}")]
    Unavailable(String),
}

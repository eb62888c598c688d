//! Chat application service.
//!
//! Orchestrates the config store, the resolution pipeline, and the
//! conversation store for one inbound message. Owns the error taxonomy of
//! the chat API:
//!
//! - config-store failures are the only hard errors (no configuration
//!   means there is no bot to answer as);
//! - collaborator failures are recovered inside the pipeline;
//! - anything else that goes wrong mid-resolution degrades to the
//!   emergency-fallback response so the end user always gets a
//!   conversational message.

use std::sync::Arc;

use futures::FutureExt;
use tracing::{error, info, warn};

use crate::domain::bot::{BotConfig, OperatingHoursSpec};
use crate::domain::foundation::{ConversationId, OrganizationId, Timestamp};
use crate::domain::resolution::{
    OperatingHoursGate, ResolutionPipeline, ResolutionResult, ResponseComposer,
};
use crate::ports::{BotConfigStore, ConfigStoreError, ConversationStore};

/// Errors surfaced by the chat service.
#[derive(Debug, thiserror::Error)]
pub enum ChatServiceError {
    /// Bot configuration could not be loaded. The only error that fails a
    /// chat HTTP call outright.
    #[error("configuration unavailable: {0}")]
    Config(#[from] ConfigStoreError),
}

/// Outcome of starting (or resuming) a conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationStart {
    pub conversation_id: ConversationId,
    pub greeting: String,
    pub bot_name: String,
    pub is_offline: bool,
    pub next_opening: Option<Timestamp>,
    pub operating_hours: Option<OperatingHoursSpec>,
}

/// Current operating-hours status for an organization's bot.
#[derive(Debug, Clone, PartialEq)]
pub struct HoursStatus {
    pub is_online: bool,
    pub operating_hours: Option<OperatingHoursSpec>,
    pub next_opening: Option<Timestamp>,
    pub current_time: Timestamp,
}

/// Application service behind the chat endpoints.
pub struct ChatService {
    config_store: Arc<dyn BotConfigStore>,
    conversation_store: Arc<dyn ConversationStore>,
    pipeline: Arc<ResolutionPipeline>,
}

impl ChatService {
    /// Creates the service from its collaborators.
    pub fn new(
        config_store: Arc<dyn BotConfigStore>,
        conversation_store: Arc<dyn ConversationStore>,
        pipeline: Arc<ResolutionPipeline>,
    ) -> Self {
        Self {
            config_store,
            conversation_store,
            pipeline,
        }
    }

    /// Resolves one inbound message end to end.
    ///
    /// Exactly one [`ResolutionResult`] is produced per call. The
    /// per-conversation state update happens after resolution completes,
    /// so the conversation lock is never held across external calls.
    pub async fn resolve_message(
        &self,
        org: &OrganizationId,
        conversation_id: &ConversationId,
        message: &str,
    ) -> Result<ResolutionResult, ChatServiceError> {
        let config = self.config_store.get(org).await?;
        let now = Timestamp::now();

        let result = self
            .resolve_guarded(message, conversation_id, &config, now)
            .await;

        self.record_turn(conversation_id, &result, now).await;

        info!(
            organization = %org,
            conversation_id = %conversation_id,
            source = ?result.source,
            confidence = result.confidence,
            should_escalate = result.should_escalate,
            "message resolved"
        );
        Ok(result)
    }

    /// Gate plus fallback chain only, with no AI attempt. Backs the
    /// qa-match test endpoint; does not record a conversation turn.
    pub async fn resolve_fallback_only(
        &self,
        org: &OrganizationId,
        message: &str,
    ) -> Result<ResolutionResult, ChatServiceError> {
        let config = self.config_store.get(org).await?;
        Ok(self
            .pipeline
            .resolve_fallback_only(message, &config, Timestamp::now())
            .await)
    }

    /// Computes the chat-start payload: same gate check as resolution,
    /// but returns the greeting instead of resolving a message.
    pub async fn start_conversation(
        &self,
        org: &OrganizationId,
        conversation_id: Option<ConversationId>,
    ) -> Result<ConversationStart, ChatServiceError> {
        let config = self.config_store.get(org).await?;
        let now = Timestamp::now();
        let spec = config.operating_hours.as_ref();

        let is_offline = !OperatingHoursGate::is_online(spec, now);
        let greeting = if is_offline {
            // Offline greeting mirrors the offline resolution message.
            spec.map(|s| OperatingHoursGate::offline_message(s, &config.name))
                .unwrap_or_else(|| config.greeting.clone())
        } else {
            config.greeting.clone()
        };

        Ok(ConversationStart {
            conversation_id: conversation_id.unwrap_or_else(ConversationId::generate),
            greeting,
            bot_name: config.name.clone(),
            is_offline,
            next_opening: OperatingHoursGate::next_opening(spec, now),
            operating_hours: config.operating_hours.clone(),
        })
    }

    /// Current gate status for the organization's bot.
    pub async fn hours_status(&self, org: &OrganizationId) -> Result<HoursStatus, ChatServiceError> {
        let config = self.config_store.get(org).await?;
        let now = Timestamp::now();
        let spec = config.operating_hours.as_ref();

        Ok(HoursStatus {
            is_online: OperatingHoursGate::is_online(spec, now),
            next_opening: OperatingHoursGate::next_opening(spec, now),
            operating_hours: config.operating_hours.clone(),
            current_time: now,
        })
    }

    /// Runs the pipeline, degrading a panic in any stage to the
    /// emergency-fallback response. The user must always receive a
    /// conversational message, even on total failure.
    async fn resolve_guarded(
        &self,
        message: &str,
        conversation_id: &ConversationId,
        config: &BotConfig,
        now: Timestamp,
    ) -> ResolutionResult {
        let attempt = std::panic::AssertUnwindSafe(
            self.pipeline.resolve(message, conversation_id, config, now),
        )
        .catch_unwind()
        .await;

        match attempt {
            Ok(result) => result,
            Err(_) => {
                error!(
                    conversation_id = %conversation_id,
                    "resolution pipeline panicked, returning emergency fallback"
                );
                ResponseComposer::emergency()
            }
        }
    }

    /// Applies the per-conversation state update. A failed update is
    /// logged and tolerated; it must never block the response.
    async fn record_turn(
        &self,
        conversation_id: &ConversationId,
        result: &ResolutionResult,
        now: Timestamp,
    ) {
        if let Err(err) = self
            .conversation_store
            .record_turn(conversation_id, result.source, result.should_escalate, now)
            .await
        {
            warn!(
                conversation_id = %conversation_id,
                error = %err,
                "failed to record conversation turn"
            );
        }
    }
}

//! AI Responder Port - interface to the generative-response collaborator.
//!
//! The pipeline gives the AI responder first chance at every online message
//! and accepts successful responses as-is (no confidence gate). Any error
//! from this port routes resolution into the local fallback chain; no
//! retries happen at the pipeline level.

use async_trait::async_trait;

use crate::domain::foundation::ConversationId;

/// Port for generative AI completions.
///
/// Implementations connect to external LLM services and translate between
/// the provider API and the pipeline's request/response types. Callers
/// bound the call with a timeout; implementations should also carry their
/// own request timeout for defense in depth.
#[async_trait]
pub trait AiResponder: Send + Sync {
    /// Generates a conversational reply for an inbound customer message.
    async fn respond(&self, request: AiRequest) -> Result<AiResponse, AiError>;
}

/// Request for an AI-generated reply.
#[derive(Debug, Clone)]
pub struct AiRequest {
    /// The inbound customer message.
    pub message: String,
    /// Bot-configured system prompt, if any.
    pub system_prompt: Option<String>,
    /// Conversation this message belongs to, for provider-side threading.
    pub conversation_id: ConversationId,
}

impl AiRequest {
    /// Creates a request for a message in a conversation.
    pub fn new(message: impl Into<String>, conversation_id: ConversationId) -> Self {
        Self {
            message: message.into(),
            system_prompt: None,
            conversation_id,
        }
    }

    /// Sets the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }
}

/// Successful AI response.
#[derive(Debug, Clone, PartialEq)]
pub struct AiResponse {
    /// Generated reply text.
    pub message: String,
    /// Collaborator-reported confidence in `[0, 1]`.
    pub confidence: f64,
    /// True when the responder answered via its secondary-model failover
    /// rather than the primary model; tags the result `ai_fallback`.
    pub via_fallback_model: bool,
}

impl AiResponse {
    /// Creates a primary-model response.
    pub fn new(message: impl Into<String>, confidence: f64) -> Self {
        Self {
            message: message.into(),
            confidence,
            via_fallback_model: false,
        }
    }

    /// Marks the response as produced by the secondary model.
    pub fn via_fallback(mut self) -> Self {
        self.via_fallback_model = true;
        self
    }
}

/// AI responder errors. Every variant routes the pipeline to the fallback
/// chain; none is surfaced to the end user.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Provider is unavailable.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl AiError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

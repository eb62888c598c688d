//! HTTP handlers for chat endpoints.
//!
//! These handlers connect Axum routes to the chat application service.
//! Request validation happens here: missing required fields produce a
//! structured 400, and only a configuration-store failure produces a 500.
//! Resolution itself never fails; degraded outcomes are returned as
//! regular 200 payloads with their own source and confidence.

use std::sync::Arc;

use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{ChatService, ChatServiceError};
use crate::domain::foundation::{ConversationId, OrganizationId};
use crate::domain::resolution::{ResolutionResult, ResponseSource};
use crate::ports::ConfigStoreError;

use super::dto::{
    ApiEnvelope, ChatRequest, ChatResponse, ChatStartRequest, ChatStartResponse, ErrorResponse,
    HoursStatusParams, HoursStatusResponse, QaMatchRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for chat handlers.
#[derive(Clone)]
pub struct ChatAppState {
    pub chat_service: Arc<ChatService>,
}

impl ChatAppState {
    pub fn new(chat_service: Arc<ChatService>) -> Self {
        Self { chat_service }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// POST /chat
// ════════════════════════════════════════════════════════════════════════════════

/// POST /chat - Resolve one inbound customer message.
///
/// A degraded (emergency-fallback) resolution still returns HTTP 200, but
/// with `success: false` so the widget can tell a real answer from a
/// last-resort one.
///
/// # Errors
/// - 400 Bad Request: missing or blank `message` or `conversationId`
/// - 500 Internal Server Error: bot configuration could not be loaded
pub async fn chat(
    State(state): State<ChatAppState>,
    Json(request): Json<ChatRequest>,
) -> Result<impl IntoResponse, ChatApiError> {
    let message = require_text(request.message, "message")?;
    let conversation_id = request
        .conversation_id
        .and_then(ConversationId::new)
        .ok_or_else(|| ChatApiError::BadRequest("conversationId is required".to_string()))?;
    let org = organization(request.organization_id);

    let result = state
        .chat_service
        .resolve_message(&org, &conversation_id, &message)
        .await?;

    Ok((StatusCode::OK, Json(resolution_envelope(result))))
}

// ════════════════════════════════════════════════════════════════════════════════
// POST /chat/start
// ════════════════════════════════════════════════════════════════════════════════

/// POST /chat/start - Begin (or resume) a widget conversation.
///
/// Returns the greeting, the bot's display name, and the current
/// operating-hours status as a bare payload (no envelope). Accepts an
/// empty body.
pub async fn chat_start(
    State(state): State<ChatAppState>,
    request: Option<Json<ChatStartRequest>>,
) -> Result<impl IntoResponse, ChatApiError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let org = organization(request.organization_id);
    let conversation_id = request.conversation_id.and_then(ConversationId::new);

    let start = state
        .chat_service
        .start_conversation(&org, conversation_id)
        .await?;

    Ok((StatusCode::OK, Json(ChatStartResponse::from(start))))
}

// ════════════════════════════════════════════════════════════════════════════════
// POST /chat/qa-match
// ════════════════════════════════════════════════════════════════════════════════

/// POST /chat/qa-match - Run the fallback chain without the AI stage.
///
/// Lets operators preview what the Q&A database, knowledge base, and
/// clarification stages would answer for a message. Does not record a
/// conversation turn.
pub async fn qa_match(
    State(state): State<ChatAppState>,
    Json(request): Json<QaMatchRequest>,
) -> Result<impl IntoResponse, ChatApiError> {
    let message = require_text(request.message, "message")?;
    let org = organization(request.organization_id);

    let result = state
        .chat_service
        .resolve_fallback_only(&org, &message)
        .await?;

    Ok((StatusCode::OK, Json(resolution_envelope(result))))
}

// ════════════════════════════════════════════════════════════════════════════════
// GET /operating-hours/status
// ════════════════════════════════════════════════════════════════════════════════

/// GET /operating-hours/status - Current gate status for the bot.
///
/// Bare payload, no envelope.
pub async fn operating_hours_status(
    State(state): State<ChatAppState>,
    Query(params): Query<HoursStatusParams>,
) -> Result<impl IntoResponse, ChatApiError> {
    let org = organization(params.organization_id);
    let status = state.chat_service.hours_status(&org).await?;

    Ok((StatusCode::OK, Json(HoursStatusResponse::from(status))))
}

// ════════════════════════════════════════════════════════════════════════════════
// Helper Functions
// ════════════════════════════════════════════════════════════════════════════════

/// Wraps a resolution in the response envelope. Emergency-fallback
/// results keep HTTP 200 but flip `success` to false so clients can tell
/// a real answer from a last-resort one.
fn resolution_envelope(result: ResolutionResult) -> ApiEnvelope<ChatResponse> {
    if result.source == ResponseSource::EmergencyFallback {
        ApiEnvelope::degraded(ChatResponse::from(result))
    } else {
        ApiEnvelope::ok(ChatResponse::from(result))
    }
}

fn require_text(value: Option<String>, field: &str) -> Result<String, ChatApiError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(ChatApiError::BadRequest(format!("{field} is required"))),
    }
}

fn organization(raw: Option<String>) -> OrganizationId {
    raw.map(OrganizationId::new)
        .unwrap_or_else(OrganizationId::default_org)
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts chat failures to HTTP responses.
#[derive(Debug)]
pub enum ChatApiError {
    BadRequest(String),
    Internal(String),
}

impl From<ChatServiceError> for ChatApiError {
    fn from(err: ChatServiceError) -> Self {
        match err {
            ChatServiceError::Config(ConfigStoreError::NotFound(org)) => {
                ChatApiError::Internal(format!("no bot configuration for organization {org}"))
            }
            ChatServiceError::Config(ConfigStoreError::Unavailable(msg)) => {
                ChatApiError::Internal(msg)
            }
        }
    }
}

impl IntoResponse for ChatApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ChatApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            ChatApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("An internal error occurred"),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}

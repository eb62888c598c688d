//! Request/response DTOs for chat endpoints.
//!
//! Wire format is camelCase JSON. Request fields that are required by the
//! API are still optional at the serde level so the handlers can return a
//! structured 400 instead of a deserialization error.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{ConversationStart, HoursStatus};
use crate::domain::bot::OperatingHoursSpec;
use crate::domain::resolution::{ResolutionResult, ResponseSource};

// ════════════════════════════════════════════════════════════════════════════════
// Envelope
// ════════════════════════════════════════════════════════════════════════════════

/// Envelope wrapping the resolution payloads of `/chat` and
/// `/chat/qa-match`. The start and operating-hours endpoints return bare
/// payloads.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }

    /// HTTP 200 with `success: false`: the payload is a degraded
    /// last-resort response rather than a real answer.
    pub fn degraded(data: T) -> Self {
        Self {
            success: false,
            data,
        }
    }
}

/// Standard error body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/chat request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: Option<String>,
    pub conversation_id: Option<String>,
    pub organization_id: Option<String>,
}

/// POST /api/chat/start request body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatStartRequest {
    pub conversation_id: Option<String>,
    pub organization_id: Option<String>,
}

/// POST /api/chat/qa-match request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QaMatchRequest {
    pub message: Option<String>,
    pub organization_id: Option<String>,
}

/// GET /api/operating-hours/status query parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoursStatusParams {
    pub organization_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

/// Resolution payload returned by /api/chat and /api/chat/qa-match.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub message: String,
    pub confidence: f64,
    pub source: ResponseSource,
    pub should_escalate: bool,
    pub knowledge_used: bool,
    pub knowledge_sources: Vec<String>,
    pub is_offline: bool,
}

impl From<ResolutionResult> for ChatResponse {
    fn from(result: ResolutionResult) -> Self {
        Self {
            message: result.message,
            confidence: result.confidence,
            source: result.source,
            should_escalate: result.should_escalate,
            knowledge_used: result.knowledge_used,
            knowledge_sources: result.knowledge_sources,
            is_offline: result.is_offline,
        }
    }
}

/// Payload returned by /api/chat/start.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatStartResponse {
    pub conversation_id: String,
    pub greeting: String,
    pub bot_name: String,
    pub is_offline: bool,
    pub next_opening: Option<String>,
    pub operating_hours: Option<OperatingHoursSpec>,
}

impl From<ConversationStart> for ChatStartResponse {
    fn from(start: ConversationStart) -> Self {
        Self {
            conversation_id: start.conversation_id.as_str().to_string(),
            greeting: start.greeting,
            bot_name: start.bot_name,
            is_offline: start.is_offline,
            next_opening: start.next_opening.map(|ts| ts.to_rfc3339()),
            operating_hours: start.operating_hours,
        }
    }
}

/// Payload returned by /api/operating-hours/status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoursStatusResponse {
    pub is_online: bool,
    pub operating_hours: Option<OperatingHoursSpec>,
    pub next_opening: Option<String>,
    pub current_time: String,
}

impl From<HoursStatus> for HoursStatusResponse {
    fn from(status: HoursStatus) -> Self {
        Self {
            is_online: status.is_online,
            operating_hours: status.operating_hours,
            next_opening: status.next_opening.map(|ts| ts.to_rfc3339()),
            current_time: status.current_time.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::resolution::ResponseComposer;

    #[test]
    fn chat_response_serializes_camel_case() {
        let response = ChatResponse::from(ResponseComposer::clarification());
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"shouldEscalate\":false"));
        assert!(json.contains("\"knowledgeUsed\":false"));
        assert!(json.contains("\"source\":\"clarification_needed\""));
        assert!(json.contains("\"isOffline\":false"));
    }

    #[test]
    fn envelope_wraps_payload() {
        let json =
            serde_json::to_string(&ApiEnvelope::ok(serde_json::json!({"x": 1}))).unwrap();
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("\"data\":{\"x\":1}"));
    }

    #[test]
    fn chat_request_accepts_missing_fields() {
        let request: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(request.message.is_none());
        assert!(request.conversation_id.is_none());
        assert!(request.organization_id.is_none());
    }

    #[test]
    fn error_response_carries_message() {
        let json = serde_json::to_string(&ErrorResponse::new("message is required")).unwrap();
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("message is required"));
    }
}

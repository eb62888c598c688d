//! Axum routes for chat endpoints.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{chat, chat_start, operating_hours_status, qa_match, ChatAppState};

/// Creates routes for chat endpoints.
///
/// REST Endpoints:
/// - POST /chat - Resolve one inbound customer message
/// - POST /chat/start - Begin or resume a widget conversation
/// - POST /chat/qa-match - Preview the fallback chain without AI
/// - GET /operating-hours/status - Current operating-hours status
pub fn chat_routes() -> Router<ChatAppState> {
    Router::new()
        .route("/chat", post(chat))
        .route("/chat/start", post(chat_start))
        .route("/chat/qa-match", post(qa_match))
        .route("/operating-hours/status", get(operating_hours_status))
}

/// Combined router serving the chat routes at the top level.
///
/// The widget is embedded on arbitrary customer sites, so CORS is
/// permissive by design.
pub fn chat_router(state: ChatAppState) -> Router {
    Router::new()
        .merge(chat_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

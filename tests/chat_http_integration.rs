//! HTTP integration tests for the chat endpoints.
//!
//! Drives the full Axum router with mock AI and knowledge collaborators,
//! asserting on status codes and response bodies end to end.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use chat_resolver::adapters::ai::{MockAiError, MockAiResponder};
use chat_resolver::adapters::config_store::InMemoryBotConfigStore;
use chat_resolver::adapters::http::chat::{chat_router, ChatAppState};
use chat_resolver::adapters::knowledge::MockKnowledgeSearch;
use chat_resolver::adapters::state_store::InMemoryConversationStore;
use chat_resolver::application::handlers::ChatService;
use chat_resolver::domain::bot::{BotConfig, OperatingHoursSpec, QaEntry};
use chat_resolver::domain::resolution::{KeywordQuestionClassifier, ResolutionPipeline};

// ════════════════════════════════════════════════════════════════════════════
// Test Fixtures
// ════════════════════════════════════════════════════════════════════════════

fn support_bot() -> BotConfig {
    let mut config = BotConfig::new("Support Bot");
    config.escalation_keywords = vec!["human".to_string(), "agent".to_string()];
    config.qa_database = vec![
        QaEntry {
            question: "what are your hours".to_string(),
            answer: "We're open 9 to 5, Monday through Friday.".to_string(),
            keywords: vec!["hours".to_string(), "open".to_string()],
            enabled: true,
        },
        QaEntry {
            question: "do you ship internationally".to_string(),
            answer: "Yes, we ship worldwide.".to_string(),
            keywords: vec!["shipping".to_string()],
            enabled: false,
        },
    ];
    config
}

/// A window of zero length keeps the bot offline at any wall-clock time.
fn always_offline_hours() -> OperatingHoursSpec {
    OperatingHoursSpec {
        enabled: true,
        start: "00:00".to_string(),
        end: "00:00".to_string(),
        timezone: "UTC".to_string(),
    }
}

fn app(config: BotConfig, ai: MockAiResponder) -> Router {
    let pipeline = Arc::new(ResolutionPipeline::new(
        Arc::new(ai),
        Arc::new(MockKnowledgeSearch::no_match()),
        Arc::new(KeywordQuestionClassifier::new()),
    ));
    let service = Arc::new(ChatService::new(
        Arc::new(InMemoryBotConfigStore::with_default_config(config)),
        Arc::new(InMemoryConversationStore::with_defaults()),
        pipeline,
    ));
    chat_router(ChatAppState::new(service))
}

fn failing_ai() -> MockAiResponder {
    MockAiResponder::new().with_error(MockAiError::Unavailable {
        message: "quota exhausted".to_string(),
    })
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn chat_body(message: &str) -> Value {
    json!({ "message": message, "conversationId": "conv-1" })
}

// ════════════════════════════════════════════════════════════════════════════
// POST /chat
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn successful_ai_answer_is_returned_as_is() {
    let app = app(
        support_bot(),
        MockAiResponder::new().with_response("Happy to help with that!"),
    );

    let (status, body) = post_json(app, "/chat", chat_body("can you help me?")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["message"], json!("Happy to help with that!"));
    assert_eq!(body["data"]["source"], json!("ai"));
    assert_eq!(body["data"]["confidence"], json!(0.95));
    assert_eq!(body["data"]["shouldEscalate"], json!(false));
    assert_eq!(body["data"]["isOffline"], json!(false));
}

#[tokio::test]
async fn offline_bot_answers_with_hours_message() {
    let mut config = support_bot();
    config.operating_hours = Some(always_offline_hours());
    // The AI must never be consulted while offline.
    let ai = MockAiResponder::new();
    let probe = ai.clone();

    let (status, body) = post_json(app(config, ai), "/chat", chat_body("hello")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["source"], json!("operating_hours_check"));
    assert_eq!(body["data"]["confidence"], json!(1.0));
    assert_eq!(body["data"]["isOffline"], json!(true));
    assert_eq!(body["data"]["shouldEscalate"], json!(false));
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("Support Bot"));
    assert_eq!(probe.call_count(), 0);
}

#[tokio::test]
async fn escalation_keyword_wins_when_ai_fails() {
    let app = app(support_bot(), failing_ai());

    let (status, body) =
        post_json(app, "/chat", chat_body("I want to talk to a human")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["source"], json!("escalation_detection"));
    assert_eq!(body["data"]["confidence"], json!(0.9));
    assert_eq!(body["data"]["shouldEscalate"], json!(true));
}

#[tokio::test]
async fn qa_database_answers_when_ai_fails() {
    let app = app(support_bot(), failing_ai());

    let (status, body) = post_json(app, "/chat", chat_body("What are your hours")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["source"], json!("qa_database"));
    assert_eq!(body["data"]["confidence"], json!(0.85));
    assert_eq!(
        body["data"]["message"],
        json!("We're open 9 to 5, Monday through Friday.")
    );
}

#[tokio::test]
async fn disabled_qa_entries_never_answer() {
    let app = app(support_bot(), failing_ai());

    let (_, body) = post_json(
        app,
        "/chat",
        chat_body("do you ship internationally"),
    )
    .await;

    assert_ne!(body["data"]["source"], json!("qa_database"));
}

#[tokio::test]
async fn specific_unanswerable_question_gets_honest_no_match() {
    let app = app(support_bot(), failing_ai());

    let (status, body) = post_json(
        app,
        "/chat",
        chat_body("what is your return policy on item X9921"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["source"], json!("honest_no_match"));
    assert_eq!(body["data"]["confidence"], json!(0.8));
    assert_eq!(body["data"]["shouldEscalate"], json!(true));
    assert_eq!(body["data"]["knowledgeUsed"], json!(false));
}

#[tokio::test]
async fn gibberish_gets_clarification_request() {
    let app = app(support_bot(), failing_ai());

    let (status, body) = post_json(app, "/chat", chat_body("asdkjasd")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["source"], json!("clarification_needed"));
    assert_eq!(body["data"]["confidence"], json!(0.7));
    assert_eq!(body["data"]["shouldEscalate"], json!(false));
}

#[tokio::test]
async fn missing_message_is_rejected() {
    let app = app(support_bot(), failing_ai());

    let (status, body) =
        post_json(app, "/chat", json!({ "conversationId": "conv-1" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("message"));
}

#[tokio::test]
async fn blank_message_is_rejected() {
    let app = app(support_bot(), failing_ai());

    let (status, _) = post_json(
        app,
        "/chat",
        json!({ "message": "   ", "conversationId": "conv-1" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_conversation_id_is_rejected() {
    let app = app(support_bot(), failing_ai());

    let (status, body) = post_json(app, "/chat", json!({ "message": "hello" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("conversationId"));
}

#[tokio::test]
async fn missing_configuration_returns_500() {
    let pipeline = Arc::new(ResolutionPipeline::new(
        Arc::new(MockAiResponder::new().with_response("hi")),
        Arc::new(MockKnowledgeSearch::no_match()),
        Arc::new(KeywordQuestionClassifier::new()),
    ));
    let service = Arc::new(ChatService::new(
        Arc::new(InMemoryBotConfigStore::new()),
        Arc::new(InMemoryConversationStore::with_defaults()),
        pipeline,
    ));
    let app = chat_router(ChatAppState::new(service));

    let (status, body) = post_json(app, "/chat", chat_body("hello")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn total_failure_returns_200_with_degraded_flag() {
    use async_trait::async_trait;
    use chat_resolver::ports::{AiError, AiRequest, AiResponder, AiResponse};

    struct PanickingResponder;

    #[async_trait]
    impl AiResponder for PanickingResponder {
        async fn respond(&self, _: AiRequest) -> Result<AiResponse, AiError> {
            panic!("responder crashed");
        }
    }

    let pipeline = Arc::new(ResolutionPipeline::new(
        Arc::new(PanickingResponder),
        Arc::new(MockKnowledgeSearch::no_match()),
        Arc::new(KeywordQuestionClassifier::new()),
    ));
    let service = Arc::new(ChatService::new(
        Arc::new(InMemoryBotConfigStore::with_default_config(support_bot())),
        Arc::new(InMemoryConversationStore::with_defaults()),
        pipeline,
    ));
    let app = chat_router(ChatAppState::new(service));

    let (status, body) = post_json(app, "/chat", chat_body("hello")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["data"]["source"], json!("emergency_fallback"));
    assert_eq!(body["data"]["confidence"], json!(0.1));
    assert_eq!(body["data"]["shouldEscalate"], json!(true));
}

// ════════════════════════════════════════════════════════════════════════════
// POST /chat/start
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn chat_start_returns_greeting_and_conversation_id() {
    let app = app(support_bot(), failing_ai());

    let (status, body) = post_json(app, "/chat/start", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["botName"], json!("Support Bot"));
    assert_eq!(body["isOffline"], json!(false));
    assert!(!body["conversationId"].as_str().unwrap().is_empty());
    assert!(body["greeting"].as_str().unwrap().contains("Support Bot"));
}

#[tokio::test]
async fn chat_start_keeps_supplied_conversation_id() {
    let app = app(support_bot(), failing_ai());

    let (_, body) = post_json(
        app,
        "/chat/start",
        json!({ "conversationId": "existing-conv" }),
    )
    .await;

    assert_eq!(body["conversationId"], json!("existing-conv"));
}

#[tokio::test]
async fn chat_start_reports_offline_hours() {
    let mut config = support_bot();
    config.operating_hours = Some(always_offline_hours());

    let (status, body) =
        post_json(app(config, failing_ai()), "/chat/start", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isOffline"], json!(true));
    assert!(body["operatingHours"].is_object());
}

// ════════════════════════════════════════════════════════════════════════════
// POST /chat/qa-match
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn qa_match_skips_the_ai_responder() {
    let ai = MockAiResponder::new().with_response("should not run");
    let probe = ai.clone();
    let app = app(support_bot(), ai);

    let (status, body) = post_json(
        app,
        "/chat/qa-match",
        json!({ "message": "what are your hours" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["source"], json!("qa_database"));
    assert_eq!(probe.call_count(), 0);
}

#[tokio::test]
async fn qa_match_requires_a_message() {
    let app = app(support_bot(), failing_ai());

    let (status, _) = post_json(app, "/chat/qa-match", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ════════════════════════════════════════════════════════════════════════════
// GET /operating-hours/status
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn hours_status_reports_online_without_spec() {
    let app = app(support_bot(), failing_ai());

    let (status, body) = get(app, "/operating-hours/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isOnline"], json!(true));
    assert!(body["operatingHours"].is_null());
    assert!(body["nextOpening"].is_null());
    assert!(!body["currentTime"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn hours_status_unknown_org_uses_default_bot() {
    let app = app(support_bot(), failing_ai());

    let (status, body) = get(app, "/operating-hours/status?organizationId=acme").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isOnline"], json!(true));
}

#[tokio::test]
async fn hours_status_reports_offline_with_closed_spec() {
    let mut config = support_bot();
    config.operating_hours = Some(always_offline_hours());

    let (status, body) = get(
        app(config, failing_ai()),
        "/operating-hours/status",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isOnline"], json!(false));
    assert_eq!(body["operatingHours"]["timezone"], json!("UTC"));
}

//! Chat resolver HTTP server entrypoint.

use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use chat_resolver::adapters::ai::{OpenAiConfig, OpenAiResponder};
use chat_resolver::adapters::config_store::InMemoryBotConfigStore;
use chat_resolver::adapters::http::chat::{chat_router, ChatAppState};
use chat_resolver::adapters::knowledge::LexicalKnowledgeSearch;
use chat_resolver::adapters::state_store::{ConversationStoreConfig, InMemoryConversationStore};
use chat_resolver::application::handlers::ChatService;
use chat_resolver::config::AppConfig;
use chat_resolver::domain::bot::BotConfig;
use chat_resolver::domain::resolution::{KeywordQuestionClassifier, ResolutionPipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_key = config
        .ai
        .openai_api_key
        .as_ref()
        .expect("validated configuration has an API key")
        .expose_secret()
        .clone();

    let mut ai_config = OpenAiConfig::new(api_key)
        .with_model(config.ai.model.as_str())
        .with_base_url(config.ai.base_url.as_str())
        .with_timeout(config.ai.timeout())
        .with_max_tokens(config.ai.max_tokens);
    if let Some(fallback) = &config.ai.fallback_model {
        ai_config = ai_config.with_fallback_model(fallback.as_str());
    }

    let pipeline = Arc::new(
        ResolutionPipeline::new(
            Arc::new(OpenAiResponder::new(ai_config)?),
            Arc::new(LexicalKnowledgeSearch::new()),
            Arc::new(KeywordQuestionClassifier::new()),
        )
        .with_ai_timeout(config.ai.timeout())
        .with_knowledge_timeout(config.resolver.knowledge_timeout()),
    );

    let conversation_store = Arc::new(InMemoryConversationStore::new(ConversationStoreConfig {
        ttl_secs: config.resolver.conversation_ttl_secs,
        max_conversations: config.resolver.max_conversations,
    }));
    let config_store = Arc::new(InMemoryBotConfigStore::with_default_config(
        BotConfig::new("Support Assistant"),
    ));

    let chat_service = Arc::new(ChatService::new(config_store, conversation_store, pipeline));
    let app = chat_router(ChatAppState::new(chat_service)).layer(
        tower_http::timeout::TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )),
    );

    let addr = config.server.socket_addr();
    info!(%addr, environment = ?config.server.environment, "starting chat resolver");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! OpenAI-compatible AI responder.
//!
//! Implements the [`AiResponder`] port against a chat-completions API.
//! Supports an optional secondary model: when the primary model fails with
//! a transient error, the same request is retried once against the
//! fallback model and the response is tagged `via_fallback_model` so the
//! pipeline can report `ai_fallback` as its source.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAiConfig::new(api_key)
//!     .with_model("gpt-4o-mini")
//!     .with_fallback_model("gpt-3.5-turbo");
//!
//! let responder = OpenAiResponder::new(config);
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

use crate::ports::{AiError, AiRequest, AiResponder, AiResponse};

/// Confidence attached to AI answers. The chat-completions API reports no
/// calibrated confidence, so a fixed value per the resolution policy is
/// used for both models.
const AI_CONFIDENCE: f64 = 0.95;

/// Configuration for the OpenAI-compatible responder.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Primary model.
    pub model: String,
    /// Optional secondary model tried after a transient primary failure.
    pub fallback_model: Option<String>,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
}

impl OpenAiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            fallback_model: None,
            base_url: "https://api.openai.com".to_string(),
            timeout: Duration::from_secs(30),
            max_tokens: 512,
        }
    }

    /// Sets the primary model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the secondary model.
    pub fn with_fallback_model(mut self, model: impl Into<String>) -> Self {
        self.fallback_model = Some(model.into());
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the completion token cap.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI-compatible chat-completions responder.
pub struct OpenAiResponder {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiResponder {
    /// Creates a responder with the given configuration.
    pub fn new(config: OpenAiConfig) -> Result<Self, AiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AiError::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.config.base_url)
    }

    fn to_wire_request(&self, request: &AiRequest, model: &str) -> ChatCompletionRequest {
        let mut messages = Vec::new();
        if let Some(system) = &request.system_prompt {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: request.message.clone(),
        });

        ChatCompletionRequest {
            model: model.to_string(),
            messages,
            max_tokens: self.config.max_tokens,
        }
    }

    async fn complete_with_model(&self, request: &AiRequest, model: &str) -> Result<String, AiError> {
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key())
            .json(&self.to_wire_request(request, model))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AiError::network(format!("connection failed: {e}"))
                } else {
                    AiError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);
            return Err(AiError::RateLimited {
                retry_after_secs: retry_after,
            });
        }
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(AiError::AuthenticationFailed);
        }
        if status.is_server_error() {
            return Err(AiError::unavailable(format!("provider returned {status}")));
        }
        if !status.is_success() {
            return Err(AiError::parse(format!("unexpected status {status}")));
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AiError::parse(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| AiError::parse("response contained no choices".to_string()))
    }

    fn is_transient(err: &AiError) -> bool {
        matches!(
            err,
            AiError::RateLimited { .. }
                | AiError::Unavailable(_)
                | AiError::Network(_)
                | AiError::Timeout { .. }
        )
    }
}

#[async_trait]
impl AiResponder for OpenAiResponder {
    async fn respond(&self, request: AiRequest) -> Result<AiResponse, AiError> {
        match self.complete_with_model(&request, &self.config.model).await {
            Ok(content) => Ok(AiResponse::new(content, AI_CONFIDENCE)),
            Err(err) if Self::is_transient(&err) && self.config.fallback_model.is_some() => {
                let fallback = self.config.fallback_model.as_deref().unwrap();
                warn!(
                    primary = %self.config.model,
                    fallback = %fallback,
                    error = %err,
                    "primary model failed, trying fallback model"
                );
                let content = self.complete_with_model(&request, fallback).await?;
                Ok(AiResponse::new(content, AI_CONFIDENCE).via_fallback())
            }
            Err(err) => Err(err),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

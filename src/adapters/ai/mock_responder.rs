//! Mock AI responder for testing.
//!
//! Configurable to return scripted responses, simulate latency, or inject
//! errors, so tests can exercise the pipeline without a real LLM API.
//!
//! # Example
//!
//! ```ignore
//! let responder = MockAiResponder::new()
//!     .with_response("Hello, I'm the assistant!")
//!     .with_error(MockAiError::Unavailable { message: "down".into() });
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{AiError, AiRequest, AiResponder, AiResponse};

/// A scripted mock outcome.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Return a successful response.
    Success(AiResponse),
    /// Return an error.
    Error(MockAiError),
}

/// Mock error types for testing the fallback policy.
#[derive(Debug, Clone)]
pub enum MockAiError {
    RateLimited { retry_after_secs: u32 },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Parse { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockAiError> for AiError {
    fn from(err: MockAiError) -> Self {
        match err {
            MockAiError::RateLimited { retry_after_secs } => AiError::RateLimited { retry_after_secs },
            MockAiError::Unavailable { message } => AiError::unavailable(message),
            MockAiError::AuthenticationFailed => AiError::AuthenticationFailed,
            MockAiError::Network { message } => AiError::network(message),
            MockAiError::Parse { message } => AiError::parse(message),
            MockAiError::Timeout { timeout_secs } => AiError::Timeout { timeout_secs },
        }
    }
}

/// Mock AI responder with scripted outcomes consumed in order.
///
/// When the script is exhausted the last configured behavior repeats; a
/// fresh mock with no script fails as unavailable.
#[derive(Debug, Clone, Default)]
pub struct MockAiResponder {
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    last: Arc<Mutex<Option<MockOutcome>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<AiRequest>>>,
}

impl MockAiResponder {
    /// Creates a mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response with confidence 0.95.
    pub fn with_response(self, message: impl Into<String>) -> Self {
        self.push(MockOutcome::Success(AiResponse::new(message, 0.95)))
    }

    /// Queues a fully-specified successful response.
    pub fn with_response_full(self, response: AiResponse) -> Self {
        self.push(MockOutcome::Success(response))
    }

    /// Queues an error outcome.
    pub fn with_error(self, error: MockAiError) -> Self {
        self.push(MockOutcome::Error(error))
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the requests seen so far.
    pub fn calls(&self) -> Vec<AiRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns how many times `respond` was invoked.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn push(self, outcome: MockOutcome) -> Self {
        self.outcomes.lock().unwrap().push_back(outcome);
        self
    }
}

#[async_trait]
impl AiResponder for MockAiResponder {
    async fn respond(&self, request: AiRequest) -> Result<AiResponse, AiError> {
        self.calls.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let outcome = {
            let mut outcomes = self.outcomes.lock().unwrap();
            let mut last = self.last.lock().unwrap();
            match outcomes.pop_front() {
                Some(outcome) => {
                    *last = Some(outcome.clone());
                    outcome
                }
                None => last
                    .clone()
                    .unwrap_or(MockOutcome::Error(MockAiError::Unavailable {
                        message: "mock responder has no script".to_string(),
                    })),
            }
        };

        match outcome {
            MockOutcome::Success(response) => Ok(response),
            MockOutcome::Error(error) => Err(error.into()),
        }
    }
}

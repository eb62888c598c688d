//! AI responder adapters.
//!
//! - `OpenAiResponder` - OpenAI-compatible chat-completions API
//! - `MockAiResponder` - scripted mock for tests

mod mock_responder;
mod openai_responder;

pub use mock_responder::{MockAiError, MockAiResponder, MockOutcome};
pub use openai_responder::{OpenAiConfig, OpenAiResponder};

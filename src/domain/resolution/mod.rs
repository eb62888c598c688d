//! Automated response resolution.
//!
//! The ordered set of stages that turns an inbound customer message into a
//! [`ResolutionResult`]: operating-hours gate, AI attempt, and the fallback
//! chain (escalation keywords, Q&A database, knowledge search, honest
//! fallback).

mod classifier;
mod composer;
mod escalation;
mod hours;
mod pipeline;
mod qa;
mod result;
mod state;

pub use classifier::{KeywordQuestionClassifier, QuestionClassifier};
pub use composer::{confidence, ResponseComposer};
pub use escalation::EscalationDetector;
pub use hours::OperatingHoursGate;
pub use pipeline::{ResolutionPipeline, DEFAULT_AI_TIMEOUT, DEFAULT_KNOWLEDGE_TIMEOUT};
pub use qa::{QaDatabaseMatcher, QaMatch, QaMatchKind};
pub use result::{ResolutionResult, ResponseSource};
pub use state::ConversationState;

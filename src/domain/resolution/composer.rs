//! Response composition.
//!
//! Assembles the final [`ResolutionResult`] for every terminal pipeline
//! state. All confidence values live here (and on [`QaMatchKind`]) so the
//! resolution policy is auditable in one place.

use crate::domain::bot::OperatingHoursSpec;
use crate::domain::resolution::hours::OperatingHoursGate;
use crate::domain::resolution::qa::QaMatch;
use crate::domain::resolution::result::{ResolutionResult, ResponseSource};

/// Confidence assigned to each terminal outcome.
pub mod confidence {
    pub const OFFLINE: f64 = 1.0;
    pub const ESCALATION: f64 = 0.9;
    pub const HONEST_NO_MATCH: f64 = 0.8;
    pub const CLARIFICATION: f64 = 0.7;
    pub const EMERGENCY: f64 = 0.1;
}

/// Builds [`ResolutionResult`] values for each pipeline outcome.
pub struct ResponseComposer;

impl ResponseComposer {
    /// Offline short-circuit from the operating-hours gate.
    pub fn offline(spec: &OperatingHoursSpec, bot_name: &str) -> ResolutionResult {
        ResolutionResult::build(
            OperatingHoursGate::offline_message(spec, bot_name),
            confidence::OFFLINE,
            ResponseSource::OperatingHoursCheck,
            false,
        )
        .offline()
    }

    /// Successful AI response, accepted as-is.
    pub fn ai(message: impl Into<String>, ai_confidence: f64, via_fallback_model: bool) -> ResolutionResult {
        let source = if via_fallback_model {
            ResponseSource::AiFallback
        } else {
            ResponseSource::Ai
        };
        ResolutionResult::build(message, ai_confidence, source, false)
    }

    /// Escalation keyword detected in the fallback chain.
    pub fn escalation(keyword: &str) -> ResolutionResult {
        ResolutionResult::build(
            format!(
                "I understand you'd like to speak with someone from our team. \
                 I'm connecting you with a human agent now, and they'll pick up \
                 this conversation shortly. (Matched: \"{keyword}\")"
            ),
            confidence::ESCALATION,
            ResponseSource::EscalationDetection,
            true,
        )
    }

    /// Q&A database match; confidence comes from the match phase.
    pub fn qa(qa_match: &QaMatch<'_>) -> ResolutionResult {
        ResolutionResult::build(
            qa_match.entry.answer.clone(),
            qa_match.kind.confidence(),
            ResponseSource::QaDatabase,
            false,
        )
    }

    /// Knowledge-base answer; confidence and escalation come from the
    /// collaborator's verdict, citations attach only when present.
    pub fn knowledge(
        message: impl Into<String>,
        verdict_confidence: f64,
        should_escalate: bool,
        sources: Vec<String>,
    ) -> ResolutionResult {
        ResolutionResult::build(
            message,
            verdict_confidence,
            ResponseSource::KnowledgeBase,
            should_escalate,
        )
        .with_knowledge(sources)
    }

    /// Honest "I don't know" for a specific unanswerable question.
    pub fn honest_no_match() -> ResolutionResult {
        ResolutionResult::build(
            "I don't have that information available right now. I've flagged this \
             conversation for a member of our team who can give you an accurate answer.",
            confidence::HONEST_NO_MATCH,
            ResponseSource::HonestNoMatch,
            true,
        )
    }

    /// Clarification request for ambiguous or chit-chat messages.
    pub fn clarification() -> ResolutionResult {
        ResolutionResult::build(
            "I want to make sure I help with the right thing. Could you tell me a \
             bit more about what you're looking for?",
            confidence::CLARIFICATION,
            ResponseSource::ClarificationNeeded,
            false,
        )
    }

    /// Last-resort response when every stage failed.
    pub fn emergency() -> ResolutionResult {
        ResolutionResult::build(
            "Sorry, something went wrong on our end. I've alerted our team, so \
             please try again in a moment or leave your question here.",
            confidence::EMERGENCY,
            ResponseSource::EmergencyFallback,
            true,
        )
    }
}

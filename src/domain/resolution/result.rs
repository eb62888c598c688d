//! The resolution result returned for every inbound message.

use serde::{Deserialize, Serialize};

/// Which stage of the pipeline produced the answer.
///
/// Serialized values are part of the wire contract consumed by the widget
/// and the audit log; do not rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSource {
    /// AI responder succeeded on its primary model.
    Ai,
    /// AI responder succeeded via its secondary-model failover.
    AiFallback,
    /// Curated Q&A database match.
    QaDatabase,
    /// Knowledge-base search match.
    KnowledgeBase,
    /// Escalation keyword detected in the fallback chain.
    EscalationDetection,
    /// Specific question with no answer available; honest "I don't know".
    HonestNoMatch,
    /// Ambiguous message; asked the customer to clarify.
    ClarificationNeeded,
    /// Bot is outside operating hours.
    OperatingHoursCheck,
    /// Every stage failed; canned recovery response.
    EmergencyFallback,
}

/// Immutable outcome of resolving one inbound message.
///
/// Invariants: `confidence` is clamped to `[0, 1]` at construction, and
/// `knowledge_sources` is empty whenever `knowledge_used` is false.
/// Construct through [`crate::domain::resolution::ResponseComposer`] so the
/// confidence policy stays in one place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResult {
    /// The conversational message shown to the customer.
    pub message: String,
    /// Confidence in `[0, 1]` per the resolution policy.
    pub confidence: f64,
    /// Which stage produced this answer.
    pub source: ResponseSource,
    /// Whether the conversation should be handed to a human agent.
    pub should_escalate: bool,
    /// Whether knowledge-base content contributed to the answer.
    pub knowledge_used: bool,
    /// Names of the knowledge items cited; empty unless `knowledge_used`.
    #[serde(default)]
    pub knowledge_sources: Vec<String>,
    /// Whether the bot was outside operating hours.
    pub is_offline: bool,
}

impl ResolutionResult {
    /// Builds a result, clamping confidence and enforcing the
    /// knowledge-sources invariant.
    pub(crate) fn build(
        message: impl Into<String>,
        confidence: f64,
        source: ResponseSource,
        should_escalate: bool,
    ) -> Self {
        Self {
            message: message.into(),
            confidence: confidence.clamp(0.0, 1.0),
            source,
            should_escalate,
            knowledge_used: false,
            knowledge_sources: Vec::new(),
            is_offline: false,
        }
    }

    /// Attaches knowledge citations. An empty source list leaves
    /// `knowledge_used` false.
    pub(crate) fn with_knowledge(mut self, sources: Vec<String>) -> Self {
        self.knowledge_used = !sources.is_empty();
        self.knowledge_sources = sources;
        self
    }

    /// Marks the result as produced while offline.
    pub(crate) fn offline(mut self) -> Self {
        self.is_offline = true;
        self
    }
}

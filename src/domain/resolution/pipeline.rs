//! The resolution pipeline.
//!
//! Orchestrates the stages that turn one inbound message into exactly one
//! [`ResolutionResult`]:
//!
//! ```text
//! GATE_CHECK -> AI_ATTEMPT -> { SUCCESS | FALLBACK_CHAIN }
//! FALLBACK_CHAIN: ESCALATION_CHECK -> QA_CHECK -> KB_CHECK -> HONEST_FALLBACK
//! ```
//!
//! The AI attempt falls back only on a collaborator error (network failure,
//! malformed response, quota), never on a low-confidence-but-valid answer.
//! Successful AI responses are accepted unfiltered; this is a deliberate
//! simplicity/latency trade-off.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::bot::BotConfig;
use crate::domain::foundation::{ConversationId, Timestamp};
use crate::domain::resolution::classifier::QuestionClassifier;
use crate::domain::resolution::composer::ResponseComposer;
use crate::domain::resolution::escalation::EscalationDetector;
use crate::domain::resolution::hours::OperatingHoursGate;
use crate::domain::resolution::qa::QaDatabaseMatcher;
use crate::domain::resolution::result::ResolutionResult;
use crate::ports::{AiError, AiRequest, AiResponder, KnowledgeError, KnowledgeSearch, KnowledgeVerdict};

/// Default bound on the AI collaborator call.
pub const DEFAULT_AI_TIMEOUT: Duration = Duration::from_secs(30);
/// Default bound on the knowledge-search collaborator call.
pub const DEFAULT_KNOWLEDGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Orchestrates resolution stages and owns the fallback policy.
///
/// Holds no per-conversation state; callers record turns against the
/// conversation store after resolution completes, so the per-conversation
/// lock is never held across the external calls made here.
pub struct ResolutionPipeline {
    ai: Arc<dyn AiResponder>,
    knowledge: Arc<dyn KnowledgeSearch>,
    classifier: Arc<dyn QuestionClassifier>,
    ai_timeout: Duration,
    knowledge_timeout: Duration,
}

impl ResolutionPipeline {
    /// Creates a pipeline with default collaborator timeouts.
    pub fn new(
        ai: Arc<dyn AiResponder>,
        knowledge: Arc<dyn KnowledgeSearch>,
        classifier: Arc<dyn QuestionClassifier>,
    ) -> Self {
        Self {
            ai,
            knowledge,
            classifier,
            ai_timeout: DEFAULT_AI_TIMEOUT,
            knowledge_timeout: DEFAULT_KNOWLEDGE_TIMEOUT,
        }
    }

    /// Sets the AI call timeout.
    pub fn with_ai_timeout(mut self, timeout: Duration) -> Self {
        self.ai_timeout = timeout;
        self
    }

    /// Sets the knowledge-search call timeout.
    pub fn with_knowledge_timeout(mut self, timeout: Duration) -> Self {
        self.knowledge_timeout = timeout;
        self
    }

    /// Resolves one inbound message. Always produces exactly one result.
    pub async fn resolve(
        &self,
        message: &str,
        conversation_id: &ConversationId,
        config: &BotConfig,
        now: Timestamp,
    ) -> ResolutionResult {
        // Gate check before anything that could spend API quota. The
        // offline path must stay deterministic even when downstream
        // services are unavailable.
        if let Some(offline) = self.gate_check(config, now) {
            return offline;
        }

        match self.attempt_ai(message, conversation_id, config).await {
            Ok(response) => {
                debug!(
                    conversation_id = %conversation_id,
                    via_fallback_model = response.via_fallback_model,
                    "ai responder answered"
                );
                ResponseComposer::ai(response.message, response.confidence, response.via_fallback_model)
            }
            Err(err) => {
                warn!(
                    conversation_id = %conversation_id,
                    error = %err,
                    "ai responder failed, entering fallback chain"
                );
                self.fallback_chain(message, config).await
            }
        }
    }

    /// Gate check plus fallback chain, with no AI attempt.
    ///
    /// Backs the `/chat/qa-match` endpoint used to exercise the non-AI
    /// path directly.
    pub async fn resolve_fallback_only(
        &self,
        message: &str,
        config: &BotConfig,
        now: Timestamp,
    ) -> ResolutionResult {
        if let Some(offline) = self.gate_check(config, now) {
            return offline;
        }
        self.fallback_chain(message, config).await
    }

    /// Short-circuits to an offline result when outside operating hours.
    fn gate_check(&self, config: &BotConfig, now: Timestamp) -> Option<ResolutionResult> {
        if OperatingHoursGate::is_online(config.operating_hours.as_ref(), now) {
            return None;
        }
        // is_online only reports offline when an enabled spec is present.
        let spec = config.operating_hours.as_ref()?;
        Some(ResponseComposer::offline(spec, &config.name))
    }

    /// AI attempt under a bounded timeout.
    async fn attempt_ai(
        &self,
        message: &str,
        conversation_id: &ConversationId,
        config: &BotConfig,
    ) -> Result<crate::ports::AiResponse, AiError> {
        let mut request = AiRequest::new(message, conversation_id.clone());
        if !config.system_prompt.trim().is_empty() {
            request = request.with_system_prompt(config.system_prompt.clone());
        }

        tokio::time::timeout(self.ai_timeout, self.ai.respond(request))
            .await
            .map_err(|_| AiError::Timeout {
                timeout_secs: self.ai_timeout.as_secs() as u32,
            })?
    }

    /// The non-AI stages, in load-bearing order: escalation keywords, then
    /// the Q&A database, then knowledge search, then the honest fallback.
    /// Pure local computation except the knowledge call.
    async fn fallback_chain(&self, message: &str, config: &BotConfig) -> ResolutionResult {
        if let Some(keyword) = EscalationDetector::detect(message, &config.escalation_keywords) {
            return ResponseComposer::escalation(keyword);
        }

        if let Some(qa_match) = QaDatabaseMatcher::find_match(message, &config.qa_database) {
            return ResponseComposer::qa(&qa_match);
        }

        match self.search_knowledge(message, config).await {
            Ok(KnowledgeVerdict::Match(answer)) => {
                return ResponseComposer::knowledge(
                    answer.message,
                    answer.confidence,
                    answer.should_escalate,
                    answer.sources,
                );
            }
            Ok(KnowledgeVerdict::NoMatch) | Ok(KnowledgeVerdict::Ambiguous) => {}
            Err(err) => {
                warn!(error = %err, "knowledge search failed, continuing fallback chain");
            }
        }

        if self.classifier.is_specific_question(message) {
            ResponseComposer::honest_no_match()
        } else {
            ResponseComposer::clarification()
        }
    }

    /// Knowledge search under the same timeout discipline as the AI call.
    async fn search_knowledge(
        &self,
        message: &str,
        config: &BotConfig,
    ) -> Result<KnowledgeVerdict, KnowledgeError> {
        tokio::time::timeout(
            self.knowledge_timeout,
            self.knowledge.search(message, &config.knowledge_base, config),
        )
        .await
        .map_err(|_| KnowledgeError::Timeout {
            timeout_secs: self.knowledge_timeout.as_secs() as u32,
        })?
    }
}

//! Knowledge Search Port - interface to the knowledge-base collaborator.
//!
//! The pipeline trusts the collaborator's verdict on whether a genuine
//! knowledge match occurred; it never recomputes confidence and never
//! claims knowledge was used when the collaborator reports no match.

use async_trait::async_trait;

use crate::domain::bot::{BotConfig, KnowledgeItem};

/// Port for searching the bot's prepared knowledge base.
#[async_trait]
pub trait KnowledgeSearch: Send + Sync {
    /// Searches the knowledge base for an answer to the message.
    async fn search(
        &self,
        message: &str,
        knowledge_base: &[KnowledgeItem],
        config: &BotConfig,
    ) -> Result<KnowledgeVerdict, KnowledgeError>;
}

/// The collaborator's verdict for one search.
#[derive(Debug, Clone, PartialEq)]
pub enum KnowledgeVerdict {
    /// A genuine match; the pipeline composes a knowledge-base result.
    Match(KnowledgeAnswer),
    /// The collaborator is confident no relevant content exists.
    NoMatch,
    /// The collaborator could not decide; treated as no match by the
    /// pipeline, which falls through to the honest-fallback policy.
    Ambiguous,
}

/// A knowledge-base answer as reported by the collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeAnswer {
    /// Reply text assembled from knowledge content.
    pub message: String,
    /// Collaborator-reported confidence in `[0, 1]`.
    pub confidence: f64,
    /// Whether the collaborator recommends human follow-up.
    pub should_escalate: bool,
    /// Names of the knowledge items cited.
    pub sources: Vec<String>,
}

/// Knowledge search errors. Treated as "no match" by the pipeline so the
/// fallback chain always completes.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    /// Search backend unavailable.
    #[error("knowledge backend unavailable: {0}")]
    Unavailable(String),

    /// Search timed out.
    #[error("knowledge search timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },

    /// Backend returned an unusable response.
    #[error("knowledge backend error: {0}")]
    Backend(String),
}

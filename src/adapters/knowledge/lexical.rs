//! Lexical knowledge search.
//!
//! A small term-overlap scorer standing in for the external knowledge-base
//! collaborator. Scores each enabled item's chunks by the fraction of
//! message terms they contain and returns the best chunk when it clears
//! the match threshold. Deliberately simple: real deployments plug a
//! production search service into the [`KnowledgeSearch`] port.

use async_trait::async_trait;

use crate::domain::bot::{BotConfig, KnowledgeItem};
use crate::ports::{KnowledgeAnswer, KnowledgeError, KnowledgeSearch, KnowledgeVerdict};

/// Score below which the search reports a clean no-match.
const NO_MATCH_THRESHOLD: f64 = 0.2;
/// Score at or above which the search reports a genuine match.
const MATCH_THRESHOLD: f64 = 0.5;
/// Terms shorter than this carry no signal.
const MIN_TERM_LEN: usize = 3;

/// Term-overlap lexical search over knowledge item chunks.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalKnowledgeSearch;

impl LexicalKnowledgeSearch {
    /// Creates the search adapter.
    pub fn new() -> Self {
        Self
    }

    fn terms(text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| t.len() >= MIN_TERM_LEN)
            .map(str::to_string)
            .collect()
    }

    fn score_chunk(message_terms: &[String], chunk: &str) -> f64 {
        if message_terms.is_empty() {
            return 0.0;
        }
        let chunk = chunk.to_lowercase();
        let hits = message_terms.iter().filter(|t| chunk.contains(*t)).count();
        hits as f64 / message_terms.len() as f64
    }

    fn best_match<'a>(
        message: &str,
        items: &'a [KnowledgeItem],
    ) -> Option<(&'a KnowledgeItem, &'a str, f64)> {
        let message_terms = Self::terms(message);
        let mut best: Option<(&KnowledgeItem, &str, f64)> = None;

        for item in items.iter().filter(|i| i.enabled) {
            let chunks: Vec<&str> = if item.chunks.is_empty() {
                vec![item.content.as_str()]
            } else {
                item.chunks.iter().map(String::as_str).collect()
            };

            for chunk in chunks {
                let score = Self::score_chunk(&message_terms, chunk);
                if best.map(|(_, _, s)| score > s).unwrap_or(score > 0.0) {
                    best = Some((item, chunk, score));
                }
            }
        }

        best
    }
}

#[async_trait]
impl KnowledgeSearch for LexicalKnowledgeSearch {
    async fn search(
        &self,
        message: &str,
        knowledge_base: &[KnowledgeItem],
        _config: &BotConfig,
    ) -> Result<KnowledgeVerdict, KnowledgeError> {
        let Some((item, chunk, score)) = Self::best_match(message, knowledge_base) else {
            return Ok(KnowledgeVerdict::NoMatch);
        };

        if score >= MATCH_THRESHOLD {
            Ok(KnowledgeVerdict::Match(KnowledgeAnswer {
                message: chunk.trim().to_string(),
                confidence: score.min(0.95),
                should_escalate: false,
                sources: vec![item.name.clone()],
            }))
        } else if score < NO_MATCH_THRESHOLD {
            Ok(KnowledgeVerdict::NoMatch)
        } else {
            Ok(KnowledgeVerdict::Ambiguous)
        }
    }
}

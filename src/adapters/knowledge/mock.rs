//! Mock knowledge search for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::bot::{BotConfig, KnowledgeItem};
use crate::ports::{KnowledgeAnswer, KnowledgeError, KnowledgeSearch, KnowledgeVerdict};

/// Mock knowledge search returning a fixed verdict.
#[derive(Debug, Clone)]
pub struct MockKnowledgeSearch {
    verdict: Arc<Mutex<Result<KnowledgeVerdict, String>>>,
    calls: Arc<Mutex<u32>>,
}

impl MockKnowledgeSearch {
    /// Always reports no match.
    pub fn no_match() -> Self {
        Self::with_verdict(KnowledgeVerdict::NoMatch)
    }

    /// Always reports the given verdict.
    pub fn with_verdict(verdict: KnowledgeVerdict) -> Self {
        Self {
            verdict: Arc::new(Mutex::new(Ok(verdict))),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Always reports a match with the given answer text and citation.
    pub fn matching(message: impl Into<String>, source: impl Into<String>) -> Self {
        Self::with_verdict(KnowledgeVerdict::Match(KnowledgeAnswer {
            message: message.into(),
            confidence: 0.88,
            should_escalate: false,
            sources: vec![source.into()],
        }))
    }

    /// Always fails with an unavailable error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            verdict: Arc::new(Mutex::new(Err(message.into()))),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Number of searches performed.
    pub fn call_count(&self) -> u32 {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl KnowledgeSearch for MockKnowledgeSearch {
    async fn search(
        &self,
        _message: &str,
        _knowledge_base: &[KnowledgeItem],
        _config: &BotConfig,
    ) -> Result<KnowledgeVerdict, KnowledgeError> {
        *self.calls.lock().unwrap() += 1;
        match &*self.verdict.lock().unwrap() {
            Ok(verdict) => Ok(verdict.clone()),
            Err(message) => Err(KnowledgeError::Unavailable(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_returns_configured_verdict_and_counts_calls() {
        let mock = MockKnowledgeSearch::matching("From the docs", "FAQ");
        let config = BotConfig::new("Bot");

        let verdict = mock.search("q", &[], &config).await.unwrap();
        assert!(matches!(verdict, KnowledgeVerdict::Match(_)));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn failing_mock_errors() {
        let mock = MockKnowledgeSearch::failing("down");
        let config = BotConfig::new("Bot");
        assert!(mock.search("q", &[], &config).await.is_err());
    }
}

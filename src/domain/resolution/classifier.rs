//! Specific-question classification for the honest-fallback policy.
//!
//! The keyword-marker classifier is a placeholder heuristic, not real NLP.
//! It lives behind [`QuestionClassifier`] so it can be swapped for a real
//! classifier without touching the pipeline's fallback ordering.

use once_cell::sync::Lazy;

/// Classifies whether a message is a specific, answerable question (as
/// opposed to chit-chat or an ambiguous fragment).
pub trait QuestionClassifier: Send + Sync {
    /// Returns true when the message reads as a specific question.
    fn is_specific_question(&self, message: &str) -> bool;
}

/// Ordered marker list scanned by the default classifier. Interrogatives
/// first, then commerce/support nouns; order is part of the contract.
static DEFAULT_MARKERS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "what", "how", "when", "where", "why", "which", "who", "can i", "can you", "do you",
        "does", "is there", "are there", "price", "cost", "return", "refund", "policy", "order",
        "shipping", "delivery", "warranty", "cancel", "account", "invoice", "payment",
    ]
});

/// Default keyword-marker implementation.
///
/// A message is specific when it contains any marker from the ordered list
/// (case-insensitive), or when it is a multi-word message ending in a
/// question mark. Single nonsense tokens like "asdkjasd" classify as
/// non-specific.
pub struct KeywordQuestionClassifier {
    markers: Vec<String>,
}

impl KeywordQuestionClassifier {
    /// Creates the classifier with the default marker list.
    pub fn new() -> Self {
        Self {
            markers: DEFAULT_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Creates a classifier with a custom ordered marker list.
    pub fn with_markers(markers: Vec<String>) -> Self {
        Self { markers }
    }
}

impl Default for KeywordQuestionClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionClassifier for KeywordQuestionClassifier {
    fn is_specific_question(&self, message: &str) -> bool {
        let lowered = message.to_lowercase();
        if self.markers.iter().any(|marker| lowered.contains(marker)) {
            return true;
        }
        lowered.trim_end().ends_with('?') && lowered.split_whitespace().count() >= 3
    }
}

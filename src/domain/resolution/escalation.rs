//! Escalation keyword detection.
//!
//! Runs only in the fallback chain: the AI responder gets first chance to
//! handle escalation-flavored phrasing contextually, and only the literal
//! fallback path applies deterministic keyword matching.

/// Scans a message against the configured escalation keyword list.
pub struct EscalationDetector;

impl EscalationDetector {
    /// Returns the first configured keyword contained in the message.
    ///
    /// Case-insensitive substring containment; keywords are scanned in
    /// configured order and the first match wins, so ties break by
    /// configuration order rather than alphabetically.
    pub fn detect<'a>(message: &str, keywords: &'a [String]) -> Option<&'a str> {
        let message = message.to_lowercase();
        keywords
            .iter()
            .filter(|k| !k.trim().is_empty())
            .find(|keyword| message.contains(&keyword.to_lowercase()))
            .map(String::as_str)
    }
}

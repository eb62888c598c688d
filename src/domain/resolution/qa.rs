//! Q&A database matching.
//!
//! Two-phase matcher over the bot's curated question/answer entries.
//! Phase A runs over every entry before phase B is attempted, the first hit
//! wins within a phase, and entries are scanned in configured order.
//!
//! The direct-match rule is deliberately permissive: the entry's question
//! may be a substring of the message or vice versa. This can false-positive
//! on very short questions; the behavior is preserved intentionally for
//! backward compatibility with existing bot configurations.

use crate::domain::bot::QaEntry;

/// How a Q&A entry matched the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QaMatchKind {
    /// Bidirectional containment between message and question text.
    Direct,
    /// One of the entry's keywords appeared in the message.
    Keyword,
}

impl QaMatchKind {
    /// Confidence assigned by the resolution policy.
    pub fn confidence(self) -> f64 {
        match self {
            QaMatchKind::Direct => 0.85,
            QaMatchKind::Keyword => 0.75,
        }
    }
}

/// A successful match against the Q&A database.
#[derive(Debug, Clone, PartialEq)]
pub struct QaMatch<'a> {
    pub entry: &'a QaEntry,
    pub kind: QaMatchKind,
}

/// Matches inbound messages against curated Q&A entries.
pub struct QaDatabaseMatcher;

impl QaDatabaseMatcher {
    /// Finds the best Q&A match for a message, if any.
    ///
    /// Disabled entries are skipped entirely in both phases.
    pub fn find_match<'a>(message: &str, entries: &'a [QaEntry]) -> Option<QaMatch<'a>> {
        let message = message.to_lowercase();

        // Phase A: direct bidirectional containment.
        for entry in entries.iter().filter(|e| e.enabled) {
            let question = entry.question.to_lowercase();
            if question.is_empty() {
                continue;
            }
            if message.contains(&question) || question.contains(&message) {
                return Some(QaMatch {
                    entry,
                    kind: QaMatchKind::Direct,
                });
            }
        }

        // Phase B: keyword containment.
        for entry in entries.iter().filter(|e| e.enabled) {
            let keyword_hit = entry
                .keywords
                .iter()
                .filter(|k| !k.trim().is_empty())
                .any(|keyword| message.contains(&keyword.to_lowercase()));
            if keyword_hit {
                return Some(QaMatch {
                    entry,
                    kind: QaMatchKind::Keyword,
                });
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(question: &str, answer: &str, keywords: &[&str], enabled: bool) -> QaEntry {
        QaEntry {
            question: question.to_string(),
            answer: answer.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            enabled,
        }
    }

    #[test]
    fn exact_question_is_direct_match() {
        let entries = vec![entry("What are your hours?", "9 to 5.", &[], true)];
        let m = QaDatabaseMatcher::find_match("What are your hours?", &entries).unwrap();
        assert_eq!(m.kind, QaMatchKind::Direct);
        assert_eq!(m.kind.confidence(), 0.85);
        assert_eq!(m.entry.answer, "9 to 5.");
    }

    #[test]
    fn question_inside_longer_message_is_direct_match() {
        let entries = vec![entry("what are your hours", "9 to 5.", &[], true)];
        let m =
            QaDatabaseMatcher::find_match("hey, what are your hours this week?", &entries).unwrap();
        assert_eq!(m.kind, QaMatchKind::Direct);
    }

    #[test]
    fn message_inside_question_is_direct_match() {
        // The permissive reverse direction: short message contained in the
        // configured question.
        let entries = vec![entry("what are your hours on weekends", "Closed.", &[], true)];
        let m = QaDatabaseMatcher::find_match("hours on weekends", &entries).unwrap();
        assert_eq!(m.kind, QaMatchKind::Direct);
    }

    #[test]
    fn keyword_match_is_phase_b() {
        let entries = vec![entry("Shipping policy", "Free over $50.", &["shipping"], true)];
        let m = QaDatabaseMatcher::find_match("how much is shipping to Ohio", &entries).unwrap();
        assert_eq!(m.kind, QaMatchKind::Keyword);
        assert_eq!(m.kind.confidence(), 0.75);
    }

    #[test]
    fn direct_phase_runs_over_all_entries_before_keywords() {
        // Entry 0 would keyword-match, but entry 1 direct-matches; the
        // direct phase completes first, so entry 1 wins.
        let entries = vec![
            entry("Returns", "Return policy.", &["refund"], true),
            entry("can I get a refund", "Refund policy.", &[], true),
        ];
        let m = QaDatabaseMatcher::find_match("can I get a refund", &entries).unwrap();
        assert_eq!(m.kind, QaMatchKind::Direct);
        assert_eq!(m.entry.answer, "Refund policy.");
    }

    #[test]
    fn first_entry_wins_within_a_phase() {
        let entries = vec![
            entry("pricing", "First answer.", &[], true),
            entry("pricing", "Second answer.", &[], true),
        ];
        let m = QaDatabaseMatcher::find_match("pricing", &entries).unwrap();
        assert_eq!(m.entry.answer, "First answer.");
    }

    #[test]
    fn disabled_entries_never_match() {
        let entries = vec![entry("pricing", "Hidden.", &["price"], false)];
        assert!(QaDatabaseMatcher::find_match("pricing", &entries).is_none());
        assert!(QaDatabaseMatcher::find_match("what is the price", &entries).is_none());
    }

    #[test]
    fn empty_question_does_not_match_everything() {
        // An empty question would be a substring of any message.
        let entries = vec![entry("", "Broken.", &[], true)];
        assert!(QaDatabaseMatcher::find_match("hello there", &entries).is_none());
    }

    #[test]
    fn no_entries_returns_none() {
        assert!(QaDatabaseMatcher::find_match("anything", &[]).is_none());
    }

    proptest! {
        // Disabled entries are excluded no matter the message content.
        #[test]
        fn disabled_entries_are_excluded(message in ".{0,64}") {
            let entries = vec![entry(&message, "answer", &[&message], false)];
            prop_assert!(QaDatabaseMatcher::find_match(&message, &entries).is_none());
        }
    }
}

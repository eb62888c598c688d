//! Per-conversation mutable state.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ConversationId, Timestamp};
use crate::domain::resolution::ResponseSource;

/// Mutable state accumulated across a conversation's lifetime.
///
/// Exactly one state exists per conversation id. Concurrent updates for the
/// same id are serialized by the conversation store; this type itself is a
/// plain aggregate with explicit mutators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationState {
    pub conversation_id: ConversationId,
    /// Number of inbound messages resolved for this conversation.
    pub message_count: u64,
    pub start_time: Timestamp,
    pub last_activity: Timestamp,
    /// Resolution sources observed, in order, most recent last.
    pub intent_history: Vec<String>,
    /// How many resolutions flagged escalation.
    pub escalation_attempts: u32,
}

/// Cap on retained intent history per conversation.
const MAX_INTENT_HISTORY: usize = 50;

impl ConversationState {
    /// Creates fresh state for a conversation's first message.
    pub fn new(conversation_id: ConversationId, now: Timestamp) -> Self {
        Self {
            conversation_id,
            message_count: 0,
            start_time: now,
            last_activity: now,
            intent_history: Vec::new(),
            escalation_attempts: 0,
        }
    }

    /// Records one resolved turn.
    pub fn record_turn(&mut self, source: ResponseSource, escalated: bool, now: Timestamp) {
        self.message_count += 1;
        self.last_activity = now;
        if escalated {
            self.escalation_attempts += 1;
        }

        let intent = serde_json::to_value(source)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| format!("{source:?}"));
        self.intent_history.push(intent);
        if self.intent_history.len() > MAX_INTENT_HISTORY {
            let excess = self.intent_history.len() - MAX_INTENT_HISTORY;
            self.intent_history.drain(..excess);
        }
    }

    /// True when the state has seen no activity since `cutoff`.
    pub fn idle_since(&self, cutoff: Timestamp) -> bool {
        self.last_activity.is_before(&cutoff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ConversationState {
        ConversationState::new(
            ConversationId::new("c-1").unwrap(),
            Timestamp::from_unix_secs(1_000),
        )
    }

    #[test]
    fn new_state_starts_empty() {
        let s = state();
        assert_eq!(s.message_count, 0);
        assert_eq!(s.escalation_attempts, 0);
        assert!(s.intent_history.is_empty());
        assert_eq!(s.start_time, s.last_activity);
    }

    #[test]
    fn record_turn_updates_counters_and_history() {
        let mut s = state();
        let later = Timestamp::from_unix_secs(1_060);
        s.record_turn(ResponseSource::QaDatabase, false, later);

        assert_eq!(s.message_count, 1);
        assert_eq!(s.last_activity, later);
        assert_eq!(s.intent_history, vec!["qa_database".to_string()]);
        assert_eq!(s.escalation_attempts, 0);
    }

    #[test]
    fn escalated_turns_increment_attempts() {
        let mut s = state();
        s.record_turn(
            ResponseSource::EscalationDetection,
            true,
            Timestamp::from_unix_secs(1_060),
        );
        s.record_turn(
            ResponseSource::HonestNoMatch,
            true,
            Timestamp::from_unix_secs(1_120),
        );
        assert_eq!(s.escalation_attempts, 2);
        assert_eq!(s.message_count, 2);
    }

    #[test]
    fn intent_history_is_bounded() {
        let mut s = state();
        for i in 0..(MAX_INTENT_HISTORY + 10) {
            s.record_turn(
                ResponseSource::Ai,
                false,
                Timestamp::from_unix_secs(1_000 + i as u64),
            );
        }
        assert_eq!(s.intent_history.len(), MAX_INTENT_HISTORY);
    }

    #[test]
    fn idle_since_compares_last_activity() {
        let s = state();
        assert!(s.idle_since(Timestamp::from_unix_secs(2_000)));
        assert!(!s.idle_since(Timestamp::from_unix_secs(500)));
    }
}

//! Bot configuration read by the resolution pipeline.
//!
//! Configuration is owned by the dashboard/configuration store and is
//! read-only during resolution. Every optional field is a typed `Option`
//! validated once at load time; the pipeline never re-checks config shape
//! at access sites.

use chrono::NaiveTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A curated question/answer entry in the bot's Q&A database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QaEntry {
    /// The canonical question text.
    pub question: String,
    /// The answer returned on a match.
    pub answer: String,
    /// Keywords that trigger a phase-B match, scanned in order.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Disabled entries are never matched.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Where a knowledge item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnowledgeSourceKind {
    /// Uploaded document.
    Upload,
    /// Crawled web page.
    Web,
}

/// An item in the bot's knowledge base.
///
/// Owned by the external knowledge-base collaborator; the pipeline treats
/// content and chunks as opaque input passed through to search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeItem {
    pub id: String,
    pub name: String,
    pub content: String,
    /// Pre-chunked content, produced externally.
    #[serde(default)]
    pub chunks: Vec<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub source: KnowledgeSourceKind,
}

/// Configured business hours for a bot.
///
/// Wire shape: `{enabled, start: "HH:MM", end: "HH:MM", timezone}`.
/// A window where `start > end` wraps past midnight (e.g. 22:00–06:00).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingHoursSpec {
    pub enabled: bool,
    /// Opening time, "HH:MM" in the configured timezone.
    pub start: String,
    /// Closing time, "HH:MM" in the configured timezone.
    pub end: String,
    /// IANA timezone name, e.g. "America/New_York".
    pub timezone: String,
}

impl OperatingHoursSpec {
    /// Parses the opening time.
    pub fn start_time(&self) -> Result<NaiveTime, BotConfigError> {
        parse_hhmm(&self.start)
    }

    /// Parses the closing time.
    pub fn end_time(&self) -> Result<NaiveTime, BotConfigError> {
        parse_hhmm(&self.end)
    }

    /// Resolves the configured timezone.
    pub fn tz(&self) -> Result<Tz, BotConfigError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| BotConfigError::InvalidTimezone(self.timezone.clone()))
    }

    /// Validates times and timezone. Called once when configuration loads.
    pub fn validate(&self) -> Result<(), BotConfigError> {
        self.start_time()?;
        self.end_time()?;
        self.tz()?;
        Ok(())
    }
}

fn parse_hhmm(value: &str) -> Result<NaiveTime, BotConfigError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| BotConfigError::InvalidTime(value.to_string()))
}

/// Errors raised when validating a bot configuration.
#[derive(Debug, Error)]
pub enum BotConfigError {
    /// A time field was not "HH:MM".
    #[error("invalid time of day: {0:?} (expected HH:MM)")]
    InvalidTime(String),

    /// The timezone is not a known IANA name.
    #[error("unknown timezone: {0:?}")]
    InvalidTimezone(String),

    /// The bot name is empty.
    #[error("bot name must not be empty")]
    EmptyName,
}

/// Full configuration for a single bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotConfig {
    pub name: String,
    /// Greeting returned by the chat-start endpoint.
    pub greeting: String,
    /// System prompt forwarded to the AI responder.
    pub system_prompt: String,
    /// Escalation keywords, scanned in configured order.
    #[serde(default)]
    pub escalation_keywords: Vec<String>,
    /// Q&A entries, scanned in configured order.
    #[serde(default)]
    pub qa_database: Vec<QaEntry>,
    /// Knowledge-base items, passed through to the search collaborator.
    #[serde(default)]
    pub knowledge_base: Vec<KnowledgeItem>,
    /// Business hours; absent means always online.
    #[serde(default)]
    pub operating_hours: Option<OperatingHoursSpec>,
}

impl BotConfig {
    /// Creates a minimal configuration with sensible copy for local use.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            greeting: format!("Hi! I'm {name}. How can I help you today?"),
            system_prompt: String::new(),
            escalation_keywords: Vec::new(),
            qa_database: Vec::new(),
            knowledge_base: Vec::new(),
            operating_hours: None,
            name,
        }
    }

    /// Validates the configuration once at load time.
    pub fn validate(&self) -> Result<(), BotConfigError> {
        if self.name.trim().is_empty() {
            return Err(BotConfigError::EmptyName);
        }
        if let Some(hours) = &self.operating_hours {
            hours.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(start: &str, end: &str, tz: &str) -> OperatingHoursSpec {
        OperatingHoursSpec {
            enabled: true,
            start: start.to_string(),
            end: end.to_string(),
            timezone: tz.to_string(),
        }
    }

    #[test]
    fn operating_hours_validate_accepts_well_formed_spec() {
        assert!(spec("09:00", "17:00", "UTC").validate().is_ok());
        assert!(spec("22:00", "06:00", "America/New_York").validate().is_ok());
    }

    #[test]
    fn operating_hours_validate_rejects_bad_time() {
        let err = spec("9am", "17:00", "UTC").validate().unwrap_err();
        assert!(matches!(err, BotConfigError::InvalidTime(_)));
    }

    #[test]
    fn operating_hours_validate_rejects_bad_timezone() {
        let err = spec("09:00", "17:00", "Mars/Olympus").validate().unwrap_err();
        assert!(matches!(err, BotConfigError::InvalidTimezone(_)));
    }

    #[test]
    fn bot_config_validate_rejects_empty_name() {
        let mut config = BotConfig::new("Bot");
        config.name = "  ".to_string();
        assert!(matches!(config.validate(), Err(BotConfigError::EmptyName)));
    }

    #[test]
    fn bot_config_validate_checks_nested_hours() {
        let mut config = BotConfig::new("Bot");
        config.operating_hours = Some(spec("25:00", "17:00", "UTC"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn qa_entry_enabled_defaults_to_true() {
        let entry: QaEntry = serde_json::from_str(
            r#"{"question": "What are your hours?", "answer": "9 to 5."}"#,
        )
        .unwrap();
        assert!(entry.enabled);
        assert!(entry.keywords.is_empty());
    }

    #[test]
    fn knowledge_source_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&KnowledgeSourceKind::Upload).unwrap(),
            "\"upload\""
        );
        assert_eq!(
            serde_json::to_string(&KnowledgeSourceKind::Web).unwrap(),
            "\"web\""
        );
    }

    #[test]
    fn bot_config_round_trips_through_json() {
        let mut config = BotConfig::new("Support Bot");
        config.escalation_keywords = vec!["human".to_string(), "agent".to_string()];
        config.operating_hours = Some(spec("09:00", "17:00", "UTC"));

        let json = serde_json::to_string(&config).unwrap();
        let parsed: BotConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}

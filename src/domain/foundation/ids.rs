//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a conversation.
///
/// Conversation ids are minted by the widget on the client side and are not
/// guaranteed to be UUIDs, so this wraps an arbitrary non-empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    /// Creates a ConversationId from a client-supplied string.
    ///
    /// Returns `None` for empty or whitespace-only input.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    /// Generates a fresh random ConversationId.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an organization (one bot configuration per org).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganizationId(String);

impl OrganizationId {
    /// The organization used when a request carries no explicit org id.
    pub const DEFAULT: &'static str = "default";

    /// Creates an OrganizationId from a string.
    ///
    /// Empty input falls back to the default organization.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        if id.trim().is_empty() {
            Self::default_org()
        } else {
            Self(id)
        }
    }

    /// Returns the default organization id.
    pub fn default_org() -> Self {
        Self(Self::DEFAULT.to_string())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for OrganizationId {
    fn default() -> Self {
        Self::default_org()
    }
}

impl fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_id_rejects_empty() {
        assert!(ConversationId::new("").is_none());
        assert!(ConversationId::new("   ").is_none());
    }

    #[test]
    fn conversation_id_accepts_arbitrary_strings() {
        let id = ConversationId::new("widget-abc-123").unwrap();
        assert_eq!(id.as_str(), "widget-abc-123");
    }

    #[test]
    fn conversation_id_generate_is_unique() {
        assert_ne!(ConversationId::generate(), ConversationId::generate());
    }

    #[test]
    fn organization_id_defaults_when_empty() {
        assert_eq!(OrganizationId::new("").as_str(), "default");
        assert_eq!(OrganizationId::default().as_str(), "default");
    }

    #[test]
    fn organization_id_keeps_explicit_value() {
        assert_eq!(OrganizationId::new("acme").as_str(), "acme");
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = ConversationId::new("c-1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"c-1\"");

        let org = OrganizationId::new("acme");
        assert_eq!(serde_json::to_string(&org).unwrap(), "\"acme\"");
    }
}

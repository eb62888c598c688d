//! Ports - interfaces to external collaborators.
//!
//! The resolution pipeline depends only on these traits; adapters provide
//! the concrete integrations.

mod ai_responder;
mod config_store;
mod conversation_store;
mod knowledge_search;

pub use ai_responder::{AiError, AiRequest, AiResponder, AiResponse};
pub use config_store::{BotConfigStore, ConfigStoreError};
pub use conversation_store::{ConversationStore, ConversationStoreError};
pub use knowledge_search::{KnowledgeAnswer, KnowledgeError, KnowledgeSearch, KnowledgeVerdict};

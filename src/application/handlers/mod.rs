//! Application-layer request handlers.

pub mod chat;

pub use chat::{ChatService, ChatServiceError, ConversationStart, HoursStatus};

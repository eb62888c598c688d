//! Bot configuration aggregate.

mod config;

pub use config::{
    BotConfig, BotConfigError, KnowledgeItem, KnowledgeSourceKind, OperatingHoursSpec, QaEntry,
};

//! Chat Resolver - Automated Response Resolution for Support Bots
//!
//! This crate decides how a support bot answers each inbound customer
//! message: operating-hours gate, AI attempt, and a deterministic fallback
//! chain over escalation keywords, the Q&A database, and the knowledge
//! base.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

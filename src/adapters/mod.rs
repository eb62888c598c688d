//! Adapters: implementations of ports against concrete infrastructure.

pub mod ai;
pub mod config_store;
pub mod http;
pub mod knowledge;
pub mod state_store;

//! Domain layer: pure resolution logic and the types it operates on.

pub mod bot;
pub mod foundation;
pub mod resolution;

//! Cross-cutting concerns shared by wiring and adapters.

pub mod config;
pub mod logging;

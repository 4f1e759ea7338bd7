//! Infrastructure adapters. Implement ports.
//!
//! Gemini (outbound), HTTP callable and terminal client (inbound). Map errors to DomainError.

pub mod ai;
pub mod http;
pub mod ui;

//! AI adapter module. Implements the generative-text ports.
//!
//! Provides the Gemini adapter and a mock adapter for local development.

pub mod gemini_adapter;
pub mod mock_adapter;

pub use gemini_adapter::{GeminiAdapter, GeminiConnector};
pub use mock_adapter::{MockConnector, MockGenerativeAdapter};

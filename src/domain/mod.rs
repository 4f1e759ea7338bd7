//! Core domain layer. No external I/O dependencies.
//!
//! Entities, the report prompt and the error taxonomy live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod invocation;
pub mod prompt;

pub use entities::{AnalysisRequest, AnalysisResult, Credential, Prompt, SUCCESS_MESSAGE};
pub use errors::{AnalysisError, DomainError, ErrorCode, ErrorKind};
pub use invocation::{InvocationContext, InvocationState};
pub use prompt::build_prompt;

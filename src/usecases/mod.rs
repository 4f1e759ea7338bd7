//! Application use cases. Orchestrate domain logic via ports.

pub mod analysis_service;
pub mod request_gateway;

#[cfg(test)]
pub(crate) mod test_support;

pub use analysis_service::AnalysisService;
pub use request_gateway::{RequestGateway, validate_payload};

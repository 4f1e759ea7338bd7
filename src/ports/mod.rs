//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: Called by HTTP/terminal adapters into the application
//! - Outbound: Called by application into infrastructure

pub mod inbound;
pub mod outbound;

pub use inbound::AnalysisPort;
pub use outbound::{GenerativeTextPort, UpstreamConnector};

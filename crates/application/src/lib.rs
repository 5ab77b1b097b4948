//! Relay DNS Application Layer
pub mod ports;
pub mod services;

pub use ports::{UpstreamHealthPort, UpstreamStatus};
pub use services::DomainRouterService;

// Re-export for convenience
pub use relay_dns_domain::{Config, DomainTable, RelayError};

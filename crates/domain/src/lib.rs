//! Relay DNS Domain Layer
pub mod config;
pub mod domain_name;
pub mod errors;
pub mod routing;
pub mod upstream;

pub use config::{Config, ConfigError, ForwardZone, LoggingConfig, RouterConfig};
pub use domain_name::DomainName;
pub use errors::RelayError;
pub use routing::{DomainRoute, DomainTable};
pub use upstream::{ServerId, ServerPool, UpstreamServer};

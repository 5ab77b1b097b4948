mod errors;
mod logging;
mod root;
mod router;
mod zones;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::Config;
pub use router::RouterConfig;
pub use zones::ForwardZone;

mod upstream_health;

pub use upstream_health::{UpstreamHealthPort, UpstreamStatus};

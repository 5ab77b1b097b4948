use async_trait::async_trait;
use chrono::{DateTime, Utc};
use relay_dns_domain::UpstreamServer;
use std::net::SocketAddr;

/// Status of an upstream DNS server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamStatus {
    Active,
    Inactive { since: DateTime<Utc> },
}

impl From<&UpstreamServer> for UpstreamStatus {
    fn from(server: &UpstreamServer) -> Self {
        match server.inactive_since {
            None => UpstreamStatus::Active,
            Some(since) => UpstreamStatus::Inactive { since },
        }
    }
}

/// Port for the external health-check collaborator.
///
/// The routing core deactivates servers on reported failures and never
/// reactivates them on its own; whatever polls the servers uses this port
/// to read deactivation state and to clear it once a server answers
/// again.
#[async_trait]
pub trait UpstreamHealthPort: Send + Sync {
    /// Every upstream server in every route's pool, with its status.
    async fn upstream_status(&self) -> Vec<(SocketAddr, UpstreamStatus)>;

    /// Clear the deactivation flag on every record with this address.
    /// Returns whether any record was cleared.
    async fn reactivate(&self, address: SocketAddr) -> bool;
}

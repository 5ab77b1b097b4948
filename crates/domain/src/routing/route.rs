use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain_name::DomainName;
use crate::upstream::{ServerId, ServerPool, UpstreamServer};

/// One routing entry: a domain suffix, its pool of candidate upstream
/// servers, and the sticky choice of which pool member currently serves
/// queries for the domain.
///
/// `current` is a handle into `pool`, never a reference, so it cannot
/// outlive its target. An absent `current` means "no known active server;
/// rescan the pool from the top on the next request".
#[derive(Debug, Clone)]
pub struct DomainRoute {
    name: Option<DomainName>,
    pub pool: ServerPool,
    current: Option<ServerId>,
}

impl DomainRoute {
    /// `name = None` builds the default route.
    pub fn new(name: Option<DomainName>) -> Self {
        Self {
            name,
            pool: ServerPool::new(),
            current: None,
        }
    }

    pub fn name(&self) -> Option<&DomainName> {
        self.name.as_ref()
    }

    pub fn is_default(&self) -> bool {
        self.name.is_none()
    }

    /// Display label, `(default)` for the default route.
    pub fn label(&self) -> &str {
        self.name.as_ref().map_or("(default)", DomainName::as_str)
    }

    /// Switch to the next active server in the pool.
    ///
    /// Scans forward from the current server's successor, wrapping, and
    /// records the result (including "none left") as the new sticky
    /// choice. With no current server the scan restarts from the top of
    /// the pool, so a record whose deactivation flag was cleared by the
    /// health-check collaborator gets picked up again.
    pub fn next_active(&mut self) -> Option<&UpstreamServer> {
        self.current = self.pool.next_active(self.current);
        match self.current.and_then(|id| self.pool.get(id)) {
            Some(server) => {
                debug!(server = %server.address, domain = self.label(), "Selected upstream server");
                Some(server)
            }
            None => {
                debug!(domain = self.label(), "No active servers for domain");
                None
            }
        }
    }

    /// The server currently handling queries for this domain.
    ///
    /// Sticky: the cached choice is returned as long as it is still
    /// active; otherwise the next active server is looked up and cached,
    /// so this call fixes the sticky choice as a side effect.
    pub fn current_server(&mut self) -> Option<&UpstreamServer> {
        let cached_active = self
            .current
            .and_then(|id| self.pool.get(id))
            .is_some_and(UpstreamServer::is_active);
        if cached_active {
            return self.current.and_then(|id| self.pool.get(id));
        }
        self.next_active()
    }

    /// Read-only peek at the sticky choice; does not scan or cache.
    pub fn selected_server(&self) -> Option<&UpstreamServer> {
        self.current.and_then(|id| self.pool.get(id))
    }

    /// Report a query failure on the current server.
    ///
    /// Stamps the current server's deactivation timestamp, the only place
    /// the flag is ever set, then switches to the next active server.
    /// `None` means the pool has no active server left; callers answer
    /// the client with a server failure rather than crash.
    pub fn deactivate_current(&mut self, now: DateTime<Utc>) -> Option<&UpstreamServer> {
        let deactivated = self.current.and_then(|id| {
            let server = self.pool.get_mut(id)?;
            server.deactivate(now);
            Some(server.address)
        });
        if let Some(address) = deactivated {
            info!(server = %address, domain = self.label(), "Deactivating DNS server");
        }
        self.next_active()
    }
}

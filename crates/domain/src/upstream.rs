use chrono::{DateTime, Utc};
use std::net::SocketAddr;

/// Stable handle to a server record inside its [`ServerPool`].
///
/// Records are never removed from a pool during operation, so a handle
/// taken from a pool stays valid for that pool's whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerId(usize);

impl ServerId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One candidate upstream DNS server.
///
/// `inactive_since` doubles as the deactivation flag and the audit value
/// an external reactivation policy reads. The routing core only ever sets
/// it (on a reported failure) and clears it (via [`ServerPool::reactivate`],
/// on behalf of the health-check collaborator); nothing here expires it.
#[derive(Debug, Clone)]
pub struct UpstreamServer {
    pub address: SocketAddr,
    pub inactive_since: Option<DateTime<Utc>>,
}

impl UpstreamServer {
    pub fn new(address: SocketAddr) -> Self {
        Self {
            address,
            inactive_since: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.inactive_since.is_none()
    }

    pub fn deactivate(&mut self, now: DateTime<Utc>) {
        self.inactive_since = Some(now);
    }

    pub fn reactivate(&mut self) {
        self.inactive_since = None;
    }
}

/// The pool of candidate upstream servers belonging to one domain route.
#[derive(Debug, Clone, Default)]
pub struct ServerPool {
    servers: Vec<UpstreamServer>,
}

impl ServerPool {
    pub fn new() -> Self {
        Self {
            servers: Vec::new(),
        }
    }

    pub fn push(&mut self, address: SocketAddr) -> ServerId {
        self.servers.push(UpstreamServer::new(address));
        ServerId(self.servers.len() - 1)
    }

    pub fn get(&self, id: ServerId) -> Option<&UpstreamServer> {
        self.servers.get(id.0)
    }

    pub fn get_mut(&mut self, id: ServerId) -> Option<&mut UpstreamServer> {
        self.servers.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &UpstreamServer> {
        self.servers.iter()
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// Circular scan for the next active record.
    ///
    /// With `from = Some(start)` the scan begins at the successor of
    /// `start`, wraps past the end of the pool, and considers `start`
    /// itself last, so a domain keeps its current server as long as that
    /// server is the only active one. With `from = None` the scan covers
    /// the whole pool from the top, which is what lets an externally
    /// reactivated server be picked up again after every record had been
    /// deactivated.
    pub fn next_active(&self, from: Option<ServerId>) -> Option<ServerId> {
        let len = self.servers.len();
        if len == 0 {
            return None;
        }
        match from {
            Some(start) if start.0 < len => (1..=len)
                .map(|step| (start.0 + step) % len)
                .find(|&idx| self.servers[idx].is_active())
                .map(ServerId),
            _ => self
                .servers
                .iter()
                .position(UpstreamServer::is_active)
                .map(ServerId),
        }
    }

    /// Clear the deactivation flag on every record with this address.
    ///
    /// Called by the external health-check collaborator; returns whether
    /// any record was actually cleared.
    pub fn reactivate(&mut self, address: SocketAddr) -> bool {
        let mut cleared = false;
        for server in &mut self.servers {
            if server.address == address && !server.is_active() {
                server.reactivate();
                cleared = true;
            }
        }
        cleared
    }
}

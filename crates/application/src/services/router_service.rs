use async_trait::async_trait;
use chrono::Utc;
use relay_dns_domain::{Config, DomainTable, ForwardZone, RelayError};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::ports::{UpstreamHealthPort, UpstreamStatus};

const DEFAULT_DNS_PORT: u16 = 53;

/// Facade over the domain routing table for the query-dispatch layer.
///
/// The table itself is single-threaded and synchronous; the lock here is
/// what serializes concurrent dispatch workers onto it, selection and
/// failure reporting both mutate the sticky per-route state.
#[derive(Debug)]
pub struct DomainRouterService {
    table: Arc<RwLock<DomainTable>>,
    max_name_length: usize,
}

impl DomainRouterService {
    pub fn new(table: DomainTable, max_name_length: usize) -> Self {
        Self {
            table: Arc::new(RwLock::new(table)),
            max_name_length,
        }
    }

    /// Build the routing table from configuration.
    ///
    /// Default servers feed the default route's pool; forward zones are
    /// added in config order, so of two overlapping zones the later one
    /// wins a lookup.
    pub fn from_config(config: &Config) -> Result<Self, RelayError> {
        config
            .validate()
            .map_err(|e| RelayError::ConfigError(e.to_string()))?;

        let max_len = config.router.max_name_length;
        let mut table = DomainTable::new();

        for server in &config.default_servers {
            let address = parse_upstream_addr(server)?;
            table.default_route_mut().pool.push(address);
        }

        for zone in &config.forward_zones {
            let route = table.add_domain(Some(&zone.domain), max_len);
            for server in &zone.servers {
                route.pool.push(parse_upstream_addr(server)?);
            }
            debug!(
                domain = %zone.domain,
                servers = zone.servers.len(),
                "Forward zone registered"
            );
        }

        info!(
            zones = config.forward_zones.len(),
            default_servers = config.default_servers.len(),
            "Domain routing table built"
        );
        Ok(Self::new(table, max_len))
    }

    /// Resolve a query name to the upstream server that should receive it.
    ///
    /// Suffix-resolves the name (falling back to the default route) and
    /// returns the route's sticky server choice, fixing that choice as a
    /// side effect. `None` means no active server for this domain right
    /// now; the dispatch layer answers the client with a server failure.
    #[instrument(skip(self))]
    pub async fn select_upstream(&self, name: &str) -> Option<SocketAddr> {
        let mut table = self.table.write().await;
        let route = table.find_by_suffix_mut(Some(name), self.max_name_length);
        route.current_server().map(|server| server.address)
    }

    /// Report that the upstream serving this name failed to answer.
    ///
    /// Deactivates the route's current server with a timestamp and
    /// returns the next active one, or `None` when the pool is
    /// exhausted.
    #[instrument(skip(self))]
    pub async fn report_failure(&self, name: &str) -> Option<SocketAddr> {
        let mut table = self.table.write().await;
        let route = table.find_by_suffix_mut(Some(name), self.max_name_length);
        route
            .deactivate_current(Utc::now())
            .map(|server| server.address)
    }

    /// Register a forward zone at runtime; `domain = None` extends the
    /// default route's pool.
    pub async fn add_zone(
        &self,
        domain: Option<&str>,
        servers: &[SocketAddr],
    ) -> Result<(), RelayError> {
        if let Some(domain) = domain {
            ForwardZone::validate_domain(domain).map_err(RelayError::InvalidDomainName)?;
        }
        let mut table = self.table.write().await;
        let route = table.add_domain(domain, self.max_name_length);
        for &address in servers {
            route.pool.push(address);
        }
        debug!(
            domain = route.label(),
            servers = servers.len(),
            "Forward zone registered"
        );
        Ok(())
    }

    /// Drop every configured zone, keeping the default route.
    pub async fn clear_zones(&self) {
        let mut table = self.table.write().await;
        table.clear();
        debug!("Domain routing table cleared");
    }

    /// Number of configured zones, default route excluded.
    pub async fn zone_count(&self) -> usize {
        self.table.read().await.len()
    }
}

#[async_trait]
impl UpstreamHealthPort for DomainRouterService {
    async fn upstream_status(&self) -> Vec<(SocketAddr, UpstreamStatus)> {
        let table = self.table.read().await;
        table
            .iter_routes()
            .flat_map(|route| {
                route
                    .pool
                    .iter()
                    .map(|server| (server.address, UpstreamStatus::from(server)))
            })
            .collect()
    }

    async fn reactivate(&self, address: SocketAddr) -> bool {
        let mut table = self.table.write().await;
        let mut cleared = false;
        for route in table.iter_routes_mut() {
            if route.pool.reactivate(address) {
                cleared = true;
            }
        }
        if cleared {
            info!(server = %address, "Upstream server reactivated");
        }
        cleared
    }
}

/// Parse an upstream endpoint, defaulting to port 53 for a bare address.
fn parse_upstream_addr(raw: &str) -> Result<SocketAddr, RelayError> {
    if let Ok(address) = raw.parse::<SocketAddr>() {
        return Ok(address);
    }
    raw.parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, DEFAULT_DNS_PORT))
        .map_err(|_| RelayError::InvalidServerAddress(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::parse_upstream_addr;

    #[test]
    fn parses_full_socket_addr() {
        let addr = parse_upstream_addr("192.0.2.1:5353").unwrap();
        assert_eq!(addr.to_string(), "192.0.2.1:5353");
    }

    #[test]
    fn bare_ip_gets_default_port() {
        let addr = parse_upstream_addr("192.0.2.1").unwrap();
        assert_eq!(addr.port(), 53);
    }

    #[test]
    fn bare_ipv6_gets_default_port() {
        let addr = parse_upstream_addr("2001:db8::1").unwrap();
        assert_eq!(addr.port(), 53);
        assert!(addr.is_ipv6());
    }

    #[test]
    fn rejects_hostname() {
        assert!(parse_upstream_addr("dns.example.com").is_err());
    }
}

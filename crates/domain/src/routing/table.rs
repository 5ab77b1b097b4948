use tracing::debug;

use super::matcher;
use super::route::DomainRoute;
use crate::domain_name::DomainName;

/// The routing table: one route per configured domain suffix plus the
/// default route matched when nothing else does.
///
/// Routes are stored most-recently-added first, so of two overlapping
/// suffixes the one registered later wins a lookup. The default route is
/// an explicit field rather than a list member; it owns its own server
/// pool and is never removed.
#[derive(Debug, Clone)]
pub struct DomainTable {
    default_route: DomainRoute,
    routes: Vec<DomainRoute>,
}

impl DomainTable {
    pub fn new() -> Self {
        Self {
            default_route: DomainRoute::new(None),
            routes: Vec::new(),
        }
    }

    pub fn default_route(&self) -> &DomainRoute {
        &self.default_route
    }

    pub fn default_route_mut(&mut self) -> &mut DomainRoute {
        &mut self.default_route
    }

    /// Configured routes, most recently added first, without the default.
    pub fn routes(&self) -> &[DomainRoute] {
        &self.routes
    }

    /// Number of configured domain routes, default excluded.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Every route, the default last.
    pub fn iter_routes(&self) -> impl Iterator<Item = &DomainRoute> {
        self.routes
            .iter()
            .chain(std::iter::once(&self.default_route))
    }

    pub fn iter_routes_mut(&mut self) -> impl Iterator<Item = &mut DomainRoute> {
        self.routes
            .iter_mut()
            .chain(std::iter::once(&mut self.default_route))
    }

    /// Register a domain, keeping at most `max_len` bytes of the name.
    ///
    /// `name = None` addresses the default route instead of creating a
    /// new one. The new route is placed in front of older ones.
    pub fn add_domain(&mut self, name: Option<&str>, max_len: usize) -> &mut DomainRoute {
        match name {
            Some(name) => {
                let route = DomainRoute::new(Some(DomainName::clamp(name, max_len)));
                debug!(domain = route.label(), "Domain route added");
                self.routes.insert(0, route);
                &mut self.routes[0]
            }
            None => &mut self.default_route,
        }
    }

    /// Exact-name lookup.
    ///
    /// An absent query name resolves to the default route. Otherwise the
    /// query must equal a stored name byte-for-byte, compared over the
    /// full lengths; a miss is `None`, never the default route, so
    /// callers can tell "not configured" from "matched default".
    pub fn find_exact(&self, name: Option<&str>) -> Option<&DomainRoute> {
        let Some(name) = name else {
            return Some(&self.default_route);
        };
        self.routes
            .iter()
            .find(|route| route.name().is_some_and(|stored| *stored == *name))
    }

    pub fn find_exact_mut(&mut self, name: Option<&str>) -> Option<&mut DomainRoute> {
        let Some(name) = name else {
            return Some(&mut self.default_route);
        };
        let pos = self
            .routes
            .iter()
            .position(|route| route.name().is_some_and(|stored| *stored == *name))?;
        Some(&mut self.routes[pos])
    }

    /// Suffix lookup: the route whose domain the query falls under.
    ///
    /// Comparisons are bounded by `max_len`. Unlike [`find_exact`], a
    /// miss resolves to the default route, never to "not found", so a
    /// suffix lookup always yields some pool to forward to.
    ///
    /// [`find_exact`]: DomainTable::find_exact
    pub fn find_by_suffix(&self, name: Option<&str>, max_len: usize) -> &DomainRoute {
        match self.suffix_position(name, max_len) {
            SuffixHit::Default => &self.default_route,
            SuffixHit::Route(pos) => &self.routes[pos],
        }
    }

    pub fn find_by_suffix_mut(&mut self, name: Option<&str>, max_len: usize) -> &mut DomainRoute {
        match self.suffix_position(name, max_len) {
            SuffixHit::Default => &mut self.default_route,
            SuffixHit::Route(pos) => &mut self.routes[pos],
        }
    }

    fn suffix_position(&self, name: Option<&str>, max_len: usize) -> SuffixHit {
        let Some(name) = name else {
            return SuffixHit::Default;
        };
        self.routes
            .iter()
            .position(|route| {
                route.name().is_some_and(|stored| {
                    matcher::suffix_matches(stored.as_bytes(), name.as_bytes(), max_len)
                })
            })
            .map_or(SuffixHit::Default, SuffixHit::Route)
    }

    /// Remove a route by exact name. Removing a name that was never
    /// registered is a no-op.
    pub fn remove(&mut self, name: &str) -> Option<DomainRoute> {
        let pos = self
            .routes
            .iter()
            .position(|route| route.name().is_some_and(|stored| *stored == *name));
        match pos {
            Some(pos) => Some(self.routes.remove(pos)),
            None => {
                debug!(domain = name, "Tried to remove an unknown domain route");
                None
            }
        }
    }

    /// Drop every configured route; the default route and its pool stay.
    pub fn clear(&mut self) {
        self.routes.clear();
    }
}

impl Default for DomainTable {
    fn default() -> Self {
        Self::new()
    }
}

enum SuffixHit {
    Default,
    Route(usize),
}

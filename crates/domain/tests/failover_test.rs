use chrono::Utc;
use relay_dns_domain::{DomainName, DomainRoute};
use std::net::SocketAddr;

fn addr(last: u8) -> SocketAddr {
    format!("10.0.0.{last}:53").parse().unwrap()
}

fn route_with_servers(count: u8) -> DomainRoute {
    let mut route = DomainRoute::new(Some(DomainName::clamp("example.com", 255)));
    for i in 1..=count {
        route.pool.push(addr(i));
    }
    route
}

// ── selection ─────────────────────────────────────────────────────────────────

#[test]
fn test_first_selection_scans_from_pool_start() {
    let mut route = route_with_servers(3);
    assert_eq!(route.current_server().map(|s| s.address), Some(addr(1)));
}

#[test]
fn test_selection_is_sticky() {
    let mut route = route_with_servers(3);
    for _ in 0..5 {
        assert_eq!(route.current_server().map(|s| s.address), Some(addr(1)));
    }
    assert_eq!(route.selected_server().map(|s| s.address), Some(addr(1)));
}

#[test]
fn test_selection_skips_deactivated_servers() {
    let mut route = route_with_servers(3);
    let first = route.pool.next_active(None).unwrap();
    route.pool.get_mut(first).unwrap().deactivate(Utc::now());

    assert_eq!(route.current_server().map(|s| s.address), Some(addr(2)));
}

#[test]
fn test_empty_pool_selects_none() {
    let mut route = DomainRoute::new(None);
    assert!(route.current_server().is_none());
    assert!(route.next_active().is_none());
}

#[test]
fn test_sole_active_server_is_kept_across_rescans() {
    let mut route = route_with_servers(3);
    route.current_server();
    route.deactivate_current(Utc::now());
    route.deactivate_current(Utc::now());

    // Only the third server is active now; an explicit rescan wraps the
    // whole pool and lands back on it.
    assert_eq!(route.next_active().map(|s| s.address), Some(addr(3)));
    assert_eq!(route.next_active().map(|s| s.address), Some(addr(3)));
}

// ── failure reporting ─────────────────────────────────────────────────────────

#[test]
fn test_reported_failure_stamps_timestamp_and_fails_over() {
    let mut route = route_with_servers(3);
    route.current_server();

    let next = route.deactivate_current(Utc::now());
    assert_eq!(next.map(|s| s.address), Some(addr(2)));

    let first = route.pool.iter().find(|s| s.address == addr(1)).unwrap();
    assert!(first.inactive_since.is_some());
}

#[test]
fn test_failures_step_through_pool_in_order() {
    let mut route = route_with_servers(3);
    route.current_server();

    assert_eq!(
        route.deactivate_current(Utc::now()).map(|s| s.address),
        Some(addr(2))
    );
    assert_eq!(
        route.deactivate_current(Utc::now()).map(|s| s.address),
        Some(addr(3))
    );
    assert!(route.deactivate_current(Utc::now()).is_none());
    assert!(route.pool.iter().all(|s| !s.is_active()));
}

#[test]
fn test_failure_report_without_current_selects_without_stamping() {
    let mut route = route_with_servers(2);

    // No server was ever selected, so there is nothing to deactivate;
    // the call still yields a server to use.
    assert_eq!(
        route.deactivate_current(Utc::now()).map(|s| s.address),
        Some(addr(1))
    );
    assert!(route.pool.iter().all(|s| s.is_active()));
}

// ── recovery ──────────────────────────────────────────────────────────────────

#[test]
fn test_exhausted_pool_rescans_from_start_after_reactivation() {
    let mut route = route_with_servers(3);
    route.current_server();
    route.deactivate_current(Utc::now());
    route.deactivate_current(Utc::now());
    assert!(route.deactivate_current(Utc::now()).is_none());
    assert!(route.current_server().is_none());

    assert!(route.pool.reactivate(addr(1)));
    assert_eq!(route.current_server().map(|s| s.address), Some(addr(1)));
}

#[test]
fn test_reactivate_unknown_address_clears_nothing() {
    let mut route = route_with_servers(2);
    route.current_server();
    route.deactivate_current(Utc::now());

    assert!(!route.pool.reactivate(addr(9)));
    assert!(!route.pool.reactivate(addr(2)));
}

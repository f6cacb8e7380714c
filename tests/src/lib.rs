//! Shared helpers for the end-to-end scan tests.

use std::net::{IpAddr, Ipv4Addr};

use knockr_core::resolver::ResolvedTarget;
use tokio::net::TcpListener;

pub const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

pub fn localhost_target() -> ResolvedTarget {
    ResolvedTarget {
        input: "127.0.0.1".to_string(),
        addr: LOCALHOST,
    }
}

/// Binds an ephemeral localhost listener and reports its port.
pub async fn spawn_listener() -> (TcpListener, u16) {
    let listener = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, port)
}

/// Harvests `n` distinct free ports by binding and releasing them.
/// Racy by nature, but good enough for loopback tests.
pub async fn free_ports(n: usize) -> Vec<u16> {
    let mut listeners = Vec::with_capacity(n);
    for _ in 0..n {
        listeners.push(TcpListener::bind((LOCALHOST, 0)).await.unwrap());
    }
    listeners
        .iter()
        .map(|l| l.local_addr().unwrap().port())
        .collect()
}

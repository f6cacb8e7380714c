//! Bounded-time TCP connect probe against a single (address, port).

use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use knockr_common::result::PortResult;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Classifies one connect attempt, never taking longer than `deadline`.
///
/// A completed handshake is OPEN, a refusal or an expired deadline is
/// CLOSED, and anything else the transport throws (unreachable
/// network, exhausted descriptors) becomes an ERROR result carrying
/// the cause. This function never returns `Err`: one broken port must
/// not abort the scan around it. The stream, when one is opened, is
/// dropped before returning on every path.
pub async fn probe(addr: IpAddr, port: u16, deadline: Duration) -> PortResult {
    let sock_addr = SocketAddr::new(addr, port);

    match timeout(deadline, TcpStream::connect(sock_addr)).await {
        Ok(Ok(_stream)) => PortResult::open(port),
        Ok(Err(err)) if is_refusal(&err) => PortResult::closed(port),
        Ok(Err(err)) => PortResult::error(port, err.to_string()),
        Err(_elapsed) => PortResult::closed(port),
    }
}

fn is_refusal(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
    )
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use knockr_common::result::PortStatus;
    use std::net::Ipv4Addr;
    use tokio::net::TcpListener;

    const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
    const TEST_DEADLINE: Duration = Duration::from_millis(500);

    #[tokio::test]
    async fn listening_port_is_open() {
        let listener = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let result = probe(LOCALHOST, port, TEST_DEADLINE).await;

        assert_eq!(result.status, PortStatus::Open);
        assert_eq!(result.port, port);
        assert_eq!(result.detail, None);
    }

    #[tokio::test]
    async fn vacated_port_is_closed() {
        let listener = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let result = probe(LOCALHOST, port, TEST_DEADLINE).await;

        assert_eq!(result.status, PortStatus::Closed);
    }

    #[tokio::test]
    async fn probe_does_not_leak_connections() {
        let listener = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
        let port = listener.local_addr().unwrap().port();

        // If probes held their streams open the accept backlog would
        // fill well before this loop finished.
        for _ in 0..64 {
            let result = probe(LOCALHOST, port, TEST_DEADLINE).await;
            assert_eq!(result.status, PortStatus::Open);
        }
    }

    #[tokio::test]
    #[ignore]
    async fn unroutable_address_times_out_as_closed() {
        // TEST-NET-1, reserved and unrouted. Needs outbound network.
        let ip = IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1));
        let result = probe(ip, 80, Duration::from_millis(250)).await;
        assert_eq!(result.status, PortStatus::Closed);
    }
}

//! Maps a hostname or literal address to the address a scan will probe.

use std::net::IpAddr;

use knockr_common::error::ScanError;
use tokio::net::lookup_host;

/// A target that has passed name resolution. Lives for one scan session.
#[derive(Debug, Clone)]
pub struct ResolvedTarget {
    /// The target exactly as the user gave it.
    pub input: String,
    pub addr: IpAddr,
}

/// Resolves `target` with a single lookup attempt.
///
/// A literal IP parses directly and never touches DNS. Hostnames get
/// one `lookup_host` round; IPv4 answers are preferred when both
/// families come back. There is no retry and no partial fallback: any
/// lookup failure, transient or not, surfaces as
/// [`ScanError::Resolution`] and is fatal to the whole run.
pub async fn resolve(target: &str) -> Result<ResolvedTarget, ScanError> {
    if let Ok(addr) = target.parse::<IpAddr>() {
        return Ok(ResolvedTarget { input: target.to_string(), addr });
    }

    // The port is irrelevant here; lookup_host just wants a socket pair.
    let addrs: Vec<IpAddr> = lookup_host((target, 0u16))
        .await
        .map_err(|_| ScanError::Resolution(target.to_string()))?
        .map(|sock_addr| sock_addr.ip())
        .collect();

    let addr = addrs
        .iter()
        .copied()
        .find(|addr| addr.is_ipv4())
        .or_else(|| addrs.first().copied())
        .ok_or_else(|| ScanError::Resolution(target.to_string()))?;

    Ok(ResolvedTarget { input: target.to_string(), addr })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

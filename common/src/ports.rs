//! Port selection model and port-set derivation.
//!
//! A [`PortSelection`] captures which part of the port space a scan
//! covers: one port, an inclusive range, or everything. Building the
//! concrete port set revalidates the bounds even though the CLI
//! already did, so a selection constructed by other callers cannot
//! smuggle an invalid set into the engine.

use std::fmt;
use std::str::FromStr;

use crate::error::ScanError;

pub const MIN_PORT: u16 = 1;
pub const MAX_PORT: u16 = 65535;

/// A validated request handed to the scanning core.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// Hostname or IP literal.
    pub target: String,
    pub selection: PortSelection,
}

/// Which ports a scan covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortSelection {
    Single(u16),
    Range { start: u16, end: u16 },
    All,
}

impl PortSelection {
    /// Derives the ordered set of ports to probe: distinct, ascending,
    /// all within [1, 65535].
    pub fn build(&self) -> Result<Vec<u16>, ScanError> {
        match *self {
            Self::Single(port) => {
                ensure_valid(port)?;
                Ok(vec![port])
            }
            Self::Range { start, end } => {
                ensure_valid(start)?;
                ensure_valid(end)?;
                if start > end {
                    return Err(ScanError::InvertedRange { start, end });
                }
                Ok((start..=end).collect())
            }
            Self::All => Ok((MIN_PORT..=MAX_PORT).collect()),
        }
    }
}

impl fmt::Display for PortSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Single(port) => write!(f, "port {port}"),
            Self::Range { start, end } => write!(f, "ports {start}-{end}"),
            Self::All => write!(f, "all ports ({MIN_PORT}-{MAX_PORT})"),
        }
    }
}

fn ensure_valid(port: u16) -> Result<(), ScanError> {
    // u16 already caps the upper bound; only 0 can slip through.
    if port < MIN_PORT {
        return Err(ScanError::PortOutOfRange(port));
    }
    Ok(())
}

/// An inclusive port range in the exact `<start>-<end>` wire format
/// the `--port-range` flag accepts, e.g. `20-80`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRange {
    pub start: u16,
    pub end: u16,
}

impl FromStr for PortRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((start_str, end_str)) = s.split_once('-') else {
            return Err(format!(
                "invalid port range '{s}': expected <start>-<end>, e.g. 20-80"
            ));
        };

        let start = start_str
            .parse::<u16>()
            .map_err(|e| format!("invalid start port '{start_str}': {e}"))?;
        let end = end_str
            .parse::<u16>()
            .map_err(|e| format!("invalid end port '{end_str}': {e}"))?;

        Ok(Self { start, end })
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

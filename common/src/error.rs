use thiserror::Error;

/// Failures that abort a scan before any probing starts.
///
/// Per-port transport failures are deliberately absent here: a probe
/// that cannot reach its port yields a `PortResult` with
/// [`PortStatus::Error`](crate::result::PortStatus) and the scan
/// carries on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    /// A port fell outside the valid 1-65535 space.
    #[error("port {0} is outside the valid range 1-65535")]
    PortOutOfRange(u16),

    /// A range was given with its bounds swapped.
    #[error("invalid port range: start {start} is greater than end {end}")]
    InvertedRange { start: u16, end: u16 },

    /// The target could not be mapped to a network address.
    #[error("could not resolve target '{0}'")]
    Resolution(String),
}

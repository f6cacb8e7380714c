use std::fmt;

/// Outcome classification for a single connect probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortStatus {
    /// The handshake completed; something is listening.
    Open,
    /// Actively refused, reset, or silent past the deadline.
    Closed,
    /// The probe itself failed at the transport layer.
    Error,
}

impl fmt::Display for PortStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "OPEN"),
            Self::Closed => write!(f, "CLOSED"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// What one probe found out about one port. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortResult {
    pub port: u16,
    pub status: PortStatus,
    /// Human-readable cause, set only for [`PortStatus::Error`].
    pub detail: Option<String>,
}

impl PortResult {
    pub fn open(port: u16) -> Self {
        Self { port, status: PortStatus::Open, detail: None }
    }

    pub fn closed(port: u16) -> Self {
        Self { port, status: PortStatus::Closed, detail: None }
    }

    pub fn error(port: u16, detail: impl Into<String>) -> Self {
        Self {
            port,
            status: PortStatus::Error,
            detail: Some(detail.into()),
        }
    }
}

use std::time::Duration;

/// Per-probe connect deadline. Matches the classic one-second connect
/// scan timeout; overridable with `--timeout`.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Upper bound on concurrently in-flight probes.
pub const DEFAULT_WORKERS: usize = 256;

/// Tunables for one scan run, carried by value into the engine.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// How long a single connect attempt may take before the port is
    /// considered closed.
    pub timeout: Duration,

    /// Size of the probe worker pool.
    pub workers: usize,

    /// Echo CLOSED results to the console as they complete.
    ///
    /// Off for full-space scans, where tens of thousands of closed
    /// ports would drown the interesting lines.
    pub echo_closed: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            workers: DEFAULT_WORKERS,
            echo_closed: true,
        }
    }
}

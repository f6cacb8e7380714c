use std::time::Duration;

use clap::{ArgAction, ArgGroup, Parser};
use knockr_common::config::{self, ScanConfig};
use knockr_common::ports::{PortRange, PortSelection, ScanRequest};

#[derive(Parser)]
#[command(name = "knockr")]
#[command(about = "A TCP connect port scanner.")]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["port", "port_range", "all_ports"])
))]
pub struct CommandLine {
    /// Hostname or IP address to scan
    #[arg(short = 'T', long)]
    pub target: String,

    /// Probe a single port
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Probe an inclusive port range, e.g. 20-80
    #[arg(short = 'r', long)]
    pub port_range: Option<PortRange>,

    /// Probe every port from 1 to 65535
    #[arg(short = 'a', long)]
    pub all_ports: bool,

    /// Per-probe connect timeout in milliseconds
    #[arg(long, default_value_t = 1_000)]
    pub timeout: u64,

    /// Maximum number of in-flight probes
    #[arg(long, default_value_t = config::DEFAULT_WORKERS)]
    pub workers: usize,

    /// Reduce terminal output (repeat for warnings and errors only)
    #[arg(short = 'q', long, action = ArgAction::Count)]
    pub quiet: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The validated request the scanning core consumes. The clap
    /// group guarantees exactly one mode flag was given.
    pub fn request(&self) -> ScanRequest {
        let selection = match (self.port, self.port_range) {
            (Some(port), _) => PortSelection::Single(port),
            (_, Some(range)) => PortSelection::Range {
                start: range.start,
                end: range.end,
            },
            _ => PortSelection::All,
        };

        ScanRequest {
            target: self.target.clone(),
            selection,
        }
    }

    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            timeout: Duration::from_millis(self.timeout),
            workers: self.workers,
            // Full-space scans only echo the interesting lines.
            echo_closed: !self.all_ports && self.quiet == 0,
        }
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

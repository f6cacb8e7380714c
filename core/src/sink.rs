//! Durable destinations for scan results.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use knockr_common::ports::PortSelection;
use knockr_common::result::{PortResult, PortStatus};

/// Receives every result of a scan, strictly in ascending port order.
///
/// The engine serializes calls; implementations never see two records
/// racing each other.
pub trait ResultSink {
    fn record(&mut self, result: &PortResult) -> anyhow::Result<()>;
}

/// Appends `"<port> : OPEN"` lines to a per-mode results file.
///
/// The file is opened lazily on the first recorded OPEN line, so a run
/// that aborts before probing never creates or touches its
/// destination. Opens are always in append mode; output from earlier
/// runs is never truncated.
pub struct FileSink {
    path: PathBuf,
    file: Option<File>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), file: None }
    }

    /// The conventional destination for a scan mode: single-port,
    /// range, and full-space scans each get their own file.
    pub fn for_selection(selection: &PortSelection) -> Self {
        let path = match selection {
            PortSelection::Single(_) => "single_port_scan.txt",
            PortSelection::Range { .. } => "ranged_port_scan.txt",
            PortSelection::All => "all_ports_scan.txt",
        };
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for FileSink {
    fn record(&mut self, result: &PortResult) -> anyhow::Result<()> {
        if result.status != PortStatus::Open {
            return Ok(());
        }

        if self.file.is_none() {
            let file = OpenOptions::new()
                .append(true)
                .create(true)
                .open(&self.path)
                .with_context(|| {
                    format!("opening results file {}", self.path.display())
                })?;
            self.file = Some(file);
        }

        if let Some(file) = self.file.as_mut() {
            writeln!(file, "{} : OPEN", result.port)
                .with_context(|| format!("appending to {}", self.path.display()))?;
        }

        Ok(())
    }
}

/// Buffers every result in memory. Used by tests and by callers that
/// post-process results instead of persisting them.
#[derive(Debug, Default)]
pub struct VecSink {
    pub results: Vec<PortResult>,
}

impl ResultSink for VecSink {
    fn record(&mut self, result: &PortResult) -> anyhow::Result<()> {
        self.results.push(result.clone());
        Ok(())
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

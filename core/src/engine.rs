//! The scan engine: drives probes over a port set through a bounded
//! worker pool and funnels results, in order, into a sink.
//!
//! Console echo happens in completion order, which may interleave
//! under concurrency. Sink recording does not: an index-keyed buffer
//! holds out-of-order completions and flushes strictly ascending, so
//! durable output reads the same as a sequential scan would have
//! produced.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use knockr_common::config::ScanConfig;
use knockr_common::result::{PortResult, PortStatus};
use knockr_common::{error, info, success};
use tokio::sync::Semaphore;
use tokio::sync::mpsc;

use crate::probe;
use crate::resolver::ResolvedTarget;
use crate::sink::ResultSink;

/// Invoked after every completed probe with the running completion count.
pub type ProgressFn = Box<dyn Fn(usize) + Send + Sync>;

/// Terminal tally of one scan run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    pub open: usize,
    pub closed: usize,
    pub errors: usize,
    pub elapsed: Duration,
}

impl ScanSummary {
    pub fn probed(&self) -> usize {
        self.open + self.closed + self.errors
    }
}

/// Probes every port in `ports` against the resolved target.
///
/// One task per port, bounded by a semaphore of `cfg.workers` permits.
/// A probe ERROR is recorded and scanning continues; nothing a single
/// port does can unwind the run. The `stop` flag is honored between
/// probe dispatches: once set, no new probe starts, in-flight probes
/// finish, and the summary covers what completed.
pub async fn scan<S: ResultSink>(
    resolved: &ResolvedTarget,
    ports: &[u16],
    sink: &mut S,
    cfg: &ScanConfig,
    stop: Arc<AtomicBool>,
    on_progress: Option<ProgressFn>,
) -> anyhow::Result<ScanSummary> {
    let started = Instant::now();

    let limiter = Arc::new(Semaphore::new(cfg.workers.max(1)));
    let (tx, mut rx) = mpsc::unbounded_channel::<(usize, PortResult)>();

    let addr = resolved.addr;
    let deadline = cfg.timeout;
    let port_list: Vec<u16> = ports.to_vec();

    let dispatcher = tokio::spawn(async move {
        for (index, port) in port_list.into_iter().enumerate() {
            if stop.load(Ordering::Relaxed) {
                break;
            }

            let Ok(permit) = limiter.clone().acquire_owned().await else {
                break;
            };

            let tx = tx.clone();
            tokio::spawn(async move {
                let result = probe::probe(addr, port, deadline).await;
                // The receiver only goes away on early teardown.
                let _ = tx.send((index, result));
                drop(permit);
            });
        }
        // Dropping the dispatcher's sender lets the channel close once
        // every in-flight probe has reported.
    });

    let mut open = 0usize;
    let mut closed = 0usize;
    let mut errors = 0usize;
    let mut completed = 0usize;

    // Ordered collector: flush the contiguous prefix as it fills in.
    let mut pending: BTreeMap<usize, PortResult> = BTreeMap::new();
    let mut next_flush = 0usize;

    while let Some((index, result)) = rx.recv().await {
        echo(&result, cfg);
        match result.status {
            PortStatus::Open => open += 1,
            PortStatus::Closed => closed += 1,
            PortStatus::Error => errors += 1,
        }

        completed += 1;
        if let Some(progress) = &on_progress {
            progress(completed);
        }

        pending.insert(index, result);
        while let Some(result) = pending.remove(&next_flush) {
            sink.record(&result)?;
            next_flush += 1;
        }
    }

    dispatcher.await?;

    Ok(ScanSummary {
        open,
        closed,
        errors,
        elapsed: started.elapsed(),
    })
}

fn echo(result: &PortResult, cfg: &ScanConfig) {
    match result.status {
        PortStatus::Open => success!("Port {} is {}", result.port, result.status),
        PortStatus::Closed if cfg.echo_closed => {
            info!("Port {} is {}", result.port, result.status)
        }
        PortStatus::Closed => {}
        PortStatus::Error => {
            let detail = result.detail.as_deref().unwrap_or("transport failure");
            error!("Port {}: {}", result.port, detail);
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

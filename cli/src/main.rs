mod commands;
mod terminal;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use knockr_common::ports::ScanRequest;
use knockr_common::{error, info, warn};
use knockr_core::sink::FileSink;
use knockr_core::{engine, resolver};
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use commands::CommandLine;
use terminal::{logging, print};

#[tokio::main]
async fn main() {
    let commands = CommandLine::parse_args();
    logging::init(commands.quiet);
    print::banner(commands.quiet);

    if let Err(err) = run(&commands).await {
        error!("{err:#}");
        std::process::exit(1);
    }
}

async fn run(commands: &CommandLine) -> anyhow::Result<()> {
    let request: ScanRequest = commands.request();
    let cfg = commands.scan_config();

    print::header("starting scanner", commands.quiet);

    // The port set is validated before any name lookup goes out, so a
    // malformed range never triggers network activity.
    let ports = request.selection.build()?;
    let resolved = resolver::resolve(&request.target).await?;

    info!(
        "Scanning {} on {} ({})",
        request.selection, resolved.input, resolved.addr
    );

    let mut sink = FileSink::for_selection(&request.selection);

    let stop = Arc::new(AtomicBool::new(false));
    spawn_interrupt_handler(stop.clone());

    let span = info_span!("scan", indicatif.pb_show = true);
    span.pb_set_length(ports.len() as u64);
    span.pb_set_message(&format!("probing {}", request.selection));

    let summary = {
        let _guard = span.enter();
        let progress_span = Span::current();
        engine::scan(
            &resolved,
            &ports,
            &mut sink,
            &cfg,
            stop,
            Some(Box::new(move |_completed| progress_span.pb_inc(1))),
        )
        .await?
    };

    print::summary(&summary, sink.path(), commands.quiet);
    Ok(())
}

fn spawn_interrupt_handler(stop: Arc<AtomicBool>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, finishing in-flight probes");
            stop.store(true, Ordering::Relaxed);
        }
    });
}

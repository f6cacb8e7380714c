//! End-to-end scans against live loopback listeners.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use knockr_common::config::ScanConfig;
use knockr_common::error::ScanError;
use knockr_common::ports::PortSelection;
use knockr_common::result::PortStatus;
use knockr_core::sink::{FileSink, VecSink};
use knockr_core::{engine, resolver};

use knockr_integration_tests::{free_ports, localhost_target, spawn_listener};

fn fast_config(workers: usize) -> ScanConfig {
    ScanConfig {
        timeout: Duration::from_millis(500),
        workers,
        echo_closed: false,
    }
}

#[tokio::test]
async fn range_scan_records_exactly_the_open_port() {
    let (_listener, port) = spawn_listener().await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ranged_port_scan.txt");
    let mut sink = FileSink::new(&path);

    let selection = PortSelection::Range {
        start: port.saturating_sub(1),
        end: port.saturating_add(1),
    };
    let ports = selection.build().unwrap();

    let summary = engine::scan(
        &localhost_target(),
        &ports,
        &mut sink,
        &fast_config(8),
        Arc::new(AtomicBool::new(false)),
        None,
    )
    .await
    .unwrap();

    assert_eq!(summary.probed(), ports.len());
    assert_eq!(summary.open, 1);
    assert_eq!(summary.closed, ports.len() - 1);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, format!("{port} : OPEN\n"));
}

#[tokio::test]
async fn recorded_ports_are_non_decreasing_under_concurrency() {
    let mut ports = free_ports(40).await;
    let (_listener_a, open_a) = spawn_listener().await;
    let (_listener_b, open_b) = spawn_listener().await;
    ports.push(open_a);
    ports.push(open_b);
    ports.sort_unstable();
    ports.dedup();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ranged_port_scan.txt");
    let mut sink = FileSink::new(&path);

    let summary = engine::scan(
        &localhost_target(),
        &ports,
        &mut sink,
        &fast_config(32),
        Arc::new(AtomicBool::new(false)),
        None,
    )
    .await
    .unwrap();

    assert_eq!(summary.probed(), ports.len());
    assert!(summary.open >= 2);

    let recorded: Vec<u16> = std::fs::read_to_string(&path)
        .unwrap()
        .lines()
        .map(|line| {
            line.strip_suffix(" : OPEN")
                .and_then(|p| p.parse().ok())
                .unwrap_or_else(|| panic!("malformed line {line:?}"))
        })
        .collect();

    assert!(recorded.contains(&open_a));
    assert!(recorded.contains(&open_b));
    assert!(
        recorded.windows(2).all(|pair| pair[0] <= pair[1]),
        "file order regressed: {recorded:?}"
    );
}

#[tokio::test]
async fn every_result_reaches_the_sink_in_port_order() {
    let ports = {
        let mut ports = free_ports(30).await;
        ports.sort_unstable();
        ports.dedup();
        ports
    };

    let mut sink = VecSink::default();
    engine::scan(
        &localhost_target(),
        &ports,
        &mut sink,
        &fast_config(16),
        Arc::new(AtomicBool::new(false)),
        None,
    )
    .await
    .unwrap();

    let seen: Vec<u16> = sink.results.iter().map(|r| r.port).collect();
    assert_eq!(seen, ports);
    assert!(
        sink.results
            .iter()
            .all(|r| r.status == PortStatus::Closed || r.status == PortStatus::Open)
    );
}

#[tokio::test]
async fn unresolvable_host_aborts_without_touching_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("single_port_scan.txt");

    // Mirror the CLI flow: the sink exists before resolution runs.
    let sink = FileSink::new(&path);

    let err = resolver::resolve("no-such-host.invalid").await.unwrap_err();
    assert!(matches!(err, ScanError::Resolution(_)));

    drop(sink);
    assert!(!path.exists(), "resolution failure must not create files");
}

#[tokio::test]
async fn inverted_range_is_rejected_before_any_network_activity() {
    let selection = PortSelection::Range { start: 80, end: 20 };

    assert_eq!(
        selection.build().unwrap_err(),
        ScanError::InvertedRange { start: 80, end: 20 }
    );
}

#[tokio::test]
async fn single_port_scan_against_listener() {
    let (_listener, port) = spawn_listener().await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("single_port_scan.txt");
    let mut sink = FileSink::new(&path);

    let ports = PortSelection::Single(port).build().unwrap();
    let summary = engine::scan(
        &localhost_target(),
        &ports,
        &mut sink,
        &fast_config(1),
        Arc::new(AtomicBool::new(false)),
        None,
    )
    .await
    .unwrap();

    assert_eq!(summary.open, 1);
    assert_eq!(summary.closed, 0);
    assert_eq!(summary.errors, 0);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, format!("{port} : OPEN\n"));
}

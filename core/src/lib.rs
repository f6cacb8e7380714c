//! The scanning core: target resolution, bounded-time TCP connect
//! probes, the concurrent scan engine, and result sinks.
//!
//! Callers compose these directly: resolve the target, derive the
//! port set from a [`PortSelection`](knockr_common::ports::PortSelection),
//! then hand both to [`engine::scan`] together with a
//! [`sink::ResultSink`] for durable recording.

pub mod engine;
pub mod probe;
pub mod resolver;
pub mod sink;

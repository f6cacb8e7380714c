//! Shared models and plumbing for knockr: scan requests, port
//! selections, probe results, configuration, and the error taxonomy.

pub mod config;
pub mod error;
pub mod ports;
pub mod result;

// Macro expansions below resolve tracing through this crate.
#[doc(hidden)]
pub use tracing;

/// Terminal-flavored log macros.
///
/// These forward to `tracing`; the CLI installs a formatter that
/// renders each level with its scanner glyph (`[+]`, `[*]`, `[-]`).
/// Library crates emit through these so output stays uniform whether
/// or not a subscriber is installed.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => { $crate::tracing::info!($($arg)*) };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => { $crate::tracing::info!($($arg)*) };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => { $crate::tracing::warn!($($arg)*) };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => { $crate::tracing::error!($($arg)*) };
}

//! Telemetry initialization for the checkpoint crates.
//!
//! Sets up `tracing` subscribers for production and development use, bridges
//! `log` records into `tracing`, and installs a panic hook that reports
//! panics as structured error events.

pub mod tracing;

pub use self::tracing::*;

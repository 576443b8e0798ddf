//! Observability subsystem.
//!
//! Structured `tracing` events go to stderr so stdout carries only the
//! operator-facing report.

pub mod logging;

pub use logging::init_logging;

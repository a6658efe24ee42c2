//! Observability setup for Leadrelay binaries.

pub mod tracing_setup;

pub use tracing_setup::{LogFormat, LogOptions, init_tracing, shutdown_tracing};

//! # verity-observability
//!
//! Installs the process-wide `tracing` subscriber. Library crates only emit
//! events; the embedding application calls [`init_tracing`] once.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, init_tracing_with_filter};

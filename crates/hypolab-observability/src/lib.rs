//! # hypolab-observability
//!
//! Subscriber setup driven by [`ObservabilityConfig`] and span macros for
//! each engine operation.
//!
//! [`ObservabilityConfig`]: hypolab_core::config::ObservabilityConfig

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, spans::names};

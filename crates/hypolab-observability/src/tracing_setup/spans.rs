//! Span definitions per operation: derive, equivalence, submission, reconcile, sweep.
//!
//! Each span carries its inputs as fields via the `tracing` crate.

/// Create a manipulated-graph derivation span.
#[macro_export]
macro_rules! derive_span {
    ($experiment:expr, $edge_count:expr) => {
        tracing::debug_span!("hypolab.derive", experiment = %$experiment, edge_count = $edge_count)
    };
}

/// Create an equivalence check span.
#[macro_export]
macro_rules! equivalence_span {
    ($answer_latents:expr, $candidate_latents:expr) => {
        tracing::debug_span!(
            "hypolab.equivalence",
            answer_latents = $answer_latents,
            candidate_latents = $candidate_latents
        )
    };
}

/// Create a hypothesis submission span.
#[macro_export]
macro_rules! submission_span {
    ($hypothesis:expr) => {
        tracing::info_span!("hypolab.submission", hypothesis = %$hypothesis)
    };
}

/// Create a guess reconciliation span.
#[macro_export]
macro_rules! reconcile_span {
    ($key:expr) => {
        tracing::debug_span!("hypolab.reconcile", key = %$key)
    };
}

/// Create a registry sweep span.
#[macro_export]
macro_rules! sweep_span {
    ($registry:expr, $entries:expr) => {
        tracing::debug_span!("hypolab.sweep", registry = %$registry, entries = $entries)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const DERIVE: &str = "hypolab.derive";
    pub const EQUIVALENCE: &str = "hypolab.equivalence";
    pub const SUBMISSION: &str = "hypolab.submission";
    pub const RECONCILE: &str = "hypolab.reconcile";
    pub const SWEEP: &str = "hypolab.sweep";
}

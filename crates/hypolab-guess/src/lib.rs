//! # hypolab-guess
//!
//! Student-editable guesses layered over hypothesis graphs and experiments,
//! kept consistent with both on every read, plus the registry that owns them
//! and the [`LabContext`] the host drives everything through.

pub mod context;
pub mod guess;
pub mod registry;

pub use context::LabContext;
pub use guess::{
    reconcile_independence, reconcile_manipulated_graph, EdgeDiscrepancy,
    GuessedManipulatedGraph, IndependenceGuess, ReconcileReport,
};
pub use registry::{GuessKey, GuessRegistry, KeyResolver};

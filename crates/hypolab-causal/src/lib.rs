//! # hypolab-causal
//!
//! The scoring engine. Immutable causal graph snapshots (`petgraph`),
//! experiments, manipulated-graph derivation, and the latent-permutation
//! equivalence checker with its distinct-guess counter.

pub mod derive;
pub mod equivalence;
pub mod graph;
pub mod manipulation;

pub use derive::{derive, ManipulatedGraphDeriver, ManipulatedGraphView};
pub use equivalence::{
    is_equivalent, EquivalenceChecker, GraphShape, GuessTracker, Mismatch, Submission, Verdict,
};
pub use graph::{Graph, GraphBuilder, GraphSnapshot};
pub use manipulation::{Experiment, ExperimentVariable};

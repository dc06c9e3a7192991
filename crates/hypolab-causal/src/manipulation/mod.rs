//! Manipulation model: per-variable interventions grouped into experiments.

pub mod experiment;

pub use experiment::{Experiment, ExperimentVariable};

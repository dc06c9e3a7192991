//! # hypolab-core
//!
//! Foundation crate for hypolab.
//! Defines the shared value types, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;

// Re-export the most commonly used types at the crate root.
pub use config::LabConfig;
pub use errors::{LabError, LabResult};
pub use models::{
    Edge, EdgeSet, EdgeStatus, IndependenceClaim, Manipulation, Variable, VariableKind,
    VariablePair,
};

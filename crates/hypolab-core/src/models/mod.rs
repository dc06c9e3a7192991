//! Shared value types.

pub mod edge;
pub mod guess_tags;
pub mod manipulation;
pub mod variable;

pub use edge::{Edge, EdgeSet};
pub use guess_tags::{EdgeStatus, IndependenceClaim, VariablePair};
pub use manipulation::Manipulation;
pub use variable::{Variable, VariableKind};

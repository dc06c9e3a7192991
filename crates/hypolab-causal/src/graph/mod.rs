//! Graph model: immutable snapshots, a copy-on-write builder, and the
//! serializable flat form.

pub mod builder;
pub mod indexed;
pub mod snapshot;

pub use builder::GraphBuilder;
pub use indexed::{Graph, Incidence};
pub use petgraph::Direction;
pub use snapshot::GraphSnapshot;

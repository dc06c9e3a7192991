//! Exact comparison of the measured layer.

use hypolab_core::models::{Edge, VariableKind};

use crate::graph::Graph;

/// First measured variable of `answer` that `candidate` lacks or has under another kind.
pub(crate) fn missing_measured<'a>(answer: &'a Graph, candidate: &Graph) -> Option<&'a str> {
    answer
        .names_of_kind(VariableKind::Measured)
        .into_iter()
        .find(|name| candidate.kind_of(name) != Some(VariableKind::Measured))
}

/// First measured-to-measured edge of `graph` absent from `other`.
pub(crate) fn first_unmatched_measured_edge(graph: &Graph, other: &Graph) -> Option<Edge> {
    graph.edges().find(|edge| {
        graph.kind_of(&edge.from) == Some(VariableKind::Measured)
            && graph.kind_of(&edge.to) == Some(VariableKind::Measured)
            && !other.contains_edge(edge)
    })
}

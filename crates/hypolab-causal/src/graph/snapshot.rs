//! Flat serializable form of a graph, validated on the way back in.

use hypolab_core::errors::GraphError;
use hypolab_core::models::{Edge, Variable};
use serde::{Deserialize, Serialize};

use super::builder::GraphBuilder;
use super::indexed::Graph;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub variables: Vec<Variable>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl TryFrom<GraphSnapshot> for Graph {
    type Error = GraphError;

    fn try_from(snapshot: GraphSnapshot) -> Result<Self, Self::Error> {
        let mut builder = GraphBuilder::new();
        for variable in snapshot.variables {
            builder.add_variable(variable)?;
        }
        for edge in &snapshot.edges {
            builder.add_edge(&edge.from, &edge.to)?;
        }
        Ok(builder.build())
    }
}

impl From<&Graph> for GraphSnapshot {
    fn from(graph: &Graph) -> Self {
        Self {
            variables: graph.variables().cloned().collect(),
            edges: graph.edges().collect(),
        }
    }
}

impl From<Graph> for GraphSnapshot {
    fn from(graph: Graph) -> Self {
        Self::from(&graph)
    }
}

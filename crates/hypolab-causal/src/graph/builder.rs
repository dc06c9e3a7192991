//! Mutable staging area for graph snapshots.
//!
//! Every insertion is validated immediately, so `build` cannot fail.

use std::collections::HashSet;

use hypolab_core::errors::GraphError;
use hypolab_core::models::{Edge, Variable};

use super::indexed::Graph;

#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    variables: Vec<Variable>,
    edges: Vec<Edge>,
    names: HashSet<String>,
    edge_keys: HashSet<Edge>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_graph(graph: &Graph) -> Self {
        let variables: Vec<Variable> = graph.variables().cloned().collect();
        let edges: Vec<Edge> = graph.edges().collect();
        Self {
            names: variables.iter().map(|v| v.name.clone()).collect(),
            edge_keys: edges.iter().cloned().collect(),
            variables,
            edges,
        }
    }

    /// Add a variable. Names must be unique.
    pub fn add_variable(&mut self, variable: Variable) -> Result<&mut Self, GraphError> {
        if !self.names.insert(variable.name.clone()) {
            return Err(GraphError::DuplicateVariable {
                name: variable.name,
            });
        }
        self.variables.push(variable);
        Ok(self)
    }

    pub fn add_measured(&mut self, name: &str) -> Result<&mut Self, GraphError> {
        self.add_variable(Variable::measured(name))
    }

    pub fn add_latent(&mut self, name: &str) -> Result<&mut Self, GraphError> {
        self.add_variable(Variable::latent(name))
    }

    pub fn add_error(&mut self, name: &str) -> Result<&mut Self, GraphError> {
        self.add_variable(Variable::error(name))
    }

    /// Add a directed edge between two existing variables.
    pub fn add_edge(&mut self, from: &str, to: &str) -> Result<&mut Self, GraphError> {
        for name in [from, to] {
            if !self.names.contains(name) {
                return Err(GraphError::UnknownVariable {
                    name: name.to_string(),
                });
            }
        }
        if from == to {
            return Err(GraphError::SelfLoop {
                name: from.to_string(),
            });
        }
        let edge = Edge::new(from, to);
        if !self.edge_keys.insert(edge.clone()) {
            return Err(GraphError::DuplicateEdge {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        self.edges.push(edge);
        Ok(self)
    }

    /// Remove a variable and every edge touching it.
    pub fn remove_variable(&mut self, name: &str) -> bool {
        if !self.names.remove(name) {
            return false;
        }
        self.variables.retain(|v| v.name != name);
        self.edges.retain(|e| !e.touches(name));
        self.edge_keys.retain(|e| !e.touches(name));
        true
    }

    pub fn remove_edge(&mut self, from: &str, to: &str) -> bool {
        let edge = Edge::new(from, to);
        if !self.edge_keys.remove(&edge) {
            return false;
        }
        self.edges.retain(|e| *e != edge);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Freeze into an immutable snapshot.
    pub fn build(self) -> Graph {
        Graph::from_validated(self.variables, self.edges)
    }
}

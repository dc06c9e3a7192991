//! petgraph `DiGraph` wrapper with name-indexed lookup.
//!
//! A `Graph` is an immutable snapshot: it is only produced by
//! [`GraphBuilder::build`](super::GraphBuilder::build), which has already
//! checked that names are unique, endpoints exist, and there are no self-loops
//! or parallel edges. Editing goes through [`Graph::to_builder`].

use std::collections::{BTreeSet, HashMap};

use hypolab_core::models::{Edge, EdgeSet, Variable, VariableKind};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use super::builder::GraphBuilder;
use super::snapshot::GraphSnapshot;

/// One edge incident to a variable, seen from that variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Incidence<'a> {
    /// `Incoming` for `neighbor -> variable`, `Outgoing` for `variable -> neighbor`.
    pub direction: Direction,
    pub neighbor: &'a Variable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "GraphSnapshot", into = "GraphSnapshot")]
pub struct Graph {
    graph: DiGraph<Variable, ()>,
    /// Map from variable name → NodeIndex for O(1) lookup.
    node_index: HashMap<String, NodeIndex>,
}

impl Graph {
    /// Start building a new snapshot.
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    /// A graph with no variables.
    pub fn empty() -> Self {
        Self {
            graph: DiGraph::new(),
            node_index: HashMap::new(),
        }
    }

    /// Assemble from parts already validated by the builder.
    pub(crate) fn from_validated(variables: Vec<Variable>, edges: Vec<Edge>) -> Self {
        let mut graph = DiGraph::with_capacity(variables.len(), edges.len());
        let mut node_index = HashMap::with_capacity(variables.len());
        for variable in variables {
            let name = variable.name.clone();
            let idx = graph.add_node(variable);
            node_index.insert(name, idx);
        }
        for edge in edges {
            if let (Some(&from), Some(&to)) = (node_index.get(&edge.from), node_index.get(&edge.to)) {
                graph.add_edge(from, to, ());
            }
        }
        Self { graph, node_index }
    }

    /// Copy this snapshot into a builder for editing.
    pub fn to_builder(&self) -> GraphBuilder {
        GraphBuilder::from_graph(self)
    }

    /// Variables in insertion order.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> + '_ {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.node_index.get(name).map(|&idx| &self.graph[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.node_index.contains_key(name)
    }

    pub fn kind_of(&self, name: &str) -> Option<VariableKind> {
        self.variable(name).map(|v| v.kind)
    }

    /// Names of variables of `kind`, in insertion order.
    pub fn names_of_kind(&self, kind: VariableKind) -> Vec<&str> {
        self.variables()
            .filter(|v| v.kind == kind)
            .map(|v| v.name.as_str())
            .collect()
    }

    /// Latent variable names in discovery (insertion) order.
    pub fn latent_names(&self) -> Vec<&str> {
        self.names_of_kind(VariableKind::Latent)
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.graph.edge_references().map(move |e| {
            Edge::new(
                self.graph[e.source()].name.clone(),
                self.graph[e.target()].name.clone(),
            )
        })
    }

    pub fn edge_set(&self) -> EdgeSet {
        self.edges().collect()
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.node_index.get(from), self.node_index.get(to)) {
            (Some(&f), Some(&t)) => self.graph.find_edge(f, t).is_some(),
            _ => false,
        }
    }

    pub fn contains_edge(&self, edge: &Edge) -> bool {
        self.has_edge(&edge.from, &edge.to)
    }

    /// All edges touching `name`. Empty for unknown names.
    pub fn incident(&self, name: &str) -> Vec<Incidence<'_>> {
        let Some(&idx) = self.node_index.get(name) else {
            return Vec::new();
        };
        let mut result = Vec::new();
        for direction in [Direction::Incoming, Direction::Outgoing] {
            for neighbor in self.graph.neighbors_directed(idx, direction) {
                result.push(Incidence {
                    direction,
                    neighbor: &self.graph[neighbor],
                });
            }
        }
        result
    }

    /// Direct causes of `name`.
    pub fn parents(&self, name: &str) -> Vec<&str> {
        self.neighbors(name, Direction::Incoming)
    }

    /// Direct effects of `name`.
    pub fn children(&self, name: &str) -> Vec<&str> {
        self.neighbors(name, Direction::Outgoing)
    }

    fn neighbors(&self, name: &str, direction: Direction) -> Vec<&str> {
        self.node_index
            .get(name)
            .map(|&idx| {
                self.graph
                    .neighbors_directed(idx, direction)
                    .map(|n| self.graph[n].name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn variable_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::empty()
    }
}

/// Two snapshots are equal when they have the same named variables with the
/// same kinds and the same directed edges, regardless of insertion order.
impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        let ours: BTreeSet<&Variable> = self.variables().collect();
        let theirs: BTreeSet<&Variable> = other.variables().collect();
        ours == theirs && self.edge_set() == other.edge_set()
    }
}

impl Eq for Graph {}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Graph {
        let mut builder = Graph::builder();
        builder.add_measured("x").unwrap();
        builder.add_measured("y").unwrap();
        builder.add_latent("l").unwrap();
        builder.add_edge("x", "y").unwrap();
        builder.add_edge("l", "x").unwrap();
        builder.build()
    }

    #[test]
    fn lookup_by_name() {
        let graph = chain();
        assert_eq!(graph.kind_of("l"), Some(VariableKind::Latent));
        assert_eq!(graph.kind_of("missing"), None);
        assert!(graph.has_edge("x", "y"));
        assert!(!graph.has_edge("y", "x"));
        assert_eq!(graph.parents("x"), vec!["l"]);
        assert_eq!(graph.children("x"), vec!["y"]);
        assert_eq!(graph.latent_names(), vec!["l"]);
    }

    #[test]
    fn incident_reports_direction() {
        let graph = chain();
        let incident = graph.incident("x");
        assert_eq!(incident.len(), 2);
        assert!(incident
            .iter()
            .any(|i| i.direction == Direction::Incoming && i.neighbor.name == "l"));
        assert!(incident
            .iter()
            .any(|i| i.direction == Direction::Outgoing && i.neighbor.name == "y"));
        assert!(graph.incident("missing").is_empty());
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let mut builder = Graph::builder();
        builder.add_latent("l").unwrap();
        builder.add_measured("y").unwrap();
        builder.add_measured("x").unwrap();
        builder.add_edge("l", "x").unwrap();
        builder.add_edge("x", "y").unwrap();
        assert_eq!(builder.build(), chain());
    }
}

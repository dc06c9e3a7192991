//! A student's guess at the manipulated version of a hypothesis graph.
//!
//! Edge tags belong to the student. Variables and manipulation tags mirror the
//! hypothesis and experiment and are only written by reconciliation.

use std::collections::BTreeMap;

use hypolab_causal::ManipulatedGraphView;
use hypolab_core::errors::ReferenceError;
use hypolab_core::models::{Edge, EdgeStatus, Manipulation, Variable};
use serde::{Deserialize, Serialize};

static NO_MANIPULATION: Manipulation = Manipulation::None;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessedManipulatedGraph {
    pub(crate) variables: Vec<Variable>,
    #[serde(with = "super::map_entries")]
    pub(crate) edges: BTreeMap<Edge, EdgeStatus>,
    pub(crate) manipulations: BTreeMap<String, Manipulation>,
}

/// An edge whose student tag disagrees with the derived view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDiscrepancy {
    pub edge: Edge,
    pub guessed: EdgeStatus,
    pub expected: EdgeStatus,
}

impl GuessedManipulatedGraph {
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn edges(&self) -> impl Iterator<Item = (&Edge, EdgeStatus)> + '_ {
        self.edges.iter().map(|(edge, &status)| (edge, status))
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn status_of(&self, from: &str, to: &str) -> Option<EdgeStatus> {
        self.edges.get(&Edge::new(from, to)).copied()
    }

    /// Student edit: tag an existing edge.
    pub fn set_edge_status(
        &mut self,
        from: &str,
        to: &str,
        status: EdgeStatus,
    ) -> Result<(), ReferenceError> {
        match self.edges.get_mut(&Edge::new(from, to)) {
            Some(slot) => {
                *slot = status;
                Ok(())
            }
            None => Err(ReferenceError::EdgeNotFound {
                from: from.to_string(),
                to: to.to_string(),
            }),
        }
    }

    /// Mirrored manipulation of `name`; `None` when untagged.
    pub fn manipulation_of(&self, name: &str) -> &Manipulation {
        self.manipulations.get(name).unwrap_or(&NO_MANIPULATION)
    }

    pub fn manipulations(&self) -> impl Iterator<Item = (&str, &Manipulation)> + '_ {
        self.manipulations.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Edges tagged differently from `view`. Broken and frozen count as the same
    /// answer; edges the view does not report are skipped.
    pub fn discrepancies(&self, view: &ManipulatedGraphView) -> Vec<EdgeDiscrepancy> {
        self.edges
            .iter()
            .filter_map(|(edge, &guessed)| {
                let expected = view.status_of(edge)?;
                (guessed.is_severed() != expected.is_severed()).then(|| EdgeDiscrepancy {
                    edge: edge.clone(),
                    guessed,
                    expected,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guess_with(edges: &[(&str, &str, EdgeStatus)]) -> GuessedManipulatedGraph {
        GuessedManipulatedGraph {
            edges: edges
                .iter()
                .map(|(f, t, s)| (Edge::new(*f, *t), *s))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn set_edge_status_rejects_unknown_edges() {
        let mut guess = guess_with(&[("a", "b", EdgeStatus::Normal)]);
        guess.set_edge_status("a", "b", EdgeStatus::Frozen).unwrap();
        assert_eq!(guess.status_of("a", "b"), Some(EdgeStatus::Frozen));
        assert!(matches!(
            guess.set_edge_status("b", "a", EdgeStatus::Broken),
            Err(ReferenceError::EdgeNotFound { .. })
        ));
    }

    #[test]
    fn discrepancies_treat_frozen_as_broken() {
        let guess = guess_with(&[
            ("a", "b", EdgeStatus::Frozen),
            ("b", "c", EdgeStatus::Broken),
            ("c", "d", EdgeStatus::Normal),
        ]);
        let mut view = ManipulatedGraphView::default();
        view.broken.insert(Edge::new("a", "b"));
        view.active.insert(Edge::new("b", "c"));

        let found = guess.discrepancies(&view);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].edge, Edge::new("b", "c"));
        assert_eq!(found[0].expected, EdgeStatus::Normal);
    }

    #[test]
    fn serializes_edges_as_entry_list() {
        let guess = guess_with(&[("a", "b", EdgeStatus::Broken)]);
        let json = serde_json::to_value(&guess).unwrap();
        assert_eq!(json["edges"][0][0]["from"], "a");
        assert_eq!(json["edges"][0][1], "broken");
        let back: GuessedManipulatedGraph = serde_json::from_value(json).unwrap();
        assert_eq!(back, guess);
    }

    #[test]
    fn untagged_variables_read_as_unmanipulated() {
        assert_eq!(
            GuessedManipulatedGraph::default().manipulation_of("x"),
            &Manipulation::None
        );
    }
}

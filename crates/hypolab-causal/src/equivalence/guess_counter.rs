//! Distinct-guess counting per hypothesis.
//!
//! Each hypothesis keeps a plain snapshot of its last submitted shape. A
//! resubmission of the same shape is scored again but not counted again.

use std::collections::{BTreeSet, HashMap};

use hypolab_core::models::{EdgeSet, VariableKind};
use hypolab_observability::submission_span;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{EquivalenceChecker, Verdict};
use crate::graph::Graph;

/// Structural fingerprint of a graph: named, typed variables plus edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphShape {
    variables: BTreeSet<(String, VariableKind)>,
    edges: EdgeSet,
}

impl From<&Graph> for GraphShape {
    fn from(graph: &Graph) -> Self {
        Self {
            variables: graph
                .variables()
                .map(|v| (v.name.clone(), v.kind))
                .collect(),
            edges: graph.edge_set(),
        }
    }
}

/// Outcome of one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub verdict: Verdict,
    /// Distinct guesses so far for this hypothesis, including this one.
    pub guess_count: u32,
    /// Whether this submission incremented the count.
    pub counted: bool,
}

impl Submission {
    pub fn correct(&self) -> bool {
        self.verdict.is_equivalent()
    }
}

#[derive(Debug, Clone)]
struct TrackedHypothesis {
    last_shape: GraphShape,
    guesses: u32,
}

#[derive(Debug, Clone, Default)]
pub struct GuessTracker {
    checker: EquivalenceChecker,
    hypotheses: HashMap<String, TrackedHypothesis>,
}

impl GuessTracker {
    pub fn new(checker: EquivalenceChecker) -> Self {
        Self {
            checker,
            hypotheses: HashMap::new(),
        }
    }

    /// Score `candidate` against `answer` and count it if its shape differs
    /// from the previous submission for `hypothesis`.
    pub fn submit(&mut self, hypothesis: &str, answer: &Graph, candidate: &Graph) -> Submission {
        let _span = submission_span!(hypothesis).entered();
        let verdict = self.checker.compare(answer, candidate);
        let shape = GraphShape::from(candidate);

        let (guess_count, counted) = match self.hypotheses.get_mut(hypothesis) {
            Some(tracked) if tracked.last_shape == shape => (tracked.guesses, false),
            Some(tracked) => {
                tracked.last_shape = shape;
                tracked.guesses += 1;
                (tracked.guesses, true)
            }
            None => {
                self.hypotheses.insert(
                    hypothesis.to_string(),
                    TrackedHypothesis {
                        last_shape: shape,
                        guesses: 1,
                    },
                );
                (1, true)
            }
        };

        if counted {
            info!(
                hypothesis,
                guess_count,
                correct = verdict.is_equivalent(),
                "new guess recorded"
            );
        }

        Submission {
            verdict,
            guess_count,
            counted,
        }
    }

    /// Distinct guesses recorded for `hypothesis` (0 if never submitted).
    pub fn guess_count(&self, hypothesis: &str) -> u32 {
        self.hypotheses
            .get(hypothesis)
            .map(|t| t.guesses)
            .unwrap_or(0)
    }

    /// Drop the history of a deleted hypothesis.
    pub fn forget(&mut self, hypothesis: &str) -> bool {
        self.hypotheses.remove(hypothesis).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&str, &str)]) -> Graph {
        let mut builder = Graph::builder();
        for name in ["a", "b", "c"] {
            builder.add_measured(name).unwrap();
        }
        for (from, to) in edges {
            builder.add_edge(from, to).unwrap();
        }
        builder.build()
    }

    #[test]
    fn same_shape_twice_counts_once() {
        let answer = graph(&[("a", "b")]);
        let mut tracker = GuessTracker::default();

        let first = tracker.submit("h", &answer, &graph(&[("b", "c")]));
        let second = tracker.submit("h", &answer, &graph(&[("b", "c")]));
        assert!(first.counted);
        assert!(!second.counted);
        assert_eq!(second.guess_count, 1);
        assert!(!second.correct());
    }

    #[test]
    fn different_shapes_count_separately() {
        let answer = graph(&[("a", "b")]);
        let mut tracker = GuessTracker::default();

        tracker.submit("h", &answer, &graph(&[("b", "c")]));
        let second = tracker.submit("h", &answer, &graph(&[("a", "b")]));
        assert!(second.counted);
        assert_eq!(second.guess_count, 2);
        assert!(second.correct());
        assert_eq!(tracker.guess_count("h"), 2);
        assert_eq!(tracker.guess_count("other"), 0);
    }

    #[test]
    fn returning_to_an_earlier_shape_counts_again() {
        let answer = graph(&[]);
        let mut tracker = GuessTracker::default();
        tracker.submit("h", &answer, &graph(&[("a", "b")]));
        tracker.submit("h", &answer, &graph(&[("b", "c")]));
        let third = tracker.submit("h", &answer, &graph(&[("a", "b")]));
        assert_eq!(third.guess_count, 3);
    }

    #[test]
    fn forget_resets_history() {
        let answer = graph(&[]);
        let mut tracker = GuessTracker::default();
        tracker.submit("h", &answer, &answer);
        assert!(tracker.forget("h"));
        assert_eq!(tracker.guess_count("h"), 0);
        assert!(!tracker.forget("h"));
    }
}

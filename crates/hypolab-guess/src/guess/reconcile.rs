//! Self-healing reconciliation, run on every read of a guess.
//!
//! Guesses follow two independently edited sources: the hypothesis graph and
//! the experiment. Reconciling drops what no longer exists, seeds what is new,
//! and re-mirrors system-owned tags, without touching any student tag on
//! something that still exists. Running it twice changes nothing the second time.

use std::collections::{BTreeMap, BTreeSet};

use hypolab_causal::{Experiment, Graph};
use hypolab_core::models::{EdgeStatus, IndependenceClaim, Manipulation, VariablePair};
use tracing::debug;

use super::{GuessedManipulatedGraph, IndependenceGuess};

/// What a reconciliation pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub pruned: usize,
    pub seeded: usize,
    pub retagged: usize,
}

impl ReconcileReport {
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

/// Bring a manipulated-graph guess in line with `hypothesis` and `experiment`.
///
/// 1. The variable set is copied from the hypothesis, and guess edges that the
///    hypothesis no longer has are pruned.
/// 2. Hypothesis edges missing from the guess are seeded as `Normal`.
/// 3. Manipulation tags mirror the experiment for every studied variable;
///    every other variable of the guess is tagged `None`.
pub fn reconcile_manipulated_graph(
    guess: &mut GuessedManipulatedGraph,
    hypothesis: &Graph,
    experiment: &Experiment,
) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    guess.variables = hypothesis.variables().cloned().collect();

    let before = guess.edges.len();
    guess.edges.retain(|edge, _| hypothesis.contains_edge(edge));
    report.pruned = before - guess.edges.len();

    for edge in hypothesis.edges() {
        if !guess.edges.contains_key(&edge) {
            guess.edges.insert(edge, EdgeStatus::Normal);
            report.seeded += 1;
        }
    }

    let mut mirrored: BTreeMap<String, Manipulation> = guess
        .variables
        .iter()
        .map(|v| (v.name.clone(), Manipulation::None))
        .collect();
    for row in experiment.studied_variables() {
        mirrored.insert(row.name.clone(), row.manipulation.clone());
    }
    report.retagged = mirrored
        .iter()
        .filter(|(name, tag)| guess.manipulations.get(*name) != Some(*tag))
        .count()
        + guess
            .manipulations
            .keys()
            .filter(|name| !mirrored.contains_key(*name))
            .count();
    guess.manipulations = mirrored;

    if !report.is_noop() {
        debug!(
            pruned = report.pruned,
            seeded = report.seeded,
            retagged = report.retagged,
            "manipulated-graph guess reconciled"
        );
    }
    report
}

/// Bring an independence guess in line with the studied variables of `experiment`.
///
/// Pairs involving a variable that is no longer studied are pruned; every new
/// pair of studied variables is seeded as `Unknown`.
pub fn reconcile_independence(
    guess: &mut IndependenceGuess,
    experiment: &Experiment,
) -> ReconcileReport {
    let mut report = ReconcileReport::default();
    let studied: Vec<&str> = experiment
        .studied_variables()
        .map(|row| row.name.as_str())
        .collect();
    let studied_set: BTreeSet<&str> = studied.iter().copied().collect();

    let before = guess.claims.len();
    guess.claims.retain(|pair, _| {
        studied_set.contains(pair.first()) && studied_set.contains(pair.second())
    });
    report.pruned = before - guess.claims.len();

    for (i, a) in studied.iter().enumerate() {
        for b in &studied[i + 1..] {
            let pair = VariablePair::new(*a, *b);
            if !guess.claims.contains_key(&pair) {
                guess.claims.insert(pair, IndependenceClaim::Unknown);
                report.seeded += 1;
            }
        }
    }

    if !report.is_noop() {
        debug!(
            pruned = report.pruned,
            seeded = report.seeded,
            "independence guess reconciled"
        );
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hypothesis(edges: &[(&str, &str)]) -> Graph {
        let mut builder = Graph::builder();
        for name in ["x", "y", "z"] {
            builder.add_measured(name).unwrap();
        }
        for (from, to) in edges {
            builder.add_edge(from, to).unwrap();
        }
        builder.build()
    }

    #[test]
    fn seeds_prunes_and_keeps_student_tags() {
        let h1 = hypothesis(&[("x", "y"), ("y", "z")]);
        let experiment = Experiment::new("exp", &h1);
        let mut guess = GuessedManipulatedGraph::default();

        let first = reconcile_manipulated_graph(&mut guess, &h1, &experiment);
        assert_eq!(first.seeded, 2);
        guess.set_edge_status("x", "y", EdgeStatus::Broken).unwrap();

        let h2 = hypothesis(&[("x", "y"), ("x", "z")]);
        let second = reconcile_manipulated_graph(&mut guess, &h2, &experiment);
        assert_eq!(second.pruned, 1);
        assert_eq!(second.seeded, 1);
        assert_eq!(guess.status_of("x", "y"), Some(EdgeStatus::Broken));
        assert_eq!(guess.status_of("x", "z"), Some(EdgeStatus::Normal));
        assert_eq!(guess.status_of("y", "z"), None);
    }

    #[test]
    fn reversed_hypothesis_edge_is_replaced() {
        let mut guess = GuessedManipulatedGraph::default();
        let experiment = Experiment::new("exp", &hypothesis(&[]));
        reconcile_manipulated_graph(&mut guess, &hypothesis(&[("x", "y")]), &experiment);
        guess.set_edge_status("x", "y", EdgeStatus::Frozen).unwrap();

        reconcile_manipulated_graph(&mut guess, &hypothesis(&[("y", "x")]), &experiment);
        assert_eq!(guess.status_of("x", "y"), None);
        assert_eq!(guess.status_of("y", "x"), Some(EdgeStatus::Normal));
    }

    #[test]
    fn manipulation_tags_follow_the_experiment() {
        let h = hypothesis(&[("x", "y")]);
        let mut experiment = Experiment::new("exp", &h);
        experiment
            .set_manipulation(&h, "y", Manipulation::locked("7"))
            .unwrap();
        let mut guess = GuessedManipulatedGraph::default();
        reconcile_manipulated_graph(&mut guess, &h, &experiment);
        assert_eq!(guess.manipulation_of("y"), &Manipulation::locked("7"));
        assert_eq!(guess.manipulation_of("x"), &Manipulation::None);

        experiment.set_studied(&h, "y", false).unwrap();
        let report = reconcile_manipulated_graph(&mut guess, &h, &experiment);
        assert_eq!(report.retagged, 1);
        assert_eq!(guess.manipulation_of("y"), &Manipulation::None);
    }

    #[test]
    fn second_pass_is_a_noop() {
        let h = hypothesis(&[("x", "y"), ("y", "z")]);
        let mut experiment = Experiment::new("exp", &h);
        experiment
            .set_manipulation(&h, "z", Manipulation::Randomized)
            .unwrap();
        let mut guess = GuessedManipulatedGraph::default();
        reconcile_manipulated_graph(&mut guess, &h, &experiment);
        let snapshot = guess.clone();
        assert!(reconcile_manipulated_graph(&mut guess, &h, &experiment).is_noop());
        assert_eq!(guess, snapshot);
    }

    #[test]
    fn independence_pairs_track_studied_variables() {
        let h = hypothesis(&[]);
        let mut experiment = Experiment::new("exp", &h);
        let mut guess = IndependenceGuess::default();

        assert_eq!(reconcile_independence(&mut guess, &experiment).seeded, 3);
        guess
            .set_claim("z", "x", IndependenceClaim::Independent)
            .unwrap();
        guess.set_claim("x", "y", IndependenceClaim::Dependent).unwrap();

        experiment.set_studied(&h, "y", false).unwrap();
        let report = reconcile_independence(&mut guess, &experiment);
        assert_eq!(report.pruned, 2);
        assert_eq!(guess.len(), 1);
        assert_eq!(guess.claim("x", "z"), Some(IndependenceClaim::Independent));
        assert!(reconcile_independence(&mut guess, &experiment).is_noop());
    }
}

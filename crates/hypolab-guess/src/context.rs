//! The lab context: every piece of state one exercise session needs.
//!
//! The host creates one context per open exercise and routes every request
//! through it. Names are the identity of hypotheses, experiments and samples;
//! deleting one never reaches into the guess registries directly except for
//! experiments, whose removal cascades eagerly.

use std::collections::{BTreeMap, HashMap};

use hypolab_causal::{
    derive, EquivalenceChecker, Experiment, Graph, GuessTracker, ManipulatedGraphDeriver,
    ManipulatedGraphView, Submission,
};
use hypolab_core::errors::ReferenceError;
use hypolab_core::models::{EdgeStatus, IndependenceClaim, Manipulation};
use hypolab_core::{LabConfig, LabResult};
use hypolab_observability::reconcile_span;
use tracing::{debug, info};

use crate::guess::{
    reconcile_independence, reconcile_manipulated_graph, EdgeDiscrepancy,
    GuessedManipulatedGraph, IndependenceGuess,
};
use crate::registry::{GuessKey, GuessRegistry, KeyResolver};

pub struct LabContext {
    config: LabConfig,
    true_graph: Graph,
    hypotheses: BTreeMap<String, Graph>,
    experiments: BTreeMap<String, Experiment>,
    /// Sample name -> owning experiment.
    samples: BTreeMap<String, String>,
    derivers: HashMap<String, ManipulatedGraphDeriver>,
    tracker: GuessTracker,
    manipulated_guesses: GuessRegistry<GuessedManipulatedGraph>,
    independence_guesses: GuessRegistry<IndependenceGuess>,
}

impl LabContext {
    pub fn new(true_graph: Graph, config: LabConfig) -> Self {
        let capacity = config.registry.initial_capacity;
        let checker = EquivalenceChecker::with_config(config.equivalence.clone());
        Self {
            true_graph,
            hypotheses: BTreeMap::new(),
            experiments: BTreeMap::new(),
            samples: BTreeMap::new(),
            derivers: HashMap::new(),
            tracker: GuessTracker::new(checker),
            manipulated_guesses: GuessRegistry::with_capacity("manipulated_graph", capacity),
            independence_guesses: GuessRegistry::with_capacity("independence", capacity),
            config,
        }
    }

    pub fn with_defaults(true_graph: Graph) -> Self {
        Self::new(true_graph, LabConfig::default())
    }

    pub fn config(&self) -> &LabConfig {
        &self.config
    }

    pub fn true_graph(&self) -> &Graph {
        &self.true_graph
    }

    /// Swap in a new true graph. Every experiment must still be valid against
    /// it; on success all freeze latches are dropped.
    pub fn set_true_graph(&mut self, graph: Graph) -> LabResult<()> {
        for experiment in self.experiments.values() {
            experiment.validate_against(&graph)?;
        }
        self.true_graph = graph;
        self.derivers.clear();
        info!(
            variables = self.true_graph.variable_count(),
            edges = self.true_graph.edge_count(),
            "true graph replaced"
        );
        Ok(())
    }

    pub fn add_hypothesis(&mut self, name: impl Into<String>, graph: Graph) -> LabResult<()> {
        let name = name.into();
        if self.hypotheses.contains_key(&name) {
            return Err(ReferenceError::DuplicateName {
                kind: "hypothesis",
                name,
            }
            .into());
        }
        // Guesses left by an earlier hypothesis of the same name must not revive.
        self.sweep();
        debug!(hypothesis = %name, "hypothesis added");
        self.hypotheses.insert(name, graph);
        Ok(())
    }

    /// Replace the graph of an existing hypothesis. Its guesses are reconciled
    /// against the new graph on their next read.
    pub fn replace_hypothesis(&mut self, name: &str, graph: Graph) -> LabResult<()> {
        let slot = self
            .hypotheses
            .get_mut(name)
            .ok_or_else(|| hypothesis_not_found(name))?;
        *slot = graph;
        Ok(())
    }

    pub fn hypothesis(&self, name: &str) -> LabResult<&Graph> {
        self.hypotheses
            .get(name)
            .ok_or_else(|| hypothesis_not_found(name).into())
    }

    pub fn hypothesis_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.hypotheses.keys().map(String::as_str)
    }

    /// Remove a hypothesis and its submission history. Its guesses go on the
    /// next sweep.
    pub fn remove_hypothesis(&mut self, name: &str) -> LabResult<Graph> {
        let graph = self
            .hypotheses
            .remove(name)
            .ok_or_else(|| hypothesis_not_found(name))?;
        self.tracker.forget(name);
        debug!(hypothesis = name, "hypothesis removed");
        Ok(graph)
    }

    /// Create an experiment with one unmanipulated, studied row per measured
    /// variable of the true graph.
    pub fn add_experiment(&mut self, name: impl Into<String>) -> LabResult<&Experiment> {
        let experiment = Experiment::new(name, &self.true_graph);
        self.insert_experiment(experiment)
    }

    /// Register an experiment built elsewhere, after validating it against the
    /// true graph.
    pub fn insert_experiment(&mut self, experiment: Experiment) -> LabResult<&Experiment> {
        if self.experiments.contains_key(experiment.name()) {
            return Err(ReferenceError::DuplicateName {
                kind: "experiment",
                name: experiment.name().to_string(),
            }
            .into());
        }
        experiment.validate_against(&self.true_graph)?;
        self.sweep();
        let name = experiment.name().to_string();
        info!(experiment = %name, "experiment added");
        Ok(self.experiments.entry(name).or_insert(experiment))
    }

    pub fn experiment(&self, name: &str) -> LabResult<&Experiment> {
        self.experiments
            .get(name)
            .ok_or_else(|| experiment_not_found(name).into())
    }

    pub fn experiment_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.experiments.keys().map(String::as_str)
    }

    pub fn set_manipulation(
        &mut self,
        experiment: &str,
        variable: &str,
        manipulation: Manipulation,
    ) -> LabResult<()> {
        let entry = self
            .experiments
            .get_mut(experiment)
            .ok_or_else(|| experiment_not_found(experiment))?;
        let label = manipulation.as_str();
        entry.set_manipulation(&self.true_graph, variable, manipulation)?;
        if let Some(deriver) = self.derivers.get_mut(experiment) {
            deriver.release_changed(entry);
        }
        debug!(experiment, variable, manipulation = label, "manipulation set");
        Ok(())
    }

    pub fn set_studied(&mut self, experiment: &str, variable: &str, studied: bool) -> LabResult<()> {
        let entry = self
            .experiments
            .get_mut(experiment)
            .ok_or_else(|| experiment_not_found(experiment))?;
        entry.set_studied(&self.true_graph, variable, studied)?;
        Ok(())
    }

    /// Remove an experiment together with its samples, its freeze latch and
    /// every guess keyed by it.
    pub fn remove_experiment(&mut self, name: &str) -> LabResult<Experiment> {
        let experiment = self
            .experiments
            .remove(name)
            .ok_or_else(|| experiment_not_found(name))?;
        self.samples.retain(|_, owner| owner != name);
        self.derivers.remove(name);
        let guesses = self.manipulated_guesses.remove_experiment(name)
            + self.independence_guesses.remove_experiment(name);
        info!(experiment = name, guesses, "experiment removed");
        Ok(experiment)
    }

    pub fn add_sample(&mut self, sample: impl Into<String>, experiment: &str) -> LabResult<()> {
        let sample = sample.into();
        if !self.experiments.contains_key(experiment) {
            return Err(experiment_not_found(experiment).into());
        }
        if self.samples.contains_key(&sample) {
            return Err(ReferenceError::DuplicateName {
                kind: "sample",
                name: sample,
            }
            .into());
        }
        self.sweep();
        debug!(sample = %sample, experiment, "sample added");
        self.samples.insert(sample, experiment.to_string());
        Ok(())
    }

    /// Experiment a sample was drawn under.
    pub fn sample_experiment(&self, sample: &str) -> LabResult<&str> {
        self.samples
            .get(sample)
            .map(String::as_str)
            .ok_or_else(|| sample_not_found(sample).into())
    }

    /// Remove a sample. Its guesses go on the next sweep.
    pub fn remove_sample(&mut self, sample: &str) -> LabResult<()> {
        self.samples
            .remove(sample)
            .ok_or_else(|| sample_not_found(sample))?;
        Ok(())
    }

    /// The true graph under `experiment`, honouring edges frozen earlier.
    pub fn correct_manipulated_graph(&mut self, experiment: &str) -> LabResult<ManipulatedGraphView> {
        let entry = self
            .experiments
            .get(experiment)
            .ok_or_else(|| experiment_not_found(experiment))?;
        let deriver = self.derivers.entry(experiment.to_string()).or_default();
        Ok(deriver.derive(&self.true_graph, entry))
    }

    /// Keep a broken edge of the true graph visible under `experiment` until
    /// its target's manipulation changes. Returns `false` if the edge is not
    /// currently broken.
    pub fn freeze_correct_edge(&mut self, experiment: &str, from: &str, to: &str) -> LabResult<bool> {
        let entry = self
            .experiments
            .get(experiment)
            .ok_or_else(|| experiment_not_found(experiment))?;
        let deriver = self.derivers.entry(experiment.to_string()).or_default();
        let frozen = deriver.freeze(&self.true_graph, entry, from, to);
        if frozen {
            debug!(experiment, from, to, "edge frozen");
        }
        Ok(frozen)
    }

    /// A hypothesis graph under `experiment`. No edges are frozen here.
    pub fn hypothesis_manipulated_graph(
        &self,
        experiment: &str,
        hypothesis: &str,
    ) -> LabResult<ManipulatedGraphView> {
        let entry = self.experiment(experiment)?;
        let graph = self.hypothesis(hypothesis)?;
        Ok(derive(graph, entry))
    }

    /// The student's guess at `hypothesis` under `experiment`, created on first
    /// access and reconciled before it is returned.
    pub fn manipulated_graph_guess(
        &self,
        experiment: &str,
        hypothesis: &str,
    ) -> LabResult<GuessedManipulatedGraph> {
        self.reconciled_manipulated_guess(&GuessKey::hypothesis(experiment, hypothesis))
    }

    pub fn set_guessed_edge_status(
        &self,
        experiment: &str,
        hypothesis: &str,
        from: &str,
        to: &str,
        status: EdgeStatus,
    ) -> LabResult<()> {
        let key = GuessKey::hypothesis(experiment, hypothesis);
        let (entry, graph) = self.resolve_hypothesis_key(&key)?;
        let mut guess = self.manipulated_guesses.get_or_create(&key);
        let _span = reconcile_span!(key).entered();
        reconcile_manipulated_graph(&mut guess, graph, entry);
        guess.set_edge_status(from, to, status)?;
        Ok(())
    }

    /// Every live manipulated-graph guess, reconciled, ordered by key.
    pub fn manipulated_graph_guesses(&self) -> Vec<(GuessKey, GuessedManipulatedGraph)> {
        self.manipulated_guesses.sweep(self);
        let mut keys = self.manipulated_guesses.keys();
        keys.sort();
        keys.into_iter()
            .filter_map(|key| {
                let guess = self.reconciled_manipulated_guess(&key).ok()?;
                Some((key, guess))
            })
            .collect()
    }

    /// Student edge tags that disagree with the hypothesis under the experiment.
    pub fn assess_manipulated_graph_guess(
        &self,
        experiment: &str,
        hypothesis: &str,
    ) -> LabResult<Vec<EdgeDiscrepancy>> {
        let guess = self.manipulated_graph_guess(experiment, hypothesis)?;
        let view = self.hypothesis_manipulated_graph(experiment, hypothesis)?;
        Ok(guess.discrepancies(&view))
    }

    pub fn independence_guess(&self, key: &GuessKey) -> LabResult<IndependenceGuess> {
        let entry = self.resolve_key(key)?;
        let mut guess = self.independence_guesses.get_or_create(key);
        let _span = reconcile_span!(key).entered();
        reconcile_independence(&mut guess, entry);
        Ok(guess.clone())
    }

    pub fn set_independence_claim(
        &self,
        key: &GuessKey,
        a: &str,
        b: &str,
        claim: IndependenceClaim,
    ) -> LabResult<()> {
        let entry = self.resolve_key(key)?;
        let mut guess = self.independence_guesses.get_or_create(key);
        let _span = reconcile_span!(key).entered();
        reconcile_independence(&mut guess, entry);
        guess.set_claim(a, b, claim)?;
        Ok(())
    }

    /// Every live independence guess, reconciled, ordered by key.
    pub fn independence_guesses(&self) -> Vec<(GuessKey, IndependenceGuess)> {
        self.independence_guesses.sweep(self);
        let mut keys = self.independence_guesses.keys();
        keys.sort();
        keys.into_iter()
            .filter_map(|key| {
                let guess = self.independence_guess(&key).ok()?;
                Some((key, guess))
            })
            .collect()
    }

    /// Score a hypothesis against the true graph and update its guess count.
    pub fn submit_hypothesis(&mut self, hypothesis: &str) -> LabResult<Submission> {
        let candidate = self
            .hypotheses
            .get(hypothesis)
            .ok_or_else(|| hypothesis_not_found(hypothesis))?;
        Ok(self.tracker.submit(hypothesis, &self.true_graph, candidate))
    }

    pub fn guess_count(&self, hypothesis: &str) -> u32 {
        self.tracker.guess_count(hypothesis)
    }

    /// Drop every guess whose key no longer resolves.
    pub fn sweep(&self) -> usize {
        self.manipulated_guesses.sweep(self) + self.independence_guesses.sweep(self)
    }

    /// Guesses held across both registries, stale ones included.
    pub fn stored_guess_count(&self) -> usize {
        self.manipulated_guesses.len() + self.independence_guesses.len()
    }

    fn reconciled_manipulated_guess(&self, key: &GuessKey) -> LabResult<GuessedManipulatedGraph> {
        let (entry, graph) = self.resolve_hypothesis_key(key)?;
        let mut guess = self.manipulated_guesses.get_or_create(key);
        let _span = reconcile_span!(key).entered();
        reconcile_manipulated_graph(&mut guess, graph, entry);
        Ok(guess.clone())
    }

    fn resolve_hypothesis_key(&self, key: &GuessKey) -> LabResult<(&Experiment, &Graph)> {
        match key {
            GuessKey::Hypothesis {
                experiment,
                hypothesis,
            } => Ok((self.experiment(experiment)?, self.hypothesis(hypothesis)?)),
            GuessKey::Sample { sample, .. } => Err(hypothesis_not_found(sample).into()),
        }
    }

    /// The experiment a key refers to, after checking its other half resolves.
    fn resolve_key(&self, key: &GuessKey) -> LabResult<&Experiment> {
        let entry = self.experiment(key.experiment())?;
        match key {
            GuessKey::Hypothesis { hypothesis, .. } => {
                self.hypothesis(hypothesis)?;
            }
            GuessKey::Sample { experiment, sample } => {
                if self.sample_experiment(sample)? != experiment.as_str() {
                    return Err(sample_not_found(sample).into());
                }
            }
        }
        Ok(entry)
    }
}

impl KeyResolver for LabContext {
    fn has_experiment(&self, name: &str) -> bool {
        self.experiments.contains_key(name)
    }

    fn has_hypothesis(&self, name: &str) -> bool {
        self.hypotheses.contains_key(name)
    }

    fn has_sample(&self, experiment: &str, sample: &str) -> bool {
        self.samples.get(sample).is_some_and(|owner| owner == experiment)
    }
}

fn experiment_not_found(name: &str) -> ReferenceError {
    ReferenceError::ExperimentNotFound {
        name: name.to_string(),
    }
}

fn hypothesis_not_found(name: &str) -> ReferenceError {
    ReferenceError::HypothesisNotFound {
        name: name.to_string(),
    }
}

fn sample_not_found(name: &str) -> ReferenceError {
    ReferenceError::SampleNotFound {
        name: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use hypolab_core::errors::ExperimentError;
    use hypolab_core::LabError;

    use super::*;

    fn chain() -> Graph {
        let mut builder = Graph::builder();
        for name in ["x", "y", "z"] {
            builder.add_measured(name).unwrap();
        }
        builder.add_edge("x", "y").unwrap();
        builder.add_edge("y", "z").unwrap();
        builder.build()
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut lab = LabContext::with_defaults(chain());
        lab.add_experiment("e").unwrap();
        lab.add_hypothesis("h", chain()).unwrap();
        lab.add_sample("s", "e").unwrap();

        assert!(matches!(
            lab.add_experiment("e"),
            Err(LabError::Reference(ReferenceError::DuplicateName { kind: "experiment", .. }))
        ));
        assert!(lab.add_hypothesis("h", chain()).is_err());
        assert!(lab.add_sample("s", "e").is_err());
    }

    #[test]
    fn sample_needs_an_existing_experiment() {
        let mut lab = LabContext::with_defaults(chain());
        let err = lab.add_sample("s", "missing").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn manipulation_edits_are_validated_against_the_true_graph() {
        let mut lab = LabContext::with_defaults(chain());
        lab.add_experiment("e").unwrap();
        let err = lab
            .set_manipulation("e", "w", Manipulation::Randomized)
            .unwrap_err();
        assert!(matches!(
            err,
            LabError::Experiment(ExperimentError::UnknownVariable { .. })
        ));
    }

    #[test]
    fn removing_a_hypothesis_forgets_its_guess_count() {
        let mut lab = LabContext::with_defaults(chain());
        lab.add_hypothesis("h", chain()).unwrap();
        assert!(lab.submit_hypothesis("h").unwrap().correct());
        assert_eq!(lab.guess_count("h"), 1);
        lab.remove_hypothesis("h").unwrap();
        assert_eq!(lab.guess_count("h"), 0);
    }

    #[test]
    fn sample_keys_are_not_manipulated_graph_keys() {
        let mut lab = LabContext::with_defaults(chain());
        lab.add_experiment("e").unwrap();
        lab.add_sample("s", "e").unwrap();
        let guess = lab.independence_guess(&GuessKey::sample("e", "s")).unwrap();
        assert_eq!(guess.len(), 3);
        assert!(lab
            .reconciled_manipulated_guess(&GuessKey::sample("e", "s"))
            .is_err());
    }
}

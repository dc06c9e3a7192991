//! One-way latch for frozen edges.
//!
//! A frozen edge stays frozen across derivations for as long as its target
//! keeps the manipulation it had when the edge was frozen. Removing or
//! changing that manipulation releases every latch on the target.

use std::collections::{BTreeSet, HashMap};

use hypolab_core::models::{Edge, Manipulation};

use crate::manipulation::Experiment;

#[derive(Debug, Clone, PartialEq, Eq)]
struct LatchedTarget {
    manipulation: Manipulation,
    sources: BTreeSet<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FreezeLatch {
    /// Keyed by target variable name.
    targets: HashMap<String, LatchedTarget>,
}

impl FreezeLatch {
    pub(crate) fn latch(&mut self, from: &str, to: &str, manipulation: Manipulation) {
        let entry = self
            .targets
            .entry(to.to_string())
            .or_insert_with(|| LatchedTarget {
                manipulation: manipulation.clone(),
                sources: BTreeSet::new(),
            });
        if entry.manipulation != manipulation {
            entry.manipulation = manipulation;
            entry.sources.clear();
        }
        entry.sources.insert(from.to_string());
    }

    /// Drop latches whose target's manipulation differs from the one latched.
    /// Returns the number of targets released.
    pub(crate) fn release_changed(&mut self, experiment: &Experiment) -> usize {
        let before = self.targets.len();
        self.targets
            .retain(|target, latched| experiment.manipulation_of(target) == &latched.manipulation);
        before - self.targets.len()
    }

    pub fn is_frozen(&self, edge: &Edge) -> bool {
        self.targets
            .get(&edge.to)
            .is_some_and(|t| t.sources.contains(&edge.from))
    }

    /// All currently latched edges.
    pub fn edges(&self) -> BTreeSet<Edge> {
        self.targets
            .iter()
            .flat_map(|(to, t)| t.sources.iter().map(move |from| Edge::new(from.as_str(), to.as_str())))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

//! Manipulated-graph derivation: which edges stay causally active once an
//! experiment intervenes on some variables.

pub mod freeze;
pub mod view;

use hypolab_observability::derive_span;
use tracing::debug;

use crate::graph::Graph;
use crate::manipulation::Experiment;

pub use freeze::FreezeLatch;
pub use view::ManipulatedGraphView;

/// Partition `graph`'s edges under `experiment` with no frozen edges.
pub fn derive(graph: &Graph, experiment: &Experiment) -> ManipulatedGraphView {
    ManipulatedGraphDeriver::new().derive(graph, experiment)
}

/// Derives views while remembering which broken edges the caller froze.
#[derive(Debug, Clone, Default)]
pub struct ManipulatedGraphDeriver {
    latch: FreezeLatch,
}

impl ManipulatedGraphDeriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latch(&self) -> &FreezeLatch {
        &self.latch
    }

    /// Partition the edges of `graph`.
    ///
    /// An edge into a randomized or locked variable is broken (frozen if
    /// latched), every other edge is active. Edges touching a variable the
    /// experiment lists as not studied are left out of all three sets.
    pub fn derive(&mut self, graph: &Graph, experiment: &Experiment) -> ManipulatedGraphView {
        let _span = derive_span!(experiment.name(), graph.edge_count()).entered();

        self.release_changed(experiment);

        let mut view = ManipulatedGraphView::empty(experiment.name());
        for edge in graph.edges() {
            if experiment.excludes(&edge.from) || experiment.excludes(&edge.to) {
                continue;
            }
            if !experiment.is_manipulated(&edge.to) {
                view.active.insert(edge);
            } else if self.latch.is_frozen(&edge) {
                view.frozen.insert(edge);
            } else {
                view.broken.insert(edge);
            }
        }

        debug!(
            active = view.active.len(),
            broken = view.broken.len(),
            frozen = view.frozen.len(),
            "derived manipulated graph"
        );
        view
    }

    /// Drop latches whose target's manipulation no longer matches `experiment`.
    ///
    /// `derive` runs this first, but a manipulation that is removed and put back
    /// between two derivations is only seen if this also runs after each edit.
    pub fn release_changed(&mut self, experiment: &Experiment) -> usize {
        let released = self.latch.release_changed(experiment);
        if released > 0 {
            debug!(released, "freeze latches released after manipulation change");
        }
        released
    }

    /// Keep a broken edge visible in later derivations.
    ///
    /// Returns `false` if the edge is not currently broken under `experiment`
    /// (absent from `graph` or its target is not manipulated); nothing is latched then.
    pub fn freeze(&mut self, graph: &Graph, experiment: &Experiment, from: &str, to: &str) -> bool {
        if !graph.has_edge(from, to) || !experiment.is_manipulated(to) {
            return false;
        }
        self.latch
            .latch(from, to, experiment.manipulation_of(to).clone());
        true
    }
}

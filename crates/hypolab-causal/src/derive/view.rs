//! The derived, read-only result of a derivation.

use hypolab_core::models::{Edge, EdgeSet, EdgeStatus};
use serde::{Deserialize, Serialize};

/// Active / broken / frozen partition of a graph's edges under one experiment.
/// Recomputed on demand; nothing mutates a view once returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManipulatedGraphView {
    pub experiment: String,
    pub active: EdgeSet,
    pub broken: EdgeSet,
    pub frozen: EdgeSet,
}

impl ManipulatedGraphView {
    pub(crate) fn empty(experiment: &str) -> Self {
        Self {
            experiment: experiment.to_string(),
            ..Self::default()
        }
    }

    /// Status of `edge` in this view, `None` if it was not reported.
    pub fn status_of(&self, edge: &Edge) -> Option<EdgeStatus> {
        if self.active.contains(edge) {
            Some(EdgeStatus::Normal)
        } else if self.broken.contains(edge) {
            Some(EdgeStatus::Broken)
        } else if self.frozen.contains(edge) {
            Some(EdgeStatus::Frozen)
        } else {
            None
        }
    }

    /// Broken and frozen edges together.
    pub fn severed(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.broken.iter().chain(self.frozen.iter())
    }

    pub fn edge_count(&self) -> usize {
        self.active.len() + self.broken.len() + self.frozen.len()
    }
}

//! Latent-permutation equivalence: is a candidate graph the answer graph up
//! to renaming of latent variables?
//!
//! Measured variables and the edges among them must match exactly by name.
//! Latents are compared under every pairing of the answer's latents with the
//! candidate's; one matching pairing is enough. The search is `O(n!)` in the
//! latent count and is never truncated.

pub mod guess_counter;
mod latent_matching;
mod measured;
pub mod permutations;

use hypolab_core::config::EquivalenceConfig;
use hypolab_core::models::Edge;
use hypolab_observability::equivalence_span;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::graph::Graph;

pub use guess_counter::{GraphShape, GuessTracker, Submission};
use permutations::{permutation_count, HeapPermutations};

/// Why two graphs were judged different, in check order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Mismatch {
    /// A measured variable of the answer has no same-named variable in the candidate.
    MissingMeasured { name: String },
    LatentCount { answer: usize, candidate: usize },
    /// No pairing of latents reproduces the answer's latent edges.
    LatentStructure { permutations_tried: u64 },
    /// A measured-to-measured answer edge is absent from the candidate.
    MissingMeasuredEdge { edge: Edge },
    /// A measured-to-measured candidate edge is absent from the answer.
    ExtraMeasuredEdge { edge: Edge },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Equivalent,
    Different(Mismatch),
}

impl Verdict {
    pub fn is_equivalent(&self) -> bool {
        matches!(self, Self::Equivalent)
    }

    pub fn mismatch(&self) -> Option<&Mismatch> {
        match self {
            Self::Equivalent => None,
            Self::Different(m) => Some(m),
        }
    }
}

/// Compare `candidate` against `answer` with default configuration.
pub fn is_equivalent(answer: &Graph, candidate: &Graph) -> bool {
    EquivalenceChecker::new().is_equivalent(answer, candidate)
}

#[derive(Debug, Clone, Default)]
pub struct EquivalenceChecker {
    config: EquivalenceConfig,
}

impl EquivalenceChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EquivalenceConfig) -> Self {
        Self { config }
    }

    pub fn is_equivalent(&self, answer: &Graph, candidate: &Graph) -> bool {
        self.compare(answer, candidate).is_equivalent()
    }

    /// Full comparison, reporting the first failed check.
    pub fn compare(&self, answer: &Graph, candidate: &Graph) -> Verdict {
        let answer_latents = answer.latent_names();
        let candidate_latents = candidate.latent_names();
        let _span = equivalence_span!(answer_latents.len(), candidate_latents.len()).entered();

        if let Some(name) = measured::missing_measured(answer, candidate) {
            return Self::different(Mismatch::MissingMeasured {
                name: name.to_string(),
            });
        }

        if answer_latents.len() != candidate_latents.len() {
            return Self::different(Mismatch::LatentCount {
                answer: answer_latents.len(),
                candidate: candidate_latents.len(),
            });
        }

        if let Err(tried) = self.match_latents(answer, candidate, &answer_latents, candidate_latents)
        {
            return Self::different(Mismatch::LatentStructure {
                permutations_tried: tried,
            });
        }

        if let Some(edge) = measured::first_unmatched_measured_edge(answer, candidate) {
            return Self::different(Mismatch::MissingMeasuredEdge { edge });
        }
        if let Some(edge) = measured::first_unmatched_measured_edge(candidate, answer) {
            return Self::different(Mismatch::ExtraMeasuredEdge { edge });
        }

        debug!("graphs equivalent");
        Verdict::Equivalent
    }

    /// Try every permutation of the candidate's latents. `Ok` with the number of
    /// permutations tried up to the first match, `Err` with the total otherwise.
    fn match_latents(
        &self,
        answer: &Graph,
        candidate: &Graph,
        answer_order: &[&str],
        candidate_latents: Vec<&str>,
    ) -> Result<u64, u64> {
        let n = candidate_latents.len();
        if n > self.config.latent_warning_threshold {
            warn!(
                latents = n,
                permutations = ?permutation_count(n),
                "large latent count; exhaustive permutation search"
            );
        }

        let mut perms = HeapPermutations::new(candidate_latents);
        let mut tried = 0u64;
        while let Some(permutation) = perms.next_permutation() {
            tried += 1;
            if latent_matching::pairing_matches(answer, candidate, answer_order, permutation) {
                debug!(tried, "latent pairing found");
                return Ok(tried);
            }
        }
        debug!(tried, "no latent pairing matched");
        Err(tried)
    }

    fn different(mismatch: Mismatch) -> Verdict {
        debug!(?mismatch, "graphs differ");
        Verdict::Different(mismatch)
    }
}

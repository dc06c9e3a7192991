//! Guess keys and the liveness contract they are checked against.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What a guess is about. Both referenced names must resolve for the guess to
/// stay alive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GuessKey {
    Hypothesis { experiment: String, hypothesis: String },
    Sample { experiment: String, sample: String },
}

impl GuessKey {
    pub fn hypothesis(experiment: impl Into<String>, hypothesis: impl Into<String>) -> Self {
        Self::Hypothesis {
            experiment: experiment.into(),
            hypothesis: hypothesis.into(),
        }
    }

    pub fn sample(experiment: impl Into<String>, sample: impl Into<String>) -> Self {
        Self::Sample {
            experiment: experiment.into(),
            sample: sample.into(),
        }
    }

    pub fn experiment(&self) -> &str {
        match self {
            Self::Hypothesis { experiment, .. } | Self::Sample { experiment, .. } => experiment,
        }
    }
}

impl fmt::Display for GuessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hypothesis {
                experiment,
                hypothesis,
            } => write!(f, "{experiment}/hypothesis:{hypothesis}"),
            Self::Sample { experiment, sample } => write!(f, "{experiment}/sample:{sample}"),
        }
    }
}

/// Answers whether the names a key refers to still exist.
pub trait KeyResolver {
    fn has_experiment(&self, name: &str) -> bool;
    fn has_hypothesis(&self, name: &str) -> bool;
    /// True if `sample` exists and was drawn under `experiment`.
    fn has_sample(&self, experiment: &str, sample: &str) -> bool;

    fn is_live(&self, key: &GuessKey) -> bool {
        match key {
            GuessKey::Hypothesis {
                experiment,
                hypothesis,
            } => self.has_experiment(experiment) && self.has_hypothesis(hypothesis),
            GuessKey::Sample { experiment, sample } => {
                self.has_experiment(experiment) && self.has_sample(experiment, sample)
            }
        }
    }
}

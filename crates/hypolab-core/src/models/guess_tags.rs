//! Student-controlled annotations layered over a graph.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Student tag on one edge of a guessed manipulated graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeStatus {
    /// Still causally active (the seeded value).
    #[default]
    Normal,
    /// Severed by a manipulation.
    Broken,
    /// Severed but kept visible.
    Frozen,
}

impl EdgeStatus {
    pub fn is_severed(&self) -> bool {
        matches!(self, Self::Broken | Self::Frozen)
    }
}

/// Student claim about whether two variables are independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndependenceClaim {
    #[default]
    Unknown,
    Independent,
    Dependent,
}

/// Unordered pair of variable names, stored sorted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VariablePair {
    first: String,
    second: String,
}

impl VariablePair {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }

    pub fn contains(&self, name: &str) -> bool {
        self.first == name || self.second == name
    }
}

impl fmt::Display for VariablePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.first, self.second)
    }
}

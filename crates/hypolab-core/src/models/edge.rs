//! Directed edges keyed by variable names.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A directed edge `from -> to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// True if `name` is either endpoint.
    pub fn touches(&self, name: &str) -> bool {
        self.from == name || self.to == name
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Ordered edge set, so derived views render deterministically.
pub type EdgeSet = BTreeSet<Edge>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touches_either_endpoint() {
        let edge = Edge::new("education", "income");
        assert!(edge.touches("education"));
        assert!(edge.touches("income"));
        assert!(!edge.touches("happiness"));
        assert_eq!(edge.to_string(), "education -> income");
    }
}

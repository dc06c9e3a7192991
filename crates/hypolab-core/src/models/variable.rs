//! Variables are identified by name; the kind decides how they are compared.

use serde::{Deserialize, Serialize};

/// The 3 variable kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableKind {
    /// Observed directly; matched by name.
    Measured,
    /// Unobserved; freely renamable when graphs are compared.
    Latent,
    /// Exogenous error term.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variable {
    /// Case-sensitive, unique within a graph.
    pub name: String,
    pub kind: VariableKind,
}

impl Variable {
    pub fn new(name: impl Into<String>, kind: VariableKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn measured(name: impl Into<String>) -> Self {
        Self::new(name, VariableKind::Measured)
    }

    pub fn latent(name: impl Into<String>) -> Self {
        Self::new(name, VariableKind::Latent)
    }

    pub fn error(name: impl Into<String>) -> Self {
        Self::new(name, VariableKind::Error)
    }

    pub fn is_latent(&self) -> bool {
        self.kind == VariableKind::Latent
    }

    pub fn is_measured(&self) -> bool {
        self.kind == VariableKind::Measured
    }
}

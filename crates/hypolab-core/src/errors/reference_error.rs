use super::error_code::{self, LabErrorCode};

/// A name passed by the host did not resolve.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    #[error("experiment not found: {name}")]
    ExperimentNotFound { name: String },

    #[error("hypothesis not found: {name}")]
    HypothesisNotFound { name: String },

    #[error("sample not found: {name}")]
    SampleNotFound { name: String },

    #[error("edge not found: {from} -> {to}")]
    EdgeNotFound { from: String, to: String },

    #[error("variable pair not found: {first} / {second}")]
    PairNotFound { first: String, second: String },

    #[error("{kind} already exists: {name}")]
    DuplicateName { kind: &'static str, name: String },
}

impl ReferenceError {
    pub fn is_not_found(&self) -> bool {
        !matches!(self, Self::DuplicateName { .. })
    }
}

impl LabErrorCode for ReferenceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateName { .. } => error_code::DUPLICATE_NAME,
            _ => error_code::NOT_FOUND,
        }
    }
}

use super::error_code::{self, LabErrorCode};

/// Graph snapshot construction errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("unknown variable: {name}")]
    UnknownVariable { name: String },

    #[error("variable already defined: {name}")]
    DuplicateVariable { name: String },

    #[error("self-loop on variable {name}")]
    SelfLoop { name: String },

    #[error("edge {from} -> {to} already exists")]
    DuplicateEdge { from: String, to: String },
}

impl LabErrorCode for GraphError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownVariable { .. } => error_code::UNKNOWN_VARIABLE,
            Self::DuplicateVariable { .. } => error_code::DUPLICATE_VARIABLE,
            Self::SelfLoop { .. } => error_code::SELF_LOOP,
            Self::DuplicateEdge { .. } => error_code::DUPLICATE_EDGE,
        }
    }
}

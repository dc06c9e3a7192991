use super::error_code::{self, LabErrorCode};

/// Experiment/graph contract violations. These indicate a caller bug and are
/// raised where the experiment is built, never during derivation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExperimentError {
    #[error("experiment {experiment} references unknown variable {variable}")]
    UnknownVariable { experiment: String, variable: String },

    #[error("experiment {experiment} locks {variable} without a value")]
    MissingLockedValue { experiment: String, variable: String },

    #[error("experiment {experiment} cannot manipulate non-measured variable {variable}")]
    UnmanipulableVariable { experiment: String, variable: String },
}

impl LabErrorCode for ExperimentError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownVariable { .. } => error_code::UNKNOWN_VARIABLE,
            Self::MissingLockedValue { .. } => error_code::MISSING_LOCKED_VALUE,
            Self::UnmanipulableVariable { .. } => error_code::UNMANIPULABLE_VARIABLE,
        }
    }
}

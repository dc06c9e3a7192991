//! Error handling for hypolab.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod experiment_error;
pub mod graph_error;
pub mod reference_error;

pub use config_error::ConfigError;
pub use error_code::LabErrorCode;
pub use experiment_error::ExperimentError;
pub use graph_error::GraphError;
pub use reference_error::ReferenceError;

/// Top-level error. Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum LabError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("experiment error: {0}")]
    Experiment(#[from] ExperimentError),

    #[error("reference error: {0}")]
    Reference(#[from] ReferenceError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl LabError {
    /// True for the recoverable "not found" family. Hosts usually ignore these
    /// when the referring window has already gone away.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Reference(e) if e.is_not_found())
    }
}

impl LabErrorCode for LabError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Graph(e) => e.error_code(),
            Self::Experiment(e) => e.error_code(),
            Self::Reference(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

/// Convenience alias used across the workspace.
pub type LabResult<T> = Result<T, LabError>;

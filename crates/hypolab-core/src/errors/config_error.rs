use super::error_code::{self, LabErrorCode};

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {message}")]
    Parse { message: String },

    #[error("failed to read config {path}: {message}")]
    Io { path: String, message: String },
}

impl LabErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Parse { .. } => error_code::CONFIG_PARSE,
            Self::Io { .. } => error_code::CONFIG_IO,
        }
    }
}

//! Error types for the scoring engine.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Parameter set (or catalog entry) failed validation. Every violation is listed.
    #[error("validation failed: {}", errors.join("; "))]
    Validation { errors: Vec<String> },

    /// Indicator or company input missing or malformed.
    #[error("invalid input data: {0}")]
    Data(String),

    /// Catalog cannot serve the request (e.g. no band for an indicator).
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl EngineError {
    pub fn validation(errors: Vec<String>) -> Self {
        EngineError::Validation { errors }
    }

    /// Field-level messages for validation failures, empty otherwise.
    pub fn field_errors(&self) -> &[String] {
        match self {
            EngineError::Validation { errors } => errors,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

use thiserror::Error;

use crate::store::StoreError;

/// Validation and contract errors exposed by `sectorscope-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("date must be an ISO calendar date (YYYY-MM-DD): '{value}'")]
    InvalidDate { value: String },
    #[error("sector cannot be empty")]
    EmptySector,
    #[error("moving-average window must be greater than zero")]
    InvalidWindow,
    #[error("lookback must cover at least one date")]
    InvalidLookback,
    #[error("upstream url must start with http:// or https://: '{value}'")]
    InvalidApiUrl { value: String },
    #[error("environment variable '{name}' has an invalid value: '{value}'")]
    InvalidEnvValue { name: &'static str, value: String },

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },
    #[error("upstream label cannot be empty")]
    EmptyUpstream,

    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Stable machine-readable code for envelope errors.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation.invalid_input",
            Self::Store(error) => error.code(),
            Self::Serialization(_) => "serialization.failed",
        }
    }
}

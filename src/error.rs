//! Error types for the caching facade
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::engine::Operation;
use crate::models::ErrorResponse;

// == Config Error Enum ==
/// Raised when facade options fail validation. No facade is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No engine was supplied
    #[error("engine is required and should implement the Engine trait")]
    MissingEngine,

    /// Default TTL is missing, not a number, NaN or not positive
    #[error("default_ttl is required and should be a positive number (got {0:?})")]
    InvalidDefaultTtl(String),

    /// Namespace is empty
    #[error("namespace is required and should be a non-empty string")]
    EmptyNamespace,

    /// Namespace contains non alphanumeric characters
    #[error("namespace can only contain alphanumeric characters (got {0:?})")]
    InvalidNamespace(String),

    /// Object mode flag is present but not a boolean
    #[error("object_mode must be a boolean if provided (got {0:?})")]
    InvalidObjectMode(String),

    /// Any other unparsable setting
    #[error("invalid value for {field}: {value:?}")]
    InvalidSetting { field: &'static str, value: String },
}

/// Native error raised inside an engine's backend.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// == Engine Error Enum ==
/// Errors reported by a storage engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine does not provide this operation
    #[error("engine has not implemented the \"{0}\" function")]
    NotImplemented(Operation),

    /// A composite key without a namespace separator
    #[error("key {0:?} has no namespace separator")]
    MissingNamespace(String),

    /// Backend specific failure, keeping the native error as its source
    #[error("{0}")]
    Backend(#[source] BoxError),
}

impl EngineError {
    /// Wraps a backend failure. Accepts any error type as well as plain
    /// messages.
    pub fn backend(err: impl Into<BoxError>) -> Self {
        EngineError::Backend(err.into())
    }
}

// == Cache Error Enum ==
/// Unified error type returned by every facade operation.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Construction-time validation failure
    #[error("invalid options: {0}")]
    Config(#[from] ConfigError),

    /// The engine reported an error while performing `operation`
    #[error("engine failed to perform '{operation}' call")]
    Engine {
        operation: Operation,
        #[source]
        source: EngineError,
    },

    /// Object mode could not encode the value; the engine was not called
    #[error("failed to serialize value: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Object mode could not decode the stored value
    #[error("failed to deserialize stored value: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// The request itself is malformed (HTTP surface only)
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Nothing stored under the key (HTTP surface only)
    #[error("key not found: {0}")]
    NotFound(String),
}

impl CacheError {
    /// Wraps an engine error with the operation it came from.
    pub fn engine(operation: Operation, source: EngineError) -> Self {
        CacheError::Engine { operation, source }
    }

    /// Returns the operation for engine errors.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            CacheError::Engine { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CacheError::Engine {
                source: EngineError::NotImplemented(_),
                ..
            } => StatusCode::NOT_IMPLEMENTED,
            CacheError::Engine { .. } => StatusCode::BAD_GATEWAY,
            CacheError::Serialization(_) | CacheError::Deserialization(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for facade operations.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Result type returned by engines.
pub type EngineResult<T> = std::result::Result<T, EngineError>;

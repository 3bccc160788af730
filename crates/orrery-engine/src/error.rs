//! Error types for the engine layer

use thiserror::Error;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by the engine. None of them are fatal to a running session.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("Unknown texture: {0}")]
    UnknownTexture(String),
}

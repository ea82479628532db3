//! Checkpoint error types.

use thiserror::Error;

/// Errors that can occur while encoding, decoding or restoring a checkpoint
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// JSON encoding or decoding failed
    #[error("Checkpoint JSON codec failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary encoding or decoding failed
    #[error("Checkpoint binary codec failed: {0}")]
    Binary(#[from] bincode::Error),

    /// Checkpoint was written by an incompatible format version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Checkpoint contents are inconsistent or do not fit the machine
    #[error("Checkpoint validation failed: {0}")]
    ValidationFailed(String),
}

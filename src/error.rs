//! Error types for map generation, mesh queries and persistence.

use thiserror::Error;

/// Failures raised while generating regions or querying a navigation mesh.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    /// Parameters rejected before any work is done.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A rejection-sampling loop ran out of its iteration budget.
    #[error("{operation} gave up after {attempts} attempts")]
    ProbabilisticTimeout {
        operation: &'static str,
        attempts: usize,
    },

    /// The polygon clipping backend reported a failure.
    #[error("geometry operation failed: {0}")]
    Geometry(String),
}

impl MapError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        MapError::Configuration(message.into())
    }
}

/// Failures while saving or loading map files.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("save file version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("save file holds an inconsistent mesh: {0}")]
    Corrupt(String),
}

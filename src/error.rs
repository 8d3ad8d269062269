use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CbbocError {
    /// The evaluation allowance (pooled or per-instance) is used up.
    #[error("Evaluations exceeded")]
    EvaluationsExceeded,

    /// The active phase deadline has passed.
    #[error("Time exceeded")]
    TimeExceeded,

    #[error("Invalid candidate: expected {expected} genes, got {actual}")]
    InvalidCandidate { expected: usize, actual: usize },

    #[error("Manifest format error: {0}")]
    ManifestFormat(String),

    #[error("Instance format error: {0}")]
    InstanceFormat(String),

    #[error("Invalid training category: {0}")]
    InvalidTrainingCategory(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Competitor error: {0}")]
    Competitor(String),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl CbbocError {
    /// True for the two expected exhaustion signals, which end a phase or a
    /// testing instance normally instead of failing the run.
    pub fn is_budget_signal(&self) -> bool {
        matches!(self, CbbocError::EvaluationsExceeded | CbbocError::TimeExceeded)
    }
}

pub type Result<T> = std::result::Result<T, CbbocError>;

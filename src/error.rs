use thiserror::Error;

/// Errors surfaced by the analysis engine
///
/// Degraded sensor input never produces an error; only caller contract
/// violations and inconsistent configuration do.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Malformed skeleton: expected {expected} values, got {actual}")]
    MalformedSkeleton { expected: usize, actual: usize },

    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

//! Error types for the stride analysis core

use thiserror::Error;

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors surfaced by the threshold estimator and the analysis pipeline.
///
/// An empty cluster during estimation is not an error: the estimator resets
/// that center to 0.0 and keeps iterating.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Clustering needs at least two samples to seed its centers
    #[error("not enough samples to detect thresholds: got {len}, need at least 2")]
    InsufficientData { len: usize },

    /// The two-means iteration did not settle within the iteration ceiling
    #[error("threshold estimation did not converge after {iterations} iterations (last centers {c1}, {c2})")]
    ConvergenceFailure { iterations: usize, c1: f32, c2: f32 },

    /// NaN or infinite input sample
    #[error("non-finite sample {value} at index {index}")]
    NonFiniteSample { index: usize, value: f32 },

    /// NaN or infinite initial center
    #[error("non-finite seed centers {c1}, {c2}")]
    NonFiniteSeed { c1: f32, c2: f32 },
}

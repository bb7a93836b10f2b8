//! Error types for the buyplan crates
//!
//! [`BuyPlanError`] covers every failure the estimator and the chart
//! renderers can report. Inputs coming from the command line are already
//! range-checked by clap, so in practice these surface only when the
//! library is driven directly.

use thiserror::Error;

/// Unified error type for buyplan operations.
#[derive(Error, Debug)]
pub enum BuyPlanError {
    /// Lifespan, store count or sample count outside the accepted range
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Reference table that cannot be used for adjustment
    #[error("Invalid reference data: {0}")]
    InvalidReference(String),

    /// Serialization/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Formatting failures while rendering a chart
    #[error("Render error: {0}")]
    Render(String),
}

/// Convenience type alias for Results using BuyPlanError.
pub type BuyPlanResult<T> = Result<T, BuyPlanError>;

impl From<serde_json::Error> for BuyPlanError {
    fn from(err: serde_json::Error) -> Self {
        BuyPlanError::Parse(err.to_string())
    }
}

impl From<std::fmt::Error> for BuyPlanError {
    fn from(err: std::fmt::Error) -> Self {
        BuyPlanError::Render(err.to_string())
    }
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scoring failures are scoped to a single team, league, match or variant.
/// The batch pipeline collects them into its report instead of aborting the
/// surrounding run.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelError {
    #[error("missing data: {0}")]
    MissingData(String),

    #[error("league normalization: {0}")]
    Normalization(String),

    #[error("numeric domain: {0}")]
    NumericDomain(String),

    #[error("cancelled before scoring")]
    Cancelled,
}

//! Error types for chart construction.

use crate::results::Metric;
use thiserror::Error;

/// Failures detected while turning a results table into chart geometry
#[derive(Debug, Error, PartialEq)]
pub enum ChartError {
    #[error("problem '{problem}': algorithm '{algorithm}' has no value for metric '{metric}'")]
    MissingMetric {
        problem: String,
        algorithm: String,
        metric: Metric,
    },
}

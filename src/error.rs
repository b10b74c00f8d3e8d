//! Error taxonomy for profiling, recommendation and chart aggregation.
//!
//! Every failure the core can surface is a [`ChartError`] variant. Each variant
//! maps to a short machine-readable code and renders into the uniform
//! [`ErrorEnvelope`] (`{"error": ..., "message": ...}`) returned to callers:
//!
//! ```
//! use chartwise::error::ChartError;
//!
//! let err = ChartError::ColumnNotFound("Nonexistent".to_owned());
//! let envelope = err.to_envelope();
//! assert_eq!(envelope.error, "column_not_found");
//! assert!(envelope.message.contains("Nonexistent"));
//! ```
//!
//! `GenerationService` is the one variant that is never surfaced: the
//! recommendation engine absorbs it and falls back to the heuristic strategy.
//!
//! ## Context Extension Trait
//!
//! [`ResultExt`] adds `.context()` to any result whose error converts into
//! [`ChartError`]:
//!
//! ```no_run
//! use chartwise::error::ResultExt as _;
//!
//! fn read_settings() -> chartwise::error::Result<String> {
//!     std::fs::read_to_string("settings.json").context("Failed to read settings")
//! }
//! ```

use serde::Serialize;
use std::fmt;

/// Main error type for chartwise operations.
#[derive(Debug)]
pub enum ChartError {
    /// Dataset has no columns or is otherwise unusable
    InvalidDataset(String),

    /// A requested axis column does not exist in the dataset
    ColumnNotFound(String),

    /// Chart type outside bar, line, pie, scatter
    InvalidChartType(String),

    /// Aggregation outside sum, mean, count, max, min
    InvalidAggregation(String),

    /// A bar, line or scatter y axis that is not a numeric column
    NonNumericColumn(String),

    /// A required request parameter is absent
    MissingParameter(String),

    /// The dataset loader could not produce a dataset
    DatasetLoad(String),

    /// Polars or other data processing failure
    DataProcessing(String),

    /// Configuration errors
    Config(String),

    /// Transport, timeout or parse failure of the text-generation call
    GenerationService(String),
}

impl ChartError {
    /// Short machine-readable code used in the error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidDataset(_) => "invalid_dataset",
            Self::ColumnNotFound(_) => "column_not_found",
            Self::InvalidChartType(_) => "invalid_chart_type",
            Self::InvalidAggregation(_) => "invalid_aggregation",
            Self::NonNumericColumn(_) => "invalid_column_type",
            Self::MissingParameter(_) => "missing_parameter",
            Self::DatasetLoad(_) => "dataset_load_error",
            Self::DataProcessing(_) => "data_processing_error",
            Self::Config(_) => "config_error",
            Self::GenerationService(_) => "generation_service_error",
        }
    }

    /// True for failures caused by the caller's input rather than the system.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDataset(_)
                | Self::ColumnNotFound(_)
                | Self::InvalidChartType(_)
                | Self::InvalidAggregation(_)
                | Self::NonNumericColumn(_)
                | Self::MissingParameter(_)
        )
    }

    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            error: self.code().to_owned(),
            message: self.to_string(),
        }
    }
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDataset(msg) => write!(f, "Invalid dataset: {msg}"),
            Self::ColumnNotFound(name) => {
                write!(f, "Column '{name}' not found in the dataset")
            }
            Self::InvalidChartType(value) => write!(
                f,
                "Invalid chart_type '{value}'. Must be one of: bar, line, pie, scatter"
            ),
            Self::InvalidAggregation(value) => write!(
                f,
                "Invalid aggregation '{value}'. Must be one of: sum, mean, count, max, min"
            ),
            Self::NonNumericColumn(name) => write!(
                f,
                "Column '{name}' is not numeric. Bar, line and scatter charts need a numeric y_axis"
            ),
            Self::MissingParameter(name) => write!(f, "Missing required parameter: {name}"),
            Self::DatasetLoad(msg) => write!(f, "Failed to load dataset: {msg}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::GenerationService(msg) => write!(f, "Generation service error: {msg}"),
        }
    }
}

impl std::error::Error for ChartError {}

impl From<std::io::Error> for ChartError {
    fn from(err: std::io::Error) -> Self {
        Self::DatasetLoad(err.to_string())
    }
}

impl From<serde_json::Error> for ChartError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for ChartError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

impl From<anyhow::Error> for ChartError {
    fn from(err: anyhow::Error) -> Self {
        Self::DataProcessing(format!("{err:#}"))
    }
}

/// Uniform JSON body for every failure kind.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub error: String,
    pub message: String,
}

/// Result type alias for chartwise operations.
pub type Result<T> = std::result::Result<T, ChartError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error, keeping its variant.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<ChartError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        let msg = msg.into();
        self.map_err(|e| prefix(e.into(), &msg))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| prefix(e.into(), &f()))
    }
}

fn prefix(err: ChartError, msg: &str) -> ChartError {
    match err {
        ChartError::InvalidDataset(m) => ChartError::InvalidDataset(format!("{msg}: {m}")),
        ChartError::DatasetLoad(m) => ChartError::DatasetLoad(format!("{msg}: {m}")),
        ChartError::DataProcessing(m) => ChartError::DataProcessing(format!("{msg}: {m}")),
        ChartError::Config(m) => ChartError::Config(format!("{msg}: {m}")),
        ChartError::GenerationService(m) => {
            ChartError::GenerationService(format!("{msg}: {m}"))
        }
        // Request-validation errors carry a value, not a message.
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChartError::ColumnNotFound("Nonexistent".to_owned());
        assert_eq!(
            err.to_string(),
            "Column 'Nonexistent' not found in the dataset"
        );
    }

    #[test]
    fn test_envelope_codes() {
        let envelope = ChartError::InvalidChartType("radar".to_owned()).to_envelope();
        assert_eq!(envelope.error, "invalid_chart_type");
        assert!(envelope.message.contains("radar"));

        let json = serde_json::to_value(&envelope).expect("envelope serializes");
        assert_eq!(json["error"], "invalid_chart_type");
    }

    #[test]
    fn test_client_error_split() {
        assert!(ChartError::InvalidAggregation("median".to_owned()).is_client_error());
        assert!(ChartError::NonNumericColumn("Product".to_owned()).is_client_error());
        assert!(!ChartError::DatasetLoad("gone".to_owned()).is_client_error());
        assert!(!ChartError::GenerationService("timeout".to_owned()).is_client_error());
    }

    #[test]
    fn test_result_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file.csv",
        ));

        let result: Result<()> = result.context("Failed to open dataset");
        let err = result.expect_err("context keeps the error");
        assert_eq!(err.code(), "dataset_load_error");
        assert!(err.to_string().contains("Failed to open dataset"));
    }
}

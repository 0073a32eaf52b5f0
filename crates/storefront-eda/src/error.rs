//! Custom error types for the cleaning and analysis stages.
//!
//! This module provides the error hierarchy using `thiserror` so that both
//! stages can propagate failures from polars, the filesystem and the
//! statistics routines with context attached.
//!
//! Errors are serializable so they can be embedded in a JSON report.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

use crate::plotting::PlotError;

/// The main error type for the storefront analysis.
#[derive(Error, Debug)]
pub enum EdaError {
    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Not enough usable observations for a computation.
    #[error("Insufficient data for {operation}: {reason}")]
    InsufficientData { operation: String, reason: String },

    /// A statistical distribution could not be constructed or evaluated.
    #[error("Statistics error: {0}")]
    Statistics(String),

    /// Chart rendering failed.
    #[error("Plot error: {0}")]
    Plot(#[from] PlotError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<EdaError>,
    },
}

impl EdaError {
    /// Shorthand for [`EdaError::InsufficientData`].
    pub fn insufficient(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        EdaError::InsufficientData {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        EdaError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable code for the error kind, used in JSON output.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::InsufficientData { .. } => "INSUFFICIENT_DATA",
            Self::Statistics(_) => "STATISTICS_ERROR",
            Self::Plot(_) => "PLOT_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }
}

impl Serialize for EdaError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("EdaError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

impl From<crate::config::ConfigValidationError> for EdaError {
    fn from(err: crate::config::ConfigValidationError) -> Self {
        EdaError::InvalidConfig(err.to_string())
    }
}

/// Result type alias for cleaning and analysis operations.
pub type Result<T> = std::result::Result<T, EdaError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| EdaError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            EdaError::ColumnNotFound("isGame".to_string()).error_code(),
            "COLUMN_NOT_FOUND"
        );
        assert_eq!(
            EdaError::insufficient("pearson", "1 point").error_code(),
            "INSUFFICIENT_DATA"
        );
    }

    #[test]
    fn test_config_error_conversion() {
        let error: EdaError = crate::config::ConfigValidationError::InvalidTopGenres(0).into();
        assert_eq!(error.error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_insufficient_message() {
        let error = EdaError::insufficient("Mann-Whitney U test", "discounted group is empty");
        assert_eq!(
            error.to_string(),
            "Insufficient data for Mann-Whitney U test: discounted group is empty"
        );
    }

    #[test]
    fn test_error_serialization() {
        let error = EdaError::ColumnNotFound("reviewCount".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("COLUMN_NOT_FOUND"));
        assert!(json.contains("reviewCount"));
    }

    #[test]
    fn test_with_context() {
        let error =
            EdaError::ColumnNotFound("genres".to_string()).with_context("While cleaning");
        assert!(error.to_string().contains("While cleaning"));
        assert_eq!(error.error_code(), "COLUMN_NOT_FOUND");
    }

    #[test]
    fn test_result_ext_on_polars_error() {
        let result: std::result::Result<(), polars::error::PolarsError> = Err(
            polars::error::PolarsError::ColumnNotFound("finalAmount".into()),
        );
        let error = result.context("Loading cleaned dataset").unwrap_err();
        assert_eq!(error.error_code(), "POLARS_ERROR");
        assert!(error.to_string().starts_with("Loading cleaned dataset"));
    }
}

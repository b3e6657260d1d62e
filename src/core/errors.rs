//! Error types for the lifeboat library.
//!
//! Statistical degeneracies are not errors: they surface as
//! [`TestOutcome::Undefined`](crate::stats::outcome::TestOutcome::Undefined) so a
//! single bad test never aborts a run. This module covers the
//! infrastructure failures around the statistics: reading the dataset,
//! loading configuration and writing reports.

use std::io;

use thiserror::Error;

/// Main result type for lifeboat operations.
pub type Result<T> = std::result::Result<T, LifeboatError>;

/// Error type for all lifeboat operations.
#[derive(Error, Debug)]
pub enum LifeboatError {
    /// I/O related errors (dataset, config and report files)
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// CSV decoding errors
    #[error("CSV error: {message}")]
    Csv {
        /// Error description
        message: String,
        /// Underlying CSV error
        #[source]
        source: Option<csv::Error>,
    },

    /// Dataset shape or content errors (missing columns, bad cells)
    #[error("Dataset error: {message}")]
    Dataset {
        /// Error description
        message: String,
        /// Column that caused the error
        column: Option<String>,
        /// 1-based data row (header excluded)
        row: Option<usize>,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// Mathematical computation errors
    #[error("Mathematical error: {message}")]
    Math {
        /// Error description
        message: String,
        /// Context of the mathematical operation
        context: Option<String>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Data type being serialized
        data_type: Option<String>,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Report rendering errors
    #[error("Report error: {message}")]
    Report {
        /// Error description
        message: String,
        /// Report format being produced
        format: Option<String>,
    },
}

impl LifeboatError {
    /// Create a new I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a dataset error pinned to a cell
    pub fn dataset_cell(message: impl Into<String>, column: impl Into<String>, row: usize) -> Self {
        Self::Dataset {
            message: message.into(),
            column: Some(column.into()),
            row: Some(row),
        }
    }

    /// Create a new configuration error with field context
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new mathematical error
    pub fn math(message: impl Into<String>) -> Self {
        Self::Math {
            message: message.into(),
            context: None,
        }
    }

    /// Create a new report error for the given format
    pub fn report(message: impl Into<String>, format: impl Into<String>) -> Self {
        Self::Report {
            message: message.into(),
            format: Some(format.into()),
        }
    }

    /// Add context to an existing error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        match &mut self {
            Self::Math { context: ctx, .. } => {
                *ctx = Some(context.into());
            }
            Self::Io { message, .. } | Self::Csv { message, .. } => {
                *message = format!("{}: {}", context.into(), message);
            }
            _ => {}
        }
        self
    }
}

impl From<io::Error> for LifeboatError {
    fn from(err: io::Error) -> Self {
        Self::io("I/O operation failed", err)
    }
}

impl From<csv::Error> for LifeboatError {
    fn from(err: csv::Error) -> Self {
        Self::Csv {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for LifeboatError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: format!("JSON serialization failed: {err}"),
            data_type: Some("JSON".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml::Error> for LifeboatError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: format!("YAML serialization failed: {err}"),
            data_type: Some("YAML".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

/// Result extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;

    /// Add static context to an error result
    fn context(self, msg: &'static str) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<LifeboatError>,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }

    fn context(self, msg: &'static str) -> Result<T> {
        self.map_err(|e| e.into().with_context(msg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_cell_error() {
        let err = LifeboatError::dataset_cell("not a number", "fare", 12);

        if let LifeboatError::Dataset {
            message,
            column,
            row,
        } = err
        {
            assert_eq!(message, "not a number");
            assert_eq!(column, Some("fare".to_string()));
            assert_eq!(row, Some(12));
        } else {
            panic!("Expected Dataset error");
        }
    }

    #[test]
    fn test_config_field_error() {
        let err = LifeboatError::config_field("alpha must be in (0, 1)", "analysis.alpha");

        if let LifeboatError::Config { message, field } = err {
            assert_eq!(message, "alpha must be in (0, 1)");
            assert_eq!(field, Some("analysis.alpha".to_string()));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_with_context_math_error() {
        let err = LifeboatError::math("Overflow occurred").with_context("pooled variance");

        if let LifeboatError::Math { context, .. } = err {
            assert_eq!(context, Some("pooled variance".to_string()));
        } else {
            panic!("Expected Math error with context");
        }
    }

    #[test]
    fn test_with_context_prefixes_io_message() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = LifeboatError::io("read failed", io_err).with_context("titanic.csv");

        assert!(err.to_string().contains("titanic.csv: read failed"));
    }

    #[test]
    fn test_with_context_non_contextual_error() {
        let err = LifeboatError::config_field("Bad config", "plots").with_context("ignored");

        if let LifeboatError::Config { message, .. } = err {
            assert_eq!(message, "Bad config");
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_result_extension() {
        let result: std::result::Result<i32, std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "File not found",
        ));

        let converted = result.context("Failed to read dataset");
        assert!(matches!(converted, Err(LifeboatError::Io { .. })));
    }

    #[test]
    fn test_from_yaml_error() {
        let yaml_err = serde_yaml::from_str::<i32>("invalid: yaml: content").unwrap_err();
        let err: LifeboatError = yaml_err.into();

        if let LifeboatError::Serialization { data_type, .. } = err {
            assert_eq!(data_type, Some("YAML".to_string()));
        } else {
            panic!("Expected Serialization error");
        }
    }

    #[test]
    fn test_error_display_formatting() {
        let err = LifeboatError::report("missing template", "html");
        assert_eq!(format!("{}", err), "Report error: missing template");
    }
}

use thiserror::Error;

use crate::core::errors::LifeboatError;

/// Failures while rendering or writing a report
#[derive(Error, Debug)]
pub enum ReportError {
    /// Template failed to parse
    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),
    /// Template failed to render
    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),
    /// Report file could not be written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// YAML serialization failed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Format has no file representation
    #[error("Format '{0}' does not produce a report file")]
    UnsupportedFormat(String),
}

impl From<ReportError> for LifeboatError {
    fn from(err: ReportError) -> Self {
        let format = match &err {
            ReportError::Template(_) | ReportError::Render(_) => "template",
            ReportError::Serialization(_) => "json",
            ReportError::Yaml(_) => "yaml",
            ReportError::Io(_) => "file",
            ReportError::UnsupportedFormat(format) => format.as_str(),
        }
        .to_string();
        LifeboatError::report(err.to_string(), format)
    }
}

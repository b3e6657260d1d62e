//! Report rendering to JSON, YAML, Markdown and HTML files.

mod error;
mod generator;
mod helpers;
mod templates;

pub use error::ReportError;
pub use generator::{report_path, ReportGenerator, REPORT_FILE_STEM};

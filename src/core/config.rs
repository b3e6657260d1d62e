//! Configuration types and management for lifeboat.
//!
//! Configuration is a plain YAML document with four sections. Every field
//! has a default, so an empty file (or no file at all) is a valid
//! configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{LifeboatError, Result};

/// Main configuration for a lifeboat run
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LifeboatConfig {
    /// Dataset loading and cleaning
    #[serde(default)]
    pub data: DataConfig,

    /// Hypothesis testing settings
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Plot summary settings
    #[serde(default)]
    pub plots: PlotConfig,

    /// Report output settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl LifeboatConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            LifeboatError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        // serde_yaml rejects an empty document; treat it as all defaults
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(Into::into)
    }

    /// Save configuration to a YAML file
    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content).map_err(|e| {
            LifeboatError::io(
                format!("Failed to write config file: {}", path.display()),
                e,
            )
        })
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        self.analysis.validate()?;
        self.plots.validate()?;
        Ok(())
    }
}

/// How missing ages are treated before numeric tests
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MissingAgePolicy {
    /// Row-wise deletion inside each test that reads age
    #[default]
    Omit,
    /// Replace missing ages with the median observed age
    Median,
}

/// Dataset configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DataConfig {
    /// Default dataset path when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Missing-age handling
    #[serde(default)]
    pub missing_age: MissingAgePolicy,
}

/// Which hypotheses to evaluate
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Suite {
    /// Sex × survival, age by survival, age by class, age vs fare
    Core,
    /// The full study over every derived feature
    #[default]
    Extended,
}

/// Hypothesis testing configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Significance threshold used when interpreting p-values
    pub alpha: f64,

    /// Hypothesis suite to run
    pub suite: Suite,

    /// Use Student's pooled-variance t-test instead of Welch's
    pub equal_variance: bool,

    /// Apply Yates' continuity correction to chi-square tests with one degree of freedom
    pub yates_correction: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            suite: Suite::Extended,
            equal_variance: false,
            yates_correction: true,
        }
    }
}

impl AnalysisConfig {
    /// Validate analysis configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(LifeboatError::config_field(
                format!("alpha must be strictly between 0.0 and 1.0, got {}", self.alpha),
                "analysis.alpha",
            ));
        }
        Ok(())
    }
}

/// Plot summary configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlotConfig {
    /// Emit plot summaries alongside test results
    pub enabled: bool,

    /// Number of bins for the age histogram
    pub histogram_bins: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            histogram_bins: 10,
        }
    }
}

impl PlotConfig {
    /// Validate plot configuration
    pub fn validate(&self) -> Result<()> {
        if self.histogram_bins == 0 || self.histogram_bins > 200 {
            return Err(LifeboatError::config_field(
                format!(
                    "histogram_bins must be between 1 and 200, got {}",
                    self.histogram_bins
                ),
                "plots.histogram_bins",
            ));
        }
        Ok(())
    }
}

/// Available report formats
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// Terminal tables only, no report file
    #[default]
    Terminal,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
    /// Markdown format
    Markdown,
    /// HTML format
    Html,
}

impl ReportFormat {
    /// File extension for reports of this format, if a file is written
    pub fn extension(self) -> Option<&'static str> {
        match self {
            Self::Terminal => None,
            Self::Json => Some("json"),
            Self::Yaml => Some("yaml"),
            Self::Markdown => Some("md"),
            Self::Html => Some("html"),
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format
    pub format: ReportFormat,

    /// Directory report files are written into
    pub out_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Terminal,
            out_dir: PathBuf::from(".lifeboat/reports"),
        }
    }
}

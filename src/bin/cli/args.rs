//! CLI Argument Structures
//!
//! Command structures and value enums used by the lifeboat binary.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use lifeboat::core::config::{ReportFormat, Suite};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Titanic survival hypothesis evaluator
#[derive(Parser)]
#[command(name = "lifeboat")]
#[command(version = VERSION)]
#[command(about = "🛟 Lifeboat - Titanic survival hypothesis evaluator")]
#[command(long_about = "
Evaluate survival hypotheses on a Titanic passenger manifest with
chi-square, t-test, ANOVA and Pearson correlation tests.

Common Usage:

  # Full study with terminal tables
  lifeboat analyze titanic.csv

  # Only the four core tests, at a stricter threshold
  lifeboat analyze --suite core --alpha 0.01 titanic.csv

  # Markdown report with median-imputed ages
  lifeboat analyze --impute-age --format markdown --out reports titanic.csv

  # Inspect the manifest before testing
  lifeboat describe titanic.csv
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate the hypothesis suite on a passenger manifest
    Analyze(Box<AnalyzeArgs>),

    /// Show shape, columns, missing values and first rows of a manifest
    Describe(DescribeArgs),

    /// Print default configuration in YAML format
    #[command(name = "print-default-config")]
    PrintDefaultConfig,

    /// Initialize a configuration file with defaults
    #[command(name = "init-config")]
    InitConfig(InitConfigArgs),

    /// Validate a lifeboat configuration file
    #[command(name = "validate-config")]
    ValidateConfig(ValidateConfigArgs),
}

/// Hypothesis suite selectable on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SuiteArg {
    /// Sex × survival, age by survival, age by class, age vs fare
    Core,
    /// Every test of the full study
    Extended,
}

impl From<SuiteArg> for Suite {
    fn from(value: SuiteArg) -> Self {
        match value {
            SuiteArg::Core => Suite::Core,
            SuiteArg::Extended => Suite::Extended,
        }
    }
}

/// Output format selectable on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tables in the terminal only
    Terminal,
    /// JSON report file
    Json,
    /// YAML report file
    Yaml,
    /// Markdown report file
    Markdown,
    /// HTML report file
    Html,
}

impl From<OutputFormat> for ReportFormat {
    fn from(value: OutputFormat) -> Self {
        match value {
            OutputFormat::Terminal => ReportFormat::Terminal,
            OutputFormat::Json => ReportFormat::Json,
            OutputFormat::Yaml => ReportFormat::Yaml,
            OutputFormat::Markdown => ReportFormat::Markdown,
            OutputFormat::Html => ReportFormat::Html,
        }
    }
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Passenger manifest (CSV); falls back to `data.path` from the configuration
    pub dataset: Option<PathBuf>,

    /// Configuration file (defaults to ./.lifeboat.yml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Significance threshold
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Hypothesis suite
    #[arg(long, value_enum)]
    pub suite: Option<SuiteArg>,

    /// Use Student's pooled-variance t-test instead of Welch's
    #[arg(long)]
    pub student: bool,

    /// Disable Yates' continuity correction on 2x2 tables
    #[arg(long)]
    pub no_yates: bool,

    /// Impute missing ages with the median instead of dropping them per test
    #[arg(long)]
    pub impute_age: bool,

    /// Skip plot summaries
    #[arg(long)]
    pub no_plots: bool,

    /// Number of age histogram bins
    #[arg(long)]
    pub bins: Option<usize>,

    /// Report format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Directory for report files
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Suppress terminal tables
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct DescribeArgs {
    /// Passenger manifest (CSV)
    pub dataset: PathBuf,

    /// Number of rows to preview
    #[arg(long, default_value_t = 5)]
    pub head: usize,
}

#[derive(Args)]
pub struct InitConfigArgs {
    /// Output configuration file name
    #[arg(short, long, default_value = ".lifeboat.yml")]
    pub output: PathBuf,

    /// Overwrite existing configuration file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ValidateConfigArgs {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: PathBuf,

    /// Show the parsed configuration
    #[arg(short, long)]
    pub detailed: bool,
}

//! # Lifeboat: Titanic Survival Hypothesis Evaluator
//!
//! Loads a Titanic passenger manifest and evaluates a fixed battery of
//! survival hypotheses with classical tests:
//!
//! - **Association**: chi-square test of independence (sex, class, port,
//!   travelling alone and age group against survival)
//! - **Mean difference**: Welch or Student two-sample t-test of age, fare
//!   and family size between survivors and non-survivors
//! - **Multi-group means**: one-way ANOVA of age and fare across classes
//! - **Correlation**: Pearson's r between age and fare
//!
//! A test whose statistic is undefined for the data (an empty category,
//! a constant column, too few observations) yields a labeled
//! [`TestOutcome::Undefined`] instead of an error.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  API Layer (LifeboatEngine)               │
//! ├──────────────────────────────────────────────────────────┤
//! │   Data      │   Stats          │  Analysis    │  I/O      │
//! │ • Loader    │ • Contingency    │ • Catalog    │ • Reports │
//! │ • Cleaning  │ • t-test / ANOVA │ • Evaluator  │           │
//! │ • Model     │ • Correlation    │ • Plots      │           │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lifeboat::{LifeboatConfig, LifeboatEngine};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = LifeboatEngine::new(LifeboatConfig::default())?;
//!     let report = engine.analyze_csv("titanic.csv")?;
//!
//!     for result in &report.results {
//!         println!("{}: {:?}", result.hypothesis.title, result.outcome.p_value());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// Configuration and error handling
pub mod core {
    //! Configuration and error types shared by every layer.

    pub mod config;
    pub mod errors;
}

// Passenger data
pub mod data {
    //! Passenger model, CSV loading and cleaning.

    pub mod cleaning;
    pub mod loader;
    pub mod model;
}

// Statistical kernels
pub mod stats {
    //! Descriptive statistics, tail probabilities and hypothesis tests.

    pub mod anova;
    pub mod contingency;
    pub mod correlation;
    pub mod descriptive;
    pub mod distributions;
    pub mod outcome;
    pub mod ttest;
}

// Hypotheses and their evaluation
pub mod analysis {
    //! Hypothesis catalog, evaluation and interpretation.

    pub mod catalog;
    pub mod evaluator;
    pub mod interpretation;
    pub mod report;
}

// Chart-ready summaries
pub mod plots;

// Report output
pub mod io {
    //! Report rendering and file output.

    pub mod reports;
}

// Public API and engine interface
pub mod api {
    //! High-level engine interface.

    pub mod engine;
}

// Re-export primary types for convenience
pub use analysis::report::AnalysisReport;
pub use api::engine::LifeboatEngine;
pub use core::config::LifeboatConfig;
pub use core::errors::{LifeboatError, Result, ResultExt};
pub use stats::outcome::{TestOutcome, TestResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

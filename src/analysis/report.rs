//! Analysis results as handed to terminal output and report renderers.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::analysis::catalog::Hypothesis;
use crate::analysis::interpretation::Significance;
use crate::core::config::Suite;
use crate::data::cleaning::CleaningReport;
use crate::data::model::{Category, Dataset};
use crate::plots::PlotSummaries;
use crate::stats::contingency::ContingencyTable;
use crate::stats::outcome::TestOutcome;

/// Size, mean and spread of one group of a numeric test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    /// Group label
    pub label: String,
    /// Values in the group
    pub n: usize,
    /// Group mean, `None` when empty
    pub mean: Option<f64>,
    /// Sample standard deviation, `None` with fewer than two values
    pub std_dev: Option<f64>,
}

/// Data a test was computed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Evidence {
    /// Cross-tabulated counts of an association test
    Contingency {
        /// Factor levels by survival
        table: ContingencyTable,
    },
    /// Groups of a t-test or ANOVA
    Groups {
        /// One entry per group, in level order
        groups: Vec<GroupSummary>,
    },
    /// Complete pairs of a correlation test
    Pairs {
        /// Rows with both values present
        pairs: usize,
    },
}

/// One evaluated hypothesis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypothesisResult {
    /// The hypothesis
    pub hypothesis: Hypothesis,
    /// Exact procedure, e.g. `Welch's t-test`
    pub test_name: String,
    /// Statistic and p-value, or the reason they are undefined
    pub outcome: TestOutcome,
    /// Decision at the report's alpha
    pub significance: Significance,
    /// Supporting context
    pub evidence: Evidence,
}

/// Headline numbers of the cleaned dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Passengers analysed
    pub passengers: usize,
    /// Survivors among them
    pub survivors: usize,
    /// Survivors / passengers, `None` for an empty dataset
    pub survival_rate: Option<f64>,
    /// Passengers with a known age
    pub ages_known: usize,
    /// Passengers per sex
    pub by_sex: IndexMap<String, usize>,
    /// Passengers per class
    pub by_class: IndexMap<String, usize>,
}

impl DatasetSummary {
    /// Summarize a dataset
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut by_sex: IndexMap<String, usize> = crate::data::model::Sex::levels()
            .iter()
            .map(|s| (s.label().to_string(), 0))
            .collect();
        let mut by_class: IndexMap<String, usize> = crate::data::model::PassengerClass::levels()
            .iter()
            .map(|c| (c.label().to_string(), 0))
            .collect();
        for passenger in dataset {
            *by_sex.entry(passenger.sex.label().to_string()).or_default() += 1;
            *by_class.entry(passenger.class.label().to_string()).or_default() += 1;
        }

        let passengers = dataset.len();
        let survivors = dataset.survivors();
        Self {
            passengers,
            survivors,
            survival_rate: (passengers > 0).then(|| survivors as f64 / passengers as f64),
            ages_known: dataset.iter().filter(|p| p.age.is_some()).count(),
            by_sex,
            by_class,
        }
    }
}

/// Decision counts across a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultCounts {
    /// Hypotheses evaluated
    pub total: usize,
    /// Null rejected
    pub significant: usize,
    /// Null retained
    pub not_significant: usize,
    /// Statistic undefined
    pub undetermined: usize,
}

/// Everything one run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Creation time
    pub generated_at: DateTime<Utc>,
    /// Crate version that produced the report
    pub version: String,
    /// Input file, when loaded from disk
    pub source: Option<String>,
    /// Significance threshold
    pub alpha: f64,
    /// Evaluated suite
    pub suite: Suite,
    /// Dataset headline numbers
    pub dataset: DatasetSummary,
    /// Cleaning record, when the dataset was cleaned by this run
    pub cleaning: Option<CleaningReport>,
    /// One entry per hypothesis, in catalog order
    pub results: Vec<HypothesisResult>,
    /// Plot-ready summaries, when enabled
    pub plots: Option<PlotSummaries>,
}

impl AnalysisReport {
    /// Decision counts
    pub fn counts(&self) -> ResultCounts {
        let mut counts = ResultCounts {
            total: self.results.len(),
            ..ResultCounts::default()
        };
        for result in &self.results {
            match result.significance {
                Significance::Significant => counts.significant += 1,
                Significance::NotSignificant => counts.not_significant += 1,
                Significance::Undetermined => counts.undetermined += 1,
            }
        }
        counts
    }

    /// Result for a hypothesis id
    pub fn result(&self, id: &str) -> Option<&HypothesisResult> {
        self.results.iter().find(|r| r.hypothesis.id == id)
    }
}

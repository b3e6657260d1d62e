//! Cleaning and imputation of parsed manifests.
//!
//! Rows missing survival, sex or class are dropped because every test
//! groups on one of them. Missing fares take the median fare, missing
//! ports take the most common port, and missing ages follow the configured
//! [`MissingAgePolicy`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::config::MissingAgePolicy;
use crate::data::loader::ParsedPassenger;
use crate::data::model::{Category, Dataset, Passenger};
use crate::stats::descriptive::{median, mode};

/// A value filled in for missing cells of one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Imputation {
    /// Column name
    pub column: String,
    /// Value written into the missing cells, as text
    pub value: String,
    /// Number of cells filled
    pub count: usize,
}

/// What cleaning did to the manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Rows read from the source
    pub rows_read: usize,
    /// Rows dropped for missing survival, sex or class
    pub rows_dropped: usize,
    /// Missing cells per column before cleaning
    pub missing_before: IndexMap<String, usize>,
    /// Missing cells per column after cleaning
    pub missing_after: IndexMap<String, usize>,
    /// Imputations performed
    pub imputations: Vec<Imputation>,
}

impl CleaningReport {
    /// Rows kept after cleaning
    pub fn rows_kept(&self) -> usize {
        self.rows_read - self.rows_dropped
    }
}

fn count_missing(rows: &[ParsedPassenger]) -> IndexMap<String, usize> {
    let mut counts = IndexMap::new();
    let mut tally = |column: &str, missing: usize| {
        counts.insert(column.to_string(), missing);
    };
    tally("survived", rows.iter().filter(|r| r.survived.is_none()).count());
    tally("sex", rows.iter().filter(|r| r.sex.is_none()).count());
    tally("pclass", rows.iter().filter(|r| r.class.is_none()).count());
    tally("age", rows.iter().filter(|r| r.age.is_none()).count());
    tally("fare", rows.iter().filter(|r| r.fare.is_none()).count());
    tally("sibsp", rows.iter().filter(|r| r.sibsp.is_none()).count());
    tally("parch", rows.iter().filter(|r| r.parch.is_none()).count());
    tally("embarked", rows.iter().filter(|r| r.embarked.is_none()).count());
    counts
}

/// Clean parsed rows into an immutable [`Dataset`]
pub fn clean(rows: &[ParsedPassenger], missing_age: MissingAgePolicy) -> (Dataset, CleaningReport) {
    let mut report = CleaningReport {
        rows_read: rows.len(),
        missing_before: count_missing(rows),
        ..CleaningReport::default()
    };

    let kept: Vec<&ParsedPassenger> = rows
        .iter()
        .filter(|r| r.survived.is_some() && r.sex.is_some() && r.class.is_some())
        .collect();
    report.rows_dropped = rows.len() - kept.len();
    if report.rows_dropped > 0 {
        warn!(
            "Dropped {} rows missing survived, sex or pclass",
            report.rows_dropped
        );
    }

    let observed_ages: Vec<f64> = kept.iter().filter_map(|r| r.age).collect();
    let observed_fares: Vec<f64> = kept.iter().filter_map(|r| r.fare).collect();
    let fare_fill = median(&observed_fares).unwrap_or(0.0);
    let age_fill = match missing_age {
        MissingAgePolicy::Omit => None,
        MissingAgePolicy::Median => median(&observed_ages),
    };
    let port_fill = mode(kept.iter().filter_map(|r| r.embarked));

    let mut fares_filled = 0;
    let mut ages_filled = 0;
    let mut ports_filled = 0;

    let passengers: Vec<Passenger> = kept
        .iter()
        .filter_map(|row| {
            let (Some(survived), Some(sex), Some(class)) = (row.survived, row.sex, row.class)
            else {
                return None;
            };
            let fare = row.fare.unwrap_or_else(|| {
                fares_filled += 1;
                fare_fill
            });
            let age = match row.age {
                Some(age) => Some(age),
                None => {
                    if age_fill.is_some() {
                        ages_filled += 1;
                    }
                    age_fill
                }
            };
            let embarked = match row.embarked {
                Some(port) => Some(port),
                None => {
                    if port_fill.is_some() {
                        ports_filled += 1;
                    }
                    port_fill
                }
            };
            Some(Passenger {
                survived,
                sex,
                class,
                age,
                fare,
                embarked,
                sibsp: row.sibsp.unwrap_or(0),
                parch: row.parch.unwrap_or(0),
            })
        })
        .collect();

    if fares_filled > 0 {
        report.imputations.push(Imputation {
            column: "fare".to_string(),
            value: format!("{fare_fill}"),
            count: fares_filled,
        });
    }
    if let Some(age) = age_fill.filter(|_| ages_filled > 0) {
        report.imputations.push(Imputation {
            column: "age".to_string(),
            value: format!("{age}"),
            count: ages_filled,
        });
    }
    if let Some(port) = port_fill.filter(|_| ports_filled > 0) {
        report.imputations.push(Imputation {
            column: "embarked".to_string(),
            value: port.label().to_string(),
            count: ports_filled,
        });
    }
    for imputation in &report.imputations {
        debug!(
            "Imputed {} missing {} values with {}",
            imputation.count, imputation.column, imputation.value
        );
    }

    let mut missing_after = IndexMap::new();
    missing_after.insert("survived".to_string(), 0);
    missing_after.insert("sex".to_string(), 0);
    missing_after.insert("pclass".to_string(), 0);
    missing_after.insert(
        "age".to_string(),
        passengers.iter().filter(|p| p.age.is_none()).count(),
    );
    missing_after.insert("fare".to_string(), 0);
    missing_after.insert("sibsp".to_string(), 0);
    missing_after.insert("parch".to_string(), 0);
    missing_after.insert(
        "embarked".to_string(),
        passengers.iter().filter(|p| p.embarked.is_none()).count(),
    );
    report.missing_after = missing_after;

    info!(
        "Cleaned dataset: {} of {} rows kept",
        passengers.len(),
        report.rows_read
    );

    (Dataset::new(passengers), report)
}

//! Contingency tables and the chi-square test of independence.

use serde::{Deserialize, Serialize};

use crate::data::model::Category;
use crate::stats::distributions::chi_squared_sf;
use crate::stats::outcome::{
    DegreesOfFreedom, EffectSize, EffectSizeKind, TestOutcome, TestResult,
};

/// Cross-tabulated counts of two categorical variables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContingencyTable {
    /// Row factor levels
    pub row_labels: Vec<String>,
    /// Column factor levels
    pub column_labels: Vec<String>,
    /// Counts, row-major
    pub counts: Vec<Vec<u64>>,
}

impl ContingencyTable {
    /// Zero table over the given levels
    pub fn zeros(row_labels: Vec<String>, column_labels: Vec<String>) -> Self {
        let counts = vec![vec![0; column_labels.len()]; row_labels.len()];
        Self {
            row_labels,
            column_labels,
            counts,
        }
    }

    /// Table from explicit counts; every row must have one count per column label
    pub fn from_counts(
        row_labels: Vec<String>,
        column_labels: Vec<String>,
        counts: Vec<Vec<u64>>,
    ) -> Option<Self> {
        let well_formed = counts.len() == row_labels.len()
            && counts.iter().all(|row| row.len() == column_labels.len());
        well_formed.then_some(Self {
            row_labels,
            column_labels,
            counts,
        })
    }

    /// Cross-tabulate observations over every declared level of both factors
    pub fn cross_tabulate<R, C, I>(observations: I) -> Self
    where
        R: Category,
        C: Category,
        I: IntoIterator<Item = (R, C)>,
    {
        let mut table = Self::zeros(
            R::levels().iter().map(|l| l.label().to_string()).collect(),
            C::levels().iter().map(|l| l.label().to_string()).collect(),
        );
        for (row, column) in observations {
            table.counts[row.index()][column.index()] += 1;
        }
        table
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.row_labels.len()
    }

    /// Number of columns
    pub fn n_columns(&self) -> usize {
        self.column_labels.len()
    }

    /// Row margins
    pub fn row_totals(&self) -> Vec<u64> {
        self.counts.iter().map(|row| row.iter().sum()).collect()
    }

    /// Column margins
    pub fn column_totals(&self) -> Vec<u64> {
        (0..self.n_columns())
            .map(|j| self.counts.iter().map(|row| row[j]).sum())
            .collect()
    }

    /// Grand total
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// (rows - 1) × (columns - 1)
    pub fn degrees_of_freedom(&self) -> usize {
        self.n_rows().saturating_sub(1) * self.n_columns().saturating_sub(1)
    }

    /// Expected counts under independence, `None` when the table is empty
    pub fn expected(&self) -> Option<Vec<Vec<f64>>> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let total = total as f64;
        let columns = self.column_totals();
        Some(
            self.row_totals()
                .iter()
                .map(|&r| {
                    columns
                        .iter()
                        .map(|&c| r as f64 * c as f64 / total)
                        .collect()
                })
                .collect(),
        )
    }

    /// Transposed table
    pub fn transposed(&self) -> Self {
        Self {
            row_labels: self.column_labels.clone(),
            column_labels: self.row_labels.clone(),
            counts: (0..self.n_columns())
                .map(|j| self.counts.iter().map(|row| row[j]).collect())
                .collect(),
        }
    }
}

/// Chi-square test of independence.
///
/// With one degree of freedom and `yates_correction` set, every |O − E| is
/// reduced by min(0.5, |O − E|). Cramér's V is computed from the
/// uncorrected statistic. Any empty margin leaves an expected count of
/// zero and makes the statistic undefined.
pub fn chi_square_test(table: &ContingencyTable, yates_correction: bool) -> TestOutcome {
    if table.n_rows() < 2 || table.n_columns() < 2 {
        return TestOutcome::undefined(format!(
            "contingency table is {}x{}; at least 2x2 is required",
            table.n_rows(),
            table.n_columns()
        ));
    }

    let Some(expected) = table.expected() else {
        return TestOutcome::undefined("contingency table has no observations");
    };

    for (label, total) in table.row_labels.iter().zip(table.row_totals()) {
        if total == 0 {
            return TestOutcome::undefined(format!(
                "category '{label}' has no observations; expected counts are zero"
            ));
        }
    }
    for (label, total) in table.column_labels.iter().zip(table.column_totals()) {
        if total == 0 {
            return TestOutcome::undefined(format!(
                "category '{label}' has no observations; expected counts are zero"
            ));
        }
    }

    let dof = table.degrees_of_freedom();
    let correct = yates_correction && dof == 1;

    let mut statistic = 0.0;
    let mut uncorrected = 0.0;
    for (observed_row, expected_row) in table.counts.iter().zip(&expected) {
        for (&observed, &expected_count) in observed_row.iter().zip(expected_row) {
            let deviation = (observed as f64 - expected_count).abs();
            uncorrected += deviation * deviation / expected_count;
            let adjusted = if correct {
                deviation - deviation.min(0.5)
            } else {
                deviation
            };
            statistic += adjusted * adjusted / expected_count;
        }
    }

    let n = table.total();
    let p_value = match chi_squared_sf(statistic, dof as f64) {
        Ok(p) => p,
        Err(err) => return TestOutcome::undefined(err.to_string()),
    };
    let min_dim = table.n_rows().min(table.n_columns()) as f64;
    let cramers_v = (uncorrected / (n as f64 * (min_dim - 1.0))).sqrt();

    TestOutcome::Computed(TestResult {
        statistic,
        p_value,
        degrees_of_freedom: Some(DegreesOfFreedom::Single(dof as f64)),
        effect_size: EffectSize::new(EffectSizeKind::CramersV, cramers_v),
        sample_size: n as usize,
    })
}

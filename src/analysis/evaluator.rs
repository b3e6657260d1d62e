//! Runs catalog hypotheses against a cleaned dataset.

use tracing::debug;

use crate::analysis::catalog::{Factor, Hypothesis, Measure, TestKind};
use crate::analysis::interpretation::interpret;
use crate::analysis::report::{Evidence, GroupSummary, HypothesisResult};
use crate::core::config::AnalysisConfig;
use crate::data::model::{Category, Dataset, PassengerClass, Survival};
use crate::stats::anova::one_way_anova;
use crate::stats::contingency::{chi_square_test, ContingencyTable};
use crate::stats::correlation::pearson;
use crate::stats::descriptive::{mean, sample_std_dev};
use crate::stats::outcome::TestOutcome;
use crate::stats::ttest::{two_sample_t_test, VarianceAssumption};

/// Test options taken from the analysis configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorSettings {
    /// Welch or Student t-test
    pub variance: VarianceAssumption,
    /// Yates' correction on tables with one degree of freedom
    pub yates_correction: bool,
}

impl Default for EvaluatorSettings {
    fn default() -> Self {
        Self {
            variance: VarianceAssumption::Unequal,
            yates_correction: true,
        }
    }
}

impl From<&AnalysisConfig> for EvaluatorSettings {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            variance: VarianceAssumption::from_equal_variance(config.equal_variance),
            yates_correction: config.yates_correction,
        }
    }
}

/// Stateless evaluator over one dataset.
///
/// Every operation reads the dataset independently; missing values are
/// dropped per test.
#[derive(Debug, Clone, Copy)]
pub struct HypothesisEvaluator<'a> {
    dataset: &'a Dataset,
    settings: EvaluatorSettings,
}

impl<'a> HypothesisEvaluator<'a> {
    /// Evaluator with explicit settings
    pub fn new(dataset: &'a Dataset, settings: EvaluatorSettings) -> Self {
        Self { dataset, settings }
    }

    /// Factor levels by survival, over every declared level
    pub fn contingency_table(&self, factor: Factor) -> ContingencyTable {
        let passengers = self.dataset.iter();
        match factor {
            Factor::Sex => ContingencyTable::cross_tabulate(passengers.map(|p| (p.sex, p.survival()))),
            Factor::PassengerClass => {
                ContingencyTable::cross_tabulate(passengers.map(|p| (p.class, p.survival())))
            }
            Factor::Embarked => ContingencyTable::cross_tabulate(
                passengers.filter_map(|p| p.embarked.map(|port| (port, p.survival()))),
            ),
            Factor::IsAlone => ContingencyTable::cross_tabulate(
                passengers.map(|p| (p.companionship(), p.survival())),
            ),
            Factor::AgeGroup => ContingencyTable::cross_tabulate(
                passengers.filter_map(|p| p.age_group().map(|group| (group, p.survival()))),
            ),
        }
    }

    /// Chi-square test of independence between a factor and survival
    pub fn association(&self, factor: Factor) -> TestOutcome {
        chi_square_test(&self.contingency_table(factor), self.settings.yates_correction)
    }

    /// Values of a measure split into (survived, died), missing values dropped
    pub fn survival_groups(&self, measure: Measure) -> (Vec<f64>, Vec<f64>) {
        let mut survived = Vec::new();
        let mut died = Vec::new();
        for passenger in self.dataset {
            if let Some(value) = measure.value(passenger) {
                if passenger.survived {
                    survived.push(value);
                } else {
                    died.push(value);
                }
            }
        }
        (survived, died)
    }

    /// Two-sample t-test of a measure, survivors minus non-survivors
    pub fn mean_difference(&self, measure: Measure) -> TestOutcome {
        let (survived, died) = self.survival_groups(measure);
        two_sample_t_test(&survived, &died, self.settings.variance)
    }

    /// Values of a measure per class, in class order, missing values dropped
    pub fn class_groups(&self, measure: Measure) -> Vec<Vec<f64>> {
        let mut groups = vec![Vec::new(); PassengerClass::levels().len()];
        for passenger in self.dataset {
            if let Some(value) = measure.value(passenger) {
                groups[passenger.class.index()].push(value);
            }
        }
        groups
    }

    /// One-way ANOVA of a measure across classes
    pub fn class_means(&self, measure: Measure) -> TestOutcome {
        one_way_anova(&self.class_groups(measure))
    }

    /// Rows where both measures are present
    pub fn paired(&self, x: Measure, y: Measure) -> (Vec<f64>, Vec<f64>) {
        self.dataset
            .iter()
            .filter_map(|p| Some((x.value(p)?, y.value(p)?)))
            .unzip()
    }

    /// Pearson correlation between two measures
    pub fn correlation(&self, x: Measure, y: Measure) -> TestOutcome {
        let (xs, ys) = self.paired(x, y);
        pearson(&xs, &ys)
    }

    /// Run one hypothesis and interpret it at `alpha`
    pub fn evaluate(&self, hypothesis: &Hypothesis, alpha: f64) -> HypothesisResult {
        let (test_name, outcome, evidence) = match hypothesis.kind {
            TestKind::Association { factor } => {
                let table = self.contingency_table(factor);
                let outcome = chi_square_test(&table, self.settings.yates_correction);
                let corrected = self.settings.yates_correction && table.degrees_of_freedom() == 1;
                let name = if corrected {
                    "Chi-square test (Yates' correction)"
                } else {
                    "Chi-square test"
                };
                (name.to_string(), outcome, Evidence::Contingency { table })
            }
            TestKind::MeanDifference { measure } => {
                let (survived, died) = self.survival_groups(measure);
                let outcome = two_sample_t_test(&survived, &died, self.settings.variance);
                let groups = vec![
                    summarize_group(Survival::Survived.label(), &survived),
                    summarize_group(Survival::Died.label(), &died),
                ];
                (
                    self.settings.variance.test_name().to_string(),
                    outcome,
                    Evidence::Groups { groups },
                )
            }
            TestKind::ClassMeans { measure } => {
                let values = self.class_groups(measure);
                let outcome = one_way_anova(&values);
                let groups = PassengerClass::levels()
                    .iter()
                    .zip(&values)
                    .map(|(class, group)| summarize_group(class.label(), group))
                    .collect();
                ("One-way ANOVA".to_string(), outcome, Evidence::Groups { groups })
            }
            TestKind::Correlation { x, y } => {
                let (xs, ys) = self.paired(x, y);
                let outcome = pearson(&xs, &ys);
                (
                    "Pearson correlation".to_string(),
                    outcome,
                    Evidence::Pairs { pairs: xs.len() },
                )
            }
        };

        match &outcome {
            TestOutcome::Computed(result) => debug!(
                "{}: statistic={:.4} p={:.6}",
                hypothesis.id, result.statistic, result.p_value
            ),
            TestOutcome::Undefined { reason } => debug!("{}: undefined ({})", hypothesis.id, reason),
        }

        HypothesisResult {
            hypothesis: hypothesis.clone(),
            test_name,
            significance: interpret(&outcome, alpha),
            outcome,
            evidence,
        }
    }

    /// Run hypotheses in order
    pub fn evaluate_all(&self, hypotheses: &[Hypothesis], alpha: f64) -> Vec<HypothesisResult> {
        hypotheses.iter().map(|h| self.evaluate(h, alpha)).collect()
    }
}

fn summarize_group(label: &str, values: &[f64]) -> GroupSummary {
    GroupSummary {
        label: label.to_string(),
        n: values.len(),
        mean: mean(values),
        std_dev: sample_std_dev(values),
    }
}

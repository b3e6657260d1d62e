//! Reject / fail-to-reject decisions at a significance threshold.

use serde::{Deserialize, Serialize};

use crate::stats::outcome::TestOutcome;

/// Decision for one hypothesis at a given alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    /// p < alpha, the null hypothesis is rejected
    Significant,
    /// p >= alpha, the null hypothesis is retained
    NotSignificant,
    /// The statistic is undefined; no decision
    Undetermined,
}

impl Significance {
    /// Short label for tables
    pub fn label(self) -> &'static str {
        match self {
            Self::Significant => "significant",
            Self::NotSignificant => "not significant",
            Self::Undetermined => "undetermined",
        }
    }

    /// Decision about the null hypothesis
    pub fn decision(self) -> &'static str {
        match self {
            Self::Significant => "reject H0",
            Self::NotSignificant => "fail to reject H0",
            Self::Undetermined => "no decision",
        }
    }
}

/// Compare an outcome's p-value with `alpha`.
///
/// A NaN p-value is treated like an undefined outcome.
pub fn interpret(outcome: &TestOutcome, alpha: f64) -> Significance {
    match outcome.p_value() {
        Some(p) if p.is_nan() => Significance::Undetermined,
        Some(p) if p < alpha => Significance::Significant,
        Some(_) => Significance::NotSignificant,
        None => Significance::Undetermined,
    }
}

/// Six-decimal p-value, with a floor for values that would print as zero
pub fn format_p_value(p: f64) -> String {
    if p > 0.0 && p < 1e-6 {
        "< 0.000001".to_string()
    } else {
        format!("{p:.6}")
    }
}

/// One-line summary, e.g. `p-value = 0.000012 < 0.05 → statistically significant`
pub fn summarize(outcome: &TestOutcome, alpha: f64) -> String {
    match (outcome, interpret(outcome, alpha)) {
        (TestOutcome::Undefined { reason }, _) => format!("undefined: {reason}"),
        (TestOutcome::Computed(result), Significance::Significant) => format!(
            "p-value = {} < {alpha} → statistically significant",
            format_p_value(result.p_value)
        ),
        (TestOutcome::Computed(result), Significance::NotSignificant) => format!(
            "p-value = {} ≥ {alpha} → not statistically significant",
            format_p_value(result.p_value)
        ),
        (TestOutcome::Computed(_), Significance::Undetermined) => {
            "p-value is not a number → no decision".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::outcome::TestResult;

    fn computed(p_value: f64) -> TestOutcome {
        TestOutcome::Computed(TestResult {
            statistic: 1.0,
            p_value,
            degrees_of_freedom: None,
            effect_size: None,
            sample_size: 10,
        })
    }

    #[test]
    fn test_threshold_is_strict() {
        assert_eq!(interpret(&computed(0.01), 0.05), Significance::Significant);
        assert_eq!(interpret(&computed(0.05), 0.05), Significance::NotSignificant);
        assert_eq!(interpret(&computed(0.2), 0.05), Significance::NotSignificant);
    }

    #[test]
    fn test_undefined_outcome_has_no_decision() {
        let outcome = TestOutcome::undefined("empty category");
        assert_eq!(interpret(&outcome, 0.05), Significance::Undetermined);
        assert_eq!(interpret(&computed(f64::NAN), 0.05), Significance::Undetermined);
        assert_eq!(summarize(&outcome, 0.05), "undefined: empty category");
    }

    #[test]
    fn test_summarize_nan_p_value_agrees_with_interpret() {
        let outcome = computed(f64::NAN);
        assert_eq!(interpret(&outcome, 0.05), Significance::Undetermined);
        let line = summarize(&outcome, 0.05);
        assert!(line.contains("no decision"));
        assert!(!line.contains("significant"));
    }

    #[test]
    fn test_format_p_value() {
        assert_eq!(format_p_value(0.0070009), "0.007001");
        assert_eq!(format_p_value(1e-9), "< 0.000001");
        assert_eq!(format_p_value(0.0), "0.000000");
    }

    #[test]
    fn test_summarize_computed() {
        let line = summarize(&computed(0.2), 0.05);
        assert!(line.contains("≥ 0.05"));
        assert!(line.contains("not statistically significant"));
    }

    #[test]
    fn test_significance_labels() {
        assert_eq!(Significance::Significant.decision(), "reject H0");
        assert_eq!(Significance::Undetermined.label(), "undetermined");
    }
}

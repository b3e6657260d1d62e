//! Result types shared by every hypothesis test.

use serde::{Deserialize, Serialize};

/// Degrees of freedom of a reference distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DegreesOfFreedom {
    /// Chi-square and t distributions
    Single(f64),
    /// F distribution (between groups, within groups)
    Pair(f64, f64),
}

impl std::fmt::Display for DegreesOfFreedom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(df) => write!(f, "{}", format_df(*df)),
            Self::Pair(a, b) => write!(f, "{}, {}", format_df(*a), format_df(*b)),
        }
    }
}

fn format_df(df: f64) -> String {
    if df.fract() == 0.0 {
        format!("{df:.0}")
    } else {
        format!("{df:.2}")
    }
}

/// Effect size families reported next to a test statistic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectSizeKind {
    /// Association strength for contingency tables
    CramersV,
    /// Standardized mean difference (pooled standard deviation)
    CohensD,
    /// Share of variance explained by group membership
    EtaSquared,
    /// Squared correlation coefficient
    RSquared,
}

impl EffectSizeKind {
    /// Display name
    pub fn label(self) -> &'static str {
        match self {
            Self::CramersV => "Cramér's V",
            Self::CohensD => "Cohen's d",
            Self::EtaSquared => "η²",
            Self::RSquared => "r²",
        }
    }
}

/// Effect size value with its family
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectSize {
    /// Family
    pub kind: EffectSizeKind,
    /// Value
    pub value: f64,
}

impl EffectSize {
    /// Construct an effect size, dropping non-finite values
    pub fn new(kind: EffectSizeKind, value: f64) -> Option<Self> {
        value.is_finite().then_some(Self { kind, value })
    }
}

/// Statistic and p-value of a computed test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// Test statistic (χ², t, F or r)
    pub statistic: f64,
    /// Probability of a statistic at least this extreme under the null
    pub p_value: f64,
    /// Degrees of freedom of the reference distribution
    pub degrees_of_freedom: Option<DegreesOfFreedom>,
    /// Effect size, when defined
    pub effect_size: Option<EffectSize>,
    /// Observations that entered the test
    pub sample_size: usize,
}

/// Outcome of a test: a result, or a labeled null when the statistic is undefined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TestOutcome {
    /// The statistic was computed
    Computed(TestResult),
    /// The statistic is undefined for this data
    Undefined {
        /// Why the statistic could not be computed
        reason: String,
    },
}

impl TestOutcome {
    /// Build an undefined outcome
    pub fn undefined(reason: impl Into<String>) -> Self {
        Self::Undefined {
            reason: reason.into(),
        }
    }

    /// The computed result, if any
    pub fn result(&self) -> Option<&TestResult> {
        match self {
            Self::Computed(result) => Some(result),
            Self::Undefined { .. } => None,
        }
    }

    /// The statistic, if computed
    pub fn statistic(&self) -> Option<f64> {
        self.result().map(|r| r.statistic)
    }

    /// The p-value, if computed
    pub fn p_value(&self) -> Option<f64> {
        self.result().map(|r| r.p_value)
    }

    /// True when the statistic is undefined
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_outcome_accessors() {
        let outcome = TestOutcome::undefined("empty category");
        assert!(outcome.is_undefined());
        assert_eq!(outcome.statistic(), None);
        assert_eq!(outcome.p_value(), None);
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let outcome = TestOutcome::Computed(TestResult {
            statistic: 2.5,
            p_value: 0.01,
            degrees_of_freedom: Some(DegreesOfFreedom::Pair(2.0, 10.0)),
            effect_size: EffectSize::new(EffectSizeKind::EtaSquared, 0.3),
            sample_size: 13,
        });
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "computed");
        assert_eq!(json["degrees_of_freedom"], serde_json::json!([2.0, 10.0]));
        assert_eq!(json["effect_size"]["kind"], "eta_squared");

        let undefined = serde_json::to_value(TestOutcome::undefined("no data")).unwrap();
        assert_eq!(undefined["status"], "undefined");
        assert_eq!(undefined["reason"], "no data");
    }

    #[test]
    fn test_degrees_of_freedom_display() {
        assert_eq!(DegreesOfFreedom::Single(2.0).to_string(), "2");
        assert_eq!(DegreesOfFreedom::Single(15.9127).to_string(), "15.91");
        assert_eq!(DegreesOfFreedom::Pair(2.0, 6.0).to_string(), "2, 6");
    }

    #[test]
    fn test_non_finite_effect_size_dropped() {
        assert!(EffectSize::new(EffectSizeKind::CohensD, f64::NAN).is_none());
    }
}

//! Two-sample t-tests.

use serde::{Deserialize, Serialize};

use crate::stats::descriptive::{mean, sample_variance};
use crate::stats::distributions::students_t_two_sided;
use crate::stats::outcome::{
    DegreesOfFreedom, EffectSize, EffectSizeKind, TestOutcome, TestResult,
};

/// Variance assumption of the two-sample t-test
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceAssumption {
    /// Welch's test with Welch–Satterthwaite degrees of freedom
    #[default]
    Unequal,
    /// Student's test with pooled variance
    Equal,
}

impl VarianceAssumption {
    /// Map the `equal_variance` configuration flag
    pub fn from_equal_variance(equal: bool) -> Self {
        if equal {
            Self::Equal
        } else {
            Self::Unequal
        }
    }

    /// Display name of the test
    pub fn test_name(self) -> &'static str {
        match self {
            Self::Unequal => "Welch's t-test",
            Self::Equal => "Student's t-test",
        }
    }
}

/// Two-sided two-sample t-test of equal means.
///
/// The statistic is `(mean(a) - mean(b)) / se`. Cohen's d uses the pooled
/// standard deviation under either assumption.
pub fn two_sample_t_test(a: &[f64], b: &[f64], assumption: VarianceAssumption) -> TestOutcome {
    if a.iter().chain(b).any(|v| !v.is_finite()) {
        return TestOutcome::undefined("samples contain non-finite values");
    }
    let (n_a, n_b) = (a.len(), b.len());
    if n_a < 2 || n_b < 2 {
        return TestOutcome::undefined(format!(
            "each group needs at least two values (got {n_a} and {n_b})"
        ));
    }

    let (Some(mean_a), Some(mean_b), Some(var_a), Some(var_b)) =
        (mean(a), mean(b), sample_variance(a), sample_variance(b))
    else {
        return TestOutcome::undefined("group statistics are undefined");
    };

    if ![mean_a, mean_b, var_a, var_b].iter().all(|v| v.is_finite()) {
        return TestOutcome::undefined("group means or variances overflow");
    }

    let (na, nb) = (n_a as f64, n_b as f64);
    let pooled = ((na - 1.0) * var_a + (nb - 1.0) * var_b) / (na + nb - 2.0);

    let (standard_error, df) = match assumption {
        VarianceAssumption::Unequal => {
            let (ua, ub) = (var_a / na, var_b / nb);
            let se2 = ua + ub;
            let df = se2 * se2 / (ua * ua / (na - 1.0) + ub * ub / (nb - 1.0));
            (se2.sqrt(), df)
        }
        VarianceAssumption::Equal => ((pooled * (1.0 / na + 1.0 / nb)).sqrt(), na + nb - 2.0),
    };

    if standard_error == 0.0 {
        return TestOutcome::undefined("both groups have zero variance");
    }
    if !standard_error.is_finite() || !df.is_finite() {
        return TestOutcome::undefined("standard error or degrees of freedom are not finite");
    }

    let statistic = (mean_a - mean_b) / standard_error;
    let p_value = match students_t_two_sided(statistic, df) {
        Ok(p) => p,
        Err(err) => return TestOutcome::undefined(err.to_string()),
    };

    let cohens_d = if pooled > 0.0 {
        EffectSize::new(EffectSizeKind::CohensD, (mean_a - mean_b) / pooled.sqrt())
    } else {
        None
    };

    TestOutcome::Computed(TestResult {
        statistic,
        p_value,
        degrees_of_freedom: Some(DegreesOfFreedom::Single(df)),
        effect_size: cohens_d,
        sample_size: n_a + n_b,
    })
}

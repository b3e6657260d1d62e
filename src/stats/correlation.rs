//! Pearson product-moment correlation.

use crate::stats::descriptive::mean;
use crate::stats::distributions::students_t_two_sided;
use crate::stats::outcome::{
    DegreesOfFreedom, EffectSize, EffectSizeKind, TestOutcome, TestResult,
};

/// Pearson's r with a two-sided p-value from Student's t on n - 2 degrees of freedom.
///
/// The statistic reported is r itself; |r| = 1 gives p = 0.
pub fn pearson(x: &[f64], y: &[f64]) -> TestOutcome {
    if x.len() != y.len() {
        return TestOutcome::undefined(format!(
            "paired samples differ in length ({} and {})",
            x.len(),
            y.len()
        ));
    }
    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return TestOutcome::undefined("samples contain non-finite values");
    }
    let n = x.len();
    if n < 3 {
        return TestOutcome::undefined(format!("at least three pairs are required (got {n})"));
    }

    let (Some(mean_x), Some(mean_y)) = (mean(x), mean(y)) else {
        return TestOutcome::undefined("no observations");
    };

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (&a, &b) in x.iter().zip(y) {
        let (dx, dy) = (a - mean_x, b - mean_y);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if ![sxy, sxx, syy].iter().all(|v| v.is_finite()) {
        return TestOutcome::undefined("sums of squares overflow; correlation is undefined");
    }
    if sxx == 0.0 || syy == 0.0 {
        return TestOutcome::undefined("a variable is constant; correlation is undefined");
    }

    let r = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);
    let df = (n - 2) as f64;

    let p_value = if r.abs() == 1.0 {
        0.0
    } else {
        let t = r * (df / (1.0 - r * r)).sqrt();
        match students_t_two_sided(t, df) {
            Ok(p) => p,
            Err(err) => return TestOutcome::undefined(err.to_string()),
        }
    };

    TestOutcome::Computed(TestResult {
        statistic: r,
        p_value,
        degrees_of_freedom: Some(DegreesOfFreedom::Single(df)),
        effect_size: EffectSize::new(EffectSizeKind::RSquared, r * r),
        sample_size: n,
    })
}

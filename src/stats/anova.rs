//! One-way analysis of variance.

use crate::stats::descriptive::{mean, sum_of_squares};
use crate::stats::distributions::f_sf;
use crate::stats::outcome::{
    DegreesOfFreedom, EffectSize, EffectSizeKind, TestOutcome, TestResult,
};

/// One-way ANOVA F-test of equal group means.
///
/// Empty groups are skipped. The outcome is undefined with fewer than two
/// non-empty groups, no within-group degrees of freedom, or zero
/// within-group variance.
pub fn one_way_anova<G: AsRef<[f64]>>(groups: &[G]) -> TestOutcome {
    let groups: Vec<&[f64]> = groups
        .iter()
        .map(AsRef::as_ref)
        .filter(|g| !g.is_empty())
        .collect();

    if groups.iter().flat_map(|g| g.iter()).any(|v| !v.is_finite()) {
        return TestOutcome::undefined("samples contain non-finite values");
    }

    let k = groups.len();
    if k < 2 {
        return TestOutcome::undefined(format!(
            "at least two non-empty groups are required (got {k})"
        ));
    }

    let n: usize = groups.iter().map(|g| g.len()).sum();
    if n <= k {
        return TestOutcome::undefined(format!(
            "no within-group degrees of freedom ({n} values in {k} groups)"
        ));
    }

    let all: Vec<f64> = groups.iter().flat_map(|g| g.iter().copied()).collect();
    let Some(grand_mean) = mean(&all) else {
        return TestOutcome::undefined("no observations");
    };

    let ss_between: f64 = groups
        .iter()
        .filter_map(|g| mean(g).map(|m| g.len() as f64 * (m - grand_mean).powi(2)))
        .sum();
    let ss_within: f64 = groups.iter().map(|g| sum_of_squares(g)).sum();

    if !ss_between.is_finite() || !ss_within.is_finite() {
        return TestOutcome::undefined("sums of squares overflow");
    }
    if ss_within == 0.0 {
        return TestOutcome::undefined("no variance within groups");
    }

    let df_between = (k - 1) as f64;
    let df_within = (n - k) as f64;
    let statistic = (ss_between / df_between) / (ss_within / df_within);

    let p_value = match f_sf(statistic, df_between, df_within) {
        Ok(p) => p,
        Err(err) => return TestOutcome::undefined(err.to_string()),
    };

    TestOutcome::Computed(TestResult {
        statistic,
        p_value,
        degrees_of_freedom: Some(DegreesOfFreedom::Pair(df_between, df_within)),
        effect_size: EffectSize::new(
            EffectSizeKind::EtaSquared,
            ss_between / (ss_between + ss_within),
        ),
        sample_size: n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_separated_groups() {
        let groups = [vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0], vec![7.0, 8.0, 9.0]];
        let outcome = one_way_anova(&groups);
        let result = outcome.result().unwrap();
        assert_relative_eq!(result.statistic, 27.0, max_relative = 1e-12);
        assert_relative_eq!(result.p_value, 1e-3, max_relative = 1e-9);
        assert_eq!(result.degrees_of_freedom, Some(DegreesOfFreedom::Pair(2.0, 6.0)));
        assert_relative_eq!(result.effect_size.unwrap().value, 0.9, max_relative = 1e-12);
        assert_eq!(result.sample_size, 9);
    }

    #[test]
    fn test_unbalanced_fares_by_class() {
        let groups = [
            vec![7.25, 71.28, 53.1],
            vec![13.0, 30.07, 10.5, 26.0],
            vec![8.05, 7.92, 8.46, 21.07, 11.13],
        ];
        let result = *one_way_anova(&groups).result().unwrap();
        assert_relative_eq!(result.statistic, 3.5271689242304847, max_relative = 1e-10);
        assert_relative_eq!(result.p_value, 0.07394784142185562, max_relative = 1e-7);
    }

    #[test]
    fn test_empty_groups_are_skipped() {
        let groups = [vec![1.0, 2.0, 3.0], vec![], vec![7.0, 8.0, 9.0]];
        let result = *one_way_anova(&groups).result().unwrap();
        assert_eq!(result.degrees_of_freedom, Some(DegreesOfFreedom::Pair(1.0, 4.0)));
    }

    #[test]
    fn test_single_group_is_undefined() {
        let groups = [vec![1.0, 2.0], vec![]];
        assert!(one_way_anova(&groups).is_undefined());
    }

    #[test]
    fn test_singleton_groups_are_undefined() {
        let groups = [vec![1.0], vec![2.0], vec![3.0]];
        assert!(one_way_anova(&groups).is_undefined());
    }

    #[test]
    fn test_constant_groups_are_undefined() {
        let groups = [vec![4.0, 4.0], vec![9.0, 9.0]];
        match one_way_anova(&groups) {
            TestOutcome::Undefined { reason } => assert!(reason.contains("within groups")),
            other => panic!("Expected undefined outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_sums_of_squares_are_undefined() {
        let groups = [vec![1e200, -1e200, 3e200], vec![1.0, 2.0, 3.0]];
        match one_way_anova(&groups) {
            TestOutcome::Undefined { reason } => assert!(reason.contains("overflow")),
            other => panic!("Expected undefined outcome, got {:?}", other),
        }
    }

    proptest! {
        /// Property: F does not depend on the order groups are presented in
        #[test]
        fn prop_f_invariant_to_group_order(
            a in prop::collection::vec(0.0f64..80.0, 2..20),
            b in prop::collection::vec(0.0f64..80.0, 2..20),
            c in prop::collection::vec(0.0f64..80.0, 2..20),
        ) {
            let forward = one_way_anova(&[a.clone(), b.clone(), c.clone()]);
            let reversed = one_way_anova(&[c.clone(), a.clone(), b.clone()]);
            match (forward.result(), reversed.result()) {
                (Some(x), Some(y)) => {
                    prop_assert!((x.statistic - y.statistic).abs() <= 1e-9 * x.statistic.abs().max(1.0));
                    prop_assert!((x.p_value - y.p_value).abs() <= 1e-9);
                }
                (None, None) => {}
                _ => prop_assert!(false, "order changed definedness"),
            }
        }
    }
}

//! End-to-end behaviour of the hypothesis tests on small manifests

use approx::assert_relative_eq;
use std::path::PathBuf;

use lifeboat::analysis::catalog::{Factor, Measure};
use lifeboat::analysis::evaluator::{EvaluatorSettings, HypothesisEvaluator};
use lifeboat::analysis::interpretation::Significance;
use lifeboat::core::config::{MissingAgePolicy, Suite};
use lifeboat::data::model::{Dataset, Passenger, PassengerClass, Sex};
use lifeboat::stats::anova::one_way_anova;
use lifeboat::{LifeboatConfig, LifeboatEngine, TestOutcome};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/passengers.csv")
}

fn passenger(survived: bool, sex: Sex, age: Option<f64>, fare: f64) -> Passenger {
    let class = if fare > 50.0 {
        PassengerClass::First
    } else if fare > 15.0 {
        PassengerClass::Second
    } else {
        PassengerClass::Third
    };
    Passenger::new(survived, sex, class, age, fare)
}

#[test]
fn test_sex_perfectly_predicting_survival() {
    let passengers = (0..40)
        .map(|i| {
            let female = i % 2 == 0;
            let sex = if female { Sex::Female } else { Sex::Male };
            passenger(female, sex, Some(20.0 + i as f64), 10.0)
        })
        .collect();
    let dataset = Dataset::new(passengers);
    let evaluator = HypothesisEvaluator::new(&dataset, EvaluatorSettings::default());

    let outcome = evaluator.association(Factor::Sex);
    let result = outcome.result().unwrap();
    assert!(result.statistic > 30.0);
    assert!(result.p_value < 1e-6);
}

#[test]
fn test_identical_age_distributions() {
    let ages = [18.0, 25.0, 31.0, 47.0, 62.0];
    let passengers = ages
        .iter()
        .flat_map(|&age| {
            [
                passenger(true, Sex::Female, Some(age), 20.0),
                passenger(false, Sex::Male, Some(age), 8.0),
            ]
        })
        .collect();
    let dataset = Dataset::new(passengers);
    let evaluator = HypothesisEvaluator::new(&dataset, EvaluatorSettings::default());

    let result = evaluator.mean_difference(Measure::Age);
    let result = result.result().unwrap();
    assert_relative_eq!(result.statistic, 0.0, epsilon = 1e-12);
    assert_relative_eq!(result.p_value, 1.0, epsilon = 1e-9);
}

#[test]
fn test_four_passenger_age_gap() {
    let dataset = Dataset::new(vec![
        passenger(true, Sex::Female, Some(10.0), 20.0),
        passenger(true, Sex::Female, Some(20.0), 20.0),
        passenger(false, Sex::Male, Some(50.0), 8.0),
        passenger(false, Sex::Male, Some(60.0), 8.0),
    ]);
    let evaluator = HypothesisEvaluator::new(&dataset, EvaluatorSettings::default());

    let outcome = evaluator.mean_difference(Measure::Age);
    let result = outcome.result().unwrap();
    assert!(result.statistic.abs() > 5.0);
    assert!(result.statistic < 0.0);
    assert!(result.p_value < 0.05);
}

#[test]
fn test_all_ages_missing_is_undefined_not_fatal() {
    let dataset = Dataset::new(vec![
        passenger(true, Sex::Female, None, 80.0),
        passenger(true, Sex::Female, None, 30.0),
        passenger(false, Sex::Male, None, 7.5),
        passenger(false, Sex::Male, None, 9.0),
        passenger(false, Sex::Female, None, 12.0),
    ]);
    let evaluator = HypothesisEvaluator::new(&dataset, EvaluatorSettings::default());

    assert!(evaluator.mean_difference(Measure::Age).is_undefined());
    assert!(evaluator.correlation(Measure::Age, Measure::Fare).is_undefined());
    assert!(evaluator.class_means(Measure::Age).is_undefined());
    assert!(!evaluator.mean_difference(Measure::Fare).is_undefined());
}

#[test]
fn test_anova_is_invariant_to_group_order() {
    let first = vec![38.0, 35.0, 54.0, 58.0, 28.0];
    let second = vec![14.0, 55.0, 34.0, 35.0];
    let third = vec![22.0, 26.0, 35.0, 2.0, 27.0, 4.0, 20.0];

    let forward = one_way_anova(&[first.clone(), second.clone(), third.clone()]);
    let backward = one_way_anova(&[third, first, second]);
    let (forward, backward) = (forward.result().unwrap(), backward.result().unwrap());
    assert_relative_eq!(forward.statistic, backward.statistic, epsilon = 1e-12);
    assert_relative_eq!(forward.p_value, backward.p_value, epsilon = 1e-12);
}

#[test]
fn test_correlation_is_symmetric() {
    let engine = LifeboatEngine::new(LifeboatConfig::default()).unwrap();
    let (dataset, _) = engine.load(fixture()).unwrap();
    let evaluator = HypothesisEvaluator::new(&dataset, EvaluatorSettings::default());

    let age_fare = evaluator.correlation(Measure::Age, Measure::Fare);
    let fare_age = evaluator.correlation(Measure::Fare, Measure::Age);
    assert_relative_eq!(
        age_fare.statistic().unwrap(),
        fare_age.statistic().unwrap(),
        epsilon = 1e-12
    );
    assert_relative_eq!(
        age_fare.p_value().unwrap(),
        fare_age.p_value().unwrap(),
        epsilon = 1e-12
    );
}

#[test]
fn test_fixture_core_suite() {
    let mut config = LifeboatConfig::default();
    config.analysis.suite = Suite::Core;
    let engine = LifeboatEngine::new(config).unwrap();
    let report = engine.analyze_csv(fixture()).unwrap();

    assert_eq!(report.results.len(), 4);
    assert_eq!(report.dataset.passengers, 30);
    assert_eq!(report.dataset.survivors, 15);

    let sex = report.result("sex_vs_survival").unwrap();
    assert_eq!(sex.test_name, "Chi-square test (Yates' correction)");
    assert_eq!(sex.significance, Significance::Significant);

    let counts = report.counts();
    assert_eq!(
        counts.significant + counts.not_significant + counts.undetermined,
        counts.total
    );
}

#[test]
fn test_median_imputation_fills_every_age() {
    let mut config = LifeboatConfig::default();
    config.data.missing_age = MissingAgePolicy::Median;
    let engine = LifeboatEngine::new(config).unwrap();
    let (dataset, cleaning) = engine.load(fixture()).unwrap();

    assert!(dataset.iter().all(|p| p.age.is_some()));
    assert_eq!(cleaning.missing_before["age"], 6);
    assert_eq!(cleaning.missing_after["age"], 0);

    let report = engine.analyze_dataset(&dataset, Some(cleaning), None);
    let by_class = report.result("age_by_class").unwrap();
    assert!(by_class.outcome.result().is_some());
    for result in &report.results {
        if let TestOutcome::Undefined { .. } = result.outcome {
            assert_eq!(result.significance, Significance::Undetermined);
        }
    }
}

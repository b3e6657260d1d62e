//! The fixed catalog of hypotheses.

use serde::{Deserialize, Serialize};

use crate::core::config::Suite;
use crate::data::model::Passenger;

/// Categorical factor cross-tabulated against survival
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    /// Passenger sex
    Sex,
    /// Ticket class
    PassengerClass,
    /// Port of embarkation
    Embarked,
    /// Travelling alone or with family
    IsAlone,
    /// Age bucket
    AgeGroup,
}

impl Factor {
    /// Column-style name
    pub fn label(self) -> &'static str {
        match self {
            Self::Sex => "sex",
            Self::PassengerClass => "pclass",
            Self::Embarked => "embarked",
            Self::IsAlone => "is_alone",
            Self::AgeGroup => "age_group",
        }
    }
}

/// Numeric variable read off a passenger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    /// Age in years (may be missing)
    Age,
    /// Ticket fare
    Fare,
    /// sibsp + parch + 1
    FamilySize,
}

impl Measure {
    /// Column-style name
    pub fn label(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Fare => "fare",
            Self::FamilySize => "family_size",
        }
    }

    /// Value for one passenger, `None` when missing
    pub fn value(self, passenger: &Passenger) -> Option<f64> {
        match self {
            Self::Age => passenger.age,
            Self::Fare => Some(passenger.fare),
            Self::FamilySize => Some(f64::from(passenger.family_size())),
        }
    }
}

/// The statistical procedure a hypothesis runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "test", rename_all = "snake_case")]
pub enum TestKind {
    /// Chi-square test of independence between a factor and survival
    Association {
        /// Row factor
        factor: Factor,
    },
    /// Two-sample t-test of a measure, survivors against non-survivors
    MeanDifference {
        /// Compared measure
        measure: Measure,
    },
    /// One-way ANOVA of a measure across the three classes
    ClassMeans {
        /// Compared measure
        measure: Measure,
    },
    /// Pearson correlation between two measures
    Correlation {
        /// First variable
        x: Measure,
        /// Second variable
        y: Measure,
    },
}

impl TestKind {
    /// Family name of the test
    pub fn family(&self) -> &'static str {
        match self {
            Self::Association { .. } => "chi-square",
            Self::MeanDifference { .. } => "t-test",
            Self::ClassMeans { .. } => "ANOVA",
            Self::Correlation { .. } => "Pearson correlation",
        }
    }
}

/// One hypothesis with its null and alternative statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hypothesis {
    /// Stable identifier
    pub id: String,
    /// Short title
    pub title: String,
    /// Null hypothesis
    pub null: String,
    /// Alternative hypothesis
    pub alternative: String,
    /// Procedure
    pub kind: TestKind,
}

impl Hypothesis {
    fn new(id: &str, title: &str, null: &str, alternative: &str, kind: TestKind) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            null: null.to_string(),
            alternative: alternative.to_string(),
            kind,
        }
    }

    /// Factor against survival
    pub fn association(factor: Factor) -> Self {
        let (id, title, null, alternative) = match factor {
            Factor::Sex => (
                "sex_vs_survival",
                "Gender vs survival",
                "Gender and survival are independent.",
                "Gender and survival are related.",
            ),
            Factor::PassengerClass => (
                "class_vs_survival",
                "Passenger class vs survival",
                "Passenger class does not affect survival.",
                "Passenger class affects survival.",
            ),
            Factor::Embarked => (
                "port_vs_survival",
                "Port of embarkation vs survival",
                "Port of embarkation does not affect survival.",
                "Port of embarkation affects survival.",
            ),
            Factor::IsAlone => (
                "alone_vs_survival",
                "Travelling alone vs survival",
                "Travelling alone does not affect survival.",
                "Travelling alone affects survival.",
            ),
            Factor::AgeGroup => (
                "age_group_vs_survival",
                "Age group vs survival",
                "Age group does not affect survival.",
                "Age group affects survival.",
            ),
        };
        Self::new(id, title, null, alternative, TestKind::Association { factor })
    }

    /// Measure compared between survivors and non-survivors
    pub fn mean_difference(measure: Measure) -> Self {
        let (id, title, null, alternative) = match measure {
            Measure::Age => (
                "age_by_survival",
                "Age difference by survival",
                "Mean age of survivors equals mean age of non-survivors.",
                "Mean ages differ.",
            ),
            Measure::Fare => (
                "fare_by_survival",
                "Fare difference by survival",
                "Mean fare of survivors equals mean fare of non-survivors.",
                "Mean fares differ.",
            ),
            Measure::FamilySize => (
                "family_size_by_survival",
                "Family size difference by survival",
                "Mean family size is the same for survivors and non-survivors.",
                "Mean family sizes differ.",
            ),
        };
        Self::new(id, title, null, alternative, TestKind::MeanDifference { measure })
    }

    /// Measure compared across the three classes
    pub fn class_means(measure: Measure) -> Self {
        let (id, title, null, alternative) = match measure {
            Measure::Age => (
                "age_by_class",
                "Age across passenger classes",
                "Mean age is the same in every class.",
                "At least one class has a different mean age.",
            ),
            Measure::Fare => (
                "fare_by_class",
                "Fare across passenger classes",
                "Mean fare is the same in every class.",
                "At least one class has a different mean fare.",
            ),
            Measure::FamilySize => (
                "family_size_by_class",
                "Family size across passenger classes",
                "Mean family size is the same in every class.",
                "At least one class has a different mean family size.",
            ),
        };
        Self::new(id, title, null, alternative, TestKind::ClassMeans { measure })
    }

    /// Linear association between two measures
    pub fn correlation(x: Measure, y: Measure) -> Self {
        Self::new(
            &format!("{}_vs_{}", x.label(), y.label()),
            &format!("Correlation between {} and {}", x.label(), y.label()),
            &format!("There is no linear relationship between {} and {}.", x.label(), y.label()),
            &format!("There is a linear relationship between {} and {}.", x.label(), y.label()),
            TestKind::Correlation { x, y },
        )
    }
}

/// Sex × survival, age by survival, age by class, age vs fare
pub fn core_suite() -> Vec<Hypothesis> {
    vec![
        Hypothesis::association(Factor::Sex),
        Hypothesis::mean_difference(Measure::Age),
        Hypothesis::class_means(Measure::Age),
        Hypothesis::correlation(Measure::Age, Measure::Fare),
    ]
}

/// Every association, mean and correlation test of the full study
pub fn extended_suite() -> Vec<Hypothesis> {
    vec![
        Hypothesis::association(Factor::Sex),
        Hypothesis::association(Factor::PassengerClass),
        Hypothesis::association(Factor::Embarked),
        Hypothesis::mean_difference(Measure::Age),
        Hypothesis::mean_difference(Measure::Fare),
        Hypothesis::mean_difference(Measure::FamilySize),
        Hypothesis::association(Factor::IsAlone),
        Hypothesis::class_means(Measure::Fare),
        Hypothesis::class_means(Measure::Age),
        Hypothesis::association(Factor::AgeGroup),
        Hypothesis::correlation(Measure::Age, Measure::Fare),
    ]
}

/// Hypotheses for a configured suite
pub fn suite(suite: Suite) -> Vec<Hypothesis> {
    match suite {
        Suite::Core => core_suite(),
        Suite::Extended => extended_suite(),
    }
}

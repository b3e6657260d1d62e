//! Passenger records, categorical levels and derived features.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A categorical variable with a fixed, ordered set of levels.
///
/// Contingency tables are built over every declared level, so a level with
/// no observations is visible to the chi-square test as an empty margin.
pub trait Category: Copy + Eq + 'static {
    /// All levels in display order
    fn levels() -> &'static [Self];

    /// Short label used in tables and reports
    fn label(&self) -> &'static str;

    /// Position of this level inside [`Category::levels`]
    fn index(&self) -> usize {
        Self::levels()
            .iter()
            .position(|level| level == self)
            .unwrap_or_default()
    }
}

/// Survival outcome, the response variable of every test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Survival {
    /// Did not survive (`survived == 0`)
    Died,
    /// Survived (`survived == 1`)
    Survived,
}

impl From<bool> for Survival {
    fn from(survived: bool) -> Self {
        if survived {
            Self::Survived
        } else {
            Self::Died
        }
    }
}

impl Category for Survival {
    fn levels() -> &'static [Self] {
        &[Self::Died, Self::Survived]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Died => "died",
            Self::Survived => "survived",
        }
    }
}

/// Passenger sex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// Female passenger
    Female,
    /// Male passenger
    Male,
}

impl Sex {
    /// Parse a dataset cell (`male`, `female`, `m`, `f`, any case)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "female" | "f" => Some(Self::Female),
            "male" | "m" => Some(Self::Male),
            _ => None,
        }
    }
}

impl Category for Sex {
    fn levels() -> &'static [Self] {
        &[Self::Female, Self::Male]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
        }
    }
}

/// Ticket class, an ordinal 1/2/3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassengerClass {
    /// First class
    First,
    /// Second class
    Second,
    /// Third class
    Third,
}

impl PassengerClass {
    /// Numeric class as it appears in the dataset
    pub fn number(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
        }
    }

    /// Parse `1`/`2`/`3` (integer or float text) or `first`/`second`/`third`
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        match value.as_str() {
            "first" => return Some(Self::First),
            "second" => return Some(Self::Second),
            "third" => return Some(Self::Third),
            _ => {}
        }
        let number = value.parse::<f64>().ok()?;
        match number {
            n if n == 1.0 => Some(Self::First),
            n if n == 2.0 => Some(Self::Second),
            n if n == 3.0 => Some(Self::Third),
            _ => None,
        }
    }
}

impl Category for PassengerClass {
    fn levels() -> &'static [Self] {
        &[Self::First, Self::Second, Self::Third]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::First => "1st",
            Self::Second => "2nd",
            Self::Third => "3rd",
        }
    }
}

/// Port of embarkation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Port {
    /// Cherbourg (`C`)
    Cherbourg,
    /// Queenstown (`Q`)
    Queenstown,
    /// Southampton (`S`)
    Southampton,
}

impl Port {
    /// Parse a port code or full town name
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "c" | "cherbourg" => Some(Self::Cherbourg),
            "q" | "queenstown" => Some(Self::Queenstown),
            "s" | "southampton" => Some(Self::Southampton),
            _ => None,
        }
    }
}

impl Category for Port {
    fn levels() -> &'static [Self] {
        &[Self::Cherbourg, Self::Queenstown, Self::Southampton]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Cherbourg => "C",
            Self::Queenstown => "Q",
            Self::Southampton => "S",
        }
    }
}

/// Travelling alone versus with family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Companionship {
    /// With at least one sibling, spouse, parent or child aboard
    WithFamily,
    /// Family size of one
    Alone,
}

impl From<bool> for Companionship {
    fn from(alone: bool) -> Self {
        if alone {
            Self::Alone
        } else {
            Self::WithFamily
        }
    }
}

impl Category for Companionship {
    fn levels() -> &'static [Self] {
        &[Self::WithFamily, Self::Alone]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::WithFamily => "with_family",
            Self::Alone => "alone",
        }
    }
}

/// Age bucket: child [0, 12], teen (12, 19], adult (19, 59], senior (59, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    /// 0 to 12
    Child,
    /// 13 to 19
    Teen,
    /// 20 to 59
    Adult,
    /// 60 to 100
    Senior,
}

impl AgeGroup {
    /// Bucket an age; ages outside `[0, 100]` have no group
    pub fn from_age(age: f64) -> Option<Self> {
        if !(0.0..=100.0).contains(&age) {
            return None;
        }
        Some(if age <= 12.0 {
            Self::Child
        } else if age <= 19.0 {
            Self::Teen
        } else if age <= 59.0 {
            Self::Adult
        } else {
            Self::Senior
        })
    }
}

impl Category for AgeGroup {
    fn levels() -> &'static [Self] {
        &[Self::Child, Self::Teen, Self::Adult, Self::Senior]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Child => "child",
            Self::Teen => "teen",
            Self::Adult => "adult",
            Self::Senior => "senior",
        }
    }
}

/// One cleaned passenger record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passenger {
    /// Survival flag
    pub survived: bool,
    /// Sex
    pub sex: Sex,
    /// Ticket class
    pub class: PassengerClass,
    /// Age in years, if known
    pub age: Option<f64>,
    /// Ticket fare
    pub fare: f64,
    /// Port of embarkation, if known
    pub embarked: Option<Port>,
    /// Siblings and spouses aboard
    pub sibsp: u32,
    /// Parents and children aboard
    pub parch: u32,
}

impl Passenger {
    /// Construct a passenger with no relatives aboard and unknown port
    pub fn new(survived: bool, sex: Sex, class: PassengerClass, age: Option<f64>, fare: f64) -> Self {
        Self {
            survived,
            sex,
            class,
            age,
            fare,
            embarked: None,
            sibsp: 0,
            parch: 0,
        }
    }

    /// Set the port of embarkation
    pub fn with_embarked(mut self, port: Port) -> Self {
        self.embarked = Some(port);
        self
    }

    /// Set relative counts
    pub fn with_family(mut self, sibsp: u32, parch: u32) -> Self {
        self.sibsp = sibsp;
        self.parch = parch;
        self
    }

    /// Survival as a category
    pub fn survival(&self) -> Survival {
        Survival::from(self.survived)
    }

    /// Siblings/spouses + parents/children + the passenger
    pub fn family_size(&self) -> u32 {
        self.sibsp + self.parch + 1
    }

    /// True when the passenger travelled without family
    pub fn is_alone(&self) -> bool {
        self.family_size() == 1
    }

    /// Companionship as a category
    pub fn companionship(&self) -> Companionship {
        Companionship::from(self.is_alone())
    }

    /// Age bucket, if age is known and in range
    pub fn age_group(&self) -> Option<AgeGroup> {
        self.age.and_then(AgeGroup::from_age)
    }
}

/// Immutable, cleaned passenger table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    passengers: Vec<Passenger>,
}

impl Dataset {
    /// Wrap a list of passengers
    pub fn new(passengers: Vec<Passenger>) -> Self {
        Self { passengers }
    }

    /// All passengers in load order
    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    /// Iterate passengers
    pub fn iter(&self) -> impl Iterator<Item = &Passenger> {
        self.passengers.iter()
    }

    /// Number of passengers
    pub fn len(&self) -> usize {
        self.passengers.len()
    }

    /// True when there are no passengers
    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }

    /// Number of survivors
    pub fn survivors(&self) -> usize {
        self.passengers.iter().filter(|p| p.survived).count()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Passenger;
    type IntoIter = std::slice::Iter<'a, Passenger>;

    fn into_iter(self) -> Self::IntoIter {
        self.passengers.iter()
    }
}

impl fmt::Display for PassengerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sex_parse() {
        assert_eq!(Sex::parse("male"), Some(Sex::Male));
        assert_eq!(Sex::parse(" Female "), Some(Sex::Female));
        assert_eq!(Sex::parse("F"), Some(Sex::Female));
        assert_eq!(Sex::parse("unknown"), None);
    }

    #[test]
    fn test_class_parse_accepts_numbers_and_words() {
        assert_eq!(PassengerClass::parse("1"), Some(PassengerClass::First));
        assert_eq!(PassengerClass::parse("2.0"), Some(PassengerClass::Second));
        assert_eq!(PassengerClass::parse("Third"), Some(PassengerClass::Third));
        assert_eq!(PassengerClass::parse("4"), None);
        assert_eq!(PassengerClass::parse("1.5"), None);
    }

    #[test]
    fn test_port_parse() {
        assert_eq!(Port::parse("S"), Some(Port::Southampton));
        assert_eq!(Port::parse("cherbourg"), Some(Port::Cherbourg));
        assert_eq!(Port::parse("X"), None);
    }

    #[test]
    fn test_age_group_boundaries_are_right_inclusive() {
        assert_eq!(AgeGroup::from_age(0.0), Some(AgeGroup::Child));
        assert_eq!(AgeGroup::from_age(12.0), Some(AgeGroup::Child));
        assert_eq!(AgeGroup::from_age(12.5), Some(AgeGroup::Teen));
        assert_eq!(AgeGroup::from_age(19.0), Some(AgeGroup::Teen));
        assert_eq!(AgeGroup::from_age(59.0), Some(AgeGroup::Adult));
        assert_eq!(AgeGroup::from_age(80.0), Some(AgeGroup::Senior));
        assert_eq!(AgeGroup::from_age(100.5), None);
        assert_eq!(AgeGroup::from_age(-1.0), None);
    }

    #[test]
    fn test_family_features() {
        let alone = Passenger::new(true, Sex::Female, PassengerClass::First, Some(30.0), 80.0);
        assert_eq!(alone.family_size(), 1);
        assert!(alone.is_alone());
        assert_eq!(alone.companionship(), Companionship::Alone);

        let family = alone.clone().with_family(1, 2);
        assert_eq!(family.family_size(), 4);
        assert!(!family.is_alone());
    }

    #[test]
    fn test_category_index_follows_levels() {
        assert_eq!(Sex::Male.index(), 1);
        assert_eq!(PassengerClass::Third.index(), 2);
        assert_eq!(AgeGroup::Senior.index(), 3);
        assert_eq!(Survival::from(true), Survival::Survived);
    }

    #[test]
    fn test_dataset_counts() {
        let dataset = Dataset::new(vec![
            Passenger::new(true, Sex::Female, PassengerClass::First, None, 10.0),
            Passenger::new(false, Sex::Male, PassengerClass::Third, Some(40.0), 7.0),
        ]);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.survivors(), 1);
        assert_eq!(dataset.iter().filter(|p| p.age.is_some()).count(), 1);
    }
}

//! CSV loading for passenger manifests.
//!
//! Header names are matched case-insensitively, which covers both the
//! seaborn layout (`survived,pclass,sex,age,...`) and the Kaggle layout
//! (`Survived,Pclass,Sex,Age,SibSp,...`). Columns not used by the analyses
//! are ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::errors::{LifeboatError, Result, ResultExt};
use crate::data::model::{PassengerClass, Port, Sex};

/// Columns every manifest must provide
pub const REQUIRED_COLUMNS: [&str; 5] = ["survived", "sex", "pclass", "age", "fare"];

/// One manifest row as text, before any parsing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPassenger {
    /// Survival flag cell
    pub survived: Option<String>,
    /// Sex cell
    pub sex: Option<String>,
    /// Class cell
    pub pclass: Option<String>,
    /// Age cell
    pub age: Option<String>,
    /// Fare cell
    pub fare: Option<String>,
    /// Siblings/spouses cell
    pub sibsp: Option<String>,
    /// Parents/children cell
    pub parch: Option<String>,
    /// Port cell
    pub embarked: Option<String>,
}

/// A manifest row with every present cell parsed; absent cells stay `None`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPassenger {
    /// Survival flag
    pub survived: Option<bool>,
    /// Sex
    pub sex: Option<Sex>,
    /// Ticket class
    pub class: Option<PassengerClass>,
    /// Age in years
    pub age: Option<f64>,
    /// Fare
    pub fare: Option<f64>,
    /// Siblings and spouses aboard
    pub sibsp: Option<u32>,
    /// Parents and children aboard
    pub parch: Option<u32>,
    /// Port of embarkation
    pub embarked: Option<Port>,
}

/// The manifest as read from disk
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Normalized (lower-cased) header names in file order
    pub columns: Vec<String>,
    /// Data rows in file order
    pub rows: Vec<RawPassenger>,
}

impl RawTable {
    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the file had no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when the header contains `column`
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Parse every row, failing on the first cell that holds an unreadable value
    pub fn parse(&self) -> Result<Vec<ParsedPassenger>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| parse_row(row, index + 1))
            .collect()
    }
}

/// Load a manifest from a CSV file
pub fn load_csv(path: impl AsRef<Path>) -> Result<RawTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        LifeboatError::io(format!("Failed to open dataset: {}", path.display()), e)
    })?;
    let table = read_csv(file).with_context(|| format!("Failed to read {}", path.display()))?;
    debug!(
        "Read {} rows and {} columns from {}",
        table.len(),
        table.columns.len(),
        path.display()
    );
    Ok(table)
}

/// Read a manifest from any CSV source
pub fn read_csv<R: Read>(source: R) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_ascii_lowercase())
        .collect();

    for required in REQUIRED_COLUMNS {
        if !columns.iter().any(|c| c == required) {
            return Err(LifeboatError::Dataset {
                message: format!("missing required column '{required}'"),
                column: Some(required.to_string()),
                row: None,
            });
        }
    }

    reader.set_headers(csv::StringRecord::from(columns.clone()));

    let rows = reader
        .deserialize::<RawPassenger>()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(RawTable { columns, rows })
}

/// True for cells that denote a missing value
pub fn is_missing(cell: &str) -> bool {
    matches!(
        cell.trim().to_ascii_lowercase().as_str(),
        "" | "na" | "nan" | "null" | "none"
    )
}

fn present(cell: &Option<String>) -> Option<&str> {
    cell.as_deref().filter(|value| !is_missing(value))
}

fn parse_cell<T>(
    cell: &Option<String>,
    column: &str,
    row: usize,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>> {
    match present(cell) {
        None => Ok(None),
        Some(value) => parse(value).map(Some).ok_or_else(|| {
            LifeboatError::dataset_cell(format!("cannot parse '{value}'"), column, row)
        }),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "1.0" | "true" | "yes" | "y" => Some(true),
        "0" | "0.0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_count(value: &str) -> Option<u32> {
    if let Ok(count) = value.parse::<u32>() {
        return Some(count);
    }
    let number = parse_number(value)?;
    (number >= 0.0 && number.fract() == 0.0 && number <= f64::from(u32::MAX)).then_some(number as u32)
}

fn parse_row(row: &RawPassenger, index: usize) -> Result<ParsedPassenger> {
    Ok(ParsedPassenger {
        survived: parse_cell(&row.survived, "survived", index, parse_flag)?,
        sex: parse_cell(&row.sex, "sex", index, Sex::parse)?,
        class: parse_cell(&row.pclass, "pclass", index, PassengerClass::parse)?,
        age: parse_cell(&row.age, "age", index, parse_number)?,
        fare: parse_cell(&row.fare, "fare", index, parse_number)?,
        sibsp: parse_cell(&row.sibsp, "sibsp", index, parse_count)?,
        parch: parse_cell(&row.parch, "parch", index, parse_count)?,
        embarked: parse_cell(&row.embarked, "embarked", index, Port::parse)?,
    })
}

//! Labeled numeric summaries for charting.
//!
//! Nothing here draws. Each summary carries the numbers a renderer needs:
//! bar heights, histogram edges and counts, five-number boxes, scatter
//! points.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::PlotConfig;
use crate::data::model::{Category, Dataset, Passenger, PassengerClass, Sex, Survival};
use crate::stats::contingency::ContingencyTable;
use crate::stats::descriptive::FiveNumberSummary;

/// A named sequence of values aligned with a chart's categories or bins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Series name (legend entry)
    pub name: String,
    /// One count per category or bin
    pub counts: Vec<u64>,
}

/// Grouped bar chart of counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    /// Chart title
    pub title: String,
    /// X-axis categories
    pub categories: Vec<String>,
    /// One series per hue level
    pub series: Vec<Series>,
}

impl BarChart {
    /// Bars from a contingency table: table rows on the x axis, columns as series
    pub fn from_table(title: impl Into<String>, table: &ContingencyTable) -> Self {
        let transposed = table.transposed();
        Self {
            title: title.into(),
            categories: table.row_labels.clone(),
            series: transposed
                .row_labels
                .iter()
                .zip(transposed.counts)
                .map(|(name, counts)| Series {
                    name: name.clone(),
                    counts,
                })
                .collect(),
        }
    }
}

/// Histogram with shared bin edges across series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Chart title
    pub title: String,
    /// `bins + 1` ascending edges; the last bin is closed on the right
    pub edges: Vec<f64>,
    /// One series per hue level
    pub series: Vec<Series>,
}

impl Histogram {
    /// Bin labeled samples over their combined range.
    ///
    /// A zero-width range is widened to ±0.5 around the single value.
    /// Returns `None` when there are no values or `bins` is zero.
    pub fn from_groups(title: impl Into<String>, groups: &[(String, Vec<f64>)], bins: usize) -> Option<Self> {
        if bins == 0 {
            return None;
        }
        let all = groups.iter().flat_map(|(_, values)| values.iter().copied());
        let (min, max) = all.fold(None, |range: Option<(f64, f64)>, v| match range {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;
        let (lo, hi) = if min == max { (min - 0.5, max + 0.5) } else { (min, max) };
        let width = (hi - lo) / bins as f64;

        let edges = (0..=bins).map(|i| lo + width * i as f64).collect();
        let series = groups
            .iter()
            .map(|(name, values)| {
                let mut counts = vec![0; bins];
                for &v in values {
                    let bin = (((v - lo) / width).floor() as usize).min(bins - 1);
                    counts[bin] += 1;
                }
                Series {
                    name: name.clone(),
                    counts,
                }
            })
            .collect();

        Some(Self {
            title: title.into(),
            edges,
            series,
        })
    }
}

/// One box of a box plot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledBox {
    /// Group label
    pub label: String,
    /// Quartiles, `None` for an empty group
    pub summary: Option<FiveNumberSummary>,
}

/// Box plot of one measure across groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlot {
    /// Chart title
    pub title: String,
    /// One box per group, in level order
    pub boxes: Vec<LabeledBox>,
}

impl BoxPlot {
    fn from_groups(title: &str, groups: Vec<(String, Vec<f64>)>) -> Self {
        Self {
            title: title.to_string(),
            boxes: groups
                .into_iter()
                .map(|(label, values)| LabeledBox {
                    summary: FiveNumberSummary::from_values(&values),
                    label,
                })
                .collect(),
        }
    }
}

/// Scatter plot points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scatter {
    /// Chart title
    pub title: String,
    /// X-axis variable
    pub x_label: String,
    /// Y-axis variable
    pub y_label: String,
    /// (x, y) pairs
    pub points: Vec<(f64, f64)>,
}

/// Every chart of the study
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSummaries {
    /// Survival counts by sex
    pub survival_by_sex: BarChart,
    /// Age distribution split by survival, `None` when no ages are known
    pub age_distribution: Option<Histogram>,
    /// Age by passenger class
    pub age_by_class: BoxPlot,
    /// Age by survival
    pub age_by_survival: BoxPlot,
    /// Age against fare
    pub age_vs_fare: Scatter,
}

fn ages_by<C: Category>(dataset: &Dataset, key: impl Fn(&Passenger) -> C) -> Vec<(String, Vec<f64>)> {
    let mut groups: Vec<(String, Vec<f64>)> = C::levels()
        .iter()
        .map(|level| (level.label().to_string(), Vec::new()))
        .collect();
    for passenger in dataset {
        if let Some(age) = passenger.age {
            groups[key(passenger).index()].1.push(age);
        }
    }
    groups
}

/// Build all plot summaries for a dataset
pub fn build(dataset: &Dataset, config: &PlotConfig) -> PlotSummaries {
    let sex_table = ContingencyTable::cross_tabulate::<Sex, Survival, _>(
        dataset.iter().map(|p| (p.sex, p.survival())),
    );
    let by_survival = ages_by::<Survival>(dataset, |p| p.survival());
    let by_class = ages_by::<PassengerClass>(dataset, |p| p.class);

    let summaries = PlotSummaries {
        survival_by_sex: BarChart::from_table("Survival count by gender", &sex_table),
        age_distribution: Histogram::from_groups(
            "Age distribution by survival",
            &by_survival,
            config.histogram_bins,
        ),
        age_by_class: BoxPlot::from_groups("Age by passenger class", by_class),
        age_by_survival: BoxPlot::from_groups("Age by survival", by_survival),
        age_vs_fare: Scatter {
            title: "Age vs fare".to_string(),
            x_label: "age".to_string(),
            y_label: "fare".to_string(),
            points: dataset
                .iter()
                .filter_map(|p| p.age.map(|age| (age, p.fare)))
                .collect(),
        },
    };
    debug!(
        "Built plot summaries ({} scatter points)",
        summaries.age_vs_fare.points.len()
    );
    summaries
}

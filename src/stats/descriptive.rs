//! Descriptive statistics over plain slices.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sum of squared deviations from the mean
pub fn sum_of_squares(values: &[f64]) -> f64 {
    match mean(values) {
        Some(m) => values.iter().map(|x| (x - m).powi(2)).sum(),
        None => 0.0,
    }
}

/// Unbiased sample variance (n - 1 denominator), `None` below two values
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    Some(sum_of_squares(values) / (values.len() - 1) as f64)
}

/// Sample standard deviation
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    sample_variance(values).map(f64::sqrt)
}

/// Copy and sort values ascending (NaN-free input assumed)
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(|a, b| a.total_cmp(b));
    out
}

/// Quantile of already sorted data with linear interpolation between order statistics
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

/// Median with linear interpolation (mean of the two middle values for even counts)
pub fn median(values: &[f64]) -> Option<f64> {
    quantile_sorted(&sorted(values), 0.5)
}

/// Most frequent value; ties resolve to the smallest value
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Ord + Copy,
    I: IntoIterator<Item = T>,
{
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    let mut best: Option<(T, usize)> = None;
    for (value, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Minimum, quartiles and maximum of a sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiveNumberSummary {
    /// Smallest value
    pub min: f64,
    /// First quartile
    pub q1: f64,
    /// Median
    pub median: f64,
    /// Third quartile
    pub q3: f64,
    /// Largest value
    pub max: f64,
    /// Sample size
    pub n: usize,
}

impl FiveNumberSummary {
    /// Summarize a sample, `None` when empty
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let data = sorted(values);
        Some(Self {
            min: *data.first()?,
            q1: quantile_sorted(&data, 0.25)?,
            median: quantile_sorted(&data, 0.5)?,
            q3: quantile_sorted(&data, 0.75)?,
            max: *data.last()?,
            n: data.len(),
        })
    }
}

//! Descriptive statistics for numeric columns and frequency rankings for
//! categorical columns.

use std::collections::HashMap;

use serde::Serialize;

/// Exact descriptive statistics over a column's coercible numeric values.
/// Every field is `null` when no values exist.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NumericStats {
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q1: Option<f64>,
    pub median: Option<f64>,
    pub q3: Option<f64>,
    pub max: Option<f64>,
}

/// One entry of a categorical frequency ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopValue {
    pub value: String,
    pub count: usize,
}

/// Mean, population standard deviation, extrema, and interpolated quartiles.
///
/// The standard deviation divides by `n`, not `n − 1`.
pub fn numeric_stats(values: &[f64]) -> NumericStats {
    let n = values.len();
    if n == 0 {
        return NumericStats::default();
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values
        .iter()
        .map(|value| (value - mean) * (value - mean))
        .sum::<f64>()
        / n as f64;

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    NumericStats {
        mean: Some(mean),
        std: Some(variance.sqrt()),
        min: Some(sorted[0]),
        q1: Some(percentile(&sorted, 0.25)),
        median: Some(percentile(&sorted, 0.5)),
        q3: Some(percentile(&sorted, 0.75)),
        max: Some(sorted[n - 1]),
    }
}

/// Interpolated percentile over ascending-sorted values: the value at
/// fractional index `p × (n − 1)`, linearly interpolated between the two
/// nearest order statistics.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if p <= 0.0 {
        return sorted[0];
    }
    if p >= 1.0 {
        return sorted[n - 1];
    }
    let idx = p * (n - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = idx - lo as f64;
    sorted[lo] * (1.0 - frac) + sorted[hi] * frac
}

/// Frequency ranking of stringified values: descending by count, ties in
/// first-occurrence order, truncated to `limit` entries.
pub fn top_values<I>(values: I, limit: usize) -> Vec<TopValue>
where
    I: IntoIterator<Item = String>,
{
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in values {
        match counts.get_mut(&value) {
            Some(count) => *count += 1,
            None => {
                counts.insert(value.clone(), 1);
                order.push(value);
            }
        }
    }

    let mut ranked: Vec<TopValue> = order
        .into_iter()
        .map(|value| {
            let count = counts[&value];
            TopValue { value, count }
        })
        .collect();
    // Stable sort keeps first-occurrence order among equal counts.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}

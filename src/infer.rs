//! Per-column dtype inference.
//!
//! A column is numeric when at least `floor(0.7 × n)` of its `n` non-missing
//! values coerce to finite numbers (never fewer than one). Everything else
//! is categorical. Coercion failures are not errors; they only affect the
//! tally.

use serde::Serialize;

use crate::record::RawValue;

/// Minimum fraction of coercible values for numeric classification.
const NUMERIC_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dtype {
    Numeric,
    Categorical,
}

/// Attempts numeric coercion of one raw value: numbers pass through when
/// finite; text is trimmed, stripped of thousands-separator commas, and
/// parsed as a finite real number.
pub fn coerce_numeric(value: &RawValue) -> Option<f64> {
    match value {
        RawValue::Number(number) => number.is_finite().then_some(*number),
        RawValue::Text(text) => {
            let cleaned = text.trim().replace(',', "");
            match cleaned.parse::<f64>() {
                Ok(parsed) if parsed.is_finite() => Some(parsed),
                _ => None,
            }
        }
        RawValue::Null => None,
    }
}

/// Classifies one column's non-missing values and returns the coercible
/// subset for numeric columns (non-coercible stragglers stay counted as
/// present, but are excluded from the numeric statistics).
pub fn classify(values: &[&RawValue]) -> (Dtype, Vec<f64>) {
    let numeric: Vec<f64> = values.iter().filter_map(|value| coerce_numeric(value)).collect();
    let threshold = ((NUMERIC_THRESHOLD * values.len() as f64).floor() as usize).max(1);
    if !values.is_empty() && numeric.len() >= threshold {
        (Dtype::Numeric, numeric)
    } else {
        (Dtype::Categorical, Vec::new())
    }
}

//! Profile assembly: per-column summaries plus dataset-level metadata,
//! aggregated into one immutable result.
//!
//! Profiling is a pure function of the input text (plus an optional filename
//! hint): no shared state, no randomness, no wall-clock dependency. Two runs
//! over identical input produce identical profiles, so a remote execution
//! path serializing the result as a document and a local in-process path are
//! functionally interchangeable.

use std::collections::HashSet;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::{
    error::ProfileError,
    infer::{self, Dtype},
    parse, preview,
    record::{RawValue, Record, discover_columns},
    stats::{self, NumericStats, TopValue},
};

/// Source name used when no filename hint is available.
pub const DEFAULT_SOURCE_NAME: &str = "upload";

/// Frequency-ranking depth for categorical columns.
pub const TOP_VALUES_LIMIT: usize = 5;

/// Number of sample values carried per column.
pub const SAMPLE_LIMIT: usize = 5;

/// Summary of one column. Exactly one of `stats` / `top_values` is present,
/// matching the column's dtype.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub dtype: Dtype,
    pub non_null: usize,
    pub missing: usize,
    /// Distinct count over stringified values; numeric-equivalent strings
    /// such as "1" and "1.0" stay distinct.
    pub unique: usize,
    /// First few non-missing raw values, in row order.
    pub sample: Vec<RawValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<NumericStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_values: Option<Vec<TopValue>>,
}

/// Per-column missing counts, serialized as a JSON map in column discovery
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MissingByColumn(Vec<(String, usize)>);

impl MissingByColumn {
    pub fn get(&self, column: &str) -> Option<usize> {
        self.0
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(name, count)| (name.as_str(), *count))
    }
}

impl Serialize for MissingByColumn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, count) in &self.0 {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Summary {
    pub columns: Vec<ColumnSummary>,
    pub missing_by_column: MissingByColumn,
    /// Sum of UTF-8 byte lengths of every stringified non-missing value.
    /// An approximate heuristic, not a true memory footprint.
    pub memory_usage_bytes: u64,
}

/// The complete profiling result. Immutable once built; this is the sole
/// contract the presentation layer consumes.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Profile {
    pub filename: String,
    pub rows: usize,
    pub columns: usize,
    pub summary: Summary,
    pub preview: Vec<Record>,
}

/// Profiles raw text end to end: parse, infer, summarize, sample.
pub fn profile(text: &str, filename_hint: Option<&str>) -> Result<Profile, ProfileError> {
    let records = parse::parse(text, filename_hint)?;
    build_profile(records, filename_hint.unwrap_or(DEFAULT_SOURCE_NAME))
}

/// Builds the profile from already-parsed records.
pub fn build_profile(records: Vec<Record>, source_name: &str) -> Result<Profile, ProfileError> {
    if records.is_empty() {
        return Err(ProfileError::EmptyInput);
    }

    let column_names = discover_columns(&records);
    let rows = records.len();
    let mut columns = Vec::with_capacity(column_names.len());
    let mut missing_by_column = Vec::with_capacity(column_names.len());
    let mut memory_usage_bytes: u64 = 0;

    for name in &column_names {
        let values: Vec<&RawValue> = records
            .iter()
            .filter_map(|record| record.get(name))
            .filter(|value| !value.is_missing())
            .collect();
        let non_null = values.len();
        let missing = rows - non_null;
        missing_by_column.push((name.clone(), missing));

        let texts: Vec<String> = values.iter().map(|value| value.as_text()).collect();
        memory_usage_bytes += texts.iter().map(|text| text.len() as u64).sum::<u64>();
        let unique = texts.iter().collect::<HashSet<_>>().len();

        let sample = values
            .iter()
            .take(SAMPLE_LIMIT)
            .map(|value| (*value).clone())
            .collect();

        let (dtype, numeric_values) = infer::classify(&values);
        let (column_stats, ranked) = match dtype {
            Dtype::Numeric => (Some(stats::numeric_stats(&numeric_values)), None),
            Dtype::Categorical => (
                None,
                Some(stats::top_values(texts.into_iter(), TOP_VALUES_LIMIT)),
            ),
        };

        columns.push(ColumnSummary {
            name: name.clone(),
            dtype,
            non_null,
            missing,
            unique,
            sample,
            stats: column_stats,
            top_values: ranked,
        });
    }

    let preview = preview::sample(&records).to_vec();
    Ok(Profile {
        filename: source_name.to_string(),
        rows,
        columns: column_names.len(),
        summary: Summary {
            columns,
            missing_by_column: MissingByColumn(missing_by_column),
            memory_usage_bytes,
        },
        preview,
    })
}

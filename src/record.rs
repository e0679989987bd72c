//! Row-oriented record model.
//!
//! Records are untyped, arbitrary-shape rows: an explicit ordered list of
//! `(column, value)` pairs rather than a native map, so that key insertion
//! order is first-class state and survives into column discovery order.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single raw cell value as produced by the parser.
///
/// "Missing" is not a variant: a value is missing when its key is absent
/// from the record, when it is an explicit null, or when it is an empty
/// string. The first case is only possible for JSON input; delimited rows
/// are padded to the header width.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Number(f64),
    Null,
}

impl RawValue {
    /// True when the value is treated as absent for statistics purposes.
    pub fn is_missing(&self) -> bool {
        match self {
            RawValue::Null => true,
            RawValue::Text(text) => text.is_empty(),
            RawValue::Number(_) => false,
        }
    }

    /// Stringified form used for uniqueness, frequency ranking, and the
    /// memory estimate. Whole numbers render without a fractional part.
    ///
    /// Uniqueness is counted on this stringified form even for numeric
    /// columns, so `"1"` and `"1.0"` remain distinct values.
    pub fn as_text(&self) -> String {
        match self {
            RawValue::Text(text) => text.clone(),
            RawValue::Number(number) => {
                if number.fract() == 0.0 && number.abs() < 9.007_199_254_740_992e15 {
                    (*number as i64).to_string()
                } else {
                    number.to_string()
                }
            }
            RawValue::Null => String::from("null"),
        }
    }
}

impl Serialize for RawValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RawValue::Text(text) => serializer.serialize_str(text),
            RawValue::Number(number) => serializer.serialize_f64(*number),
            RawValue::Null => serializer.serialize_unit(),
        }
    }
}

/// One row: column name to raw value, in insertion order, possibly with
/// absent keys. Inserting an existing key overwrites the value but keeps the
/// key's original position, matching object semantics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, RawValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: RawValue) {
        let name = name.into();
        if let Some(existing) = self.fields.iter_mut().find(|(key, _)| *key == name) {
            existing.1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Column discovery order: first appearance of each key across all records.
pub fn discover_columns(records: &[Record]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !columns.iter().any(|existing| existing == key) {
                columns.push(key.to_string());
            }
        }
    }
    columns
}

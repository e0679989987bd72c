//! Turns raw text into an ordered sequence of records.
//!
//! Two formats are supported:
//!
//! - **Delimited** (comma or tab): a hand-rolled two-state character
//!   automaton with doubled-quote escapes. Parsing is total; ragged rows are
//!   padded or truncated against the header instead of rejected.
//! - **JSON**: a single document (array, object, or scalar) or
//!   line-delimited objects, via `serde_json`.
//!
//! Format selection follows the filename hint extension when present.
//! Without a hint, JSON is attempted first and comma-delimited parsing is
//! the fallback. That precedence is ambiguous for some comma-separated
//! inputs that happen to start with `{`; it is kept for compatibility.

use serde_json::Value as JsonValue;

use crate::{
    error::ProfileError,
    record::{RawValue, Record},
};

/// Number of leading non-blank lines inspected when sniffing for
/// line-delimited JSON.
const NDJSON_PROBE_LINES: usize = 5;

/// Parses `text` into records, using `filename_hint` (if any) to pick the
/// format by extension: `.csv` comma, `.tsv` tab, `.json`/`.jsonl` JSON.
pub fn parse(text: &str, filename_hint: Option<&str>) -> Result<Vec<Record>, ProfileError> {
    let hint = filename_hint.unwrap_or("").to_ascii_lowercase();
    if hint.ends_with(".csv") {
        Ok(parse_delimited(text, ','))
    } else if hint.ends_with(".tsv") {
        Ok(parse_delimited(text, '\t'))
    } else if hint.ends_with(".json") || hint.ends_with(".jsonl") {
        parse_json_flexible(text)
    } else {
        // JSON first, delimited-comma fallback.
        parse_json_flexible(text).or_else(|_| Ok(parse_delimited(text, ',')))
    }
}

/// Delimited parsing: header + positional zip. Blank header cells get a
/// `col_N` placeholder; short rows are right-padded with empty strings and
/// long rows lose their extra trailing fields. A row holding exactly one
/// empty field is a blank line and is skipped.
pub fn parse_delimited(text: &str, delimiter: char) -> Vec<Record> {
    let rows = split_rows(text, delimiter);
    let Some((header_row, data_rows)) = rows.split_first() else {
        return Vec::new();
    };

    let header: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let trimmed = cell.trim();
            if trimmed.is_empty() {
                format!("col_{}", idx + 1)
            } else {
                trimmed.to_string()
            }
        })
        .collect();

    let mut records = Vec::new();
    for row in data_rows {
        if row.len() == 1 && row[0].is_empty() {
            continue;
        }
        let mut record = Record::new();
        for (idx, name) in header.iter().enumerate() {
            let value = row.get(idx).cloned().unwrap_or_default();
            record.insert(name.clone(), RawValue::Text(value));
        }
        records.push(record);
    }
    records
}

/// The two-state field automaton. States are `Unquoted` and `Quoted`; a
/// doubled `"` inside quotes emits one literal quote, `\r` is dropped and
/// row ends rely on the following `\n`.
fn split_rows(text: &str, delimiter: char) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == delimiter {
            current.push(std::mem::take(&mut field));
        } else if ch == '\n' {
            current.push(std::mem::take(&mut field));
            rows.push(std::mem::take(&mut current));
        } else if ch != '\r' {
            field.push(ch);
        }
    }

    // Flush the trailing row: kept when it has more than one field, its
    // single field is non-empty, or no row exists yet.
    let had_pending = !field.is_empty();
    current.push(field);
    if current.len() > 1 || had_pending || rows.is_empty() {
        rows.push(current);
    }
    rows
}

/// JSON parsing with line-delimited sniffing: when the input has more than
/// one non-blank line and the first few all open with `{`, each line is an
/// independent JSON value. Otherwise the whole text is one document. Any
/// single parse failure aborts the operation.
pub fn parse_json_flexible(text: &str) -> Result<Vec<Record>, ProfileError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let lines: Vec<&str> = trimmed.lines().filter(|line| !line.trim().is_empty()).collect();
    if lines.len() > 1
        && lines
            .iter()
            .take(NDJSON_PROBE_LINES)
            .all(|line| line.trim_start().starts_with('{'))
    {
        let mut records = Vec::with_capacity(lines.len());
        for (idx, line) in lines.iter().enumerate() {
            let value: JsonValue = serde_json::from_str(line)
                .map_err(|source| ProfileError::MalformedJsonLine { line: idx + 1, source })?;
            records.push(record_from_json(value));
        }
        return Ok(records);
    }

    let document: JsonValue = serde_json::from_str(trimmed)?;
    Ok(match document {
        JsonValue::Array(items) => items.into_iter().map(record_from_json).collect(),
        other => vec![record_from_json(other)],
    })
}

/// An object becomes a record as-is; any other value is wrapped as a
/// single-field record `{value: ...}`.
fn record_from_json(value: JsonValue) -> Record {
    match value {
        JsonValue::Object(map) => {
            let mut record = Record::new();
            for (key, item) in map {
                record.insert(key, raw_from_json(item));
            }
            record
        }
        other => {
            let mut record = Record::new();
            record.insert("value", raw_from_json(other));
            record
        }
    }
}

fn raw_from_json(value: JsonValue) -> RawValue {
    match value {
        JsonValue::Null => RawValue::Null,
        JsonValue::Bool(flag) => RawValue::Text(flag.to_string()),
        JsonValue::Number(number) => match number.as_f64() {
            Some(parsed) => RawValue::Number(parsed),
            None => RawValue::Text(number.to_string()),
        },
        JsonValue::String(text) => RawValue::Text(text),
        // Nested structures are carried as compact JSON text.
        other => RawValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> RawValue {
        RawValue::Text(value.to_string())
    }

    #[test]
    fn delimited_parses_plain_rows() {
        let records = parse_delimited("a,b\n1,2\n3,4\n", ',');
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("a"), Some(&text("1")));
        assert_eq!(records[0].get("b"), Some(&text("2")));
        assert_eq!(records[1].get("a"), Some(&text("3")));
    }

    #[test]
    fn delimited_honors_quotes_and_escaped_quotes() {
        let records = parse_delimited("name,note\n\"Doe, John\",\"has \"\"quotes\"\"\"\n", ',');
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("name"), Some(&text("Doe, John")));
        assert_eq!(records[0].get("note"), Some(&text("has \"quotes\"")));
    }

    #[test]
    fn delimited_allows_newlines_inside_quotes() {
        let records = parse_delimited("a,b\n\"line1\nline2\",x\n", ',');
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("a"), Some(&text("line1\nline2")));
    }

    #[test]
    fn delimited_drops_carriage_returns() {
        let records = parse_delimited("a,b\r\n1,2\r\n", ',');
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("b"), Some(&text("2")));
    }

    #[test]
    fn delimited_pads_short_rows_and_truncates_long_rows() {
        let records = parse_delimited("a,b\n1\n2,3,4\n", ',');
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("a"), Some(&text("1")));
        assert_eq!(records[0].get("b"), Some(&text("")));
        assert_eq!(records[1].get("a"), Some(&text("2")));
        assert_eq!(records[1].get("b"), Some(&text("3")));
        assert_eq!(records[1].len(), 2);
    }

    #[test]
    fn delimited_skips_blank_lines() {
        let records = parse_delimited("a,b\n1,2\n\n3,4\n\n", ',');
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn delimited_replaces_blank_header_cells_with_placeholders() {
        let records = parse_delimited(",b, \n1,2,3\n", ',');
        assert_eq!(records[0].get("col_1"), Some(&text("1")));
        assert_eq!(records[0].get("b"), Some(&text("2")));
        assert_eq!(records[0].get("col_3"), Some(&text("3")));
    }

    #[test]
    fn delimited_trims_header_cells() {
        let records = parse_delimited(" a , b\n1,2\n", ',');
        assert_eq!(records[0].get("a"), Some(&text("1")));
        assert_eq!(records[0].get("b"), Some(&text("2")));
    }

    #[test]
    fn delimited_flushes_final_row_without_trailing_newline() {
        let records = parse_delimited("a,b\n1,2\n3,4", ',');
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("b"), Some(&text("4")));

        let single = parse_delimited("x\n1\n2", ',');
        assert_eq!(single.len(), 2);
        assert_eq!(single[1].get("x"), Some(&text("2")));
    }

    #[test]
    fn delimited_header_only_yields_no_records() {
        assert!(parse_delimited("a,b\n", ',').is_empty());
        assert!(parse_delimited("", ',').is_empty());
    }

    #[test]
    fn tab_delimiter_splits_on_tabs_only() {
        let records = parse_delimited("a\tb\n1,5\t2\n", '\t');
        assert_eq!(records[0].get("a"), Some(&text("1,5")));
        assert_eq!(records[0].get("b"), Some(&text("2")));
    }

    #[test]
    fn json_array_of_objects() {
        let records = parse_json_flexible(r#"[{"x":1},{"x":2},{"x":null}]"#).expect("parse");
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].get("x"), Some(&RawValue::Number(1.0)));
        assert_eq!(records[2].get("x"), Some(&RawValue::Null));
    }

    #[test]
    fn json_array_wraps_scalar_elements() {
        let records = parse_json_flexible(r#"[1, "two", null]"#).expect("parse");
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].get("value"), Some(&RawValue::Number(1.0)));
        assert_eq!(records[1].get("value"), Some(&text("two")));
        assert_eq!(records[2].get("value"), Some(&RawValue::Null));
    }

    #[test]
    fn json_single_object_and_scalar_documents() {
        let records = parse_json_flexible(r#"{"a": 1, "b": "x"}"#).expect("parse");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].keys().collect::<Vec<_>>(), vec!["a", "b"]);

        let scalar = parse_json_flexible("42").expect("parse");
        assert_eq!(scalar.len(), 1);
        assert_eq!(scalar[0].get("value"), Some(&RawValue::Number(42.0)));
    }

    #[test]
    fn json_object_keys_keep_document_order() {
        let records = parse_json_flexible(r#"{"zeta": 1, "alpha": 2}"#).expect("parse");
        assert_eq!(records[0].keys().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
    }

    #[test]
    fn line_delimited_json_parses_each_line() {
        let records =
            parse_json_flexible("{\"a\":1}\n{\"a\":2}\n\n{\"a\":3}\n").expect("parse");
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].get("a"), Some(&RawValue::Number(3.0)));
    }

    #[test]
    fn line_delimited_json_aborts_on_any_bad_line() {
        let err = parse_json_flexible("{\"a\":1}\n{broken\n").expect_err("must fail");
        assert!(matches!(err, ProfileError::MalformedJsonLine { line: 2, .. }));
    }

    #[test]
    fn multi_line_array_is_a_single_document() {
        let records = parse_json_flexible("[\n{\"a\":1},\n{\"a\":2}\n]").expect("parse");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn auto_detect_prefers_json_then_falls_back_to_csv() {
        let records = parse("[{\"x\":1}]", None).expect("parse");
        assert_eq!(records[0].get("x"), Some(&RawValue::Number(1.0)));

        let fallback = parse("a,b\n1,2\n", None).expect("parse");
        assert_eq!(fallback[0].get("a"), Some(&text("1")));
    }

    #[test]
    fn extension_hint_overrides_auto_detection() {
        // Valid JSON, but the .csv hint forces delimited parsing.
        let records = parse("a,b\n1,2\n", Some("data.csv")).expect("parse");
        assert_eq!(records.len(), 1);

        let err = parse("a,b\n1,2\n", Some("data.json")).expect_err("hinted JSON must fail");
        assert!(matches!(err, ProfileError::MalformedJson(_)));
    }

    #[test]
    fn empty_json_input_yields_no_records() {
        assert!(parse_json_flexible("   \n ").expect("parse").is_empty());
    }
}

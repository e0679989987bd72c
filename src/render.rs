//! Presentation layer: elastic text tables for the overview, per-column
//! summary, and preview. Formatting only; statistics are never altered here.

use itertools::Itertools;

use crate::{
    profile::{ColumnSummary, Profile},
    record::{Record, discover_columns},
    stats::NumericStats,
};

pub fn print_profile(profile: &Profile) {
    let overview_headers = ["file", "rows", "columns", "memory"]
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>();
    let overview_row = vec![
        profile.filename.clone(),
        profile.rows.to_string(),
        profile.columns.to_string(),
        human_bytes(profile.summary.memory_usage_bytes),
    ];
    print_table(&overview_headers, &[overview_row]);
    println!();

    let column_headers = ["column", "dtype", "non_null", "missing", "unique", "details"]
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>();
    let column_rows = profile
        .summary
        .columns
        .iter()
        .map(column_row)
        .collect::<Vec<_>>();
    print_table(&column_headers, &column_rows);
    println!();

    let (preview_headers, preview_data) = preview_rows(&profile.preview);
    print_table(&preview_headers, &preview_data);
}

fn column_row(column: &ColumnSummary) -> Vec<String> {
    let details = match (&column.stats, &column.top_values) {
        (Some(stats), _) => stats_cell(stats),
        (None, Some(top)) => top
            .iter()
            .map(|entry| format!("{} ({})", entry.value, entry.count))
            .join(", "),
        (None, None) => String::new(),
    };
    vec![
        column.name.clone(),
        format!("{:?}", column.dtype).to_ascii_lowercase(),
        column.non_null.to_string(),
        column.missing.to_string(),
        column.unique.to_string(),
        details,
    ]
}

fn stats_cell(stats: &NumericStats) -> String {
    [
        ("mean", stats.mean),
        ("std", stats.std),
        ("min", stats.min),
        ("q1", stats.q1),
        ("median", stats.median),
        ("q3", stats.q3),
        ("max", stats.max),
    ]
    .iter()
    .map(|(label, value)| format!("{label}={}", metric(*value)))
    .join(", ")
}

fn metric(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_else(|| "-".to_string())
}

pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.4}")
    }
}

/// Preview as a table: header order is the union of record keys in
/// first-appearance order; missing and null cells render blank.
pub fn preview_rows(records: &[Record]) -> (Vec<String>, Vec<Vec<String>>) {
    let columns = discover_columns(records);
    let rows = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| match record.get(column) {
                    Some(value) if !value.is_missing() => value.as_text(),
                    _ => String::new(),
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    (columns, rows)
}

/// Humanized byte count, 1024-based with two decimals.
pub fn human_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let scaled = bytes as f64 / 1024f64.powi(exponent as i32);
    format!("{scaled:.2} {}", UNITS[exponent])
}

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let column_count = headers.len();
    let mut widths = headers
        .iter()
        .map(|header| header.chars().count())
        .collect::<Vec<_>>();
    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(column_count) {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }
    for width in &mut widths {
        *width = (*width).max(3);
    }

    let mut output = String::new();
    output.push_str(&format_row(headers, &widths));
    let separator = widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>();
    output.push_str(&format_row(&separator, &widths));
    for row in rows {
        output.push_str(&format_row(row, &widths));
    }
    output
}

pub fn print_table(headers: &[String], rows: &[Vec<String>]) {
    print!("{}", render_table(headers, rows));
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    for (idx, width) in widths.iter().enumerate() {
        if idx > 0 {
            line.push_str("  ");
        }
        let cell = cells.get(idx).map(String::as_str).unwrap_or("");
        let sanitized: String = cell
            .chars()
            .map(|ch| if ch.is_control() { ' ' } else { ch })
            .collect();
        let padding = width.saturating_sub(sanitized.chars().count());
        line.push_str(&sanitized);
        line.push_str(&" ".repeat(padding));
    }
    while line.ends_with(' ') {
        line.pop();
    }
    line.push('\n');
    line
}

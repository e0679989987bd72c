mod common;

use assert_cmd::Command;

use common::TestWorkspace;

fn numbered_csv(rows: usize) -> String {
    let mut contents = String::from("id,label\n");
    for i in 0..rows {
        contents.push_str(&format!("{i},row_{i}\n"));
    }
    contents
}

fn table_data_lines(rendered: &str) -> Vec<&str> {
    rendered
        .lines()
        .skip(2)
        .filter(|line| !line.trim().is_empty())
        .collect()
}

fn run_preview(args: &[&str]) -> String {
    let assert = Command::cargo_bin("data-profile")
        .expect("binary exists")
        .args(args)
        .assert()
        .success();
    String::from_utf8(assert.get_output().stdout.clone()).expect("stdout")
}

#[test]
fn preview_limits_to_default_row_count() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("rows.csv", &numbered_csv(40));
    let output = run_preview(&["preview", "-i", input.to_str().unwrap()]);
    let data_lines = table_data_lines(&output);

    assert_eq!(data_lines.len(), 10);
    assert!(output.lines().next().unwrap_or_default().contains("id"));
    assert!(data_lines[0].contains("row_0"));
    assert!(!output.contains("row_10"));
}

#[test]
fn preview_respects_rows_argument() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("rows.csv", &numbered_csv(40));
    let output = run_preview(&["preview", "-i", input.to_str().unwrap(), "--rows", "5"]);
    let data_lines = table_data_lines(&output);

    assert_eq!(data_lines.len(), 5);
    assert!(data_lines[4].contains("row_4"));
}

#[test]
fn preview_caps_at_the_sampler_bound() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("rows.csv", &numbered_csv(80));
    let output = run_preview(&["preview", "-i", input.to_str().unwrap(), "--rows", "100"]);
    let data_lines = table_data_lines(&output);

    assert_eq!(data_lines.len(), 50);
    assert!(data_lines[49].contains("row_49"));
    assert!(!output.contains("row_50"));
}

#[test]
fn preview_unions_json_record_keys_in_first_seen_order() {
    let workspace = TestWorkspace::new();
    let input = workspace.write(
        "mixed.jsonl",
        "{\"a\":1}\n{\"b\":\"x\",\"a\":2}\n{\"c\":true}\n",
    );
    let output = run_preview(&["preview", "-i", input.to_str().unwrap()]);
    let header = output.lines().next().unwrap_or_default();

    let a = header.find("a").expect("column a");
    let b = header.find("b").expect("column b");
    let c = header.find("c").expect("column c");
    assert!(a < b && b < c);

    let data_lines = table_data_lines(&output);
    assert_eq!(data_lines.len(), 3);
    assert!(data_lines[2].contains("true"));
}

#[test]
fn preview_of_header_only_input_reports_no_data() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("header.csv", "a,b\n");
    let output = run_preview(&["preview", "-i", input.to_str().unwrap()]);
    assert!(output.contains("No data"));
}

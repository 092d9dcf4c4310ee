mod common;

use std::fs;

use assert_cmd::Command;
use funnel_tables::{data::Value, dataset::Dataset};
use predicates::{prelude::PredicateBooleanExt, str::contains};

use common::{TestWorkspace, funnel_dataset};

fn binary() -> Command {
    Command::cargo_bin("funnel-tables").expect("binary exists")
}

#[test]
fn edit_replays_plan_and_writes_json() {
    let workspace = TestWorkspace::new();
    let input = workspace.write_dataset("funnel.json", &funnel_dataset());
    let plan = workspace.write(
        "plan.yml",
        r#"
steps:
  - op: remove_column
    column: channel
  - op: rename_column
    from: visitors
    to: users
  - op: remove_row
    index: 0
  - undo
"#,
    );
    let output = workspace.path().join("out.json");

    binary()
        .args([
            "edit",
            "-i",
            input.to_str().unwrap(),
            "-p",
            plan.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--history",
        ])
        .assert()
        .success()
        .stdout(contains("Initial import").and(contains("Renamed column \"visitors\" to \"users\"")));

    let written: Dataset =
        serde_json::from_str(&fs::read_to_string(&output).expect("read output")).expect("parse");
    assert_eq!(written.rows(), 5);
    assert_eq!(written.column_names(), vec!["stage", "users"]);
    assert_eq!(written.data[0]["users"], Value::Number(1200.0));
}

#[test]
fn edit_exports_csv_with_declared_types() {
    let workspace = TestWorkspace::new();
    let input = workspace.write(
        "leads.csv",
        "stage,amount\n Visit ,10\nSignup,\nSignup,abc\n",
    );
    let types = workspace.write("types.yml", "amount: number\n");
    let plan = workspace.write(
        "plan.yml",
        r#"
steps:
  - op: trim_whitespace
  - op: fill_nulls
    column: amount
    value: 0
"#,
    );
    let output = workspace.path().join("clean.csv");

    binary()
        .args([
            "edit",
            "-i",
            input.to_str().unwrap(),
            "--types",
            types.to_str().unwrap(),
            "-p",
            plan.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    let contents = fs::read_to_string(&output).expect("read csv");
    assert_eq!(contents, "stage,amount\nVisit,10\nSignup,0\nSignup,0\n");
}

#[test]
fn edit_reports_bad_filter_expression() {
    let workspace = TestWorkspace::new();
    let input = workspace.write_dataset("funnel.json", &funnel_dataset());
    let plan = workspace.write(
        "plan.yml",
        "steps:\n  - op: filter\n    expression: \"visitors > 1)\"\n",
    );

    binary()
        .args([
            "edit",
            "-i",
            input.to_str().unwrap(),
            "-p",
            plan.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid filter expression"));
}

#[test]
fn chart_prints_paged_table() {
    let workspace = TestWorkspace::new();
    let input = workspace.write_dataset("funnel.json", &funnel_dataset());

    binary()
        .args([
            "chart",
            "-i",
            input.to_str().unwrap(),
            "-x",
            "stage",
            "-y",
            "visitors",
            "--agg",
            "sum",
            "--sort",
            "desc",
            "--page-size",
            "2",
        ])
        .assert()
        .success()
        .stdout(
            contains("Visit")
                .and(contains("2000"))
                .and(contains("Paid").not())
                .and(contains("Showing 1-2 of 3 categories (page 1/2")),
        );
}

#[test]
fn chart_without_axes_prints_sample_series() {
    let workspace = TestWorkspace::new();
    let input = workspace.write_dataset("funnel.json", &funnel_dataset());

    binary()
        .args(["chart", "-i", input.to_str().unwrap(), "--json"])
        .assert()
        .success()
        .stdout(contains("\"fallback\": true").and(contains("Awareness")));
}

#[test]
fn chart_rejects_unknown_aggregation() {
    let workspace = TestWorkspace::new();
    let input = workspace.write_dataset("funnel.json", &funnel_dataset());

    binary()
        .args(["chart", "-i", input.to_str().unwrap(), "--agg", "median"])
        .assert()
        .failure()
        .stderr(contains("median"));
}

#[test]
fn inspect_lists_columns_and_profiles() {
    let workspace = TestWorkspace::new();
    let input = workspace.write_dataset("funnel.json", &funnel_dataset());

    binary()
        .args(["inspect", "-i", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            contains("visitors")
                .and(contains("number"))
                .and(contains("min=45 max=1200"))
                .and(contains("distinct=3")),
        );
}

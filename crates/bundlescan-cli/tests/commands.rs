//! In-process tests for command implementations.

use bundlescan_cli::cli::{AnalyzeArgs, CheckArgs, PlanArgs};
use bundlescan_cli::commands::{analyze, check, plan};
use bundlescan_cli::{CliError, Snapshot};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn test_analyze_writes_json_report() {
    let temp = TempDir::new().unwrap();
    let json = temp.path().join("report.json");

    let args = AnalyzeArgs {
        snapshot: fixture("two_groups.json"),
        config: None,
        json: Some(json.clone()),
        dot: None,
        graph: None,
        all: false,
    };
    analyze::execute(args).unwrap();

    let report = fs::read_to_string(json).unwrap();
    assert!(report.contains("Assets/Shared/Rock.mat"));
    assert!(report.contains("\"is_implicit_root\": true"));
}

#[test]
fn test_analyze_stale_tables_is_graph_error() {
    let args = AnalyzeArgs {
        snapshot: fixture("stale.json"),
        config: None,
        json: None,
        dot: None,
        graph: None,
        all: false,
    };
    let err = analyze::execute(args).unwrap_err();
    assert!(matches!(err, CliError::Graph(_)));
}

#[test]
fn test_plan_from_fixture() {
    let args = PlanArgs {
        snapshot: fixture("colliding.json"),
        config: None,
    };
    assert!(plan::execute(args).is_ok());
}

#[test]
fn test_check_with_invalid_config() {
    let args = CheckArgs {
        config: Some(fixture("invalid.toml")),
        print: false,
    };
    let err = check::execute(args).unwrap_err();
    assert!(matches!(err, CliError::Config(_)));
}

#[test]
fn test_fixture_snapshots_parse() {
    for name in ["two_groups.json", "stale.json", "no_schema.json", "colliding.json"] {
        Snapshot::load(&fixture(name)).unwrap_or_else(|e| panic!("{name}: {e}"));
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use issue_bridge::commands::{
    collect_fixed_issue_report, collect_issue_report, fixed_issues_command, issues_command,
    list_providers_command, provider_entries, select_origins,
};
use issue_bridge_core::config::BridgeConfig;
use issue_bridge_core::host::load_execution_snapshot;
use issue_bridge_core::model::Priority;
use issue_bridge_core::services::registry::default_provider_registry;
use tempfile::tempdir;

const RUN_CHAIN: &str = r#"{
  "job": "service",
  "number": 8,
  "generation": "run",
  "started_at": "2026-10-02T08:30:00Z",
  "actions": [
    { "kind": "pmd", "result": { "annotations": [
      { "context_hash": "f2:L5", "message": "null deref", "priority": "HIGH" }
    ] } }
  ],
  "previous": {
    "job": "service",
    "number": 7,
    "generation": "run",
    "actions": [
      { "kind": "pmd", "result": { "annotations": [
        { "context_hash": "f1:L10", "message": "unused var", "priority": "LOW" },
        { "context_hash": "f2:L5", "message": "null deref", "priority": "HIGH" }
      ] } }
    ]
  }
}"#;

const NO_PMD: &str = r#"{
  "job": "service",
  "number": 9,
  "generation": "build",
  "actions": [ { "kind": "opaque", "name": "junit", "url_name": "testReport" } ]
}"#;

fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn issue_report_covers_every_enabled_origin() {
    let temp = tempdir().unwrap();
    let path = write(temp.path(), "run.json", RUN_CHAIN);

    let report = collect_issue_report(&path, None, &BridgeConfig::default()).unwrap();
    assert_eq!(report.header.execution, "service #8");
    assert!(report.header.started_at.is_some());
    assert_eq!(report.origins.len(), 1);
    assert_eq!(report.origins[0].origin, "pmd");
    assert_eq!(report.origins[0].issues[0].priority, Priority::High);
    assert_eq!(report.origins[0].summary.high, 1);
}

#[test]
fn issue_report_without_origin_matches_registry_aggregation() {
    let temp = tempdir().unwrap();
    let path = write(temp.path(), "run.json", RUN_CHAIN);
    let execution = load_execution_snapshot(&path).unwrap().into_execution().unwrap();
    let expected =
        default_provider_registry().unwrap().existing_issues_by_origin(execution.as_ref()).unwrap();

    let report = collect_issue_report(&path, None, &BridgeConfig::default()).unwrap();
    let origins: Vec<&str> = report.origins.iter().map(|o| o.origin.as_str()).collect();
    assert_eq!(origins, expected.keys().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(report.origins[0].issues, expected["pmd"]);
}

#[test]
fn issue_report_is_empty_when_tool_did_not_run() {
    let temp = tempdir().unwrap();
    let path = write(temp.path(), "build.json", NO_PMD);

    let report = collect_issue_report(&path, Some("pmd"), &BridgeConfig::default()).unwrap();
    assert!(report.origins[0].issues.is_empty());
    assert_eq!(report.origins[0].summary.total(), 0);
}

#[test]
fn fixed_report_keeps_unsupported_apart_from_empty() {
    let temp = tempdir().unwrap();
    let path = write(temp.path(), "run.json", RUN_CHAIN);

    let report = collect_fixed_issue_report(&path, Some("pmd"), &BridgeConfig::default()).unwrap();
    assert!(!report.origins[0].supported);
    assert!(report.origins[0].fixed_issues.is_none());
}

#[test]
fn select_origins_prefers_explicit_then_default_then_all() {
    let registry = default_provider_registry().unwrap();
    let mut config = BridgeConfig::default();
    assert_eq!(select_origins(&registry, &config, None).unwrap(), vec!["pmd".to_string()]);
    assert_eq!(select_origins(&registry, &config, Some("pmd")).unwrap(), vec!["pmd".to_string()]);

    config.default_origin = Some("findbugs".into());
    let err = select_origins(&registry, &config, None).unwrap_err();
    assert!(err.to_string().contains("Unknown origin 'findbugs'"), "unexpected error: {err}");
}

#[test]
fn select_origins_rejects_disabled_origin() {
    let registry = default_provider_registry().unwrap();
    let config = BridgeConfig { disabled_origins: vec!["pmd".into()], ..BridgeConfig::default() };
    let err = select_origins(&registry, &config, Some("pmd")).unwrap_err();
    assert!(err.to_string().contains("disabled by configuration"));
}

#[test]
fn provider_entries_follow_config() {
    assert_eq!(provider_entries(&BridgeConfig::default()).unwrap().len(), 1);
    let config = BridgeConfig { disabled_origins: vec!["pmd".into()], ..BridgeConfig::default() };
    assert!(provider_entries(&config).unwrap().is_empty());
}

#[test]
fn commands_print_in_both_modes() {
    let temp = tempdir().unwrap();
    let path = write(temp.path(), "run.json", RUN_CHAIN);
    let config = BridgeConfig::default();

    list_providers_command(&config, false).unwrap();
    list_providers_command(&config, true).unwrap();
    issues_command(&path, None, &config, false).unwrap();
    issues_command(&path, None, &config, true).unwrap();
    fixed_issues_command(&path, Some("pmd"), &config, false).unwrap();
    fixed_issues_command(&path, Some("pmd"), &config, true).unwrap();
}

#[test]
fn yaml_snapshots_are_accepted() {
    let temp = tempdir().unwrap();
    let path = write(
        temp.path(),
        "build.yml",
        "job: app\nnumber: 1\ngeneration: build\nactions:\n  - kind: opaque\n    name: changelog\n",
    );
    let report = collect_issue_report(&path, None, &BridgeConfig::default()).unwrap();
    assert_eq!(report.header.execution, "app #1");
}

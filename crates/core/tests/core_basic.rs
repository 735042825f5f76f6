use issue_bridge_core::model::{Issue, Priority, PrioritySummary};
use issue_bridge_core::version;

#[test]
fn version_is_non_empty() {
    let v = version();
    assert!(!v.is_empty());
}

#[test]
fn every_canonical_priority_parses_from_its_name() {
    for priority in Priority::ALL {
        assert_eq!(priority.as_str().parse::<Priority>().unwrap(), priority);
    }
}

#[test]
fn priority_parsing_is_case_sensitive() {
    assert!("high".parse::<Priority>().is_err());
    assert!("Normal".parse::<Priority>().is_err());
    let err = "CRITICAL".parse::<Priority>().unwrap_err();
    assert_eq!(err.0, "CRITICAL");
    assert!(err.to_string().contains("CRITICAL"));
}

#[test]
fn issue_serializes_with_canonical_priority_names() {
    let issue = Issue::new("f1:L10", "unused var", Priority::Low);
    let json = serde_json::to_value(&issue).unwrap();
    assert_eq!(json["context_hash"], "f1:L10");
    assert_eq!(json["message"], "unused var");
    assert_eq!(json["priority"], "LOW");
}

#[test]
fn priority_summary_counts_each_level() {
    let issues = vec![
        Issue::new("a", "a", Priority::High),
        Issue::new("b", "b", Priority::Low),
        Issue::new("c", "c", Priority::Low),
    ];
    let summary = PrioritySummary::from_issues(&issues);
    assert_eq!(summary, PrioritySummary { high: 1, normal: 0, low: 2 });
    assert_eq!(summary.total(), 3);
}

use issue_bridge_core::analysis::{AnalysisResult, Annotation, FileAnnotation};
use issue_bridge_core::model::{ContextHash, Priority};
use issue_bridge_core::services::mapper::{FileAnnotationMapper, IssueMapper, MappingError};

#[test]
fn mapping_copies_hash_and_message_verbatim() {
    let annotation = Annotation::new("f1:L10", "unused var", "LOW")
        .at("src/Main.java", 10, 10)
        .with_rule("Unused Code", "UnusedLocalVariable");
    let issue = FileAnnotationMapper.map(&annotation).expect("map");
    assert_eq!(issue.context_hash.as_str(), "f1:L10");
    assert_eq!(issue.message, "unused var");
    assert_eq!(issue.priority, Priority::Low);
}

#[test]
fn mapping_the_same_annotation_twice_yields_the_same_identity() {
    let annotation = Annotation::new("-1734516823", "Avoid empty catch blocks", "NORMAL");
    let first = FileAnnotationMapper.map(&annotation).unwrap();
    let second = FileAnnotationMapper.map(&annotation.clone()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.context_hash, second.context_hash);
}

#[test]
fn every_canonical_native_priority_maps() {
    for priority in Priority::ALL {
        let annotation = Annotation::new("h", "m", priority.as_str());
        assert_eq!(FileAnnotationMapper.map(&annotation).unwrap().priority, priority);
    }
}

#[test]
fn unknown_native_priority_fails_instead_of_defaulting() {
    let annotation = Annotation::new("f3:L1", "odd", "Medium");
    let err = FileAnnotationMapper.map(&annotation).unwrap_err();
    match &err {
        MappingError::UnknownPriority { context_hash, source } => {
            assert_eq!(context_hash, &ContextHash::from("f3:L1"));
            assert_eq!(source.0, "Medium");
        }
    }
    assert!(err.to_string().contains("f3:L1"));
}

struct CustomFinding {
    hash: ContextHash,
    text: String,
    severity: &'static str,
}

impl FileAnnotation for CustomFinding {
    fn context_hash(&self) -> &ContextHash {
        &self.hash
    }

    fn message(&self) -> &str {
        &self.text
    }

    fn priority_name(&self) -> &str {
        self.severity
    }
}

#[test]
fn mapper_accepts_any_file_annotation() {
    let finding = CustomFinding { hash: "x:1".into(), text: "custom".into(), severity: "HIGH" };
    let issue = FileAnnotationMapper.map(&finding).unwrap();
    assert_eq!(issue.priority, Priority::High);
    assert_eq!(issue.message, "custom");
}

#[test]
fn analysis_result_drops_exact_duplicates_and_keeps_order() {
    let a = Annotation::new("f2:L5", "null deref", "HIGH");
    let b = Annotation::new("f1:L10", "unused var", "LOW");
    let result = AnalysisResult::new(vec![a.clone(), b.clone(), a.clone()]);
    assert_eq!(result.len(), 2);
    assert_eq!(result.annotations(), &[a, b]);
}

#[test]
fn analysis_result_deserializes_without_annotations() {
    let result: AnalysisResult = serde_json::from_str("{}").unwrap();
    assert!(result.is_empty());
}

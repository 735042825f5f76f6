//! Tool-side analysis results.
//!
//! These types mirror what a static-analysis tool persists on an execution:
//! an `AnalysisResult` holding a set of `Annotation`s. The core only reads them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::ContextHash;

/// Read-only view of a tool finding, as consumed by issue mappers.
pub trait FileAnnotation {
    /// Hash of the annotation's surrounding context.
    fn context_hash(&self) -> &ContextHash;
    fn message(&self) -> &str;
    /// Tool-native priority name (e.g. `HIGH`).
    fn priority_name(&self) -> &str;
}

/// One raw finding emitted by an analysis tool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotation {
    pub context_hash: ContextHash,
    pub message: String,
    /// Native priority name; only canonical names can be mapped.
    pub priority: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_start: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_end: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "type")]
    pub annotation_type: Option<String>,
}

impl Annotation {
    pub fn new(
        context_hash: impl Into<ContextHash>,
        message: impl Into<String>,
        priority: impl Into<String>,
    ) -> Self {
        Self {
            context_hash: context_hash.into(),
            message: message.into(),
            priority: priority.into(),
            file_name: None,
            line_start: None,
            line_end: None,
            category: None,
            annotation_type: None,
        }
    }

    /// Builder-style helper to attach a source location.
    pub fn at(mut self, file_name: impl Into<String>, line_start: u32, line_end: u32) -> Self {
        self.file_name = Some(file_name.into());
        self.line_start = Some(line_start);
        self.line_end = Some(line_end);
        self
    }

    /// Builder-style helper to attach the rule category and type.
    pub fn with_rule(
        mut self,
        category: impl Into<String>,
        annotation_type: impl Into<String>,
    ) -> Self {
        self.category = Some(category.into());
        self.annotation_type = Some(annotation_type.into());
        self
    }
}

impl FileAnnotation for Annotation {
    fn context_hash(&self) -> &ContextHash {
        &self.context_hash
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn priority_name(&self) -> &str {
        &self.priority
    }
}

/// Annotation set persisted by a tool for one execution.
///
/// Annotations are unique by identity. Exact duplicates are dropped on
/// construction; the first occurrence keeps its position, so iteration order is
/// stable for a fixed input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawAnalysisResult", into = "RawAnalysisResult")]
pub struct AnalysisResult {
    annotations: Vec<Annotation>,
}

impl AnalysisResult {
    pub fn new(annotations: impl IntoIterator<Item = Annotation>) -> Self {
        let mut seen = HashSet::new();
        let annotations =
            annotations.into_iter().filter(|a| seen.insert(a.clone())).collect::<Vec<_>>();
        Self { annotations }
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}

impl FromIterator<Annotation> for AnalysisResult {
    fn from_iter<I: IntoIterator<Item = Annotation>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[derive(Serialize, Deserialize)]
struct RawAnalysisResult {
    #[serde(default)]
    annotations: Vec<Annotation>,
}

impl From<RawAnalysisResult> for AnalysisResult {
    fn from(raw: RawAnalysisResult) -> Self {
        Self::new(raw.annotations)
    }
}

impl From<AnalysisResult> for RawAnalysisResult {
    fn from(result: AnalysisResult) -> Self {
        Self { annotations: result.annotations }
    }
}

//! Canonical issue model shared by every tool adapter.
//!
//! Dashboards only ever see these types: an `Issue` carries the cross-run
//! identity hash, the message and a normalized `Priority`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Normalized severity shared across all tool adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Normal,
    Low,
}

impl Priority {
    /// Every canonical priority, most severe first.
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Normal, Priority::Low];

    /// Canonical name, as tools are expected to emit it.
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Normal => "NORMAL",
            Priority::Low => "LOW",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A native priority name that has no canonical counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown priority '{0}'; expected one of HIGH, NORMAL, LOW")]
pub struct PriorityParseError(pub String);

impl FromStr for Priority {
    type Err = PriorityParseError;

    /// Exact, case-sensitive lookup by canonical name.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str() == name)
            .ok_or_else(|| PriorityParseError(name.to_string()))
    }
}

/// Context hash of an annotation; stable across re-runs of the same code position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextHash(String);

impl ContextHash {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContextHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContextHash {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ContextHash {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Canonical, tool-agnostic finding consumed by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Issue {
    /// Cross-run identity; the dashboard tracks an issue's lifetime by this key.
    pub context_hash: ContextHash,
    pub message: String,
    pub priority: Priority,
}

impl Issue {
    pub fn new(
        context_hash: impl Into<ContextHash>,
        message: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self { context_hash: context_hash.into(), message: message.into(), priority }
    }
}

/// Per-priority counts for a list of issues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrioritySummary {
    pub high: usize,
    pub normal: usize,
    pub low: usize,
}

impl PrioritySummary {
    pub fn from_issues<'a>(issues: impl IntoIterator<Item = &'a Issue>) -> Self {
        let mut summary = Self::default();
        for issue in issues {
            match issue.priority {
                Priority::High => summary.high += 1,
                Priority::Normal => summary.normal += 1,
                Priority::Low => summary.low += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.high + self.normal + self.low
    }
}

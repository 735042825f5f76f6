//! Serializable snapshots of persisted executions.
//!
//! Hosts hand the CLI (and tests) a JSON or YAML description of an execution
//! chain; these types turn it back into `Build` or `Run` values.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Action, Build, Execution, ExecutionId, Generation, OpaqueAction, Run};
use crate::analysis::AnalysisResult;
use crate::services::tools::pmd::PmdResultAction;

#[derive(Debug, Error)]
pub enum SnapshotError {
    /// A chain of executions must come from one host generation.
    #[error("Execution {id} is a {found} but its chain is made of {expected} executions")]
    MixedGenerations { id: ExecutionId, expected: Generation, found: Generation },

    /// `previous` must point at an earlier execution of the same job.
    #[error("Previous execution {previous} belongs to another job than {current}")]
    JobMismatch { current: ExecutionId, previous: ExecutionId },

    #[error("Previous execution {previous} is not older than {current}")]
    OutOfOrder { current: ExecutionId, previous: ExecutionId },
}

/// One attached action as persisted by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionSnapshot {
    /// PMD analysis result.
    Pmd { result: AnalysisResult },
    /// Any other tool's action; carried so lookups see a realistic action list.
    Opaque {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url_name: Option<String>,
    },
}

impl ActionSnapshot {
    pub fn into_action(self) -> Box<dyn Action> {
        match self {
            ActionSnapshot::Pmd { result } => Box::new(PmdResultAction::new(result)),
            ActionSnapshot::Opaque { name, url_name } => Box::new(OpaqueAction { name, url_name }),
        }
    }
}

/// A persisted execution and, optionally, the chain of executions before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSnapshot {
    pub job: String,
    pub number: u64,
    pub generation: Generation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub actions: Vec<ActionSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<Box<ExecutionSnapshot>>,
}

impl ExecutionSnapshot {
    pub fn id(&self) -> ExecutionId {
        ExecutionId::new(&self.job, self.number)
    }

    /// Build the execution chain this snapshot describes.
    pub fn into_execution(self) -> Result<Box<dyn Execution>, SnapshotError> {
        match self.generation {
            Generation::Build => Ok(Box::new(self.into_build()?)),
            Generation::Run => Ok(Box::new(self.into_run()?)),
        }
    }

    pub fn into_build(self) -> Result<Build, SnapshotError> {
        self.check_chain(Generation::Build)?;
        let mut build = Build::new(self.job, self.number);
        if let Some(started_at) = self.started_at {
            build = build.with_started_at(started_at);
        }
        if let Some(previous) = self.previous {
            build = build.with_previous(Arc::new(previous.into_build()?));
        }
        for action in self.actions {
            build.add_action(action.into_action());
        }
        Ok(build)
    }

    pub fn into_run(self) -> Result<Run, SnapshotError> {
        self.check_chain(Generation::Run)?;
        let mut run = Run::new(self.job, self.number);
        if let Some(started_at) = self.started_at {
            run = run.with_started_at(started_at);
        }
        if let Some(previous) = self.previous {
            run = run.with_previous(Arc::new(previous.into_run()?));
        }
        for action in self.actions {
            run.add_action(action.into_action());
        }
        Ok(run)
    }

    fn check_chain(&self, expected: Generation) -> Result<(), SnapshotError> {
        if self.generation != expected {
            return Err(SnapshotError::MixedGenerations {
                id: self.id(),
                expected,
                found: self.generation,
            });
        }
        if let Some(previous) = &self.previous {
            if previous.job != self.job {
                return Err(SnapshotError::JobMismatch {
                    current: self.id(),
                    previous: previous.id(),
                });
            }
            if previous.number >= self.number {
                return Err(SnapshotError::OutOfOrder {
                    current: self.id(),
                    previous: previous.id(),
                });
            }
        }
        Ok(())
    }
}

/// Load an execution snapshot from a JSON or YAML (`.yaml`/`.yml`) file.
pub fn load_execution_snapshot(path: &Path) -> Result<ExecutionSnapshot> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read execution snapshot at {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );
    let snapshot = if is_yaml {
        serde_yaml::from_slice(&bytes).context("Failed to parse execution snapshot YAML")?
    } else {
        serde_json::from_slice(&bytes).context("Failed to parse execution snapshot JSON")?
    };
    Ok(snapshot)
}

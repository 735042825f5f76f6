//! Host-side execution model.
//!
//! The host records executions of a job and attaches typed actions to them.
//! Two generations of that model coexist:
//! - `Build`: legacy executions exposing only an ordered, unfiltered action list.
//! - `Run`: current executions storing actions keyed by type, with a typed accessor.
//!
//! Both implement [`Execution`], which is the only thing issue providers see.

use std::any::{Any, TypeId};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod build;
mod run;
pub mod snapshot;

pub use build::Build;
pub use run::Run;
pub use snapshot::{load_execution_snapshot, ActionSnapshot, ExecutionSnapshot, SnapshotError};

/// Typed data attached to an execution by a tool.
pub trait Action: Any + Send + Sync + fmt::Debug {
    /// URL fragment of the action's page, if it has one.
    fn url_name(&self) -> Option<&str> {
        None
    }

    fn as_any(&self) -> &dyn Any;
}

/// Runtime type of the concrete action behind a trait object.
pub fn action_type_id(action: &dyn Action) -> TypeId {
    Any::type_id(action.as_any())
}

/// First action whose runtime type is `kind` in an ordered action list.
///
/// The list is heterogeneous; only a runtime type check can filter it.
pub fn find_first_of(actions: &[Box<dyn Action>], kind: TypeId) -> Option<&dyn Action> {
    actions.iter().map(|action| action.as_ref()).find(|action| action_type_id(*action) == kind)
}

/// Typed form of [`find_first_of`].
pub fn find_first<A: Action>(actions: &[Box<dyn Action>]) -> Option<&A> {
    find_first_of(actions, TypeId::of::<A>())?.as_any().downcast_ref::<A>()
}

/// Which generation of the host API recorded an execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Generation {
    Build,
    Run,
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generation::Build => f.write_str("build"),
            Generation::Run => f.write_str("run"),
        }
    }
}

/// Identity of one execution: job name plus sequence number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExecutionId {
    pub job: String,
    pub number: u64,
}

impl ExecutionId {
    pub fn new(job: impl Into<String>, number: u64) -> Self {
        Self { job: job.into(), number }
    }
}

impl fmt::Display for ExecutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.job, self.number)
    }
}

/// One recorded execution of a host job, as seen by issue providers.
///
/// Implementations are fully persisted before providers are called; all
/// accessors are read-only.
pub trait Execution: Send + Sync {
    fn id(&self) -> &ExecutionId;

    fn generation(&self) -> Generation;

    fn started_at(&self) -> Option<DateTime<Utc>>;

    /// Attached action whose concrete type is `kind`, if any.
    fn find_action(&self, kind: TypeId) -> Option<&dyn Action>;

    /// Previous execution of the same job, if the host kept it.
    fn previous(&self) -> Option<&dyn Execution>;
}

/// Placeholder for actions attached by other tools or the host itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueAction {
    pub name: String,
    pub url_name: Option<String>,
}

impl OpaqueAction {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), url_name: None }
    }
}

impl Action for OpaqueAction {
    fn url_name(&self) -> Option<&str> {
        self.url_name.as_deref()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

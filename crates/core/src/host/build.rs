use std::any::TypeId;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{find_first_of, Action, Execution, ExecutionId, Generation};

/// Legacy execution: actions live in one ordered, unfiltered list.
#[derive(Debug)]
pub struct Build {
    id: ExecutionId,
    started_at: Option<DateTime<Utc>>,
    actions: Vec<Box<dyn Action>>,
    previous: Option<Arc<Build>>,
}

impl Build {
    pub fn new(job: impl Into<String>, number: u64) -> Self {
        Self {
            id: ExecutionId::new(job, number),
            started_at: None,
            actions: Vec::new(),
            previous: None,
        }
    }

    pub fn with_started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = Some(started_at);
        self
    }

    pub fn with_previous(mut self, previous: Arc<Build>) -> Self {
        self.previous = Some(previous);
        self
    }

    /// Builder-style helper appending one action.
    pub fn with_action<A: Action>(mut self, action: A) -> Self {
        self.add_action(Box::new(action));
        self
    }

    /// Append an action; several actions of the same type are kept in order.
    pub fn add_action(&mut self, action: Box<dyn Action>) {
        self.actions.push(action);
    }

    /// All attached actions in the order they were recorded.
    pub fn persistent_actions(&self) -> &[Box<dyn Action>] {
        &self.actions
    }
}

impl Execution for Build {
    fn id(&self) -> &ExecutionId {
        &self.id
    }

    fn generation(&self) -> Generation {
        Generation::Build
    }

    fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    fn find_action(&self, kind: TypeId) -> Option<&dyn Action> {
        find_first_of(&self.actions, kind)
    }

    fn previous(&self) -> Option<&dyn Execution> {
        self.previous.as_deref().map(|build| build as &dyn Execution)
    }
}

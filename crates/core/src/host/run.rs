use std::any::TypeId;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{action_type_id, Action, Execution, ExecutionId, Generation};

/// Current-generation execution: actions are stored keyed by their type.
#[derive(Debug)]
pub struct Run {
    id: ExecutionId,
    started_at: Option<DateTime<Utc>>,
    actions: HashMap<TypeId, Box<dyn Action>>,
    previous: Option<Arc<Run>>,
}

impl Run {
    pub fn new(job: impl Into<String>, number: u64) -> Self {
        Self {
            id: ExecutionId::new(job, number),
            started_at: None,
            actions: HashMap::new(),
            previous: None,
        }
    }

    pub fn with_started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = Some(started_at);
        self
    }

    pub fn with_previous(mut self, previous: Arc<Run>) -> Self {
        self.previous = Some(previous);
        self
    }

    /// Builder-style helper attaching one action.
    pub fn with_action<A: Action>(mut self, action: A) -> Self {
        self.add_action(Box::new(action));
        self
    }

    /// Attach an action. At most one action per type is kept; the first one wins,
    /// matching what a front-to-back scan of a legacy build would return.
    ///
    /// Returns `false` when an action of the same type was already attached.
    pub fn add_action(&mut self, action: Box<dyn Action>) -> bool {
        match self.actions.entry(action_type_id(action.as_ref())) {
            Entry::Vacant(slot) => {
                slot.insert(action);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Typed accessor for the action of type `A`.
    pub fn action<A: Action>(&self) -> Option<&A> {
        self.actions.get(&TypeId::of::<A>())?.as_any().downcast_ref::<A>()
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }
}

impl Execution for Run {
    fn id(&self) -> &ExecutionId {
        &self.id
    }

    fn generation(&self) -> Generation {
        Generation::Run
    }

    fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    fn find_action(&self, kind: TypeId) -> Option<&dyn Action> {
        self.actions.get(&kind).map(|action| action.as_ref())
    }

    fn previous(&self) -> Option<&dyn Execution> {
        self.previous.as_deref().map(|run| run as &dyn Execution)
    }
}

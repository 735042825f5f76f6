use std::any::TypeId;
use std::fmt;
use std::marker::PhantomData;

use crate::analysis::AnalysisResult;
use crate::host::{Action, Execution};

/// An action that wraps one tool's analysis result.
///
/// The concrete type identifies the tool: an execution carries at most one
/// result action of each type.
pub trait ResultAction: Action {
    fn result(&self) -> &AnalysisResult;
}

/// Finds the result of tool action `A` attached to an execution.
///
/// Works for both host generations: the lookup itself is delegated to
/// [`Execution::find_action`], which scans legacy builds and does a keyed lookup
/// on current runs.
pub struct ResultLocator<A> {
    _action: PhantomData<fn() -> A>,
}

impl<A: ResultAction> ResultLocator<A> {
    pub const fn new() -> Self {
        Self { _action: PhantomData }
    }

    /// The tool's result on `execution`, or `None` when the tool did not run there.
    pub fn locate<'e>(&self, execution: &'e dyn Execution) -> Option<&'e AnalysisResult> {
        let action = execution.find_action(TypeId::of::<A>())?;
        action.as_any().downcast_ref::<A>().map(|action| action.result())
    }
}

impl<A: ResultAction> Default for ResultLocator<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for ResultLocator<A> {
    fn clone(&self) -> Self {
        Self { _action: PhantomData }
    }
}

impl<A> fmt::Debug for ResultLocator<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultLocator").field("action", &std::any::type_name::<A>()).finish()
    }
}

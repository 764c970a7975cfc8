//! Task interception
//!
//! Every declared task of a workflow routes its body through [`intercept`],
//! which runs the body directly while the workflow is unbound and otherwise
//! synchronizes it with the owning actor:
//!
//! 1. acquire the actor's busy token
//! 2. log the task initiation
//! 3. incur the task's default cost, if nonzero
//! 4. wait for the actor's turn
//! 5. run the body
//! 6. log the task completion
//! 7. release the busy token
//!
//! Steps 6 and 7 also run when the body panics.
//!
//! [`install`] validates a workflow type's declared task table. The registrar
//! calls it once per type.

use serde_json::Value;
use tracing::{Level, event};

use crate::{
    domain::{
        constant::interceptor,
        error::WorkflowError,
        task::TaskDef,
        workflow::{Workflow, WorkflowKind, WorkflowRef}
    },
    port::actor::Actor
};

/// Synchronized task table of an instrumented workflow type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledTasks {
    pub kind:  &'static str,
    pub tasks: Vec<TaskDef>
}

impl InstalledTasks {
    pub fn get(&self, name: &str) -> Option<&TaskDef> {
        self.tasks.iter().find(|task| task.name() == name)
    }
}

/// Build the synchronized task table for a workflow type.
///
/// Lifecycle tasks are left out of the table. Two tasks sharing a name make
/// the type unusable, since the actor's task log identifies tasks by name.
pub fn install(kind: &WorkflowKind) -> Result<InstalledTasks, WorkflowError> {
    let mut tasks: Vec<TaskDef> = Vec::with_capacity(kind.tasks().len());

    for task in kind.tasks() {
        if task.is_lifecycle() {
            event!(Level::DEBUG, event = interceptor::LIFECYCLE_TASK_SKIPPED,
                   kind = %kind.short_name(), task = %task.name());
            continue;
        }

        if task.name().is_empty() {
            return Err(WorkflowError::Instrumentation {
                kind:   kind.name().to_string(),
                reason: "task declared with an empty name".to_string()
            });
        }

        if tasks.iter().any(|installed| installed.name() == task.name()) {
            return Err(WorkflowError::Instrumentation {
                kind:   kind.name().to_string(),
                reason: format!("task '{}' declared more than once", task.name())
            });
        }

        tasks.push(*task);
    }

    Ok(InstalledTasks { kind: kind.short_name(), tasks })
}

/// Run `body` as an invocation of `task` on `workflow`.
///
/// The result of `body` is returned unchanged. `args` is only passed to the
/// actor's task log.
pub fn intercept<W, R, F>(workflow: &W, task: &TaskDef, args: Value, body: F) -> R
where
    W: Workflow + ?Sized,
    F: FnOnce() -> R
{
    if task.is_lifecycle() {
        return body();
    }

    let Some(actor) = workflow.binding().owner() else {
        event!(Level::TRACE, event = interceptor::UNBOUND_TASK_CALLED,
               kind = %workflow.kind().short_name(), task = %task.name());
        return body();
    };

    debug_assert!(
        workflow.kind().tasks().contains(task),
        "task '{}' is not declared by workflow type {}",
        task.name(),
        workflow.kind().name()
    );

    let target = WorkflowRef::of(workflow);
    let mut invocation = TaskGuard::acquire(actor.as_ref(), task);

    actor.log_task_initiation(&target, task.name(), &args);
    invocation.initiated = true;

    if task.default_cost() > 0 {
        actor.incur_delay(task.default_cost());
    }

    actor.wait_for_turn();

    event!(Level::TRACE, event = interceptor::TASK_STARTED,
           actor = %actor.name(), workflow = %target, task = %task.name());

    let result = body();

    event!(Level::TRACE, event = interceptor::TASK_FINISHED,
           actor = %actor.name(), workflow = %target, task = %task.name());

    drop(invocation);
    result
}

/// Holds an actor's busy token for the duration of one task invocation.
///
/// Dropping the guard logs the completion of an initiated task, then releases
/// the token. Both happen during unwinding too.
struct TaskGuard<'a> {
    actor:     &'a dyn Actor,
    task:      &'a TaskDef,
    initiated: bool
}

impl<'a> TaskGuard<'a> {
    fn acquire(actor: &'a dyn Actor, task: &'a TaskDef) -> Self {
        actor.acquire_busy();
        Self { actor, task, initiated: false }
    }
}

impl Drop for TaskGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            event!(Level::WARN, event = interceptor::TASK_PANICKED,
                   actor = %self.actor.name(), task = %self.task.name());
        }
        if self.initiated {
            self.actor.log_task_completion();
        }
        self.actor.release_busy();
    }
}

use serde_json::Value;

use crate::domain::workflow::WorkflowRef;

/// Capabilities an owning actor exposes to the task interceptor.
///
/// The actor's scheduler lives outside this crate; the interceptor only drives
/// it through these calls. For every bound task invocation the interceptor
/// calls, in order: `acquire_busy`, `log_task_initiation`, `incur_delay` (only
/// for tasks with a nonzero cost), `wait_for_turn`, then the task body, then
/// `log_task_completion` and `release_busy`.
///
/// All methods may block the calling thread.
pub trait Actor: Send + Sync {
    /// Name used in log fields.
    fn name(&self) -> &str;

    /// Take the actor's busy token. Task bodies may call further tasks of the
    /// same actor, so the token must be reentrant for the thread holding it.
    fn acquire_busy(&self);

    /// Give back one level of the busy token.
    fn release_busy(&self);

    /// Block until the arbiter grants this actor its turn.
    fn wait_for_turn(&self);

    /// Account `cost` simulated time units before the pending task executes.
    fn incur_delay(&self, cost: u64);

    /// Record the start of a task invocation.
    fn log_task_initiation(&self, workflow: &WorkflowRef, task: &str, args: &Value);

    /// Record the end of the most recently initiated task invocation.
    fn log_task_completion(&self);
}

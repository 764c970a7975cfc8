//! Task declarations
//!
//! A task is a method of a workflow that represents one simulated action. Each
//! task is declared once per workflow type as a [`TaskDef`], which carries the
//! stable task name used in task logs and the default simulated cost the
//! interceptor charges to the owning actor before the task body runs.

use std::fmt::Display;

use serde::Serialize;

/// Prefix marking lifecycle tasks, which are never synchronized with an actor.
pub const LIFECYCLE_PREFIX: &str = "__";

/// Static declaration of a workflow task and its default cost.
///
/// ```
/// use workflow::domain::task::TaskDef;
///
/// const IDLE: TaskDef = TaskDef::new("idle").cost(1);
/// const REPORT: TaskDef = TaskDef::new("report");
///
/// assert_eq!(IDLE.default_cost(), 1);
/// assert_eq!(REPORT.default_cost(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TaskDef {
    name: &'static str,
    cost: u64
}

impl TaskDef {
    /// Declare a task with no cost.
    pub const fn new(name: &'static str) -> Self {
        Self { name, cost: 0 }
    }

    /// Attach a default cost, in simulated time units.
    pub const fn cost(self, cost: u64) -> Self {
        Self { name: self.name, cost }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn default_cost(&self) -> u64 {
        self.cost
    }

    /// Lifecycle tasks bypass the synchronized path even on bound workflows.
    pub fn is_lifecycle(&self) -> bool {
        self.name.starts_with(LIFECYCLE_PREFIX)
    }
}

impl Display for TaskDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

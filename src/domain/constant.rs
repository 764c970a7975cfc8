//! Domain Events - Structured events for internal monitoring and debugging

/// WorkflowRegistrar Events
pub mod registrar {
    pub const WORKFLOW_BOUND: &str = "workflow.bound";
    pub const WORKFLOW_ALREADY_OWNED: &str = "workflow.already_owned";
    pub const TYPE_INSTRUMENTED: &str = "type.instrumented";
    pub const TYPE_INSTRUMENTATION_FAILED: &str = "type.instrumentation_failed";
    pub const ALLOCATION_COMPLETED: &str = "allocation.completed";
}

/// TaskInterceptor Events
pub mod interceptor {
    pub const LIFECYCLE_TASK_SKIPPED: &str = "task.lifecycle_skipped";
    pub const UNBOUND_TASK_CALLED: &str = "task.unbound_call";
    pub const TASK_STARTED: &str = "task.started";
    pub const TASK_FINISHED: &str = "task.finished";
    pub const TASK_PANICKED: &str = "task.panicked";
}

/// SimActor Events
pub mod sim_actor {
    pub const DELAY_INCURRED: &str = "delay.incurred";
    pub const TURN_WAITING: &str = "turn.waiting";
    pub const TURN_GRANTED: &str = "turn.granted";
    pub const TASK_INITIATED: &str = "task.initiated";
    pub const TASK_COMPLETED: &str = "task.completed";
    pub const UNBALANCED_RELEASE: &str = "busy.unbalanced_release";
    pub const UNBALANCED_COMPLETION: &str = "log.unbalanced_completion";
}

/// TurnDriver Actor Events
pub mod turn_driver {
    pub const DRIVER_STARTED: &str = "driver.started";
    pub const TICK_ADVANCED: &str = "tick.advanced";
    pub const TICK_LIMIT_REACHED: &str = "tick.limit_reached";
    pub const REPLY_FAILED: &str = "driver.reply_failed";
    pub const DRIVER_STOPPED: &str = "driver.stopped";
}

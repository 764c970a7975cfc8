//! Test fixtures

use parking_lot::Mutex;
use serde_json::Value;

use crate::{
    domain::workflow::{WorkflowId, WorkflowRef},
    port::actor::Actor
};

/// One capability call observed by [`RecordingActor`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    AcquireBusy,
    ReleaseBusy,
    WaitForTurn,
    IncurDelay(u64),
    LogInitiation { workflow: WorkflowId, task: String, args: Value },
    LogCompletion
}

/// Actor that grants every turn immediately and records each call in order.
pub struct RecordingActor {
    name:  String,
    calls: Mutex<Vec<Call>>,
    depth: Mutex<usize>
}

impl RecordingActor {
    pub fn named(name: &str) -> Self {
        Self { name: name.to_string(), calls: Mutex::new(Vec::new()), depth: Mutex::new(0) }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn busy_depth(&self) -> usize {
        *self.depth.lock()
    }

    pub fn total_delay(&self) -> u64 {
        self.calls
            .lock()
            .iter()
            .map(|call| match call {
                Call::IncurDelay(cost) => *cost,
                _ => 0
            })
            .sum()
    }

    /// Names of the initiated tasks, in order.
    pub fn tasks(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                Call::LogInitiation { task, .. } => Some(task.clone()),
                _ => None
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }
}

impl Actor for RecordingActor {
    fn name(&self) -> &str {
        &self.name
    }

    fn acquire_busy(&self) {
        *self.depth.lock() += 1;
        self.record(Call::AcquireBusy);
    }

    fn release_busy(&self) {
        let mut depth = self.depth.lock();
        *depth = depth.saturating_sub(1);
        drop(depth);
        self.record(Call::ReleaseBusy);
    }

    fn wait_for_turn(&self) {
        self.record(Call::WaitForTurn);
    }

    fn incur_delay(&self, cost: u64) {
        self.record(Call::IncurDelay(cost));
    }

    fn log_task_initiation(&self, workflow: &WorkflowRef, task: &str, args: &Value) {
        self.record(Call::LogInitiation { workflow: workflow.id, task: task.to_string(), args: args.clone() });
    }

    fn log_task_completion(&self) {
        self.record(Call::LogCompletion);
    }
}

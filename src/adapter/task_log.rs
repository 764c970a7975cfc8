//! In-memory task log
//!
//! Each actor keeps one log. Task invocations nest, since a task body may call
//! further tasks of the same actor, so open entries are tracked on a stack and
//! every completion closes the innermost one.

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use serde_json::Value;
use tabled::Tabled;

use crate::domain::workflow::{WorkflowId, WorkflowRef};

/// One logged task invocation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TaskRecord {
    pub workflow:      WorkflowId,
    pub kind:          String,
    pub task:          String,
    pub args:          Value,
    /// Nesting level; top-level invocations are 0.
    pub depth:         usize,
    pub started_tick:  u64,
    pub finished_tick: Option<u64>,
    pub recorded_at:   DateTime<Utc>
}

/// Table row used when printing a log.
#[derive(Debug, Clone, Tabled)]
pub struct TaskRow {
    #[tabled(rename = "Workflow")]
    pub workflow: String,
    #[tabled(rename = "Task")]
    pub task:     String,
    #[tabled(rename = "Args")]
    pub args:     String,
    #[tabled(rename = "Start")]
    pub start:    u64,
    #[tabled(rename = "Finish")]
    pub finish:   String
}

impl From<&TaskRecord> for TaskRow {
    fn from(record: &TaskRecord) -> Self {
        Self {
            workflow: record.kind.clone(),
            task:     format!("{}{}", "  ".repeat(record.depth), record.task),
            args:     record.args.to_string(),
            start:    record.started_tick,
            finish:   record.finished_tick.map(|tick| tick.to_string()).unwrap_or_else(|| "-".to_string())
        }
    }
}

/// Ordered record of the task invocations an actor has run.
#[derive(Debug, Default)]
pub struct TaskLog {
    records: RwLock<Vec<TaskRecord>>,
    /// Open invocations, innermost last. `None` marks an invocation from a
    /// workflow with logging disabled.
    open:    Mutex<Vec<Option<usize>>>
}

impl TaskLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an entry for an invocation starting at `tick`.
    pub fn begin(&self, workflow: &WorkflowRef, task: &str, args: &Value, tick: u64) {
        let mut open = self.open.lock();

        if !workflow.logging {
            open.push(None);
            return;
        }

        let mut records = self.records.write();
        records.push(TaskRecord {
            workflow:      workflow.id,
            kind:          workflow.kind.to_string(),
            task:          task.to_string(),
            args:          args.clone(),
            depth:         open.len(),
            started_tick:  tick,
            finished_tick: None,
            recorded_at:   Utc::now()
        });
        open.push(Some(records.len() - 1));
    }

    /// Close the innermost open entry at `tick`. Returns `false` when nothing
    /// was open.
    pub fn finish(&self, tick: u64) -> bool {
        match self.open.lock().pop() {
            Some(Some(index)) => {
                if let Some(record) = self.records.write().get_mut(index) {
                    record.finished_tick = Some(tick);
                }
                true
            }
            Some(None) => true,
            None => false
        }
    }

    pub fn records(&self) -> Vec<TaskRecord> {
        self.records.read().clone()
    }

    /// Number of invocations still running.
    pub fn open_count(&self) -> usize {
        self.open.lock().len()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    pub fn rows(&self) -> Vec<TaskRow> {
        self.records.read().iter().map(TaskRow::from).collect()
    }
}

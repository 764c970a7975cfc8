//! A workflow that lets an actor waste turns.

use std::{
    any,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering}
    }
};

use serde_json::json;

use crate::{
    domain::{
        task::TaskDef,
        workflow::{Binding, Workflow, WorkflowKind}
    },
    workflow::interceptor::intercept
};

/// Handle polled by [`Idling::idle_until`].
pub trait Completion {
    fn completed(&self) -> bool;
}

impl Completion for AtomicBool {
    fn completed(&self) -> bool {
        self.load(Ordering::Acquire)
    }
}

impl<T: Completion + ?Sized> Completion for Arc<T> {
    fn completed(&self) -> bool {
        (**self).completed()
    }
}

/// Completion flag shared between a waiting workflow and whoever finishes the
/// awaited work.
#[derive(Debug, Default)]
pub struct CompletionFlag(AtomicBool);

impl CompletionFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn complete(&self) {
        self.0.store(true, Ordering::Release);
    }
}

impl Completion for CompletionFlag {
    fn completed(&self) -> bool {
        self.0.completed()
    }
}

/// Reference workflow whose tasks do nothing but consume simulated time.
#[derive(Debug, Default)]
pub struct Idling {
    binding: Binding
}

impl Idling {
    pub const IDLE: TaskDef = TaskDef::new("idle").cost(1);
    pub const IDLE_FOR: TaskDef = TaskDef::new("idle_for").cost(0);
    pub const IDLE_UNTIL: TaskDef = TaskDef::new("idle_until").cost(0);

    const TASKS: &'static [TaskDef] = &[Self::IDLE, Self::IDLE_FOR, Self::IDLE_UNTIL];

    pub fn new() -> Self {
        Self::default()
    }

    /// Waste a single turn.
    pub fn idle(&self) {
        intercept(self, &Self::IDLE, json!([]), || ())
    }

    /// Idle `duration` times.
    pub fn idle_for(&self, duration: u64) {
        intercept(self, &Self::IDLE_FOR, json!([duration]), || {
            for _ in 0..duration {
                self.idle();
            }
        })
    }

    /// Idle once per poll until `handle` reports completion.
    ///
    /// The handle is logged by type; polling it for the log would consume a
    /// check.
    pub fn idle_until<C: Completion + ?Sized>(&self, handle: &C) {
        intercept(self, &Self::IDLE_UNTIL, json!([any::type_name::<C>()]), || {
            while !handle.completed() {
                self.idle();
            }
        })
    }
}

impl Workflow for Idling {
    fn binding(&self) -> &Binding {
        &self.binding
    }

    fn kind(&self) -> WorkflowKind {
        WorkflowKind::of::<Self>(Self::TASKS)
    }
}

//! Reference actor for in-process simulations
//!
//! `SimActor` implements the actor capability on top of a shared [`Clock`]:
//! - the busy token is reentrant for the thread holding it, so task bodies can
//!   call further tasks of the same actor
//! - incurred delay pushes the actor's next turn forward in clock ticks
//! - a turn is granted once the clock reaches the actor's next turn
//! - initiations and completions go to an in-memory [`TaskLog`]

use std::{
    sync::Arc,
    thread::{self, ThreadId}
};

use parking_lot::{Condvar, Mutex};
use serde_json::Value;
use tracing::{Level, event};

use crate::{
    adapter::{clock::Clock, task_log::TaskLog},
    domain::{constant::sim_actor, workflow::WorkflowRef},
    port::actor::Actor
};

#[derive(Debug, Default)]
struct BusyState {
    holder:  Option<ThreadId>,
    depth:   usize,
    /// Next ticket handed to an arriving thread
    issued:  u64,
    /// Ticket allowed to take the token once it is free
    serving: u64
}

/// Mutual exclusion token that the holding thread may take repeatedly.
///
/// Other threads are served in arrival order.
#[derive(Debug, Default)]
pub struct BusyToken {
    state:    Mutex<BusyState>,
    released: Condvar
}

impl BusyToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self) {
        let me = thread::current().id();
        let mut state = self.state.lock();

        if state.holder == Some(me) {
            state.depth += 1;
            return;
        }

        let ticket = state.issued;
        state.issued += 1;
        while state.holder.is_some() || state.serving != ticket {
            self.released.wait(&mut state);
        }

        state.serving += 1;
        state.holder = Some(me);
        state.depth = 1;
    }

    /// Release one level. Returns `false` if the calling thread does not hold
    /// the token.
    pub fn release(&self) -> bool {
        let me = thread::current().id();
        let mut state = self.state.lock();
        if state.holder != Some(me) || state.depth == 0 {
            return false;
        }
        state.depth -= 1;
        if state.depth == 0 {
            state.holder = None;
            self.released.notify_all();
        }
        true
    }

    /// Threads blocked waiting for the token.
    pub fn waiting(&self) -> u64 {
        let state = self.state.lock();
        state.issued - state.serving
    }

    pub fn is_held(&self) -> bool {
        self.state.lock().holder.is_some()
    }
}

/// In-process actor driven by a shared [`Clock`].
#[derive(Debug)]
pub struct SimActor {
    name:      String,
    clock:     Arc<Clock>,
    busy:      BusyToken,
    next_turn: Mutex<u64>,
    log:       TaskLog
}

impl SimActor {
    pub fn new(name: impl Into<String>, clock: Arc<Clock>) -> Self {
        let next_turn = clock.tick();
        Self { name: name.into(), clock, busy: BusyToken::new(), next_turn: Mutex::new(next_turn), log: TaskLog::new() }
    }

    pub fn clock(&self) -> &Arc<Clock> {
        &self.clock
    }

    /// Tick at which the actor's pending task may run.
    pub fn next_turn(&self) -> u64 {
        *self.next_turn.lock()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_held()
    }

    pub fn task_log(&self) -> &TaskLog {
        &self.log
    }
}

impl Actor for SimActor {
    fn name(&self) -> &str {
        &self.name
    }

    fn acquire_busy(&self) {
        self.busy.acquire();
    }

    fn release_busy(&self) {
        if !self.busy.release() {
            event!(Level::WARN, event = sim_actor::UNBALANCED_RELEASE, actor = %self.name);
        }
    }

    fn wait_for_turn(&self) {
        let target = self.next_turn();
        let now = self.clock.tick();

        if now < target {
            event!(Level::TRACE, event = sim_actor::TURN_WAITING, actor = %self.name, tick = %now, turn = %target);
            self.clock.wait_until(target);
        }

        event!(Level::TRACE, event = sim_actor::TURN_GRANTED, actor = %self.name, turn = %target);
    }

    fn incur_delay(&self, cost: u64) {
        let now = self.clock.tick();
        let mut next_turn = self.next_turn.lock();
        *next_turn = (*next_turn).max(now) + cost;

        event!(Level::TRACE, event = sim_actor::DELAY_INCURRED,
               actor = %self.name, cost = %cost, turn = %*next_turn);
    }

    fn log_task_initiation(&self, workflow: &WorkflowRef, task: &str, args: &Value) {
        if workflow.logging {
            event!(Level::DEBUG, event = sim_actor::TASK_INITIATED,
                   actor = %self.name, workflow = %workflow, task = %task, args = %args);
        }
        self.log.begin(workflow, task, args, self.clock.tick());
    }

    fn log_task_completion(&self) {
        if !self.log.finish(self.clock.tick()) {
            event!(Level::WARN, event = sim_actor::UNBALANCED_COMPLETION, actor = %self.name);
            return;
        }
        event!(Level::TRACE, event = sim_actor::TASK_COMPLETED, actor = %self.name);
    }
}

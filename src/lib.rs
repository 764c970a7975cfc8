//! # Workflow Synchronization
//!
//! Turn-gated, cost-accounted workflow tasks for actor-based discrete-event
//! simulation.
//!
//! This crate provides functionality to:
//! - Declare workflow tasks with a simulated cost ([`TaskDef`])
//! - Allocate a workflow graph, nested members included, to a single actor ([`WorkflowRegistrar`])
//! - Synchronize every task call with its owning actor: busy token, task log, delay, turn ([`intercept`])
//! - Run in-process simulations with a reference actor, a shared clock and a ractor turn driver
//!
//! ```
//! use std::sync::Arc;
//!
//! use workflow::{Clock, Idling, SimActor, WorkflowRegistrar};
//!
//! let clock = Arc::new(Clock::new());
//! let actor = Arc::new(SimActor::new("alice", clock.clone()));
//! let idling = Idling::new();
//!
//! WorkflowRegistrar::new().allocate(actor.clone(), &idling).unwrap();
//!
//! // Zero-cost tasks run on the current tick.
//! idling.idle_for(0);
//! assert_eq!(actor.task_log().len(), 1);
//! ```

// Public API modules
pub mod actor;
pub mod adapter;
pub mod cli;
pub mod config;
pub mod domain;
pub mod port;
pub mod workflow;

// Re-export commonly used types
pub use adapter::{Clock, SimActor};
pub use config::SimulationConfig;
pub use domain::{
    error::WorkflowError,
    task::TaskDef,
    workflow::{Binding, Workflow, WorkflowId, WorkflowKind, WorkflowRef}
};
pub use port::actor::Actor;
pub use workflow::{Allocation, Completion, CompletionFlag, Idling, WorkflowRegistrar, intercept};

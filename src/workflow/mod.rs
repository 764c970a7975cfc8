//! Workflow synchronization
//!
//! Task interception, workflow allocation, and the reference idling workflow.

pub mod idling;
pub mod interceptor;
pub mod registrar;

#[cfg(test)]
pub(crate) mod testing;

pub use idling::{Completion, CompletionFlag, Idling};
pub use interceptor::{InstalledTasks, intercept};
pub use registrar::{Allocation, InstrumentationRegistry, WorkflowRegistrar};

//! Workflow allocation
//!
//! The registrar binds a workflow and every nested workflow it owns to one
//! actor. Each workflow is bound before its members are visited, so a member
//! graph that loops back to an already bound workflow stops there. Members
//! already owned by another actor keep their owner.

use std::{any::TypeId, collections::HashMap, sync::Arc};

use parking_lot::Mutex;
use tracing::{Level, event};

use crate::{
    domain::{
        constant::registrar,
        error::WorkflowError,
        workflow::{Workflow, WorkflowKind}
    },
    port::actor::Actor,
    workflow::interceptor::{self, InstalledTasks}
};

/// Workflow types whose task tables have been installed, keyed by type.
#[derive(Debug, Default)]
pub struct InstrumentationRegistry {
    installed: Mutex<HashMap<TypeId, InstalledTasks>>
}

impl InstrumentationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the interceptor for `kind` unless already done.
    /// Returns `true` when this call performed the installation.
    pub fn ensure(&self, kind: &WorkflowKind) -> Result<bool, WorkflowError> {
        let mut installed = self.installed.lock();

        if installed.contains_key(&kind.id()) {
            return Ok(false);
        }

        let tasks = interceptor::install(kind).inspect_err(|e| {
            event!(Level::WARN, event = registrar::TYPE_INSTRUMENTATION_FAILED,
                   kind = %kind.name(), error = %e);
        })?;

        event!(Level::DEBUG, event = registrar::TYPE_INSTRUMENTED,
               kind = %kind.name(), tasks = %tasks.tasks.len());

        installed.insert(kind.id(), tasks);
        Ok(true)
    }

    pub fn contains(&self, kind: &WorkflowKind) -> bool {
        self.installed.lock().contains_key(&kind.id())
    }

    pub fn tasks(&self, kind: &WorkflowKind) -> Option<InstalledTasks> {
        self.installed.lock().get(&kind.id()).cloned()
    }

    pub fn len(&self) -> usize {
        self.installed.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.installed.lock().is_empty()
    }
}

/// Outcome of one allocation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    /// Workflow instances bound by this call.
    pub bound:        usize,
    /// Workflow types instrumented by this call.
    pub instrumented: usize
}

/// Binds workflow graphs to actors. One registrar serves one simulation.
#[derive(Debug)]
pub struct WorkflowRegistrar {
    registry:        InstrumentationRegistry,
    default_logging: bool
}

impl WorkflowRegistrar {
    pub fn new() -> Self {
        Self::with_logging(true)
    }

    /// Registrar whose [`allocate`](Self::allocate) uses `default_logging`.
    pub fn with_logging(default_logging: bool) -> Self {
        Self { registry: InstrumentationRegistry::new(), default_logging }
    }

    pub fn registry(&self) -> &InstrumentationRegistry {
        &self.registry
    }

    pub fn is_instrumented(&self, kind: &WorkflowKind) -> bool {
        self.registry.contains(kind)
    }

    pub fn instrumented_count(&self) -> usize {
        self.registry.len()
    }

    /// Allocate `workflow` and its unowned members to `actor`.
    pub fn allocate(&self, actor: Arc<dyn Actor>, workflow: &dyn Workflow) -> Result<Allocation, WorkflowError> {
        self.allocate_with(actor, workflow, self.default_logging)
    }

    /// Allocate with an explicit logging flag, applied to every workflow bound
    /// by this call.
    pub fn allocate_with(
        &self,
        actor: Arc<dyn Actor>,
        workflow: &dyn Workflow,
        logging: bool
    ) -> Result<Allocation, WorkflowError> {
        let mut allocation = Allocation::default();
        self.allocate_into(&actor, workflow, logging, &mut allocation)?;

        event!(Level::DEBUG, event = registrar::ALLOCATION_COMPLETED,
               actor = %actor.name(), bound = %allocation.bound, instrumented = %allocation.instrumented);

        Ok(allocation)
    }

    fn allocate_into(
        &self,
        actor: &Arc<dyn Actor>,
        workflow: &dyn Workflow,
        logging: bool,
        allocation: &mut Allocation
    ) -> Result<(), WorkflowError> {
        let kind = workflow.kind();
        let binding = workflow.binding();

        if self.registry.ensure(&kind)? {
            allocation.instrumented += 1;
        }

        if !binding.bind(actor.clone(), logging) {
            event!(Level::DEBUG, event = registrar::WORKFLOW_ALREADY_OWNED,
                   kind = %kind.short_name(), workflow = %binding.id());
            return Ok(());
        }

        allocation.bound += 1;
        event!(Level::DEBUG, event = registrar::WORKFLOW_BOUND,
               actor = %actor.name(), kind = %kind.short_name(), workflow = %binding.id(), logging = %logging);

        let mut members: Vec<&dyn Workflow> = Vec::new();
        workflow.visit_members(&mut |member| members.push(member));

        for member in members {
            if member.binding().is_bound() {
                continue;
            }
            self.allocate_into(actor, member, logging, allocation)?;
        }

        Ok(())
    }
}

impl Default for WorkflowRegistrar {
    fn default() -> Self {
        Self::new()
    }
}

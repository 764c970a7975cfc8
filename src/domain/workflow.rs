//! Core workflow domain types
//!
//! A workflow is a unit of simulated work: it declares a set of tasks and may
//! own nested workflows. Every workflow instance carries a [`Binding`] that
//! records the actor it has been allocated to. The binding starts empty and is
//! written at most once, by the registrar.

use std::{
    any::TypeId,
    fmt::{Debug, Display},
    sync::Arc
};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{domain::task::TaskDef, port::actor::Actor};

/// Stable identity of a workflow instance, used in task logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkflowId(Uuid);

impl WorkflowId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WorkflowId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for WorkflowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type identity of a workflow together with its declared task table.
#[derive(Debug, Clone, Copy)]
pub struct WorkflowKind {
    id:    TypeId,
    name:  &'static str,
    tasks: &'static [TaskDef]
}

impl WorkflowKind {
    /// Describe workflow type `W` and the tasks it declares.
    pub fn of<W: Workflow>(tasks: &'static [TaskDef]) -> Self {
        Self { id: TypeId::of::<W>(), name: std::any::type_name::<W>(), tasks }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path.
    pub fn short_name(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        base.rsplit("::").next().unwrap_or(base)
    }

    pub fn tasks(&self) -> &'static [TaskDef] {
        self.tasks
    }
}

impl PartialEq for WorkflowKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for WorkflowKind {}

#[derive(Clone)]
struct Owner {
    actor:   Arc<dyn Actor>,
    logging: bool
}

/// Allocation state of a single workflow instance.
///
/// The owner is assigned at most once; later attempts leave it untouched.
pub struct Binding {
    id:    WorkflowId,
    owner: OnceCell<Owner>
}

impl Binding {
    pub fn new() -> Self {
        Self { id: WorkflowId::new(), owner: OnceCell::new() }
    }

    pub fn id(&self) -> WorkflowId {
        self.id
    }

    pub fn owner(&self) -> Option<&Arc<dyn Actor>> {
        self.owner.get().map(|owner| &owner.actor)
    }

    pub fn is_bound(&self) -> bool {
        self.owner.get().is_some()
    }

    /// Whether the owning actor should record this workflow's tasks.
    /// Unbound workflows never log.
    pub fn logging_enabled(&self) -> bool {
        self.owner.get().is_some_and(|owner| owner.logging)
    }

    /// Assign the owner. Returns `false` if the workflow was already bound, in
    /// which case the existing owner and logging flag are kept.
    pub(crate) fn bind(&self, actor: Arc<dyn Actor>, logging: bool) -> bool {
        self.owner.set(Owner { actor, logging }).is_ok()
    }
}

impl Default for Binding {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("id", &self.id)
            .field("owner", &self.owner().map(|actor| actor.name().to_string()))
            .field("logging", &self.logging_enabled())
            .finish()
    }
}

/// Capability implemented by every type that provides tasks.
///
/// Task methods route through [`crate::workflow::interceptor::intercept`];
/// nested workflows are exposed through [`Workflow::visit_members`] so the
/// registrar can allocate a whole workflow graph to one actor.
pub trait Workflow: Send + Sync + 'static {
    /// Allocation state of this instance.
    fn binding(&self) -> &Binding;

    /// Type identity and declared tasks.
    fn kind(&self) -> WorkflowKind;

    /// Call `visit` once for every nested workflow this instance owns.
    fn visit_members<'a>(&'a self, _visit: &mut dyn FnMut(&'a dyn Workflow)) {}
}

/// Identity of a workflow as reported to its actor's task log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowRef {
    pub id:      WorkflowId,
    pub kind:    &'static str,
    pub logging: bool
}

impl WorkflowRef {
    pub fn of<W: Workflow + ?Sized>(workflow: &W) -> Self {
        let binding = workflow.binding();
        Self { id: binding.id(), kind: workflow.kind().short_name(), logging: binding.logging_enabled() }
    }
}

impl Display for WorkflowRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.kind, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::testing::RecordingActor;

    struct Probe {
        binding: Binding
    }

    impl Workflow for Probe {
        fn binding(&self) -> &Binding {
            &self.binding
        }

        fn kind(&self) -> WorkflowKind {
            WorkflowKind::of::<Self>(&[])
        }
    }

    #[test]
    fn test_binding_is_assigned_once() {
        let binding = Binding::new();
        assert!(!binding.is_bound());
        assert!(!binding.logging_enabled());

        let first: Arc<dyn Actor> = Arc::new(RecordingActor::named("first"));
        let second: Arc<dyn Actor> = Arc::new(RecordingActor::named("second"));

        assert!(binding.bind(first, false));
        assert!(!binding.bind(second, true));

        assert_eq!(binding.owner().map(|actor| actor.name().to_string()), Some("first".to_string()));
        assert!(!binding.logging_enabled());
    }

    #[test]
    fn test_kind_names() {
        let probe = Probe { binding: Binding::new() };
        let kind = probe.kind();
        assert_eq!(kind.short_name(), "Probe");
        assert!(kind.name().ends_with("::Probe"));
        assert_eq!(kind, WorkflowKind::of::<Probe>(&[]));
    }

    #[test]
    fn test_workflow_ref_reflects_binding() {
        let probe = Probe { binding: Binding::new() };
        let unbound = WorkflowRef::of(&probe);
        assert_eq!(unbound.id, probe.binding().id());
        assert!(!unbound.logging);

        probe.binding().bind(Arc::new(RecordingActor::named("a")), true);
        let bound = WorkflowRef::of(&probe);
        assert!(bound.logging);
        assert_eq!(bound.to_string(), format!("Probe({})", probe.binding().id()));
    }
}

//! The work registry: a forward-only state machine over work items.

use crate::item::{WorkItem, WorkState};

/// Outcome of a mutating registry operation.
///
/// Misses and illegal transitions are observable but non-fatal: callers
/// that want leniency ignore the value, callers that care inspect it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The transition was applied
    Applied,
    /// No item with the given id exists; registry left unchanged
    UnknownId,
    /// The item's current state does not admit this transition;
    /// registry left unchanged
    Rejected {
        /// State the item was in when the transition was refused
        from: WorkState,
    },
}

impl Transition {
    /// Whether the operation mutated the registry.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// In-memory registry of work items for one apply run.
///
/// Items are append-only and kept in definition order. The completion
/// counter is owned by the registry instance, so completion order is
/// scoped to one run and registries compose in tests without shared
/// global state.
#[derive(Debug, Clone, Default)]
pub struct WorkRegistry {
    items: Vec<WorkItem>,
    next_order: u64,
}

impl WorkRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new item in state `Defined` with duration 0.
    ///
    /// The registry performs no uniqueness check; id uniqueness is the
    /// caller's contract.
    pub fn define(&mut self, id: u64, resource: impl Into<String>, work: impl Into<String>) {
        self.items.push(WorkItem {
            id,
            resource: resource.into(),
            work: work.into(),
            state: WorkState::Defined,
            duration_ms: 0,
            order: None,
            error: None,
        });
    }

    /// Mark an item as running and record its elapsed time so far.
    ///
    /// Valid from `Defined` (start) and `Running` (duration refresh).
    pub fn run(&mut self, id: u64, duration_ms: u64) -> Transition {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            log::debug!("run: no work item with id {id}");
            return Transition::UnknownId;
        };

        match item.state {
            WorkState::Defined | WorkState::Running => {
                item.state = WorkState::Running;
                item.duration_ms = duration_ms;
                Transition::Applied
            }
            from => {
                log::debug!("run: work item {id} is {from:?}, not restartable");
                Transition::Rejected { from }
            }
        }
    }

    /// Mark a running item as completed, assigning its completion order.
    ///
    /// The counter increments exactly once per applied call; the first
    /// completion in this registry's lifetime gets order 0.
    pub fn complete(&mut self, id: u64, duration_ms: u64) -> Transition {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            log::debug!("complete: no work item with id {id}");
            return Transition::UnknownId;
        };

        match item.state {
            WorkState::Running => {
                item.state = WorkState::Completed;
                item.duration_ms = duration_ms;
                item.order = Some(self.next_order);
                self.next_order += 1;
                Transition::Applied
            }
            from => {
                log::debug!("complete: work item {id} is {from:?}, not running");
                Transition::Rejected { from }
            }
        }
    }

    /// Mark a running item as errored, attaching the failure detail.
    pub fn error(
        &mut self,
        id: u64,
        duration_ms: u64,
        error: impl Into<String>,
    ) -> Transition {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            log::debug!("error: no work item with id {id}");
            return Transition::UnknownId;
        };

        match item.state {
            WorkState::Running => {
                item.state = WorkState::Error;
                item.duration_ms = duration_ms;
                item.error = Some(error.into());
                Transition::Applied
            }
            from => {
                log::debug!("error: work item {id} is {from:?}, not running");
                Transition::Rejected { from }
            }
        }
    }

    /// Look up an item by id.
    pub fn get(&self, id: u64) -> Option<&WorkItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// All items in definition order.
    pub fn items(&self) -> &[WorkItem] {
        &self.items
    }

    /// Number of tracked items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the registry holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_inserts_defined_item() {
        let mut registry = WorkRegistry::new();
        registry.define(1, "aws_instance.web", "create");

        let item = registry.get(1).unwrap();
        assert_eq!(item.state, WorkState::Defined);
        assert_eq!(item.duration_ms, 0);
        assert_eq!(item.order, None);
        assert_eq!(item.error, None);
    }

    #[test]
    fn test_run_sets_state_and_duration() {
        let mut registry = WorkRegistry::new();
        registry.define(1, "aws_instance.web", "create");

        assert!(registry.run(1, 10).is_applied());
        let item = registry.get(1).unwrap();
        assert_eq!(item.state, WorkState::Running);
        assert_eq!(item.duration_ms, 10);

        // Refreshing the duration of a running item is allowed.
        assert!(registry.run(1, 25).is_applied());
        assert_eq!(registry.get(1).unwrap().duration_ms, 25);
    }

    #[test]
    fn test_complete_assigns_increasing_order() {
        let mut registry = WorkRegistry::new();
        registry.define(1, "r1", "create");
        registry.define(2, "r2", "create");
        registry.define(3, "r3", "delete");
        registry.run(1, 0);
        registry.run(2, 0);
        registry.run(3, 0);

        assert!(registry.complete(2, 20).is_applied());
        assert!(registry.complete(3, 5).is_applied());
        assert!(registry.complete(1, 60).is_applied());

        assert_eq!(registry.get(2).unwrap().order, Some(0));
        assert_eq!(registry.get(3).unwrap().order, Some(1));
        assert_eq!(registry.get(1).unwrap().order, Some(2));
    }

    #[test]
    fn test_error_attaches_detail() {
        let mut registry = WorkRegistry::new();
        registry.define(1, "aws_instance.web", "create");
        registry.run(1, 0);

        assert!(registry.error(1, 42, "provider timeout").is_applied());
        let item = registry.get(1).unwrap();
        assert_eq!(item.state, WorkState::Error);
        assert_eq!(item.duration_ms, 42);
        assert_eq!(item.error.as_deref(), Some("provider timeout"));
    }

    #[test]
    fn test_unknown_id_leaves_registry_unchanged() {
        let mut registry = WorkRegistry::new();
        registry.define(1, "r1", "create");

        assert_eq!(registry.run(99, 10), Transition::UnknownId);
        assert_eq!(registry.complete(99, 10), Transition::UnknownId);
        assert_eq!(registry.error(99, 10, "boom"), Transition::UnknownId);

        assert_eq!(registry.len(), 1);
        let item = registry.get(1).unwrap();
        assert_eq!(item.state, WorkState::Defined);
        assert_eq!(item.duration_ms, 0);
    }

    #[test]
    fn test_terminal_states_are_sticky() {
        let mut registry = WorkRegistry::new();
        registry.define(1, "r1", "create");
        registry.run(1, 0);
        registry.complete(1, 10);

        assert_eq!(
            registry.complete(1, 99),
            Transition::Rejected {
                from: WorkState::Completed
            }
        );
        assert_eq!(
            registry.error(1, 99, "late failure"),
            Transition::Rejected {
                from: WorkState::Completed
            }
        );
        assert_eq!(
            registry.run(1, 99),
            Transition::Rejected {
                from: WorkState::Completed
            }
        );

        let item = registry.get(1).unwrap();
        assert_eq!(item.state, WorkState::Completed);
        assert_eq!(item.duration_ms, 10);
        assert_eq!(item.order, Some(0));
        assert_eq!(item.error, None);
    }

    #[test]
    fn test_complete_requires_running() {
        let mut registry = WorkRegistry::new();
        registry.define(1, "r1", "create");

        assert_eq!(
            registry.complete(1, 10),
            Transition::Rejected {
                from: WorkState::Defined
            }
        );
        assert_eq!(registry.get(1).unwrap().state, WorkState::Defined);
    }

    #[test]
    fn test_rejected_complete_does_not_consume_order() {
        let mut registry = WorkRegistry::new();
        registry.define(1, "r1", "create");
        registry.define(2, "r2", "create");
        registry.run(2, 0);

        // Rejected: item 1 was never run.
        registry.complete(1, 10);
        registry.complete(2, 10);

        assert_eq!(registry.get(2).unwrap().order, Some(0));
    }
}

//! Read-only derived views over a registry snapshot.

use crate::item::{WorkItem, WorkState};
use crate::registry::WorkRegistry;

fn in_state(registry: &WorkRegistry, state: WorkState) -> Vec<WorkItem> {
    registry
        .items()
        .iter()
        .filter(|item| item.state == state)
        .cloned()
        .collect()
}

/// Items still waiting to run, in definition order.
pub fn defined_work(registry: &WorkRegistry) -> Vec<WorkItem> {
    in_state(registry, WorkState::Defined)
}

/// Items currently running, in definition order.
pub fn running_work(registry: &WorkRegistry) -> Vec<WorkItem> {
    in_state(registry, WorkState::Running)
}

/// Completed items, sorted by completion order — the order work actually
/// finished, not the order it was defined.
pub fn completed_work(registry: &WorkRegistry) -> Vec<WorkItem> {
    let mut completed = in_state(registry, WorkState::Completed);
    completed.sort_by_key(|item| item.order);
    completed
}

/// Errored items, in definition order.
pub fn errored_work(registry: &WorkRegistry) -> Vec<WorkItem> {
    in_state(registry, WorkState::Error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_views_partition_by_state() {
        let mut registry = WorkRegistry::new();
        registry.define(1, "r1", "create");
        registry.define(2, "r2", "update");
        registry.define(3, "r3", "delete");
        registry.define(4, "r4", "create");
        registry.run(2, 0);
        registry.run(3, 0);
        registry.run(4, 0);
        registry.complete(3, 12);
        registry.error(4, 7, "boom");

        assert_eq!(defined_work(&registry).len(), 1);
        assert_eq!(running_work(&registry).len(), 1);
        assert_eq!(completed_work(&registry).len(), 1);
        assert_eq!(errored_work(&registry).len(), 1);
    }

    #[test]
    fn test_completed_sorted_by_completion_not_definition() {
        let mut registry = WorkRegistry::new();
        registry.define(1, "r1", "create");
        registry.define(2, "r2", "create");
        registry.define(3, "r3", "create");
        registry.run(1, 0);
        registry.run(2, 0);
        registry.run(3, 0);

        registry.complete(3, 5);
        registry.complete(1, 60);
        registry.complete(2, 20);

        let ids: Vec<u64> = completed_work(&registry).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_selectors_do_not_mutate() {
        let mut registry = WorkRegistry::new();
        registry.define(1, "r1", "create");
        registry.run(1, 0);

        let before = registry.clone();
        let _ = defined_work(&registry);
        let _ = running_work(&registry);
        let _ = completed_work(&registry);
        let _ = errored_work(&registry);

        assert_eq!(registry.items(), before.items());
    }

    #[test]
    fn test_end_to_end_completion_ordering() {
        // Two items defined in one order, completed in the other: the
        // completed view follows real completion time, not ids or
        // durations.
        let mut registry = WorkRegistry::new();
        registry.define(1, "r1", "create");
        registry.define(2, "r2", "create");
        registry.run(1, 10);
        registry.run(2, 30);
        registry.complete(2, 20);
        registry.complete(1, 60);

        let completed = completed_work(&registry);
        assert_eq!(completed.len(), 2);

        assert_eq!(completed[0].id, 2);
        assert_eq!(completed[0].order, Some(0));
        assert_eq!(completed[0].duration_ms, 20);

        assert_eq!(completed[1].id, 1);
        assert_eq!(completed[1].order, Some(1));
        assert_eq!(completed[1].duration_ms, 60);
    }
}

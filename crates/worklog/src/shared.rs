//! Thread-safe registry handle for concurrent apply drivers.
//!
//! Many workers execute resource changes at once and race their
//! transitions into one registry. The handle serializes every mutation
//! behind a single lock and recovers from poisoning, so a panicked
//! worker cannot wedge progress reporting for the rest of the run.

use crate::item::WorkItem;
use crate::registry::{Transition, WorkRegistry};
use crate::selectors;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable, thread-safe wrapper around one [`WorkRegistry`].
#[derive(Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<Mutex<WorkRegistry>>,
}

impl SharedRegistry {
    /// Create a handle around an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, WorkRegistry> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Insert a new item in state `Defined`.
    pub fn define(&self, id: u64, resource: impl Into<String>, work: impl Into<String>) {
        self.lock().define(id, resource, work);
    }

    /// Mark an item as running.
    pub fn run(&self, id: u64, duration_ms: u64) -> Transition {
        self.lock().run(id, duration_ms)
    }

    /// Mark a running item as completed.
    pub fn complete(&self, id: u64, duration_ms: u64) -> Transition {
        self.lock().complete(id, duration_ms)
    }

    /// Mark a running item as errored.
    pub fn error(&self, id: u64, duration_ms: u64, error: impl Into<String>) -> Transition {
        self.lock().error(id, duration_ms, error)
    }

    /// Clone the registry's current contents.
    pub fn snapshot(&self) -> WorkRegistry {
        self.lock().clone()
    }

    /// Items still waiting to run.
    pub fn defined_work(&self) -> Vec<WorkItem> {
        selectors::defined_work(&self.lock())
    }

    /// Items currently running.
    pub fn running_work(&self) -> Vec<WorkItem> {
        selectors::running_work(&self.lock())
    }

    /// Completed items in completion order.
    pub fn completed_work(&self) -> Vec<WorkItem> {
        selectors::completed_work(&self.lock())
    }

    /// Errored items.
    pub fn errored_work(&self) -> Vec<WorkItem> {
        selectors::errored_work(&self.lock())
    }
}

//! Work items: one tracked unit of change.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a work item.
///
/// States only advance forward: `Defined` → `Running` → `Completed` or
/// `Error`. The two end states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkState {
    Defined,
    Running,
    Completed,
    Error,
}

impl WorkState {
    /// Whether this state admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }
}

/// One tracked unit of change: a resource paired with a single action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Caller-assigned identifier, unique for the registry's lifetime
    pub id: u64,
    /// Resource address this item corresponds to
    pub resource: String,
    /// Action label (create, update, delete, ...) — not a state
    pub work: String,
    /// Current lifecycle state
    pub state: WorkState,
    /// Elapsed milliseconds, set on run and overwritten on completion
    pub duration_ms: u64,
    /// Completion sequence number; assigned only when completed
    pub order: Option<u64>,
    /// Failure detail; present only on errored items
    pub error: Option<String>,
}

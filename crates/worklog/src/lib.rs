//! # worklog
//!
//! In-memory tracking of apply work: each pending change becomes a work
//! item with a forward-only lifecycle (`Defined` → `Running` →
//! `Completed` | `Error`), and derived views expose running, completed,
//! and errored work for presentation.
//!
//! ## Core Concepts
//!
//! - **WorkItem**: one tracked unit of change (one resource, one action)
//! - **WorkRegistry**: the state machine; mutated only through `define`,
//!   `run`, `complete`, and `error`
//! - **Completion order**: a per-registry counter assigned as items
//!   complete, so the completed view sorts by real finish time
//! - **SharedRegistry**: cloneable handle serializing concurrent
//!   transitions from parallel workers
//!
//! ## Example
//!
//! ```
//! use worklog::{selectors, WorkRegistry};
//!
//! let mut registry = WorkRegistry::new();
//! registry.define(1, "aws_instance.web", "create");
//! registry.define(2, "aws_s3_bucket.logs", "update");
//! registry.run(1, 0);
//! registry.run(2, 0);
//! registry.complete(2, 850);
//! registry.complete(1, 3200);
//!
//! // The bucket finished first, so it leads the completed view.
//! let completed = selectors::completed_work(&registry);
//! assert_eq!(completed[0].resource, "aws_s3_bucket.logs");
//! ```

pub mod item;
pub mod registry;
pub mod selectors;
pub mod shared;

// Re-export main types at crate root
pub use item::{WorkItem, WorkState};
pub use registry::{Transition, WorkRegistry};
pub use shared::SharedRegistry;

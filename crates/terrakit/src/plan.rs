//! Machine-readable plan ingestion.
//!
//! Parses the JSON representation of a Terraform plan (`show -json`) and
//! flattens it into one change descriptor per (resource address, action)
//! pair. The plan format is a versioned external contract; only the
//! fields needed here are modeled, everything else is ignored.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One action on a resource, as the plan format spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeAction {
    Create,
    Update,
    Delete,
    Read,
    NoOp,
}

impl ChangeAction {
    /// The plan format's name for this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeAction::Create => "create",
            ChangeAction::Update => "update",
            ChangeAction::Delete => "delete",
            ChangeAction::Read => "read",
            ChangeAction::NoOp => "no-op",
        }
    }
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The planned change block of one resource entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Change {
    /// Actions in the order the plan will perform them. A replace is
    /// represented as its component actions, e.g. `["delete", "create"]`.
    pub actions: Vec<ChangeAction>,
}

/// One resource entry in the plan document.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceChange {
    /// Fully qualified resource address, e.g. `aws_instance.web[0]`
    pub address: String,
    pub change: Change,
}

/// A parsed plan document.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanDocument {
    #[serde(default)]
    pub format_version: Option<String>,
    pub resource_changes: Vec<ResourceChange>,
}

/// One pending change: a resource address paired with a single action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeDescriptor {
    pub address: String,
    pub action: ChangeAction,
}

/// Parse a plan JSON document.
///
/// Malformed input fails the whole ingestion; there is no partial
/// recovery.
pub fn parse_plan(json: &str) -> Result<PlanDocument> {
    serde_json::from_str(json).map_err(|e| Error::PlanParse {
        message: e.to_string(),
    })
}

/// Flatten a plan into descriptors, one per (address, action).
///
/// Resources appear in document order, actions within a resource in the
/// document's action order. Pure and total: no filtering, no
/// deduplication.
pub fn flatten(plan: &PlanDocument) -> Vec<ChangeDescriptor> {
    plan.resource_changes
        .iter()
        .flat_map(|rc| {
            rc.change.actions.iter().map(|action| ChangeDescriptor {
                address: rc.address.clone(),
                action: *action,
            })
        })
        .collect()
}

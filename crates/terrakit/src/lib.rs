//! # terrakit
//!
//! Pure Rust library for driving the Terraform CLI.
//!
//! This crate provides functionality for:
//! - Building deterministic terraform command lines from structured options
//! - Running subcommands synchronously or fire-and-forget, with captured output
//! - Parsing machine-readable plan output into flat change descriptors
//!
//! ## Example
//!
//! ```no_run
//! use terrakit::{CommandOptions, Terraform};
//!
//! // Create a client (discovers the terraform binary)
//! let tf = Terraform::new().expect("terraform not available").no_color(true);
//!
//! // Plan with variables and a var-file
//! let options = CommandOptions::new()
//!     .var("region", "eu-west-1")
//!     .list("var_file", ["base.tfvars"])
//!     .scalar("out", "pending.tfplan");
//! let outcome = tf.plan(&options, Some(".")).expect("plan failed");
//! println!("ran: {}", outcome.command);
//!
//! // Ingest the machine-readable plan
//! let json = tf.show_plan_json("pending.tfplan".as_ref()).unwrap();
//! let plan = terrakit::parse_plan(&json).unwrap();
//! for pending in terrakit::flatten(&plan) {
//!     println!("{} {}", pending.action, pending.address);
//! }
//! ```

pub mod command;
pub mod error;
pub mod exec;
pub mod options;
pub mod plan;
pub mod terraform;

// Re-export main types at crate root
pub use command::{build, CommandLine};
pub use error::{Error, ErrorCategory, Result};
pub use exec::{execute, ExecConfig, ExecOutcome};
pub use options::{CommandOptions, OptionValue};
pub use plan::{
    flatten, parse_plan, Change, ChangeAction, ChangeDescriptor, PlanDocument, ResourceChange,
};
pub use terraform::Terraform;

//! Drives an apply: one targeted terraform run per resource address,
//! executed on a thread pool, with every lifecycle transition reported
//! into one shared work registry.

use anyhow::{Context as AnyhowContext, Result};
use rayon::prelude::*;
use std::time::Instant;

use crate::progress;
use terrakit::{ChangeDescriptor, CommandOptions, Error, Terraform};
use worklog::SharedRegistry;

/// Summary of an apply run, derived from the registry's final views.
#[derive(Debug, Default)]
pub struct ApplySummary {
    pub completed: usize,
    pub errored: usize,
}

impl ApplySummary {
    pub fn is_success(&self) -> bool {
        self.errored == 0
    }
}

/// One targeted terraform run covering every pending action on an address.
///
/// A composite change (replace) stays one process run, but each of its
/// component actions is tracked as its own work item.
#[derive(Debug, PartialEq, Eq)]
struct AddressGroup {
    address: String,
    item_ids: Vec<u64>,
}

/// Group descriptors by address, preserving first-appearance order.
///
/// Work-item ids are the descriptor indices, matching the ids the caller
/// defined them under.
fn group_by_address(descriptors: &[ChangeDescriptor]) -> Vec<AddressGroup> {
    let mut groups: Vec<AddressGroup> = Vec::new();

    for (index, descriptor) in descriptors.iter().enumerate() {
        let id = index as u64;
        match groups
            .iter_mut()
            .find(|group| group.address == descriptor.address)
        {
            Some(group) => group.item_ids.push(id),
            None => groups.push(AddressGroup {
                address: descriptor.address.clone(),
                item_ids: vec![id],
            }),
        }
    }

    groups
}

/// First line of a failed run's stderr that names an error, trimmed for
/// one-line display.
fn first_error_line(stderr: &str) -> &str {
    stderr
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with("Error:"))
        .or_else(|| stderr.lines().map(str::trim).find(|line| !line.is_empty()))
        .unwrap_or("no error output")
}

/// Execute pending changes, reporting transitions into `registry`.
///
/// Defines one work item per descriptor, then applies each address group
/// with `terraform apply -target=<address> -auto-approve` on a pool of
/// `jobs` workers. Workers report `run` when their process starts and
/// `complete`/`error` with elapsed milliseconds when it exits.
pub fn execute_changes(
    terraform: &Terraform,
    registry: &SharedRegistry,
    descriptors: &[ChangeDescriptor],
    jobs: usize,
) -> Result<ApplySummary> {
    for (index, descriptor) in descriptors.iter().enumerate() {
        registry.define(
            index as u64,
            descriptor.address.clone(),
            descriptor.action.as_str(),
        );
    }

    let groups = group_by_address(descriptors);
    let pb = progress::bar(groups.len() as u64, "Applying");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.max(1))
        .build()
        .context("Failed to create apply thread pool")?;

    pool.install(|| {
        groups.par_iter().for_each(|group| {
            for &id in &group.item_ids {
                registry.run(id, 0);
            }
            pb.set_message(group.address.clone());

            let options = CommandOptions::new()
                .scalar("target", group.address.as_str())
                .flag("auto_approve", true)
                .scalar("input", "false");

            let started = Instant::now();
            let outcome = terraform.apply(&options, None);
            let elapsed_ms = started.elapsed().as_millis() as u64;

            match outcome {
                Ok(run) if run.success() => {
                    for &id in &group.item_ids {
                        registry.complete(id, elapsed_ms);
                    }
                }
                Ok(run) => {
                    let category = Error::classify_run_output(&run.stderr);
                    let message =
                        format!("{}: {}", category.description(), first_error_line(&run.stderr));
                    for &id in &group.item_ids {
                        registry.error(id, elapsed_ms, message.clone());
                    }
                }
                Err(e) => {
                    for &id in &group.item_ids {
                        registry.error(id, elapsed_ms, e.to_string());
                    }
                }
            }

            pb.inc(1);
        });
    });

    pb.finish_and_clear();

    Ok(ApplySummary {
        completed: registry.completed_work().len(),
        errored: registry.errored_work().len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrakit::ChangeAction;

    fn descriptor(address: &str, action: ChangeAction) -> ChangeDescriptor {
        ChangeDescriptor {
            address: address.to_string(),
            action,
        }
    }

    #[test]
    fn test_group_by_address_merges_replace_components() {
        let descriptors = vec![
            descriptor("aws_instance.db", ChangeAction::Delete),
            descriptor("aws_s3_bucket.logs", ChangeAction::Update),
            descriptor("aws_instance.db", ChangeAction::Create),
        ];

        let groups = group_by_address(&descriptors);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].address, "aws_instance.db");
        assert_eq!(groups[0].item_ids, vec![0, 2]);
        assert_eq!(groups[1].address, "aws_s3_bucket.logs");
        assert_eq!(groups[1].item_ids, vec![1]);
    }

    #[test]
    fn test_first_error_line() {
        let stderr = "\nWarning: something minor\n\nError: state lock held\n  detail\n";
        assert_eq!(first_error_line(stderr), "Error: state lock held");

        assert_eq!(first_error_line("plain failure\n"), "plain failure");
        assert_eq!(first_error_line(""), "no error output");
    }

    #[test]
    fn test_execute_changes_completes_on_success() {
        // `echo` accepts any arguments and exits 0, standing in for a
        // terraform binary that applies every target cleanly.
        let terraform = Terraform::with_binary("echo").silent(true);
        let registry = SharedRegistry::new();
        let descriptors = vec![
            descriptor("aws_instance.web", ChangeAction::Create),
            descriptor("aws_s3_bucket.logs", ChangeAction::Update),
        ];

        let summary = execute_changes(&terraform, &registry, &descriptors, 2).unwrap();

        assert_eq!(summary.completed, 2);
        assert_eq!(summary.errored, 0);
        assert!(summary.is_success());

        let completed = registry.completed_work();
        let orders: Vec<u64> = completed.iter().map(|i| i.order.unwrap()).collect();
        assert_eq!(orders, vec![0, 1]);
    }

    #[test]
    fn test_execute_changes_errors_on_failure() {
        let terraform = Terraform::with_binary("false").silent(true);
        let registry = SharedRegistry::new();
        let descriptors = vec![descriptor("aws_instance.web", ChangeAction::Create)];

        let summary = execute_changes(&terraform, &registry, &descriptors, 1).unwrap();

        assert_eq!(summary.completed, 0);
        assert_eq!(summary.errored, 1);
        assert!(!summary.is_success());

        let errored = registry.errored_work();
        assert_eq!(errored[0].resource, "aws_instance.web");
        assert!(errored[0].error.is_some());
    }
}

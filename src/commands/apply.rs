//! `terrawatch apply` - apply pending changes with per-resource tracking.

use anyhow::Result;
use colored::Colorize;

use crate::cli::ApplyArgs;
use crate::config::Config;
use crate::engine::executor;
use crate::ui;
use crate::Context;
use worklog::SharedRegistry;

pub fn run(ctx: &Context, args: ApplyArgs) -> Result<()> {
    let config = Config::load()?;
    let terraform = super::terraform_client(&config, &args.chdir, ctx.verbose > 0)?;
    let options = super::plan::plan_options(&args.vars, &args.var_files, &config)?;

    let pending = match super::plan::pending_changes(&terraform, &options) {
        Ok(pending) => pending,
        Err(e) => {
            super::plan::cleanup_plan(&args.chdir);
            return Err(e);
        }
    };

    if pending.is_empty() {
        super::plan::cleanup_plan(&args.chdir);
        ui::success("No changes. Infrastructure is up-to-date.");
        return Ok(());
    }

    if !ctx.quiet {
        super::plan::print_pending(&pending);
    }

    if !args.yes && !confirm_proceed()? {
        super::plan::cleanup_plan(&args.chdir);
        println!();
        println!("  {} Aborted", "✗".red());
        return Ok(());
    }

    let jobs = args.jobs.unwrap_or(config.jobs);
    println!();
    println!(
        "  {} Applying {} changes...",
        "→".cyan(),
        pending.len()
    );

    let registry = SharedRegistry::new();
    let summary = executor::execute_changes(&terraform, &registry, &pending, jobs)?;

    if !args.keep_plan {
        super::plan::cleanup_plan(&args.chdir);
    }

    print_report(&registry);

    if summary.is_success() {
        ui::success(&format!("Applied {} changes", summary.completed));
        Ok(())
    } else {
        anyhow::bail!(
            "{} of {} changes failed",
            summary.errored,
            summary.completed + summary.errored
        )
    }
}

/// Confirm with user
fn confirm_proceed() -> Result<bool> {
    use dialoguer::Confirm;

    let confirmed = Confirm::new()
        .with_prompt("Apply these changes?")
        .default(false)
        .interact()?;

    Ok(confirmed)
}

/// Print completed work in the order it actually finished, then failures.
fn print_report(registry: &SharedRegistry) {
    let completed = registry.completed_work();
    if !completed.is_empty() {
        ui::header("Completed");
        for item in &completed {
            println!(
                "  {} {} ({}, {})",
                "✓".green(),
                item.resource,
                item.work,
                ui::format_duration(item.duration_ms)
            );
        }
    }

    let errored = registry.errored_work();
    if !errored.is_empty() {
        ui::header("Failed");
        for item in &errored {
            println!(
                "  {} {} ({}, {})",
                "✗".red(),
                item.resource,
                item.work,
                ui::format_duration(item.duration_ms)
            );
            if let Some(error) = &item.error {
                ui::dim(error);
            }
        }
    }
}

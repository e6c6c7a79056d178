//! `terrawatch plan` - show what an apply would change.

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::cli::PlanArgs;
use crate::config::Config;
use crate::ui;
use crate::Context;
use terrakit::{
    flatten, parse_plan, ChangeAction, ChangeDescriptor, CommandOptions, Error, Terraform,
};

/// Name of the intermediate plan file written into the working directory.
pub(crate) const PLAN_FILE: &str = "terrawatch.tfplan";

pub fn run(ctx: &Context, args: PlanArgs) -> Result<()> {
    let config = Config::load()?;
    let terraform = super::terraform_client(&config, &args.chdir, ctx.verbose > 0)?;
    let options = plan_options(&args.vars, &args.var_files, &config)?;

    let result = pending_changes(&terraform, &options);
    cleanup_plan(&args.chdir);
    let pending = result?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&pending)?);
        return Ok(());
    }

    if pending.is_empty() {
        ui::success("No changes. Infrastructure is up-to-date.");
        return Ok(());
    }

    if ctx.quiet {
        println!("{} pending changes", pending.len());
    } else {
        print_pending(&pending);
    }

    Ok(())
}

/// Build the option set for a plan that saves its output for ingestion.
///
/// Standing var-files from the config come first, then the ones given on
/// the command line, then `--var` pairs in argument order.
pub(crate) fn plan_options(
    vars: &[String],
    var_files: &[String],
    config: &Config,
) -> Result<CommandOptions> {
    let mut options = CommandOptions::new();

    let files: Vec<String> = config
        .var_files
        .iter()
        .chain(var_files.iter())
        .cloned()
        .collect();
    if !files.is_empty() {
        options = options.list("var_file", files);
    }

    for raw in vars {
        let (key, value) = super::parse_var(raw)?;
        options = options.var(key, value);
    }

    Ok(options.scalar("out", PLAN_FILE).scalar("input", "false"))
}

/// Plan, ingest the saved plan, and flatten it into pending changes.
///
/// Entries whose only action is `no-op` describe resources the plan
/// leaves untouched; they are not pending work.
pub(crate) fn pending_changes(
    terraform: &Terraform,
    options: &CommandOptions,
) -> Result<Vec<ChangeDescriptor>> {
    log::info!("Computing pending changes");
    let outcome = terraform.plan(options, None)?;

    if !outcome.success() {
        let category = Error::classify_run_output(&outcome.stderr);
        ui::error(category.description());
        ui::dim(category.advice());
        anyhow::bail!("`{}` exited with status {:?}", outcome.command, outcome.code);
    }

    let json = terraform.show_plan_json(Path::new(PLAN_FILE))?;
    let plan = parse_plan(&json)?;

    Ok(flatten(&plan)
        .into_iter()
        .filter(|descriptor| descriptor.action != ChangeAction::NoOp)
        .collect())
}

/// Remove the intermediate plan file, ignoring a missing one.
pub(crate) fn cleanup_plan(chdir: &Path) {
    let _ = fs::remove_file(chdir.join(PLAN_FILE));
}

/// Render pending changes with per-action markers and totals.
pub(crate) fn print_pending(pending: &[ChangeDescriptor]) {
    ui::header("Pending changes");

    for descriptor in pending {
        println!(
            "  {} {} ({})",
            ui::action_symbol(descriptor.action),
            descriptor.address,
            descriptor.action
        );
    }

    let count = |action: ChangeAction| {
        pending
            .iter()
            .filter(|descriptor| descriptor.action == action)
            .count()
    };

    println!();
    println!(
        "  Plan: {} to create, {} to update, {} to delete",
        count(ChangeAction::Create),
        count(ChangeAction::Update),
        count(ChangeAction::Delete)
    );
}

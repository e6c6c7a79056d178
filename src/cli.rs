use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "terrawatch")]
#[command(version)]
#[command(about = "Terraform apply wrapper with per-resource progress", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the pending changes a fresh plan would apply
    Plan(PlanArgs),

    /// Apply pending changes, tracking each resource individually
    Apply(ApplyArgs),

    /// Show terrawatch and terraform versions
    Version,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct PlanArgs {
    /// Terraform working directory
    #[arg(long, default_value = ".")]
    pub chdir: PathBuf,

    /// Set a terraform variable (KEY=VALUE, repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,

    /// Pass a variable definitions file (repeatable)
    #[arg(long = "var-file", value_name = "FILE")]
    pub var_files: Vec<String>,

    /// Emit pending changes as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Terraform working directory
    #[arg(long, default_value = ".")]
    pub chdir: PathBuf,

    /// Set a terraform variable (KEY=VALUE, repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,

    /// Pass a variable definitions file (repeatable)
    #[arg(long = "var-file", value_name = "FILE")]
    pub var_files: Vec<String>,

    /// Number of resource changes to apply in parallel
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Keep the intermediate plan file after applying
    #[arg(long)]
    pub keep_plan: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_apply_flags_parse() {
        let cli = Cli::parse_from([
            "terrawatch",
            "apply",
            "--chdir",
            "infra",
            "--var",
            "region=eu-west-1",
            "--var-file",
            "base.tfvars",
            "--jobs",
            "8",
            "--yes",
        ]);

        match cli.command {
            Command::Apply(args) => {
                assert_eq!(args.chdir, PathBuf::from("infra"));
                assert_eq!(args.vars, vec!["region=eu-west-1"]);
                assert_eq!(args.var_files, vec!["base.tfvars"]);
                assert_eq!(args.jobs, Some(8));
                assert!(args.yes);
                assert!(!args.keep_plan);
            }
            _ => panic!("expected apply subcommand"),
        }
    }
}

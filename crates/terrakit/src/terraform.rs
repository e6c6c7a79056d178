//! Typed client over the `terraform` binary.

use crate::command::{build, CommandLine};
use crate::error::{Error, Result};
use crate::exec::{execute, ExecConfig, ExecOutcome};
use crate::options::{CommandOptions, OptionValue};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Client for running Terraform subcommands.
///
/// Construction discovers the binary; per-instance settings control the
/// working directory, output passthrough, `-no-color`, and whether runs
/// block or detach.
pub struct Terraform {
    binary: String,
    cwd: Option<PathBuf>,
    silent: bool,
    no_color: bool,
    detach: bool,
}

impl Terraform {
    /// Create a client, discovering the terraform binary.
    ///
    /// Returns an error if terraform is not installed.
    pub fn new() -> Result<Self> {
        Ok(Self::with_binary(find_terraform()?))
    }

    /// Create a client using an explicit binary path.
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            cwd: None,
            silent: false,
            no_color: false,
            detach: false,
        }
    }

    /// Set the working directory for runs.
    pub fn cwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.cwd = Some(path.into());
        self
    }

    /// Suppress passthrough of terraform's output to the terminal.
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Append `-no-color` to every invocation.
    pub fn no_color(mut self, no_color: bool) -> Self {
        self.no_color = no_color;
        self
    }

    /// Spawn runs fire-and-forget instead of blocking.
    pub fn detach(mut self, detach: bool) -> Self {
        self.detach = detach;
        self
    }

    /// Path of the binary this client runs.
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Build the exact command line a subcommand invocation would run.
    ///
    /// The client's `no_color` setting is applied as the final
    /// normalization step before positionals.
    pub fn command_for(
        &self,
        subcommand: &str,
        options: &CommandOptions,
        positionals: &[Option<&str>],
    ) -> Result<CommandLine> {
        let mut options = options.clone();
        options.set("no_color", OptionValue::Flag(self.no_color));
        build(&self.binary, subcommand, &options, positionals)
    }

    /// Run a subcommand with the client's settings.
    pub fn run(
        &self,
        subcommand: &str,
        options: &CommandOptions,
        positionals: &[Option<&str>],
    ) -> Result<ExecOutcome> {
        let command = self.command_for(subcommand, options, positionals)?;
        execute(
            &command,
            &ExecConfig {
                cwd: self.cwd.clone(),
                silent: self.silent,
                detach: self.detach,
            },
        )
    }

    /// Run a subcommand silently and synchronously, regardless of the
    /// client's settings, and fail on a non-zero exit.
    fn run_captured(
        &self,
        subcommand: &str,
        options: &CommandOptions,
        positionals: &[Option<&str>],
    ) -> Result<String> {
        let command = self.command_for(subcommand, options, positionals)?;
        let outcome = execute(
            &command,
            &ExecConfig {
                cwd: self.cwd.clone(),
                silent: true,
                detach: false,
            },
        )?;

        if !outcome.success() {
            return Err(Error::CommandFailed {
                message: format!("`{}` exited with {:?}", outcome.command, outcome.code),
                stderr: outcome.stderr,
            });
        }

        Ok(outcome.stdout)
    }

    /// Terraform's version, stripped of the banner
    /// (`Terraform v1.7.0` → `1.7.0`).
    pub fn version(&self) -> Result<String> {
        let stdout = self.run_captured("--version", &CommandOptions::new(), &[])?;
        parse_version(&stdout)
    }

    /// Run `show -json` on a saved plan and return the raw document.
    pub fn show_plan_json(&self, plan_path: &Path) -> Result<String> {
        let options = CommandOptions::new().flag("json", true);
        let path = plan_path.to_string_lossy();
        self.run_captured("show", &options, &[Some(path.as_ref())])
    }

    pub fn init(
        &self,
        options: &CommandOptions,
        source: Option<&str>,
        path: Option<&str>,
    ) -> Result<ExecOutcome> {
        self.run("init", options, &[source, path])
    }

    pub fn plan(&self, options: &CommandOptions, dir_or_plan: Option<&str>) -> Result<ExecOutcome> {
        self.run("plan", options, &[dir_or_plan])
    }

    pub fn apply(
        &self,
        options: &CommandOptions,
        dir_or_plan: Option<&str>,
    ) -> Result<ExecOutcome> {
        self.run("apply", options, &[dir_or_plan])
    }

    pub fn destroy(&self, options: &CommandOptions, dir: Option<&str>) -> Result<ExecOutcome> {
        self.run("destroy", options, &[dir])
    }

    pub fn refresh(&self, options: &CommandOptions, dir: Option<&str>) -> Result<ExecOutcome> {
        self.run("refresh", options, &[dir])
    }

    pub fn validate(&self, options: &CommandOptions, path: Option<&str>) -> Result<ExecOutcome> {
        self.run("validate", options, &[path])
    }

    pub fn show(&self, options: &CommandOptions, path: Option<&str>) -> Result<ExecOutcome> {
        self.run("show", options, &[path])
    }

    pub fn output(&self, options: &CommandOptions, name: Option<&str>) -> Result<ExecOutcome> {
        self.run("output", options, &[name])
    }

    pub fn fmt(&self, options: &CommandOptions, dir: Option<&str>) -> Result<ExecOutcome> {
        self.run("fmt", options, &[dir])
    }

    pub fn get(&self, options: &CommandOptions, path: Option<&str>) -> Result<ExecOutcome> {
        self.run("get", options, &[path])
    }

    pub fn graph(&self, options: &CommandOptions, dir: Option<&str>) -> Result<ExecOutcome> {
        self.run("graph", options, &[dir])
    }

    pub fn console(&self, options: &CommandOptions, dir: Option<&str>) -> Result<ExecOutcome> {
        self.run("console", options, &[dir])
    }

    pub fn import(
        &self,
        options: &CommandOptions,
        addr: &str,
        id: Option<&str>,
    ) -> Result<ExecOutcome> {
        self.run("import", options, &[Some(addr), id])
    }

    pub fn taint(&self, options: &CommandOptions, name: &str) -> Result<ExecOutcome> {
        self.run("taint", options, &[Some(name)])
    }

    pub fn untaint(&self, options: &CommandOptions, name: &str) -> Result<ExecOutcome> {
        self.run("untaint", options, &[Some(name)])
    }
}

/// Find the terraform executable path.
fn find_terraform() -> Result<String> {
    // Check common locations
    let paths = [
        "/opt/homebrew/bin/terraform", // Apple Silicon
        "/usr/local/bin/terraform",    // Intel / Linux
        "/usr/bin/terraform",          // distro packages
    ];

    for path in &paths {
        if Path::new(path).exists() {
            return Ok(path.to_string());
        }
    }

    // Try which
    let output = Command::new("which")
        .arg("terraform")
        .output()
        .map_err(|_| Error::TerraformNotFound)?;

    if output.status.success() {
        let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !path.is_empty() {
            return Ok(path);
        }
    }

    Err(Error::TerraformNotFound)
}

/// Strip the version banner down to the bare version string.
fn parse_version(stdout: &str) -> Result<String> {
    let first_line = stdout.lines().next().unwrap_or_default();

    first_line
        .split_whitespace()
        .nth(1)
        .and_then(|word| word.strip_prefix('v'))
        .map(str::to_string)
        .ok_or_else(|| Error::VersionParse {
            output: first_line.to_string(),
        })
}

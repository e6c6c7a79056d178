//! Command-line construction for Terraform invocations.

use crate::error::{Error, Result};
use crate::options::{normalize_name, CommandOptions, OptionValue};
use std::fmt;

/// An ordered, fully rendered command line.
///
/// Tokens are emitted deterministically: program, subcommand, option
/// tokens in option insertion order, then positionals. The rendered
/// string is what actually runs and what execution outcomes report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    tokens: Vec<String>,
}

impl CommandLine {
    /// The ordered token list.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The full command string, tokens joined by single spaces.
    pub fn rendered(&self) -> String {
        self.tokens.join(" ")
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rendered())
    }
}

/// Build a command line for a subcommand invocation.
///
/// Absent positionals are skipped entirely, never rendered as empty
/// tokens, wherever they occur in the list.
///
/// Fails fast on option values that would render into malformed tokens
/// rather than emitting them.
pub fn build(
    program: &str,
    subcommand: &str,
    options: &CommandOptions,
    positionals: &[Option<&str>],
) -> Result<CommandLine> {
    let mut tokens = vec![program.to_string(), subcommand.to_string()];

    for (name, value) in options.iter() {
        if name.is_empty() {
            return Err(Error::InvalidOption {
                message: "empty option name".to_string(),
            });
        }
        let name = normalize_name(name);

        match value {
            OptionValue::VarMap(pairs) => {
                for (key, val) in pairs {
                    if key.contains('\'') || val.contains('\'') {
                        return Err(Error::InvalidOption {
                            message: format!(
                                "{name} pair {key:?} contains a single quote"
                            ),
                        });
                    }
                    tokens.push(format!("-{name} '{key}={val}'"));
                }
            }
            OptionValue::Flag(enabled) => {
                if *enabled {
                    tokens.push(format!("-{name}"));
                }
            }
            OptionValue::List(items) => {
                for item in items {
                    tokens.push(format!("-{name}={item}"));
                }
            }
            OptionValue::Scalar(val) => {
                tokens.push(format!("-{name}={val}"));
            }
        }
    }

    tokens.extend(positionals.iter().flatten().map(|p| p.to_string()));

    Ok(CommandLine { tokens })
}

pub mod apply;
pub mod plan;
pub mod version;

use crate::config::Config;
use anyhow::{Context, Result};
use std::path::Path;
use terrakit::Terraform;

/// Build a terraform client from config and CLI flags.
///
/// Verbose runs pass terraform's own output through to the terminal;
/// otherwise it is captured silently and only surfaced on failure.
pub(crate) fn terraform_client(config: &Config, chdir: &Path, verbose: bool) -> Result<Terraform> {
    let terraform = match &config.binary {
        Some(binary) => Terraform::with_binary(binary),
        None => Terraform::new()?,
    };

    Ok(terraform
        .cwd(chdir)
        .silent(!verbose)
        .no_color(config.no_color))
}

/// Split a KEY=VALUE variable argument.
pub(crate) fn parse_var(raw: &str) -> Result<(String, String)> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .with_context(|| format!("invalid --var {raw:?}, expected KEY=VALUE"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var() {
        assert_eq!(
            parse_var("region=eu-west-1").unwrap(),
            ("region".to_string(), "eu-west-1".to_string())
        );
        // Only the first '=' splits; values may contain more.
        assert_eq!(
            parse_var("tags=a=b").unwrap(),
            ("tags".to_string(), "a=b".to_string())
        );
        assert!(parse_var("no-equals").is_err());
    }
}

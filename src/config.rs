use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("terrawatch"))
}

/// User configuration from `~/.config/terrawatch/config.toml`.
///
/// Every field has a default, and a missing file yields the default
/// configuration, so a bare install works without any setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Explicit path to the terraform binary (discovered when unset)
    #[serde(default)]
    pub binary: Option<String>,

    /// Append `-no-color` to every terraform invocation
    #[serde(default)]
    pub no_color: bool,

    /// Default number of parallel resource applies
    #[serde(default = "default_jobs")]
    pub jobs: usize,

    /// Variable definition files passed to every plan
    #[serde(default)]
    pub var_files: Vec<String>,
}

fn default_jobs() -> usize {
    4
}

impl Default for Config {
    fn default() -> Self {
        Self {
            binary: None,
            no_color: false,
            jobs: default_jobs(),
            var_files: Vec::new(),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if the file doesn't exist
    pub fn load() -> Result<Self> {
        let path = config_dir()?.join("config.toml");

        if !path.exists() {
            log::debug!("Config file does not exist, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.binary, None);
        assert!(!config.no_color);
        assert_eq!(config.jobs, 4);
        assert!(config.var_files.is_empty());
    }

    #[test]
    fn test_parse_partial_config() {
        let config: Config = toml::from_str(
            r#"
            no_color = true
            var_files = ["base.tfvars"]
            "#,
        )
        .unwrap();

        assert!(config.no_color);
        assert_eq!(config.var_files, vec!["base.tfvars"]);
        // Unset fields fall back to defaults.
        assert_eq!(config.jobs, 4);
        assert_eq!(config.binary, None);
    }

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            binary = "/usr/local/bin/terraform"
            no_color = false
            jobs = 8
            var_files = ["a.tfvars", "b.tfvars"]
            "#,
        )
        .unwrap();

        assert_eq!(config.binary.as_deref(), Some("/usr/local/bin/terraform"));
        assert_eq!(config.jobs, 8);
        assert_eq!(config.var_files.len(), 2);
    }
}

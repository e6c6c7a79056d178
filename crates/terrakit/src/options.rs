//! Structured command-line options for Terraform subcommands.
//!
//! Options are held as a tagged value per name instead of loose strings,
//! so the command builder can match exhaustively on the value kind when
//! rendering tokens.

use serde::{Deserialize, Serialize};

/// The value of a single option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionValue {
    /// A bare flag. Emitted as `-name` when true, nothing when false.
    Flag(bool),
    /// A single value. Emitted as `-name=value`.
    Scalar(String),
    /// A repeatable value. Emitted as `-name=item` once per element.
    List(Vec<String>),
    /// Key/value substitution pairs. Emitted as `-name 'key=value'` once
    /// per pair, in pair order. Used for `-var`.
    VarMap(Vec<(String, String)>),
}

/// An insertion-ordered set of options for one subcommand invocation.
///
/// Token emission follows the order options were first set; setting an
/// existing name again replaces its value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOptions {
    entries: Vec<(String, OptionValue)>,
}

impl CommandOptions {
    /// Create an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, replacing the value in place if the name exists.
    pub fn set(&mut self, name: impl Into<String>, value: OptionValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Set a boolean flag.
    pub fn flag(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.set(name, OptionValue::Flag(enabled));
        self
    }

    /// Set a scalar option.
    pub fn scalar(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, OptionValue::Scalar(value.into()));
        self
    }

    /// Set a repeatable option.
    pub fn list<I, S>(mut self, name: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(
            name,
            OptionValue::List(items.into_iter().map(Into::into).collect()),
        );
        self
    }

    /// Add a `key=value` substitution pair to the `var` option.
    pub fn var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let pair = (key.into(), value.into());
        match self.entries.iter_mut().find(|(n, _)| n == "var") {
            Some((_, OptionValue::VarMap(pairs))) => pairs.push(pair),
            Some(entry) => entry.1 = OptionValue::VarMap(vec![pair]),
            None => self
                .entries
                .push(("var".to_string(), OptionValue::VarMap(vec![pair]))),
        }
        self
    }

    /// Get the value for a name, if set.
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(String, OptionValue)> {
        self.entries.iter()
    }

    /// Check if no options are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Normalize an option name for emission.
///
/// Replaces only the first underscore with a hyphen (`var_file` →
/// `var-file`). This intentionally mirrors the narrow single-substitution
/// behavior the option names were designed around; it is not a general
/// snake-to-kebab conversion.
pub fn normalize_name(name: &str) -> String {
    name.replacen('_', "-", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_first_underscore_only() {
        assert_eq!(normalize_name("var_file"), "var-file");
        assert_eq!(normalize_name("no_color"), "no-color");
        assert_eq!(normalize_name("state"), "state");
        // Only the first underscore is touched.
        assert_eq!(normalize_name("a_b_c"), "a-b_c");
    }

    #[test]
    fn test_set_preserves_position_on_replace() {
        let mut opts = CommandOptions::new();
        opts.set("state", OptionValue::Scalar("a.tfstate".into()));
        opts.set("lock", OptionValue::Flag(true));
        opts.set("state", OptionValue::Scalar("b.tfstate".into()));

        let names: Vec<&str> = opts.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["state", "lock"]);
        assert_eq!(
            opts.get("state"),
            Some(&OptionValue::Scalar("b.tfstate".into()))
        );
    }

    #[test]
    fn test_var_pairs_accumulate_in_order() {
        let opts = CommandOptions::new().var("foo", "bar").var("bah", "boo");
        match opts.get("var") {
            Some(OptionValue::VarMap(pairs)) => {
                assert_eq!(
                    pairs,
                    &vec![
                        ("foo".to_string(), "bar".to_string()),
                        ("bah".to_string(), "boo".to_string())
                    ]
                );
            }
            other => panic!("expected VarMap, got {other:?}"),
        }
    }
}

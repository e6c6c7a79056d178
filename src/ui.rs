#![allow(dead_code)]

use colored::Colorize;
use terrakit::ChangeAction;

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue(), msg);
}

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning message
pub fn warn(msg: &str) {
    println!("{} {}", "⚠".yellow(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a dim/muted message
pub fn dim(msg: &str) {
    println!("  {}", msg.dimmed());
}

/// Print a header/title
pub fn header(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(title.len()).dimmed());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", key.dimmed(), value);
}

/// Colored one-character marker for a change action
pub fn action_symbol(action: ChangeAction) -> String {
    match action {
        ChangeAction::Create => "+".green().to_string(),
        ChangeAction::Update => "~".yellow().to_string(),
        ChangeAction::Delete => "-".red().to_string(),
        ChangeAction::Read => "<".cyan().to_string(),
        ChangeAction::NoOp => "·".dimmed().to_string(),
    }
}

/// Format elapsed milliseconds for display ("850ms", "3.2s", "2m05s")
pub fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        format!("{ms}ms")
    } else if ms < 60_000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        format!("{}m{:02}s", ms / 60_000, (ms % 60_000) / 1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(850), "850ms");
        assert_eq!(format_duration(3200), "3.2s");
        assert_eq!(format_duration(125_000), "2m05s");
    }
}

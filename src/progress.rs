//! Progress indicators for the terrawatch CLI.

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar for applying a known number of changes.
pub fn bar(len: u64, prefix: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template("  {prefix:.cyan} [{bar:30}] {pos}/{len} {msg}")
            .expect("static progress template")
            .progress_chars("=> "),
    );
    pb.set_prefix(prefix.to_string());
    pb
}

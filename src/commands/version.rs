//! `terrawatch version` - report our version and terraform's.

use anyhow::Result;
use terrakit::Terraform;

use crate::ui;

pub fn run() -> Result<()> {
    println!("terrawatch {}", env!("CARGO_PKG_VERSION"));

    match Terraform::new() {
        Ok(terraform) => {
            ui::kv("terraform", &terraform.version()?);
            ui::kv("binary", terraform.binary());
        }
        Err(_) => ui::warn("terraform not found on this system"),
    }

    Ok(())
}

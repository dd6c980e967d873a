use crate::config::write_default_config;
use anyhow::{Context, Result};
use std::path::Path;

pub fn init_config_in(dir: &Path, force: bool) -> Result<()> {
    let path = write_default_config(dir, force)?;
    println!("Created {}", path.display());
    Ok(())
}

pub fn init_config(force: bool) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    init_config_in(&cwd, force)
}

//! Local app directory under ~/.fintrack.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub fn fintrack_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".fintrack"))
}

pub fn ensure_fintrack_home() -> Result<PathBuf> {
    let dir = fintrack_home()?;
    if !dir.exists() {
        fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    Ok(dir)
}

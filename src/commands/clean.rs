//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Jekyll;

/// Delete the public directory
pub fn run(jekyll: &Jekyll) -> Result<()> {
    if jekyll.public_dir.exists() {
        fs::remove_dir_all(&jekyll.public_dir)?;
        tracing::info!("Deleted: {:?}", jekyll.public_dir);
    }
    Ok(())
}

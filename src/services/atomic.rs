//! Atomic file writes shared by the layout store, config and snippet export.

use anyhow::{Context, Result};
use std::path::Path;

/// Writes `content` to `path` through a temp file + rename.
///
/// The target is never left half-written: readers see either the old file or
/// the complete new one.
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let mut temp_name = path
        .file_name()
        .context("Target path has no file name")?
        .to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    // Write to temp file
    std::fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write to temporary file: {}", temp_path.display()))?;

    // Atomic rename
    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temporary file to: {}", path.display()))?;

    Ok(())
}

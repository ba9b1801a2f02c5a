//! Hardware template discovery.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::models::HardwareProfile;
use crate::parser::parse_hardware_profile;

/// Lists the hardware profiles of every `*.yaml` template in `dir`.
///
/// A missing directory yields an empty list. Unreadable files are logged and
/// skipped. Profiles are sorted by id.
pub fn list_hardware_profiles(dir: &Path) -> Result<Vec<HardwareProfile>> {
    if !dir.exists() {
        debug!(dir = %dir.display(), "hardware directory does not exist");
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read hardware directory: {}", dir.display()))?;

    let mut profiles = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        match fs::read_to_string(&path) {
            Ok(content) => profiles.push(parse_hardware_profile(file_name, &content)),
            Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable hardware template"),
        }
    }

    profiles.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(profiles)
}

/// Loads the profile of a single template file.
pub fn load_hardware_profile(path: &Path) -> Result<HardwareProfile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read hardware template: {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("Hardware template path has no file name")?;
    Ok(parse_hardware_profile(file_name, &content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_sorted_and_filtered() -> Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join("zeta.yaml"), "# Name: Zeta\n")?;
        fs::write(dir.path().join("alpha-one.yaml"), "# Resolution: 480x320\n")?;
        fs::write(dir.path().join("readme.md"), "# Name: not a template\n")?;

        let profiles = list_hardware_profiles(dir.path())?;

        let ids: Vec<_> = profiles.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha_one", "zeta"]);
        assert_eq!(profiles[0].resolution.width, 480);
        assert_eq!(profiles[1].name, "Zeta");
        Ok(())
    }

    #[test]
    fn test_missing_directory_is_empty() -> Result<()> {
        let dir = TempDir::new()?;
        assert!(list_hardware_profiles(&dir.path().join("nope"))?.is_empty());
        Ok(())
    }

    #[test]
    fn test_load_single_profile() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("panel.yaml");
        fs::write(&path, "# Resolution: 1024x600\n")?;

        let profile = load_hardware_profile(&path)?;
        assert_eq!(profile.id, "panel");
        assert_eq!(profile.resolution.height, 600);
        assert!(load_hardware_profile(&dir.path().join("absent.yaml")).is_err());
        Ok(())
    }
}

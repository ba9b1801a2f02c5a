//! Hardware template commands.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::models::HardwareProfile;
use crate::parser::hardware::validate_template;
use crate::services::{list_hardware_profiles, load_hardware_profile};

/// List hardware profiles found in the templates directory
#[derive(Debug, Clone, Args)]
pub struct HardwareArgs {
    /// Templates directory (defaults to the configured hardware directory)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Check that a single template can receive a generated lambda
    #[arg(long, value_name = "FILE", conflicts_with = "dir")]
    pub check: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl HardwareArgs {
    /// Execute the hardware command
    pub fn execute(&self) -> CliResult<()> {
        if let Some(path) = &self.check {
            return self.check_template(path);
        }

        let dir = match &self.dir {
            Some(dir) => dir.clone(),
            None => Config::load()
                .and_then(|config| config.hardware_dir())
                .map_err(|e| CliError::io(format!("Failed to resolve hardware directory: {e:#}")))?,
        };

        let profiles = list_hardware_profiles(&dir)
            .map_err(|e| CliError::io(format!("Failed to list hardware templates: {e:#}")))?;

        if self.json {
            return print_json(&profiles);
        }

        if profiles.is_empty() {
            println!("No hardware templates found in {}", dir.display());
        }
        for profile in &profiles {
            print_profile(profile);
        }

        Ok(())
    }

    fn check_template(&self, path: &Path) -> CliResult<()> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::io(format!("Failed to read {}: {e}", path.display())))?;
        validate_template(&content).map_err(|e| CliError::validation(format!("{e:#}")))?;

        let profile = load_hardware_profile(path)
            .map_err(|e| CliError::io(format!("Failed to load hardware template: {e:#}")))?;
        if self.json {
            return print_json(&profile);
        }
        println!("✓ Template is valid");
        print_profile(&profile);
        Ok(())
    }
}

fn print_profile(profile: &HardwareProfile) {
    let features: Vec<&str> = profile
        .features
        .iter()
        .filter(|(_, enabled)| **enabled)
        .map(|(name, _)| name.as_str())
        .collect();
    println!(
        "{:<24} {:<28} {}x{} {:?}  [{}]",
        profile.id,
        profile.name,
        profile.resolution.width,
        profile.resolution.height,
        profile.shape,
        features.join(", ")
    );
}

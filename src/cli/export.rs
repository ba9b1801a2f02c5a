//! Export command for generating an ESPHome YAML snippet.

use std::path::PathBuf;

use clap::Args;

use crate::cli::common::{open_store, CliError, CliResult};
use crate::export;
use crate::models::DeviceConfig;

/// Export a layout as an ESPHome YAML snippet
#[derive(Debug, Clone, Args)]
#[command(group(clap::ArgGroup::new("source").required(true).args(["layout", "file"])))]
pub struct ExportArgs {
    /// Id of a stored layout
    #[arg(short, long, value_name = "ID")]
    pub layout: Option<String>,

    /// Layout JSON file
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Write the snippet to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self, layouts_dir: Option<&PathBuf>) -> CliResult<()> {
        let device = self.load_device(layouts_dir)?;

        match &self.output {
            Some(path) => {
                export::write_snippet(&device, path)
                    .map_err(|e| CliError::io(format!("Failed to write snippet: {e:#}")))?;
                println!("✓ Exported layout '{}' to: {}", device.device_id, path.display());
            }
            None => print!("{}", export::generate_snippet(&device)),
        }

        Ok(())
    }

    fn load_device(&self, layouts_dir: Option<&PathBuf>) -> CliResult<DeviceConfig> {
        if let Some(path) = &self.file {
            let content = std::fs::read_to_string(path)
                .map_err(|e| CliError::io(format!("Failed to read {}: {e}", path.display())))?;
            return serde_json::from_str(&content)
                .map_err(|e| CliError::validation(format!("Invalid layout JSON: {e}")));
        }

        let id = self
            .layout
            .as_deref()
            .ok_or_else(|| CliError::validation("Either --layout or --file is required"))?;
        open_store(layouts_dir)?
            .get(id)?
            .ok_or_else(|| CliError::validation(format!("not_found: layout '{id}' not found")))
    }
}

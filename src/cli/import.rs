//! Import command for turning a YAML snippet back into a layout.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::cli::common::{open_store, print_json, CliError, CliResult};
use crate::config::Config;
use crate::models::{Canvas, DeviceConfig};
use crate::parser;
use crate::services::load_hardware_profile;

/// Import an ESPHome YAML snippet as a layout
#[derive(Debug, Clone, Args)]
pub struct ImportArgs {
    /// YAML snippet to import ("-" reads stdin)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Hardware template whose resolution is used as the canvas
    #[arg(long, value_name = "FILE")]
    pub hardware: Option<PathBuf>,

    /// Canvas size, e.g. 800x480 (overrides --hardware)
    #[arg(long, value_name = "WxH")]
    pub canvas: Option<String>,

    /// Store the imported layout under this id
    #[arg(long, value_name = "ID")]
    pub save_as: Option<String>,

    /// Print the layout as JSON
    #[arg(long)]
    pub json: bool,
}

impl ImportArgs {
    /// Execute the import command
    pub fn execute(&self, layouts_dir: Option<&PathBuf>) -> CliResult<()> {
        let snippet = read_input(&self.file)?;
        let canvas = self.resolve_canvas()?;

        let device = match &self.save_as {
            Some(id) => open_store(layouts_dir)?.import_snippet(id, &snippet, &canvas)?,
            None => parser::yaml_to_layout(&snippet, &canvas)
                .map_err(CliError::import_rejected)?,
        };

        if self.json {
            return print_json(&device);
        }

        print_summary(&device, &canvas);
        if let Some(id) = &self.save_as {
            println!("✓ Saved as layout '{}'", device.device_id);
            if device.device_id != *id {
                println!("  (id sanitized from '{id}')");
            }
        }
        Ok(())
    }

    /// Canvas precedence: `--canvas`, then `--hardware`, then the config.
    fn resolve_canvas(&self) -> CliResult<Canvas> {
        if let Some(raw) = &self.canvas {
            return raw.parse().map_err(|e| CliError::validation(format!("{e:#}")));
        }

        if let Some(path) = &self.hardware {
            let profile = load_hardware_profile(path)
                .map_err(|e| CliError::io(format!("Failed to load hardware template: {e:#}")))?;
            return profile.canvas().ok_or_else(|| {
                CliError::validation(format!(
                    "Hardware template {} has an invalid resolution",
                    path.display()
                ))
            });
        }

        Config::load()
            .and_then(|config| config.canvas())
            .map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))
    }
}

fn read_input(path: &Path) -> CliResult<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| CliError::io(format!("Failed to read stdin: {e}")))?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("Failed to read {}: {e}", path.display())))
}

fn print_summary(device: &DeviceConfig, canvas: &Canvas) {
    println!(
        "✓ Imported {} page(s), {} widget(s) on a {canvas} canvas",
        device.pages.len(),
        device.widget_count()
    );
    for page in &device.pages {
        println!("  {:<10} {:<12} {} widget(s)", page.id, page.name, page.widgets.len());
        for widget in &page.widgets {
            println!(
                "    {:<14} {:<12} {}x{} at ({}, {})",
                widget.id, widget.widget_type, widget.width, widget.height, widget.x, widget.y
            );
        }
    }
}

//! Layout management commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::common::{open_store, print_json, CliError, CliResult};

/// Manage stored layouts
#[derive(Debug, Clone, Args)]
pub struct LayoutsArgs {
    /// Layout operation
    #[command(subcommand)]
    pub command: LayoutsCommand,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Layout operations.
#[derive(Debug, Clone, Subcommand)]
pub enum LayoutsCommand {
    /// List stored layouts, newest first
    List,
    /// Show one layout
    Show {
        /// Layout id
        id: String,
    },
    /// Create an empty layout
    Create {
        /// Layout id
        id: String,
        /// Display name (defaults to the id)
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete a layout
    Delete {
        /// Layout id
        id: String,
    },
}

impl LayoutsArgs {
    /// Execute the layouts command
    pub fn execute(&self, layouts_dir: Option<&PathBuf>) -> CliResult<()> {
        let store = open_store(layouts_dir)?;

        match &self.command {
            LayoutsCommand::List => {
                let layouts = store.list()?;
                if self.json {
                    return print_json(&layouts);
                }
                if layouts.is_empty() {
                    println!("No layouts found in {}", store.root().display());
                }
                for summary in &layouts {
                    println!(
                        "{:<20} {:<24} {} page(s), {} widget(s)  {}",
                        summary.id,
                        summary.name,
                        summary.page_count,
                        summary.widget_count,
                        summary.modified
                    );
                }
            }
            LayoutsCommand::Show { id } => {
                let device = store.get(id)?.ok_or_else(|| {
                    CliError::validation(format!("not_found: layout '{id}' not found"))
                })?;
                if self.json {
                    return print_json(&device);
                }
                println!("{} ({})", device.name, device.device_id);
                for (index, page) in device.pages.iter().enumerate() {
                    let marker = if index == device.current_page { "*" } else { " " };
                    println!("{marker} {} {}", page.id, page.name);
                    for widget in &page.widgets {
                        println!(
                            "    {:<14} {:<12} {}x{} at ({}, {})",
                            widget.id,
                            widget.widget_type,
                            widget.width,
                            widget.height,
                            widget.x,
                            widget.y
                        );
                    }
                }
            }
            LayoutsCommand::Create { id, name } => {
                let device = store.create(id, name.as_deref().unwrap_or(id))?;
                if self.json {
                    return print_json(&device);
                }
                println!("✓ Created layout '{}'", device.device_id);
            }
            LayoutsCommand::Delete { id } => {
                store.delete(id)?;
                if self.json {
                    return print_json(&serde_json::json!({ "status": "deleted", "id": id }));
                }
                println!("✓ Deleted layout '{id}'");
            }
        }

        Ok(())
    }
}

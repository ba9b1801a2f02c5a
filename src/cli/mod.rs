//! CLI command handlers for reTerminal Designer.
//!
//! This module provides headless, scriptable access to snippet import and
//! export, layout storage and hardware templates.

pub mod common;
pub mod export;
pub mod hardware;
pub mod import;
pub mod layouts;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use export::ExportArgs;
pub use hardware::HardwareArgs;
pub use import::ImportArgs;
pub use layouts::{LayoutsArgs, LayoutsCommand};

//! Shared CLI error type and exit codes.

use std::fmt;
use std::path::PathBuf;

use crate::config::Config;
use crate::services::{LayoutStore, StoreError};

/// Process exit codes reported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Bad arguments or invalid input
    ValidationError = 1,
    /// Filesystem or serialization failure
    IoError = 2,
    /// The snippet importer rejected the document
    ImportRejected = 3,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by CLI commands, carrying the exit code to report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CliError {
    /// Exit code for the process
    pub exit_code: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Invalid input or arguments.
    pub fn validation(message: impl fmt::Display) -> Self {
        Self {
            exit_code: ExitCode::ValidationError,
            message: message.to_string(),
        }
    }

    /// Filesystem or serialization failure.
    pub fn io(message: impl fmt::Display) -> Self {
        Self {
            exit_code: ExitCode::IoError,
            message: message.to_string(),
        }
    }

    /// Snippet rejected by the importer; the message is the failure code.
    pub fn import_rejected(message: impl fmt::Display) -> Self {
        Self {
            exit_code: ExitCode::ImportRejected,
            message: message.to_string(),
        }
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::Import(import) => Self::import_rejected(import),
            StoreError::Io(e) => Self::io(format!("{e:#}")),
            StoreError::InvalidId
            | StoreError::NotFound(_)
            | StoreError::AlreadyExists(_)
            | StoreError::Protected(_) => Self::validation(format!("{}: {err}", err.code())),
        }
    }
}

/// Result type of CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Opens the layout store, preferring an explicit directory over the config.
pub fn open_store(layouts_dir: Option<&PathBuf>) -> CliResult<LayoutStore> {
    let dir = match layouts_dir {
        Some(dir) => dir.clone(),
        None => Config::load()
            .and_then(|config| config.layouts_dir())
            .map_err(|e| CliError::io(format!("Failed to resolve layouts directory: {e:#}")))?,
    };
    Ok(LayoutStore::open(dir)?)
}

/// Pretty-prints a value as JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ImportError;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(CliError::validation("x").exit_code.code(), 1);
        assert_eq!(CliError::io("x").exit_code.code(), 2);
        assert_eq!(CliError::import_rejected("x").exit_code.code(), 3);
    }

    #[test]
    fn test_store_error_mapping() {
        let err = CliError::from(StoreError::Import(ImportError::NoPagesFound));
        assert_eq!(err.exit_code, ExitCode::ImportRejected);
        assert!(err.message.starts_with("no_pages_found"));

        let err = CliError::from(StoreError::Protected("default".into()));
        assert_eq!(err.exit_code, ExitCode::ValidationError);
        assert!(err.message.starts_with("cannot_delete_default"));
    }
}

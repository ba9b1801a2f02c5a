//! reTerminal Designer Library
//!
//! This library provides the core of the reTerminal Designer backend:
//! reconstructing dashboard layouts from ESPHome YAML snippets, generating
//! snippets from layouts, storing layouts and reading hardware templates.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod models;
pub mod parser;
pub mod services;

#[cfg(feature = "web")]
pub mod web;

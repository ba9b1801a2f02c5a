//! Export functionality for dashboard layouts.
//!
//! Layouts are exported as ESPHome YAML snippets that can be pasted into a
//! device configuration. The snippet embeds one marker comment per widget so
//! it can be imported again later.

pub mod snippet;

pub use snippet::{generate_snippet, write_snippet};

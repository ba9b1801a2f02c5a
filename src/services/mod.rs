//! Service layer for business logic.
//!
//! This module contains services that sit between the pure parser/export
//! code and the binaries: layout storage, hardware template discovery and
//! atomic file writes.

pub mod atomic;
pub mod hardware;
pub mod layouts;

// Re-export commonly used types and functions
pub use hardware::{list_hardware_profiles, load_hardware_profile};
pub use layouts::{LayoutStore, LayoutSummary, StoreError, StoreResult};

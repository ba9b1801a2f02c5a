//! Data models for dashboard layouts, pages, widgets and hardware profiles.
//!
//! This module contains all the core data structures used throughout the application.
//! Models are independent of parsing, storage and transport.

pub mod canvas;
pub mod device;
pub mod hardware;
pub mod widget;

// Re-export all model types
pub use canvas::Canvas;
pub use device::{DeviceConfig, DeviceIdentity, PageConfig};
pub use hardware::{DisplayShape, HardwareProfile, Resolution};
pub use widget::{DefaultProp, PropValue, WidgetConfig, WidgetKind, ICON_DEFAULTS};

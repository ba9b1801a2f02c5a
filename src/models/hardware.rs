//! Hardware profile metadata extracted from device template files.

use crate::models::Canvas;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Physical outline of a display panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayShape {
    /// Rectangular panel
    #[default]
    Rect,
    /// Round panel
    Round,
}

/// Panel resolution in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Horizontal pixels
    pub width: i32,
    /// Vertical pixels
    pub height: i32,
}

/// A hardware template the designer can target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareProfile {
    /// Identifier derived from the file name
    pub id: String,
    /// Display name
    pub name: String,
    /// Whether the template is an ESPHome package
    pub is_package_based: bool,
    /// Relative path of the template file
    pub hardware_package: String,
    /// Panel resolution
    pub resolution: Resolution,
    /// Panel outline
    pub shape: DisplayShape,
    /// Capability flags (`epaper`, `lcd`, `lvgl`, `psram`, `inverted_colors`)
    pub features: BTreeMap<String, bool>,
}

impl HardwareProfile {
    /// Canvas matching this panel, if its resolution is usable.
    #[must_use]
    pub fn canvas(&self) -> Option<Canvas> {
        Canvas::new(self.resolution.width, self.resolution.height).ok()
    }

    /// Whether a capability flag is set.
    #[must_use]
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.get(feature).copied().unwrap_or(false)
    }
}

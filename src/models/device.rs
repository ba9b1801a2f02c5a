//! Page and device (layout) data structures.

use crate::constants::{IMPORTED_DEVICE_ID, IMPORTED_DEVICE_NAME};
use crate::models::WidgetConfig;
use serde::{Deserialize, Serialize};

/// One display page with its widgets in drawing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Page identifier (e.g., "page_0")
    pub id: String,
    /// Display name (e.g., "Page 1")
    pub name: String,
    /// Widgets in the order they were encountered
    #[serde(default)]
    pub widgets: Vec<WidgetConfig>,
}

impl PageConfig {
    /// Creates an empty page named after its numeric index.
    #[must_use]
    pub fn for_index(index: u32) -> Self {
        Self {
            id: format!("page_{index}"),
            name: format!("Page {}", u64::from(index) + 1),
            widgets: Vec::new(),
        }
    }
}

/// Device-level fields of a layout, supplied by whoever assembles it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    /// Device / layout identifier
    pub device_id: String,
    /// Display name
    pub name: String,
    /// API token (filled in by the storage layer, empty otherwise)
    pub api_token: String,
    /// Page shown first
    pub current_page: usize,
}

impl DeviceIdentity {
    /// Creates an identity with an empty token starting on the first page.
    #[must_use]
    pub fn new(device_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            name: name.into(),
            api_token: String::new(),
            current_page: 0,
        }
    }
}

/// The identity the snippet importer stamps on reconstructed layouts.
impl Default for DeviceIdentity {
    fn default() -> Self {
        Self::new(IMPORTED_DEVICE_ID, IMPORTED_DEVICE_NAME)
    }
}

/// A complete layout: a device with ordered pages.
///
/// # Validation
///
/// - At least one page once [`DeviceConfig::ensure_pages`] has run
/// - `current_page` indexes an existing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Device / layout identifier
    pub device_id: String,
    /// API token used by the device to fetch its layout
    #[serde(default)]
    pub api_token: String,
    /// Display name
    pub name: String,
    /// Pages in ascending page-index order
    #[serde(default)]
    pub pages: Vec<PageConfig>,
    /// Page shown first
    #[serde(default)]
    pub current_page: usize,
}

impl DeviceConfig {
    /// Creates a device with no pages from the given identity.
    #[must_use]
    pub fn new(identity: DeviceIdentity) -> Self {
        Self {
            device_id: identity.device_id,
            api_token: identity.api_token,
            name: identity.name,
            pages: Vec::new(),
            current_page: identity.current_page,
        }
    }

    /// Guarantees at least one page and a valid `current_page`.
    pub fn ensure_pages(&mut self) {
        if self.pages.is_empty() {
            self.pages.push(PageConfig::for_index(0));
        }
        if self.current_page >= self.pages.len() {
            self.current_page = 0;
        }
    }

    /// Total number of widgets across all pages.
    #[must_use]
    pub fn widget_count(&self) -> usize {
        self.pages.iter().map(|page| page.widgets.len()).sum()
    }

    /// Iterates over every widget, page by page.
    pub fn widgets(&self) -> impl Iterator<Item = &WidgetConfig> {
        self.pages.iter().flat_map(|page| page.widgets.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_pages_adds_first_page() {
        let mut device = DeviceConfig::new(DeviceIdentity::new("kitchen", "Kitchen"));
        assert!(device.pages.is_empty());

        device.ensure_pages();

        assert_eq!(device.pages.len(), 1);
        assert_eq!(device.pages[0].id, "page_0");
        assert_eq!(device.pages[0].name, "Page 1");
    }

    #[test]
    fn test_ensure_pages_resets_out_of_range_current_page() {
        let mut device = DeviceConfig::new(DeviceIdentity::default());
        device.pages.push(PageConfig::for_index(0));
        device.current_page = 4;

        device.ensure_pages();

        assert_eq!(device.pages.len(), 1);
        assert_eq!(device.current_page, 0);
    }

    #[test]
    fn test_deserialize_tolerates_missing_optional_fields() {
        let device: DeviceConfig =
            serde_json::from_str(r#"{"device_id": "d", "name": "D"}"#).unwrap();
        assert_eq!(device.api_token, "");
        assert!(device.pages.is_empty());
        assert_eq!(device.current_page, 0);
    }

    #[test]
    fn test_default_identity_is_the_import_device() {
        let identity = DeviceIdentity::default();
        assert_eq!(identity.device_id, "reterminal_e1001");
        assert_eq!(identity.name, "reTerminal E1001");
        assert_eq!(identity.api_token, "");
        assert_eq!(identity.current_page, 0);
    }
}

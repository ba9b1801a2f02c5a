//! Parsing of ESPHome YAML snippets and hardware templates.
//!
//! The snippet importer reconstructs a [`DeviceConfig`] from YAML produced by
//! the snippet generator and possibly edited by hand. It only understands
//! documents that roughly follow the generated pattern:
//!
//! ```yaml
//! display:
//!   - platform: waveshare_epaper
//!     id: epaper_display
//!     lambda: |-
//!       int page = id(display_page);
//!       if (page == 0) {
//!         // widget:label id:w_title type:label x:10 y:20 w:200 h:40 text:"Hello"
//!         it.print(10, 20, id(font_normal), "Hello");
//!       }
//! ```
//!
//! Anything structurally different fails with one of the [`ImportError`]
//! codes instead of producing a guessed layout.

pub mod assemble;
pub mod display_block;
pub mod document;
pub mod hardware;
pub mod lambda;
pub mod widget_line;

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::models::{Canvas, DeviceConfig, DeviceIdentity};

// Re-export commonly used functions
pub use hardware::parse_hardware_profile;
pub use widget_line::ParsedWidget;

/// Reasons a snippet import is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    /// The text is not valid YAML.
    #[error("invalid_document: {0}")]
    InvalidDocument(String),
    /// No `display` block with `id: epaper_display` and a string `lambda`.
    #[error("unrecognized_display_structure: no display block with id 'epaper_display' and a lambda")]
    UnrecognizedDisplayStructure,
    /// The lambda has no `if (page == N) {` block.
    #[error("no_pages_found: the display lambda contains no 'if (page == N) {{' block")]
    NoPagesFound,
}

impl ImportError {
    /// Stable machine-readable code reported to callers.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidDocument(_) => "invalid_document",
            Self::UnrecognizedDisplayStructure => "unrecognized_display_structure",
            Self::NoPagesFound => "no_pages_found",
        }
    }
}

/// Reconstructs a layout from a YAML snippet using the import device identity.
///
/// # Errors
///
/// Returns errors for:
/// - Text that is not valid YAML (`invalid_document`)
/// - No qualifying display block (`unrecognized_display_structure`)
/// - No page blocks in the lambda (`no_pages_found`)
pub fn yaml_to_layout(snippet: &str, canvas: &Canvas) -> Result<DeviceConfig, ImportError> {
    yaml_to_layout_with(snippet, canvas, DeviceIdentity::default())
}

/// Reconstructs a layout from a YAML snippet with caller-supplied device fields.
///
/// Lines that look like widget markers but carry malformed fields are skipped;
/// the rest of the snippet is still imported.
pub fn yaml_to_layout_with(
    snippet: &str,
    canvas: &Canvas,
    identity: DeviceIdentity,
) -> Result<DeviceConfig, ImportError> {
    let document = document::load_document(snippet)?;
    let source = display_block::lambda_source(&document)?;

    let page_lines = lambda::segment_lambda(source);
    if page_lines.is_empty() {
        return Err(ImportError::NoPagesFound);
    }

    let mut pages = BTreeMap::new();
    for (index, lines) in page_lines {
        let mut widgets = Vec::new();
        for line in &lines {
            match widget_line::parse_widget_line(line) {
                Ok(Some(parsed)) => widgets.push(assemble::materialize_widget(parsed, canvas)),
                Ok(None) => {}
                Err(e) => debug!(page = index, line = %line, error = %e, "skipping malformed widget line"),
            }
        }
        pages.insert(index, widgets);
    }

    let device = assemble::assemble_device(pages, identity);
    info!(
        pages = device.pages.len(),
        widgets = device.widget_count(),
        "imported layout from snippet"
    );
    Ok(device)
}

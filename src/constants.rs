//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the identifiers shared between the
//! snippet generator and the snippet importer.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "reTerminal Designer";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "reterminal-designer";

/// Name of the per-user configuration directory.
pub const CONFIG_DIR_NAME: &str = "ReTerminalDesigner";

/// ESPHome `id` of the display block that owns the drawing lambda.
pub const DISPLAY_ID: &str = "epaper_display";

/// ESPHome global holding the currently shown page.
pub const PAGE_GLOBAL_ID: &str = "display_page";

/// Device id assigned to layouts reconstructed from a snippet.
pub const IMPORTED_DEVICE_ID: &str = "reterminal_e1001";

/// Display name assigned to layouts reconstructed from a snippet.
pub const IMPORTED_DEVICE_NAME: &str = "reTerminal E1001";

/// Layout id of the layout the editor opens by default.
pub const DEFAULT_LAYOUT_ID: &str = "default";

/// Display name of the default layout.
pub const DEFAULT_LAYOUT_NAME: &str = "Default Layout";

/// Canvas width of the reTerminal E1001 panel.
pub const DEFAULT_CANVAS_WIDTH: i32 = 800;

/// Canvas height of the reTerminal E1001 panel.
pub const DEFAULT_CANVAS_HEIGHT: i32 = 480;

/// Marker a hardware template must contain where the generated lambda goes.
pub const LAMBDA_PLACEHOLDER: &str = "__LAMBDA_PLACEHOLDER__";

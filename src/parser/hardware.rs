//! Hardware template metadata extraction.
//!
//! Templates describe their panel in header comments:
//!
//! ```yaml
//! # Name: reTerminal E1001
//! # Resolution: 800x480
//! # Shape: rect
//! # Inverted: true
//! ```
//!
//! The comments are scanned with regular expressions; the YAML body is only
//! consulted, best effort, for `display[0].dimensions` and the platform.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::constants::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, LAMBDA_PLACEHOLDER};
use crate::models::{DisplayShape, HardwareProfile, Resolution};

use super::document::{load_document, Node};

static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)#\s*Name:\s*(.*)").expect("valid pattern"));
static TARGET_DEVICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)#\s*TARGET DEVICE:\s*(.*)").expect("valid pattern"));
static RESOLUTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)#\s*Resolution:\s*(\d+)x(\d+)").expect("valid pattern"));
static SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)#\s*Shape:\s*(rect|round)").expect("valid pattern"));
static INVERTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)#\s*Inverted:\s*(true|yes|1)").expect("valid pattern"));

/// Profile id for a template file stem.
#[must_use]
pub fn profile_id(stem: &str) -> String {
    stem.replace(['-', '.'], "_")
}

/// Extracts a [`HardwareProfile`] from a template's text.
///
/// `file_name` is the template's file name (e.g. `reterminal_e1001.yaml`);
/// its stem provides the id and the fallback display name.
#[must_use]
pub fn parse_hardware_profile(file_name: &str, content: &str) -> HardwareProfile {
    let stem = file_name.strip_suffix(".yaml").unwrap_or(file_name);

    let mut name = stem.to_string();
    let mut width = DEFAULT_CANVAS_WIDTH;
    let mut height = DEFAULT_CANVAS_HEIGHT;
    let mut shape = DisplayShape::Rect;
    let mut features = BTreeMap::from([("psram".to_string(), true), ("lcd".to_string(), true)]);

    if let Some(caps) = NAME.captures(content) {
        name = caps[1].trim().to_string();
    }
    if let Some(caps) = TARGET_DEVICE.captures(content) {
        name = caps[1].trim().to_string();
    }
    if let Some(caps) = RESOLUTION.captures(content) {
        if let (Ok(w), Ok(h)) = (caps[1].parse(), caps[2].parse()) {
            width = w;
            height = h;
        }
    }
    if let Some(caps) = SHAPE.captures(content) {
        if caps[1].eq_ignore_ascii_case("round") {
            shape = DisplayShape::Round;
        }
    }
    if INVERTED.is_match(content) {
        features.insert("inverted_colors".to_string(), true);
    }

    if content.contains("waveshare_epaper") || content.contains("epaper_spi") {
        features.insert("epaper".to_string(), true);
        features.insert("lcd".to_string(), false);
        features.insert("lvgl".to_string(), content.contains("lvgl:"));
    } else {
        features.insert("lvgl".to_string(), true);
    }

    if let Ok(document) = load_document(content) {
        apply_display_block(&document, &mut width, &mut height, &mut features);
    }

    HardwareProfile {
        id: profile_id(stem),
        name,
        is_package_based: true,
        hardware_package: format!("hardware/{file_name}"),
        resolution: Resolution { width, height },
        shape,
        features,
    }
}

/// Refines the profile from the first display block of the template.
fn apply_display_block(
    document: &Node,
    width: &mut i32,
    height: &mut i32,
    features: &mut BTreeMap<String, bool>,
) {
    let Some(Node::Sequence(blocks)) = document.get("display") else {
        return;
    };
    let Some(display) = blocks.first() else {
        return;
    };

    if let Some(dimensions) = display.get("dimensions") {
        let dim = |key: &str| {
            dimensions
                .get(key)
                .and_then(Node::as_i64)
                .and_then(|v| i32::try_from(v).ok())
        };
        if let Some(w) = dim("width") {
            *width = w;
        }
        if let Some(h) = dim("height") {
            *height = h;
        }
    }

    let platform = display.get("platform").and_then(Node::as_str).unwrap_or_default();
    if platform.contains("epaper") {
        features.insert("epaper".to_string(), true);
        features.insert("lcd".to_string(), false);
        features.insert("inverted_colors".to_string(), true);
    }
}

/// Checks that an uploaded template can receive a generated lambda.
pub fn validate_template(content: &str) -> anyhow::Result<()> {
    if !content.contains(LAMBDA_PLACEHOLDER) {
        anyhow::bail!(
            "Template must contain '{LAMBDA_PLACEHOLDER}' in the display lambda section"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPAPER_TEMPLATE: &str = r"# TARGET DEVICE: Seeed reTerminal E1001
# Name: ignored because target device wins
# Resolution: 800x480
# Shape: rect
display:
  - platform: waveshare_epaper
    id: epaper_display
    model: 7.50inv2
    lambda: |-
      __LAMBDA_PLACEHOLDER__
";

    #[test]
    fn test_epaper_template() {
        let profile = parse_hardware_profile("reterminal-e1001.v2.yaml", EPAPER_TEMPLATE);

        assert_eq!(profile.id, "reterminal_e1001_v2");
        assert_eq!(profile.name, "Seeed reTerminal E1001");
        assert_eq!(profile.hardware_package, "hardware/reterminal-e1001.v2.yaml");
        assert_eq!(profile.resolution, Resolution { width: 800, height: 480 });
        assert_eq!(profile.shape, DisplayShape::Rect);
        assert!(profile.has_feature("epaper"));
        assert!(profile.has_feature("inverted_colors"));
        assert!(profile.has_feature("psram"));
        assert!(!profile.has_feature("lcd"));
        assert!(!profile.has_feature("lvgl"));
        assert!(validate_template(EPAPER_TEMPLATE).is_ok());
    }

    #[test]
    fn test_lcd_template_with_dimensions() {
        let content = "# name: Round Panel\n# shape: ROUND\n# inverted: yes\ndisplay:\n  - platform: ili9xxx\n    dimensions:\n      width: 240\n      height: 240\n";

        let profile = parse_hardware_profile("round.yaml", content);

        assert_eq!(profile.name, "Round Panel");
        assert_eq!(profile.shape, DisplayShape::Round);
        assert_eq!(profile.resolution, Resolution { width: 240, height: 240 });
        assert_eq!(profile.canvas().map(|c| c.width), Some(240));
        assert!(profile.has_feature("lcd"));
        assert!(profile.has_feature("lvgl"));
        assert!(profile.has_feature("inverted_colors"));
        assert!(validate_template(content).is_err());
    }

    #[test]
    fn test_defaults_for_bare_file() {
        let profile = parse_hardware_profile("bare.yaml", "not: [valid");

        assert_eq!(profile.id, "bare");
        assert_eq!(profile.name, "bare");
        assert_eq!(profile.resolution, Resolution { width: 800, height: 480 });
        assert!(profile.has_feature("lcd"));
    }
}

//! ESPHome YAML snippet generation.
//!
//! Every widget is written as a canonical marker comment followed by the C++
//! that draws it. The snippet importer reads the marker comments back, so a
//! generated snippet re-imports to the same widgets. Drawing code never uses
//! `it.printf`, which the importer would pick up as an extra label.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;

use crate::constants::{APP_NAME, DISPLAY_ID, PAGE_GLOBAL_ID};
use crate::models::{DeviceConfig, PropValue, WidgetConfig, WidgetKind};
use crate::parser::widget_line::MARKER_PREFIX;
use crate::services::atomic::atomic_write;

/// Indentation of the lambda body inside the display block.
const LAMBDA_INDENT: &str = "      ";

/// Indentation of statements inside a page block.
const PAGE_INDENT: &str = "  ";

const FONT_NORMAL: &str = "font_normal";
const FONT_SMALL: &str = "font_small";
const FONT_VALUE: &str = "font_value";
const FONT_ICON: &str = "font_mdi_medium";
const TIME_ID: &str = "ha_time";

/// Normalizes free text so it survives the marker and brace-counting rules.
///
/// Double quotes become single quotes, braces become parentheses and runs of
/// whitespace (including newlines) collapse to one space.
#[must_use]
pub fn sanitize_text(value: &str) -> String {
    value
        .replace('"', "'")
        .replace('{', "(")
        .replace('}', ")")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats a marker value, quoting it when it contains spaces.
fn marker_value(value: &str) -> String {
    let clean = sanitize_text(value);
    if clean.contains(' ') {
        format!("\"{clean}\"")
    } else {
        clean
    }
}

/// Formats a marker token value that must stay a single bare word.
fn marker_token(value: &str) -> String {
    sanitize_text(value).replace(' ', "_")
}

/// Escapes text for a C++ string literal.
fn c_string(value: &str) -> String {
    let escaped = sanitize_text(value).replace('\\', "\\\\");
    format!("\"{escaped}\"")
}

/// Single-quotes a YAML scalar.
fn yaml_str(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// ESPHome component id for a Home Assistant entity.
///
/// `sensor.living_room-temp` becomes `sensor_living_room_temp`.
#[must_use]
pub fn entity_component_id(entity_id: &str) -> String {
    entity_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}

/// Whether the widget's value is drawn from a numeric sensor.
fn reads_sensor(widget: &WidgetConfig) -> bool {
    matches!(widget.kind(), Some(WidgetKind::SensorText | WidgetKind::ProgressBar))
        && widget.entity_id.as_deref().is_some_and(|e| !e.trim().is_empty())
}

/// Builds the canonical marker comment for a widget.
#[must_use]
pub fn marker_line(widget: &WidgetConfig) -> String {
    let mut parts = vec![
        format!("{MARKER_PREFIX}{}", marker_token(&widget.widget_type)),
        format!("id:{}", marker_token(&widget.id)),
        format!("type:{}", marker_token(&widget.widget_type)),
        format!("x:{}", widget.x),
        format!("y:{}", widget.y),
        format!("w:{}", widget.width),
        format!("h:{}", widget.height),
    ];

    if let Some(entity) = widget.entity_id.as_deref().filter(|e| !e.trim().is_empty()) {
        parts.push(format!("ent:{}", marker_token(entity)));
    }
    if let Some(text) = widget.prop_str("text").filter(|t| !t.trim().is_empty()) {
        parts.push(format!("text:{}", marker_value(text)));
    }
    if let Some(code) = widget.prop_str("code").filter(|c| !c.trim().is_empty()) {
        parts.push(format!("code:{}", marker_token(code)));
    }
    if let Some(title) = widget.title.as_deref() {
        let clean = sanitize_text(title);
        if !clean.is_empty() {
            parts.push(format!("title:\"{clean}\""));
        }
    }

    parts.join(" ")
}

/// Parses an icon code such as `F0595` into a code point.
fn icon_code_point(code: &str) -> Option<u32> {
    let code = code.trim();
    if code.is_empty() || code.len() > 6 {
        return None;
    }
    u32::from_str_radix(code, 16).ok()
}

/// C++ statements drawing one widget.
fn draw_lines(widget: &WidgetConfig) -> Vec<String> {
    let (x, y, w, h) = (widget.x, widget.y, widget.width, widget.height);
    let text = widget.prop_str("text").filter(|t| !t.trim().is_empty());
    let fill = widget.props.get("fill").and_then(PropValue::as_bool).unwrap_or(false);

    match widget.kind() {
        Some(WidgetKind::SensorText) => {
            let mut lines = Vec::new();
            if let Some(title) = widget.title.as_deref().filter(|t| !t.trim().is_empty()) {
                lines.push(format!("it.print({x}, {y}, id({FONT_SMALL}), {});", c_string(title)));
            }
            if let Some(entity) = widget.entity_id.as_deref().filter(|_| reads_sensor(widget)) {
                let sensor = entity_component_id(entity);
                lines.push("{".to_string());
                lines.push("  char buf[32];".to_string());
                lines.push(format!(
                    "  snprintf(buf, sizeof(buf), \"%.1f\", id({sensor}).state);"
                ));
                lines.push(format!("  it.print({x}, {}, id({FONT_VALUE}), buf);", y + 20));
                lines.push("}".to_string());
            }
            lines
        }
        Some(WidgetKind::Icon | WidgetKind::WeatherIcon) => widget
            .prop_str("code")
            .and_then(icon_code_point)
            .map(|cp| vec![format!("it.print({x}, {y}, id({FONT_ICON}), \"\\U{cp:08X}\");")])
            .unwrap_or_default(),
        Some(WidgetKind::ShapeRect) => {
            let call = if fill { "filled_rectangle" } else { "rectangle" };
            vec![format!("it.{call}({x}, {y}, {w}, {h});")]
        }
        Some(WidgetKind::ShapeCircle) => {
            let r = w.min(h) / 2;
            let call = if fill { "filled_circle" } else { "circle" };
            vec![format!("it.{call}({}, {}, {r});", x + r, y + r)]
        }
        Some(WidgetKind::Line) => vec![format!("it.line({x}, {y}, {}, {y});", x + w)],
        Some(WidgetKind::ProgressBar) => {
            let mut lines = vec![format!("it.rectangle({x}, {y}, {w}, {h});")];
            if let Some(entity) = widget.entity_id.as_deref().filter(|_| reads_sensor(widget)) {
                let sensor = entity_component_id(entity);
                lines.push("{".to_string());
                lines.push(format!(
                    "  float pct = std::max(0.0f, std::min(100.0f, id({sensor}).state));"
                ));
                lines.push(format!(
                    "  it.filled_rectangle({x}, {y}, (int) ({w} * pct / 100.0f), {h});"
                ));
                lines.push("}".to_string());
            }
            lines
        }
        Some(WidgetKind::Datetime) => {
            let time = format!(
                "it.strftime({x}, {y}, id({FONT_NORMAL}), \"%H:%M\", id({TIME_ID}).now());"
            );
            let date = |top: i32, font: &str| {
                format!("it.strftime({x}, {top}, id({font}), \"%d.%m.%Y\", id({TIME_ID}).now());")
            };
            match widget.prop_str("format") {
                Some("time") => vec![time],
                Some("date") => vec![date(y, FONT_NORMAL)],
                _ => vec![time, date(y + 32, FONT_SMALL)],
            }
        }
        Some(WidgetKind::Image | WidgetKind::BatteryIcon) => Vec::new(),
        Some(WidgetKind::Label | WidgetKind::Text) | None => text
            .map(|t| vec![format!("it.print({x}, {y}, id({FONT_NORMAL}), {});", c_string(t))])
            .unwrap_or_default(),
    }
}

/// Generates the full YAML snippet for a layout.
#[must_use]
pub fn generate_snippet(device: &DeviceConfig) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "# {} - generated by {APP_NAME}\n",
        sanitize_text(&device.name)
    ));
    output.push_str("# Widgets are described by '// widget:' comments; keep them when editing.\n\n");

    output.push_str("globals:\n");
    output.push_str(&format!("  - id: {PAGE_GLOBAL_ID}\n"));
    output.push_str("    type: int\n");
    output.push_str("    restore_value: true\n");
    output.push_str("    initial_value: '0'\n\n");

    let sensors: BTreeMap<String, &str> = device
        .widgets()
        .filter(|w| reads_sensor(w))
        .filter_map(|w| w.entity_id.as_deref())
        .map(|entity| (entity_component_id(entity), entity))
        .collect();
    if !sensors.is_empty() {
        output.push_str("sensor:\n");
        for (id, entity) in &sensors {
            output.push_str("  - platform: homeassistant\n");
            output.push_str(&format!("    id: {id}\n"));
            output.push_str(&format!("    entity_id: {}\n", yaml_str(entity)));
            output.push_str("    internal: true\n");
        }
        output.push('\n');
    }

    if device.widgets().any(|w| w.kind() == Some(WidgetKind::Datetime)) {
        output.push_str("time:\n");
        output.push_str("  - platform: homeassistant\n");
        output.push_str(&format!("    id: {TIME_ID}\n\n"));
    }

    output.push_str("display:\n");
    output.push_str("  - platform: waveshare_epaper\n");
    output.push_str(&format!("    id: {DISPLAY_ID}\n"));
    output.push_str("    model: 7.50inv2\n");
    output.push_str("    update_interval: never\n");
    output.push_str("    lambda: |-\n");
    for line in lambda_lines(device) {
        if line.is_empty() {
            output.push('\n');
        } else {
            output.push_str(LAMBDA_INDENT);
            output.push_str(&line);
            output.push('\n');
        }
    }

    output
}

/// Body of the drawing lambda, one statement per line, without indentation.
fn lambda_lines(device: &DeviceConfig) -> Vec<String> {
    let mut lines = vec![format!("int page = id({PAGE_GLOBAL_ID});")];

    for (index, page) in device.pages.iter().enumerate() {
        lines.push(format!("// {}", sanitize_text(&page.name)));
        lines.push(format!("if (page == {index}) {{"));
        for widget in &page.widgets {
            lines.push(format!("{PAGE_INDENT}{}", marker_line(widget)));
            for draw in draw_lines(widget) {
                lines.push(format!("{PAGE_INDENT}{draw}"));
            }
        }
        lines.push("}".to_string());
    }

    lines
}

/// Generates a snippet and writes it to `path` atomically.
pub fn write_snippet(device: &DeviceConfig, path: &Path) -> Result<()> {
    atomic_write(path, &generate_snippet(device))
}

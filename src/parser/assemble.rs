//! Turning parsed widgets into the persistent layout model.

use std::collections::BTreeMap;

use crate::models::{
    Canvas, DeviceConfig, DeviceIdentity, PageConfig, PropValue, WidgetConfig, WidgetKind,
    ICON_DEFAULTS,
};

use super::widget_line::ParsedWidget;

/// Builds a [`WidgetConfig`] from a parsed widget.
///
/// Properties are filled from the kind's default table; a widget with an icon
/// code also gets the icon defaults it does not already have. Literal text and
/// icon code are stored on top. Geometry is clamped to the canvas.
#[must_use]
pub fn materialize_widget(parsed: ParsedWidget, canvas: &Canvas) -> WidgetConfig {
    let mut props: BTreeMap<String, PropValue> = BTreeMap::new();

    if let Some(kind) = WidgetKind::from_tag(&parsed.widget_type) {
        for (key, default) in kind.defaults() {
            props.insert((*key).to_string(), default.to_value());
        }
    }

    if let Some(code) = parsed.code {
        for (key, default) in ICON_DEFAULTS {
            props
                .entry((*key).to_string())
                .or_insert_with(|| default.to_value());
        }
        props.insert("code".to_string(), PropValue::Text(code));
    }

    if let Some(text) = parsed.text {
        props.insert("text".to_string(), PropValue::Text(text));
    }

    let mut widget = WidgetConfig {
        id: parsed.id,
        widget_type: parsed.widget_type,
        x: parsed.x,
        y: parsed.y,
        width: parsed.width,
        height: parsed.height,
        title: parsed.title,
        entity_id: parsed.entity_id,
        icon: None,
        props,
    };
    widget.clamp_to_canvas(canvas);
    widget
}

/// Assembles pages into a device.
///
/// Pages are emitted in ascending index order without renumbering; page ids
/// and names come from the index. The device always ends up with at least
/// one page.
#[must_use]
pub fn assemble_device(
    pages: BTreeMap<u32, Vec<WidgetConfig>>,
    identity: DeviceIdentity,
) -> DeviceConfig {
    let mut device = DeviceConfig::new(identity);

    for (index, widgets) in pages {
        let mut page = PageConfig::for_index(index);
        page.widgets = widgets;
        device.pages.push(page);
    }

    device.ensure_pages();
    device
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(widget_type: &str) -> ParsedWidget {
        ParsedWidget {
            id: "w1".to_string(),
            widget_type: widget_type.to_string(),
            x: 10,
            y: 20,
            width: 200,
            height: 60,
            title: None,
            entity_id: None,
            text: None,
            code: None,
        }
    }

    #[test]
    fn test_label_carries_only_text() {
        let mut p = parsed("label");
        p.text = Some("Hello".to_string());

        let w = materialize_widget(p, &Canvas::default());

        assert_eq!(w.props.len(), 1);
        assert_eq!(w.prop_str("text"), Some("Hello"));
    }

    #[test]
    fn test_sensor_text_defaults() {
        let mut p = parsed("sensor_text");
        p.entity_id = Some("sensor.temp".to_string());

        let w = materialize_widget(p, &Canvas::default());

        assert_eq!(w.entity_id.as_deref(), Some("sensor.temp"));
        assert_eq!(w.props["label_font_size"], PropValue::Int(14));
        assert_eq!(w.props["value_font_size"], PropValue::Int(20));
        assert_eq!(w.prop_str("value_format"), Some("label_value"));
        assert_eq!(w.prop_str("color"), Some("black"));
        assert!(!w.props.contains_key("text"));
    }

    #[test]
    fn test_icon_code_adds_icon_defaults() {
        let mut p = parsed("icon");
        p.code = Some("F0595".to_string());

        let w = materialize_widget(p, &Canvas::default());

        assert_eq!(w.prop_str("code"), Some("F0595"));
        assert_eq!(w.prop_str("font_ref"), Some("font_mdi_medium"));
        assert_eq!(w.props["fit_icon_to_frame"], PropValue::Bool(true));
        assert_eq!(w.props["size"], PropValue::Int(40));
        assert_eq!(w.prop_str("color"), Some("black"));
    }

    #[test]
    fn test_icon_defaults_do_not_override_kind_defaults() {
        let mut p = parsed("weather_icon");
        p.code = Some("F0599".to_string());

        let w = materialize_widget(p, &Canvas::default());

        // weather_icon's own size wins over the generic icon size
        assert_eq!(w.props["size"], PropValue::Int(48));
        assert_eq!(w.prop_str("font_ref"), Some("font_mdi_medium"));
    }

    #[test]
    fn test_unknown_type_is_passed_through() {
        let mut p = parsed("graph");
        p.text = Some("t".to_string());

        let w = materialize_widget(p, &Canvas::default());

        assert_eq!(w.widget_type, "graph");
        assert_eq!(w.props.len(), 1);
    }

    #[test]
    fn test_materialize_clamps_geometry() {
        let mut p = parsed("label");
        p.x = 790;
        p.y = -5;

        let w = materialize_widget(p, &Canvas::new(800, 480).unwrap());

        assert_eq!((w.x, w.y, w.width, w.height), (600, 0, 200, 60));
    }

    #[test]
    fn test_assemble_keeps_index_order_and_gaps() {
        let mut pages = BTreeMap::new();
        pages.insert(2, vec![WidgetConfig::new("b", "label", 0, 0, 10, 10)]);
        pages.insert(0, vec![WidgetConfig::new("a", "label", 0, 0, 10, 10)]);

        let device = assemble_device(pages, DeviceIdentity::default());

        let ids: Vec<_> = device.pages.iter().map(|p| p.id.as_str()).collect();
        let names: Vec<_> = device.pages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(ids, vec!["page_0", "page_2"]);
        assert_eq!(names, vec!["Page 1", "Page 3"]);
        assert_eq!(device.pages[1].widgets[0].id, "b");
        assert_eq!(device.device_id, "reterminal_e1001");
    }

    #[test]
    fn test_assemble_empty_input_still_has_a_page() {
        let device = assemble_device(BTreeMap::new(), DeviceIdentity::new("x", "X"));
        assert_eq!(device.pages.len(), 1);
    }
}

//! Shared test fixtures for integration tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::path::{Path, PathBuf};

use reterminal_designer::models::{
    DeviceConfig, DeviceIdentity, PageConfig, PropValue, WidgetConfig,
};
use tempfile::TempDir;

/// Two pages, one marker widget each, declared out of order.
pub const TWO_PAGE_SNIPPET: &str = r#"globals:
  - id: display_page
    type: int
    initial_value: '0'
display:
  - platform: waveshare_epaper
    id: epaper_display
    update_interval: never
    lambda: |-
      int page = id(display_page);
      if (page == 1) {
        // widget:sensor_text id:w_temp type:sensor_text x:10 y:100 w:220 h:70 ent:sensor.living_temp title:"Living room"
      }
      if (page == 0) {
        // widget:label id:w1 type:label x:10 y:20 w:200 h:40 title:"Hello World" text:"Hello World"
        it.print(10, 20, id(font_normal), "Hello World");
      }
"#;

/// A page block with an inner conditional block holding a widget.
pub const NESTED_SNIPPET: &str = r#"display:
  - platform: waveshare_epaper
    id: epaper_display
    lambda: |-
      if (page == 0) {
        if (id(wifi_ok)) {
          // widget:icon id:w_wifi type:icon x:760 y:0 w:40 h:40 code:F05A9
          it.print(760, 0, id(font_mdi_medium), "\U000F05A9");
        }
        // widget:label id:w_after type:label x:0 y:440 w:300 h:40 text:Footer
      }
      // widget:label id:w_outside type:label x:0 y:0 w:10 h:10
"#;

/// Hand-written page with only an `it.printf` call.
pub const PRINTF_SNIPPET: &str = r#"display:
  - platform: waveshare_epaper
    id: epaper_display
    lambda: |-
      if (page == 0) {
        it.printf(10, 20, id(font_normal), "Status");
      }
"#;

/// Valid YAML without any display block.
pub const NO_DISPLAY_SNIPPET: &str = r"sensor:
  - platform: homeassistant
    id: outside_temp
    entity_id: sensor.outside
";

/// Display block with a different id.
pub const WRONG_DISPLAY_ID_SNIPPET: &str = r"display:
  - platform: waveshare_epaper
    id: some_other_display
    lambda: |-
      if (page == 0) {
      }
";

/// Qualifying display block without page conditionals.
pub const NO_PAGES_SNIPPET: &str = r#"display:
  - platform: waveshare_epaper
    id: epaper_display
    lambda: |-
      it.print(0, 0, id(font_normal), "Hello");
"#;

/// Text that is not valid YAML.
pub const BROKEN_YAML: &str = "display:\n  - platform: [unclosed\n    id: epaper_display\n";

/// Builds a labelled widget with matching title and text.
pub fn label(id: &str, x: i32, y: i32, text: &str) -> WidgetConfig {
    let mut widget = WidgetConfig::new(id, "label", x, y, 200, 40);
    widget.title = Some(text.to_string());
    widget.props.insert("text".to_string(), PropValue::from(text));
    widget
}

/// A layout exercising every drawing branch of the snippet generator.
pub fn sample_device() -> DeviceConfig {
    let mut device = DeviceConfig::new(DeviceIdentity::new("kitchen", "Kitchen Panel"));

    let mut home = PageConfig::for_index(0);
    home.widgets.push(label("w_title", 10, 10, "Good morning"));

    let mut temp = WidgetConfig::new("w_temp", "sensor_text", 10, 80, 220, 70);
    temp.title = Some("Living room".to_string());
    temp.entity_id = Some("sensor.living_temp".to_string());
    home.widgets.push(temp);

    let mut icon = WidgetConfig::new("w_sun", "icon", 700, 10, 60, 60);
    icon.props.insert("code".to_string(), PropValue::from("F0599"));
    home.widgets.push(icon);

    let mut clock = WidgetConfig::new("w_clock", "datetime", 600, 400, 180, 60);
    clock.title = Some("Clock".to_string());
    home.widgets.push(clock);

    let mut details = PageConfig::for_index(1);
    let mut bar = WidgetConfig::new("w_bar", "progress_bar", 20, 200, 400, 20);
    bar.entity_id = Some("sensor.battery_level".to_string());
    details.widgets.push(bar);

    let mut frame = WidgetConfig::new("w_frame", "shape_rect", 0, 0, 800, 480);
    frame.props.insert("fill".to_string(), PropValue::Bool(false));
    details.widgets.push(frame);
    details.widgets.push(WidgetConfig::new("w_dot", "shape_circle", 380, 220, 40, 40));
    details.widgets.push(WidgetConfig::new("w_rule", "line", 0, 300, 800, 3));

    let mut weather = WidgetConfig::new("w_weather", "weather_icon", 500, 100, 80, 80);
    weather.entity_id = Some("weather.home".to_string());
    details.widgets.push(weather);

    device.pages = vec![home, details, PageConfig::for_index(2)];
    device
}

/// Writes `content` into a fresh temp directory and returns its path.
pub fn write_temp_file(name: &str, content: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    fs::write(&path, content).expect("Failed to write temp file");
    (path, temp_dir)
}

/// Writes a layout as JSON to `path`.
pub fn write_layout_json(device: &DeviceConfig, path: &Path) {
    let json = serde_json::to_string_pretty(device).expect("Failed to serialize layout");
    fs::write(path, json).expect("Failed to write layout file");
}

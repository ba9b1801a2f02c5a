//! Widget model and the per-kind default display properties.

use crate::models::Canvas;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A typed display property value stored in [`WidgetConfig::props`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    /// Flag (e.g. `fit_icon_to_frame`)
    Bool(bool),
    /// Whole number (e.g. font sizes)
    Int(i64),
    /// Fractional number
    Float(f64),
    /// Free text (e.g. colors, formats, literal text)
    Text(String),
}

impl PropValue {
    /// Returns the string payload, if this is a text property.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean payload, if this is a flag.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for PropValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// A compile-time default property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultProp {
    /// Flag default
    Bool(bool),
    /// Whole number default
    Int(i64),
    /// Text default
    Text(&'static str),
}

impl DefaultProp {
    /// Converts the default into an owned property value.
    #[must_use]
    pub fn to_value(self) -> PropValue {
        match self {
            Self::Bool(b) => PropValue::Bool(b),
            Self::Int(i) => PropValue::Int(i),
            Self::Text(s) => PropValue::Text(s.to_string()),
        }
    }
}

/// Default properties shared by every icon-bearing widget.
pub const ICON_DEFAULTS: &[(&str, DefaultProp)] = &[
    ("font_ref", DefaultProp::Text("font_mdi_medium")),
    ("fit_icon_to_frame", DefaultProp::Bool(true)),
    ("size", DefaultProp::Int(40)),
    ("color", DefaultProp::Text("black")),
];

const SENSOR_TEXT_DEFAULTS: &[(&str, DefaultProp)] = &[
    ("label_font_size", DefaultProp::Int(14)),
    ("value_font_size", DefaultProp::Int(20)),
    ("value_format", DefaultProp::Text("label_value")),
    ("color", DefaultProp::Text("black")),
];

const DATETIME_DEFAULTS: &[(&str, DefaultProp)] = &[
    ("format", DefaultProp::Text("time_date")),
    ("time_font_size", DefaultProp::Int(28)),
    ("date_font_size", DefaultProp::Int(16)),
    ("color", DefaultProp::Text("black")),
];

const PROGRESS_BAR_DEFAULTS: &[(&str, DefaultProp)] = &[
    ("show_label", DefaultProp::Bool(true)),
    ("show_percentage", DefaultProp::Bool(true)),
    ("bar_height", DefaultProp::Int(15)),
    ("border_width", DefaultProp::Int(1)),
    ("color", DefaultProp::Text("black")),
];

const SHAPE_DEFAULTS: &[(&str, DefaultProp)] = &[
    ("fill", DefaultProp::Bool(false)),
    ("border_width", DefaultProp::Int(1)),
    ("color", DefaultProp::Text("black")),
];

const LINE_DEFAULTS: &[(&str, DefaultProp)] = &[
    ("stroke_width", DefaultProp::Int(3)),
    ("color", DefaultProp::Text("black")),
    ("orientation", DefaultProp::Text("horizontal")),
];

const WEATHER_ICON_DEFAULTS: &[(&str, DefaultProp)] = &[
    ("size", DefaultProp::Int(48)),
    ("color", DefaultProp::Text("black")),
    ("fit_icon_to_frame", DefaultProp::Bool(true)),
];

const BATTERY_ICON_DEFAULTS: &[(&str, DefaultProp)] = &[
    ("size", DefaultProp::Int(36)),
    ("font_size", DefaultProp::Int(14)),
    ("color", DefaultProp::Text("black")),
];

const IMAGE_DEFAULTS: &[(&str, DefaultProp)] = &[("invert", DefaultProp::Bool(false))];

/// Closed set of widget kinds with known default properties.
///
/// Widgets whose type tag is not one of these are kept as-is but receive
/// no kind-specific defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// Plain label (literal text only)
    Label,
    /// Free text block (literal text only)
    Text,
    /// Material Design icon glyph
    Icon,
    /// Labeled sensor value
    SensorText,
    /// Clock / date display
    Datetime,
    /// Horizontal progress bar
    ProgressBar,
    /// Rectangle outline or fill
    ShapeRect,
    /// Circle outline or fill
    ShapeCircle,
    /// Straight line
    Line,
    /// Weather condition icon
    WeatherIcon,
    /// Battery level icon
    BatteryIcon,
    /// Bitmap image
    Image,
}

impl WidgetKind {
    /// Every kind, in table order.
    pub const ALL: [Self; 12] = [
        Self::Label,
        Self::Text,
        Self::Icon,
        Self::SensorText,
        Self::Datetime,
        Self::ProgressBar,
        Self::ShapeRect,
        Self::ShapeCircle,
        Self::Line,
        Self::WeatherIcon,
        Self::BatteryIcon,
        Self::Image,
    ];

    /// Type tag as written in marker comments and stored layouts.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Text => "text",
            Self::Icon => "icon",
            Self::SensorText => "sensor_text",
            Self::Datetime => "datetime",
            Self::ProgressBar => "progress_bar",
            Self::ShapeRect => "shape_rect",
            Self::ShapeCircle => "shape_circle",
            Self::Line => "line",
            Self::WeatherIcon => "weather_icon",
            Self::BatteryIcon => "battery_icon",
            Self::Image => "image",
        }
    }

    /// Looks up a kind by its type tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Default display properties for this kind.
    #[must_use]
    pub const fn defaults(self) -> &'static [(&'static str, DefaultProp)] {
        match self {
            Self::Label | Self::Text => &[],
            Self::Icon => ICON_DEFAULTS,
            Self::SensorText => SENSOR_TEXT_DEFAULTS,
            Self::Datetime => DATETIME_DEFAULTS,
            Self::ProgressBar => PROGRESS_BAR_DEFAULTS,
            Self::ShapeRect | Self::ShapeCircle => SHAPE_DEFAULTS,
            Self::Line => LINE_DEFAULTS,
            Self::WeatherIcon => WEATHER_ICON_DEFAULTS,
            Self::BatteryIcon => BATTERY_ICON_DEFAULTS,
            Self::Image => IMAGE_DEFAULTS,
        }
    }
}

/// A positioned widget on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Identifier, expected to be unique within its page
    pub id: String,
    /// Type tag (see [`WidgetKind`])
    #[serde(rename = "type")]
    pub widget_type: String,
    /// Left edge in pixels
    pub x: i32,
    /// Top edge in pixels
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
    /// Optional caption
    #[serde(default)]
    pub title: Option<String>,
    /// Linked Home Assistant entity
    #[serde(default)]
    pub entity_id: Option<String>,
    /// Optional icon reference
    #[serde(default)]
    pub icon: Option<String>,
    /// Display properties (defaults plus overrides)
    #[serde(default)]
    pub props: BTreeMap<String, PropValue>,
}

impl WidgetConfig {
    /// Creates a widget with no title, entity, icon or properties.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        widget_type: impl Into<String>,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Self {
        Self {
            id: id.into(),
            widget_type: widget_type.into(),
            x,
            y,
            width,
            height,
            title: None,
            entity_id: None,
            icon: None,
            props: BTreeMap::new(),
        }
    }

    /// Resolves the widget kind, if the type tag is a known one.
    #[must_use]
    pub fn kind(&self) -> Option<WidgetKind> {
        WidgetKind::from_tag(&self.widget_type)
    }

    /// Text property accessor.
    #[must_use]
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(PropValue::as_str)
    }

    /// Moves and shrinks the widget so it lies within the canvas.
    pub fn clamp_to_canvas(&mut self, canvas: &Canvas) {
        let (x, y, width, height) = canvas.clamp_rect(self.x, self.y, self.width, self.height);
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
    }
}

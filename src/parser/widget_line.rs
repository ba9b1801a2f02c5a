//! Recognizing widget declarations inside a page block.
//!
//! Two line shapes are understood:
//!
//! 1. Marker comments written by the snippet generator:
//!
//!    ```text
//!    // widget:sensor_text id:w_temp type:sensor_text x:10 y:20 w:200 h:60 ent:sensor.temp title:"Living room"
//!    ```
//!
//! 2. A conservative `it.printf` fallback for hand-written code:
//!
//!    ```text
//!    it.printf(10, 20, id(font_normal), "Status");
//!    ```
//!
//! Anything else is not a widget and is skipped.

use std::collections::HashMap;
use std::num::IntErrorKind;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

/// Prefix of a marker comment.
pub const MARKER_PREFIX: &str = "// widget:";

/// Prefix of a fallback print call.
const PRINTF_PREFIX: &str = "it.printf(";

/// Upper bound (exclusive) of synthesized widget id numbers.
const FALLBACK_ID_RANGE: u64 = 99_999;

/// A widget as read from one lambda line, before defaults and clamping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedWidget {
    /// Widget identifier
    pub id: String,
    /// Type tag
    pub widget_type: String,
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width
    pub width: i32,
    /// Height
    pub height: i32,
    /// Caption
    pub title: Option<String>,
    /// Linked entity
    pub entity_id: Option<String>,
    /// Literal text
    pub text: Option<String>,
    /// Icon code point (hex, e.g. `F0595`)
    pub code: Option<String>,
}

/// Derives a stable widget id from the line text.
///
/// Uses the first eight bytes of the line's SHA-256 digest, so the same line
/// always yields the same id. Identical lines yield identical ids.
#[must_use]
pub fn fallback_widget_id(line: &str) -> String {
    let digest = Sha256::digest(line.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    format!("w_{}", u64::from_be_bytes(prefix) % FALLBACK_ID_RANGE)
}

/// Recognizes one trimmed candidate line.
///
/// Returns `Ok(None)` for lines that are not widget declarations. An `Err`
/// means the line is a marker comment with a malformed field; callers skip
/// such lines.
pub fn parse_widget_line(line: &str) -> Result<Option<ParsedWidget>> {
    if let Some(body) = line.strip_prefix(MARKER_PREFIX) {
        return parse_marker(line, body).map(Some);
    }
    Ok(parse_printf(line))
}

/// Splits marker tokens into `key -> value`, re-joining quoted values.
fn marker_fields<'a>(tokens: &[&'a str]) -> HashMap<&'a str, String> {
    let mut fields = HashMap::new();
    let mut i = 0;

    while i < tokens.len() {
        let Some((key, value)) = tokens[i].split_once(':') else {
            i += 1;
            continue;
        };

        let value = if let Some(rest) = value.strip_prefix('"') {
            if let Some(inner) = rest.strip_suffix('"') {
                inner.to_string()
            } else {
                // Quoted value spans several tokens
                let mut parts = vec![rest];
                i += 1;
                while i < tokens.len() {
                    if let Some(last) = tokens[i].strip_suffix('"') {
                        parts.push(last);
                        break;
                    }
                    parts.push(tokens[i]);
                    i += 1;
                }
                parts.join(" ")
            }
        } else {
            value.trim().to_string()
        };

        fields.insert(key.trim(), value);
        i += 1;
    }

    fields
}

/// Reads an integer marker field, falling back to `default` when absent.
///
/// Values outside the `i32` range saturate; clamping to the canvas happens later.
fn int_field(fields: &HashMap<&str, String>, key: &str, default: i32) -> Result<i32> {
    let Some(raw) = fields.get(key) else {
        return Ok(default);
    };
    let value = match raw.parse::<i64>() {
        Ok(value) => value,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => i64::MAX,
        Err(e) if *e.kind() == IntErrorKind::NegOverflow => i64::MIN,
        Err(e) => return Err(e).with_context(|| format!("Invalid integer for '{key}': {raw:?}")),
    };
    Ok(i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX }))
}

/// Reads a text marker field, treating empty values as absent.
fn text_field(fields: &HashMap<&str, String>, key: &str) -> Option<String> {
    fields.get(key).filter(|v| !v.is_empty()).cloned()
}

/// Parses the part of a marker comment after `// widget:`.
///
/// The kind tag is the token glued to the prefix (`// widget:label`). With
/// whitespace after the colon there is no kind tag and every token is a field.
fn parse_marker(line: &str, body: &str) -> Result<ParsedWidget> {
    let mut tokens = body.split_whitespace();
    let kind = if body.starts_with(char::is_whitespace) {
        ""
    } else {
        tokens.next().unwrap_or_default()
    };
    let rest: Vec<&str> = tokens.collect();
    let fields = marker_fields(&rest);

    let widget_type = text_field(&fields, "type").unwrap_or_else(|| kind.to_string());
    let id = text_field(&fields, "id").unwrap_or_else(|| fallback_widget_id(line));
    let text = text_field(&fields, "text");
    let title = text_field(&fields, "title").or_else(|| text.clone());
    let entity_id = text_field(&fields, "ent").or_else(|| text_field(&fields, "entity"));

    Ok(ParsedWidget {
        id,
        widget_type,
        x: int_field(&fields, "x", 40)?,
        y: int_field(&fields, "y", 40)?,
        width: int_field(&fields, "w", 200)?,
        height: int_field(&fields, "h", 60)?,
        title,
        entity_id,
        text,
        code: text_field(&fields, "code"),
    })
}

/// Splits the arguments of a call at top-level commas.
///
/// `args` starts right after the opening parenthesis. Returns `None` when
/// the call's closing parenthesis is missing.
fn split_call_args(args: &str) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut start = 0;

    for (idx, ch) in args.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '(' => depth += 1,
            ')' if depth == 0 => {
                parts.push(args[start..idx].trim());
                return Some(parts);
            }
            ')' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(args[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }

    None
}

/// Parses `it.printf(x, y, font, "text", ...)` into a label.
fn parse_printf(line: &str) -> Option<ParsedWidget> {
    let args = split_call_args(line.strip_prefix(PRINTF_PREFIX)?)?;
    if args.len() < 4 {
        return None;
    }

    let x = args[0].parse().ok()?;
    let y = args[1].parse().ok()?;
    let text = args[3]
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Some(ParsedWidget {
        id: fallback_widget_id(line),
        widget_type: "label".to_string(),
        x,
        y,
        width: 200,
        height: 40,
        title: text.clone(),
        entity_id: None,
        text,
        code: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> ParsedWidget {
        parse_widget_line(line)
            .expect("line should parse")
            .expect("line should be a widget")
    }

    #[test]
    fn test_marker_with_all_fields() {
        let w = parse(
            r#"// widget:sensor_text id:w_temp type:sensor_text x:10 y:20 w:220 h:70 ent:sensor.living_temp title:"Living room" code:F0595"#,
        );

        assert_eq!(w.id, "w_temp");
        assert_eq!(w.widget_type, "sensor_text");
        assert_eq!((w.x, w.y, w.width, w.height), (10, 20, 220, 70));
        assert_eq!(w.entity_id.as_deref(), Some("sensor.living_temp"));
        assert_eq!(w.title.as_deref(), Some("Living room"));
        assert_eq!(w.code.as_deref(), Some("F0595"));
        assert_eq!(w.text, None);
    }

    #[test]
    fn test_marker_quoted_values_keep_inner_spaces() {
        let w = parse(
            r#"// widget:label id:w1 type:label x:10 y:20 w:200 h:40 title:"Hello World" text:"Hello World""#,
        );

        assert_eq!(w.title.as_deref(), Some("Hello World"));
        assert_eq!(w.text.as_deref(), Some("Hello World"));
    }

    #[test]
    fn test_marker_quoted_value_with_several_words() {
        let w = parse(r#"// widget:label id:w1 text:"a  b c" x:5"#);
        // Runs of whitespace collapse to one space when re-joined
        assert_eq!(w.text.as_deref(), Some("a b c"));
        assert_eq!(w.x, 5);
    }

    #[test]
    fn test_marker_defaults() {
        let w = parse("// widget:icon id:w_icon");

        assert_eq!(w.widget_type, "icon");
        assert_eq!((w.x, w.y, w.width, w.height), (40, 40, 200, 60));
        assert_eq!(w.title, None);
    }

    #[test]
    fn test_marker_type_overrides_kind_tag() {
        let w = parse("// widget:label id:a type:text");
        assert_eq!(w.widget_type, "text");
    }

    #[test]
    fn test_marker_title_defaults_to_text() {
        let w = parse("// widget:label id:a text:Hi");
        assert_eq!(w.title.as_deref(), Some("Hi"));
        assert_eq!(w.text.as_deref(), Some("Hi"));
    }

    #[test]
    fn test_marker_accepts_entity_alias() {
        let w = parse("// widget:sensor_text id:a entity:sensor.outside");
        assert_eq!(w.entity_id.as_deref(), Some("sensor.outside"));
    }

    #[test]
    fn test_marker_keeps_urls_intact() {
        let w = parse(r#"// widget:label id:a text:"see http://example.com/x""#);
        assert_eq!(w.text.as_deref(), Some("see http://example.com/x"));
    }

    #[test]
    fn test_marker_missing_id_is_deterministic() {
        let line = "// widget:label x:1 y:2 text:same";
        let a = parse(line);
        let b = parse(line);

        assert!(a.id.starts_with("w_"));
        assert_eq!(a.id, b.id);
        assert_eq!(a.id, fallback_widget_id(line));
        assert_ne!(a.id, parse("// widget:label x:1 y:3 text:same").id);
    }

    #[test]
    fn test_fallback_id_stays_in_range() {
        for line in ["", "a", "// widget:label", "it.printf(1, 2, f, \"x\");"] {
            let id = fallback_widget_id(line);
            let n: u64 = id.strip_prefix("w_").unwrap().parse().unwrap();
            assert!(n < 99_999);
        }
    }

    #[test]
    fn test_marker_with_space_after_prefix_has_no_kind_tag() {
        let w = parse("// widget: id:a type:label x:10 y:20");
        assert_eq!(w.id, "a");
        assert_eq!(w.widget_type, "label");
        assert_eq!((w.x, w.y), (10, 20));
    }

    #[test]
    fn test_marker_out_of_range_integers_saturate() {
        let w = parse(
            "// widget:label id:a x:99999999999 y:-99999999999999999999999 w:5000000000",
        );
        assert_eq!(w.x, i32::MAX);
        assert_eq!(w.y, i32::MIN);
        assert_eq!(w.width, i32::MAX);
    }

    #[test]
    fn test_marker_bad_integer_is_an_error() {
        assert!(parse_widget_line("// widget:label id:a x:ten").is_err());
        assert!(parse_widget_line("// widget:label id:a w:1.5").is_err());
    }

    #[test]
    fn test_printf_fallback() {
        let w = parse(r#"it.printf(10, 20, id(font_normal), "Status");"#);

        assert_eq!(w.widget_type, "label");
        assert_eq!((w.x, w.y, w.width, w.height), (10, 20, 200, 40));
        assert_eq!(w.text.as_deref(), Some("Status"));
        assert_eq!(w.title.as_deref(), Some("Status"));
        assert!(w.id.starts_with("w_"));
    }

    #[test]
    fn test_printf_with_format_arguments() {
        let w = parse(r#"it.printf(0, 100, id(font_small), "%.1f, %s", id(temp).state, "C");"#);
        assert_eq!(w.text.as_deref(), Some("%.1f, %s"));
        assert_eq!((w.x, w.y), (0, 100));
    }

    #[test]
    fn test_printf_unquoted_fourth_argument_has_no_text() {
        let w = parse("it.printf(4, 8, id(font), buffer);");
        assert_eq!(w.text, None);
        assert_eq!(w.title, None);
    }

    #[test]
    fn test_printf_rejections() {
        for line in [
            r#"it.printf(10, 20, "Status");"#,
            r#"it.printf(x, 20, id(font), "Status");"#,
            r#"it.printf(10, 20, id(font), "Status""#,
            r#"it.print(10, 20, id(font), "Status");"#,
            "it.fill(COLOR_OFF);",
            "// just a comment",
        ] {
            assert_eq!(parse_widget_line(line).unwrap(), None, "{line}");
        }
    }

    #[test]
    fn test_split_call_args() {
        assert_eq!(
            split_call_args(r#"1, f(a, b), "x, (y)", z) trailing"#),
            Some(vec!["1", "f(a, b)", r#""x, (y)""#, "z"])
        );
        assert_eq!(split_call_args(r#"1, "\"quoted\"")"#), Some(vec!["1", r#""\"quoted\"""#]));
        assert_eq!(split_call_args("1, 2"), None);
    }
}

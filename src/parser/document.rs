//! YAML document loading into a small tagged tree.
//!
//! The importer only needs to walk mappings and read a few scalars, so the
//! `serde_yml` value is reduced to [`Node`]: custom tags such as `!lambda` or
//! `!secret` are unwrapped and mapping keys become strings.

use serde_yml::Value;

use super::ImportError;

/// A loaded YAML value.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// `null`, `~` or an empty document
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Integer scalar
    Integer(i64),
    /// Non-integer number
    Float(f64),
    /// String scalar (including block scalars)
    String(String),
    /// Block or flow sequence
    Sequence(Vec<Node>),
    /// Mapping with scalar keys, in document order
    Mapping(Vec<(String, Node)>),
}

impl Node {
    /// Looks up a key when this node is a mapping.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Self::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Whether this node is a mapping containing `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns the string payload of a string scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer payload of an integer scalar.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::String(s),
            Value::Sequence(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Mapping(mapping) => Self::Mapping(
                mapping
                    .into_iter()
                    .filter_map(|(key, value)| scalar_key(&key).map(|k| (k, Self::from(value))))
                    .collect(),
            ),
            Value::Tagged(tagged) => Self::from(tagged.value),
        }
    }
}

/// Stringifies a scalar mapping key; complex keys are dropped.
fn scalar_key(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Tagged(tagged) => scalar_key(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Parses YAML text into a [`Node`] tree.
///
/// Nothing in the document is evaluated apart from `<<` merge keys, which
/// are resolved before conversion. Syntax errors and bad merges are reported
/// as [`ImportError::InvalidDocument`]. Duplicate mapping keys are rejected.
pub fn load_document(text: &str) -> Result<Node, ImportError> {
    let mut value: Value =
        serde_yml::from_str(text).map_err(|e| ImportError::InvalidDocument(e.to_string()))?;
    value
        .apply_merge()
        .map_err(|e| ImportError::InvalidDocument(e.to_string()))?;
    Ok(Node::from(value))
}

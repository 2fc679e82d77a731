//! Decoded values document
//!
//! `Value` is the closed set of node kinds a values file can contain. It is
//! built once from the YAML decoder's output and read-only afterwards.

use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

use crate::error::{Result, SchemaError};

/// One node of a decoded values document
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    /// Entries in document order
    Mapping(IndexMap<String, Value>),
    /// A YAML tagged value (`!foo bar`); carries the tag
    Unsupported { tag: String },
}

impl Value {
    /// Decode YAML text into a value tree
    pub fn parse(source: &str) -> Result<Self> {
        let raw: YamlValue = serde_yaml::from_str(source)?;
        Self::from_yaml(raw)
    }

    /// Convert raw decoder output, rejecting non-string mapping keys
    pub fn from_yaml(raw: YamlValue) -> Result<Self> {
        convert(raw, "")
    }

    /// Human readable kind, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
            Self::Unsupported { .. } => "tagged value",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Literal JSON form used for `default` and `examples`
    ///
    /// Non-finite floats have no JSON representation and become `null`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Null | Self::Unsupported { .. } => JsonValue::Null,
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::Integer(i) => JsonValue::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Self::String(s) => JsonValue::String(s.clone()),
            Self::Sequence(items) => JsonValue::Array(items.iter().map(Value::to_json).collect()),
            Self::Mapping(map) => JsonValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

fn convert(raw: YamlValue, path: &str) -> Result<Value> {
    Ok(match raw {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else {
                // u64 beyond i64::MAX lands here as well
                Value::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(seq) => {
            let mut items = Vec::with_capacity(seq.len());
            for (idx, item) in seq.into_iter().enumerate() {
                items.push(convert(item, &format!("{}[{}]", path, idx))?);
            }
            Value::Sequence(items)
        }
        YamlValue::Mapping(map) => {
            let mut entries = IndexMap::with_capacity(map.len());
            for (key, child) in map {
                let key = match key {
                    YamlValue::String(s) => s,
                    other => {
                        return Err(SchemaError::NonStringKey {
                            path: path.to_string(),
                            key: describe_key(&other),
                        });
                    }
                };
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                let child = convert(child, &child_path)?;
                entries.insert(key, child);
            }
            Value::Mapping(entries)
        }
        YamlValue::Tagged(tagged) => Value::Unsupported {
            tag: tagged.tag.to_string(),
        },
    })
}

fn describe_key(key: &YamlValue) -> String {
    match key {
        YamlValue::Null => "null".to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Sequence(_) => "<sequence>".to_string(),
        YamlValue::Mapping(_) => "<mapping>".to_string(),
        YamlValue::Tagged(t) => t.tag.to_string(),
        YamlValue::String(s) => s.clone(),
    }
}

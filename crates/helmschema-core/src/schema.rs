//! JSON Schema document model
//!
//! `SchemaNode` is both the inference output and the serialized document.
//! Unset fields are omitted from the output; the internal `path` is never
//! written.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SchemaError};

/// JSON Schema primitive type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
}

impl SchemaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Null => "null",
            Self::Number => "number",
            Self::Object => "object",
            Self::String => "string",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `type` keyword: one tag or an ordered union of tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(SchemaType),
    Union(Vec<SchemaType>),
}

impl TypeSet {
    /// Build from a list of tags, keeping first occurrences in order
    ///
    /// A list that reduces to one tag becomes `Single`.
    pub fn from_types<I: IntoIterator<Item = SchemaType>>(types: I) -> Self {
        let mut unique: Vec<SchemaType> = Vec::new();
        for t in types {
            if !unique.contains(&t) {
                unique.push(t);
            }
        }
        if unique.len() == 1 {
            Self::Single(unique[0])
        } else {
            Self::Union(unique)
        }
    }

    /// All tags in rendering order
    pub fn types(&self) -> &[SchemaType] {
        match self {
            Self::Single(t) => std::slice::from_ref(t),
            Self::Union(types) => types,
        }
    }

    pub fn contains(&self, t: SchemaType) -> bool {
        self.types().contains(&t)
    }

    /// True only for the single, non-union tag `t`
    pub fn is(&self, t: SchemaType) -> bool {
        matches!(self, Self::Single(single) if *single == t)
    }

    pub fn is_union(&self) -> bool {
        matches!(self, Self::Union(_))
    }
}

impl From<SchemaType> for TypeSet {
    fn from(t: SchemaType) -> Self {
        Self::Single(t)
    }
}

impl fmt::Display for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(t) => write!(f, "{}", t),
            Self::Union(types) => {
                let names: Vec<&str> = types.iter().map(SchemaType::as_str).collect();
                write!(f, "[{}]", names.join(", "))
            }
        }
    }
}

/// Selects the `$schema` URI of the emitted document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaVersion {
    #[default]
    Draft07,
    Draft2019_09,
    Draft2020_12,
}

impl SchemaVersion {
    pub fn uri(&self) -> &'static str {
        match self {
            Self::Draft07 => "http://json-schema.org/draft-07/schema#",
            Self::Draft2019_09 => "https://json-schema.org/draft/2019-09/schema",
            Self::Draft2020_12 => "https://json-schema.org/draft/2020-12/schema",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Draft07 => "draft-07",
            Self::Draft2019_09 => "2019-09",
            Self::Draft2020_12 => "2020-12",
        }
    }
}

impl FromStr for SchemaVersion {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim();
        [Self::Draft07, Self::Draft2019_09, Self::Draft2020_12]
            .into_iter()
            .find(|v| {
                needle.eq_ignore_ascii_case(v.short_name())
                    || needle == v.uri()
                    || needle.trim_end_matches('#') == v.uri().trim_end_matches('#')
            })
            .or_else(|| match needle.to_ascii_lowercase().as_str() {
                "draft7" | "7" => Some(Self::Draft07),
                "draft-2019-09" | "2019" => Some(Self::Draft2019_09),
                "draft-2020-12" | "2020" => Some(Self::Draft2020_12),
                _ => None,
            })
            .ok_or_else(|| SchemaError::UnknownSchemaVersion {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl Serialize for SchemaVersion {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.short_name())
    }
}

impl<'de> Deserialize<'de> for SchemaVersion {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One node of a JSON Schema document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(rename = "$id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Absent means "any type"
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<TypeSet>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaNode>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<JsonValue>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<JsonValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<JsonValue>>,

    /// Dot-separated address from the document root (`service.ports[0]`)
    #[serde(skip)]
    pub path: String,
}

impl SchemaNode {
    /// Node of the given type at `path`
    pub fn typed(schema_type: impl Into<TypeSet>, path: impl Into<String>) -> Self {
        Self {
            schema_type: Some(schema_type.into()),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Object node with an initialized, empty property map
    pub fn object(path: impl Into<String>) -> Self {
        Self {
            properties: Some(IndexMap::new()),
            ..Self::typed(SchemaType::Object, path)
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<JsonValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_examples<I, V>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<JsonValue>,
    {
        self.examples = Some(examples.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, property: SchemaNode) -> Self {
        self.properties
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), property);
        self
    }

    pub fn with_items(mut self, items: SchemaNode) -> Self {
        self.items = Some(Box::new(items));
        self
    }

    /// True when the `type` keyword includes `t`
    pub fn has_type(&self, t: SchemaType) -> bool {
        self.schema_type.as_ref().is_some_and(|ts| ts.contains(t))
    }

    /// True when the `type` keyword is exactly the single tag `t`
    pub fn is_type(&self, t: SchemaType) -> bool {
        self.schema_type.as_ref().is_some_and(|ts| ts.is(t))
    }

    pub fn has_description(&self) -> bool {
        self.description.as_deref().is_some_and(|d| !d.is_empty())
    }

    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties.as_ref().and_then(|p| p.get(name))
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.property(name).is_some()
    }

    /// Pretty-printed JSON document
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a JSON Schema document; paths are left empty
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

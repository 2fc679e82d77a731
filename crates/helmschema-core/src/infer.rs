//! Type inference from decoded values
//!
//! Walks a `Value` tree depth-first and builds the matching `SchemaNode`
//! tree. Structural inference gives the first answer; the pattern table
//! then gets the final word for the node's own path.

use indexmap::IndexMap;

use crate::generator::Generator;
use crate::patterns;
use crate::schema::{SchemaNode, SchemaType, TypeSet};
use crate::value::Value;

/// Key suffixes that mark a mapping as a rendered-or-structured block
const STRUCTURAL_KEY_SUFFIXES: &[&str] = &[
    "annotations",
    "labels",
    "nodeselector",
    "affinity",
    "selector",
];

/// Coarse element class used to detect heterogeneous arrays
///
/// Integers and floats are distinct here but share the `number` tag when an
/// items union is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementClass {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Object,
    Array,
    Unsupported,
}

impl ElementClass {
    fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Integer(_) => Self::Integer,
            Value::Float(_) => Self::Float,
            Value::String(_) => Self::String,
            Value::Mapping(_) => Self::Object,
            Value::Sequence(_) => Self::Array,
            Value::Unsupported { .. } => Self::Unsupported,
        }
    }

    fn schema_type(&self) -> Option<SchemaType> {
        match self {
            Self::Null => Some(SchemaType::Null),
            Self::Boolean => Some(SchemaType::Boolean),
            Self::Integer | Self::Float => Some(SchemaType::Number),
            Self::String => Some(SchemaType::String),
            Self::Object => Some(SchemaType::Object),
            Self::Array => Some(SchemaType::Array),
            Self::Unsupported => None,
        }
    }
}

/// True when `items` holds more than one element class
pub fn has_mixed_types(items: &[Value]) -> bool {
    let mut first: Option<ElementClass> = None;
    for item in items {
        let class = ElementClass::of(item);
        match first {
            None => first = Some(class),
            Some(seen) if seen != class => return true,
            Some(_) => {}
        }
    }
    false
}

/// Union of the element types of a heterogeneous array, in discovery order
pub fn mixed_items_type(items: &[Value]) -> TypeSet {
    TypeSet::from_types(
        items
            .iter()
            .filter_map(|item| ElementClass::of(item).schema_type()),
    )
}

/// Whether a string holds serialized YAML or JSON
pub fn looks_like_document(s: &str) -> bool {
    let trimmed = s.trim();
    if (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'))
    {
        return true;
    }

    trimmed.lines().map(str::trim).any(|line| {
        !line.is_empty() && !line.starts_with('#') && line.contains(':')
    })
}

/// Best-effort `format` for a plain string
pub fn infer_format(s: &str) -> Option<&'static str> {
    if is_date(s) {
        Some("date")
    } else if is_date_time(s) {
        Some("date-time")
    } else if is_email(s) {
        Some("email")
    } else if is_uri(s) {
        Some("uri")
    } else {
        None
    }
}

fn is_date(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10 && b[4] == b'-' && b[7] == b'-'
}

fn is_date_time(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 19 && b[4] == b'-' && b[7] == b'-' && b[10] == b'T'
}

fn is_email(s: &str) -> bool {
    s.contains('@') && s.contains('.')
}

fn is_uri(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

fn is_enabled_path(path: &str) -> bool {
    path == "enabled" || path.ends_with(".enabled")
}

fn child_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

impl Generator {
    /// Infer the schema of `value` located at `path`
    ///
    /// Never fails: kinds without a JSON Schema counterpart produce a node
    /// with no type constraint.
    pub fn infer(&self, value: &Value, path: &str) -> SchemaNode {
        let mut node = match value {
            Value::Null => SchemaNode::typed(SchemaType::Null, path),
            Value::Bool(b) => {
                let mut node = SchemaNode::typed(SchemaType::Boolean, path);
                if self.options.include_examples {
                    node.default = Some((*b).into());
                }
                node
            }
            Value::Integer(_) => self.scalar(SchemaType::Integer, value, path),
            Value::Float(_) => self.scalar(SchemaType::Number, value, path),
            Value::String(s) => return self.infer_string(s, path),
            Value::Sequence(items) => self.infer_sequence(items, path),
            Value::Mapping(entries) => self.infer_mapping(entries, path),
            Value::Unsupported { tag } => {
                tracing::debug!("no type constraint for {} value at '{}'", tag, path);
                return SchemaNode {
                    path: path.to_string(),
                    ..SchemaNode::default()
                };
            }
        };

        apply_pattern_override(&mut node);
        node
    }

    fn scalar(&self, schema_type: SchemaType, value: &Value, path: &str) -> SchemaNode {
        let mut node = SchemaNode::typed(schema_type, path);
        if self.options.include_examples {
            node.examples = Some(vec![value.to_json()]);
        }
        node
    }

    fn infer_string(&self, s: &str, path: &str) -> SchemaNode {
        let mut node = SchemaNode {
            path: path.to_string(),
            ..SchemaNode::default()
        };

        if let Some(m) = patterns::lookup(path) {
            tracing::debug!(
                "pattern '{}' ({}) sets type of '{}'",
                m.fragment,
                m.rule.name,
                path
            );
            node.schema_type = Some(m.type_set());
        } else if looks_like_document(s) {
            node.schema_type = Some(TypeSet::Union(vec![SchemaType::String, SchemaType::Object]));
        } else {
            node.schema_type = Some(TypeSet::Single(SchemaType::String));
            node.format = infer_format(s).map(str::to_string);
        }

        // "-" is the conventional placeholder for a templated toggle
        if s == "-" && is_enabled_path(path) {
            node.schema_type = Some(TypeSet::Union(vec![SchemaType::String, SchemaType::Boolean]));
        }

        if self.options.include_examples {
            node.examples = Some(vec![s.into()]);
        }

        node
    }

    fn infer_sequence(&self, items: &[Value], path: &str) -> SchemaNode {
        let mut node = SchemaNode::typed(SchemaType::Array, path);

        // An empty array says nothing about its items: leave them open
        if items.is_empty() {
            return node;
        }

        let items_path = format!("{}[0]", path);
        if has_mixed_types(items) {
            let union = mixed_items_type(items);
            tracing::debug!("mixed array at '{}' gets items type {}", path, union);
            node.items = Some(Box::new(SchemaNode::typed(union, items_path)));
        } else {
            node.items = Some(Box::new(self.infer(&items[0], &items_path)));
        }

        node
    }

    fn infer_mapping(&self, entries: &IndexMap<String, Value>, path: &str) -> SchemaNode {
        let mut node = SchemaNode::object(path);

        if entries.keys().any(|k| is_structural_key(k)) {
            node.schema_type = Some(TypeSet::Union(vec![SchemaType::Object, SchemaType::String]));
        }

        let (properties, required) = self.infer_entries(entries, path);
        node.properties = Some(properties);
        node.required = required;
        node
    }

    /// Infer every entry of a mapping, collecting `required` names
    pub(crate) fn infer_entries(
        &self,
        entries: &IndexMap<String, Value>,
        path: &str,
    ) -> (IndexMap<String, SchemaNode>, Vec<String>) {
        let mut properties = IndexMap::with_capacity(entries.len());
        let mut required = Vec::new();

        for (key, child) in entries {
            let property = self.infer(child, &child_path(path, key));
            properties.insert(key.clone(), property);

            if self.options.require_by_default && !child.is_null() {
                required.push(key.clone());
            }
        }

        (properties, required)
    }
}

fn is_structural_key(key: &str) -> bool {
    let lowered = key.to_lowercase();
    STRUCTURAL_KEY_SUFFIXES
        .iter()
        .any(|suffix| lowered.ends_with(suffix))
}

/// Replace the node's type with the pattern table's answer for its path
///
/// Container children that no longer fit the overriding type are dropped.
fn apply_pattern_override(node: &mut SchemaNode) {
    let Some(m) = patterns::lookup(&node.path) else {
        return;
    };

    tracing::debug!(
        "pattern '{}' ({}) overrides type of '{}'",
        m.fragment,
        m.rule.name,
        node.path
    );
    let types = m.type_set();

    if !types.contains(SchemaType::Object) {
        node.properties = None;
        node.required.clear();
    }
    if !types.contains(SchemaType::Array) {
        node.items = None;
    }
    node.schema_type = Some(types);
}

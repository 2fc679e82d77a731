//! Canonical schemas for well-known value shapes
//!
//! Container image blocks (`repository` + `tag`) and resource requirement
//! blocks (`limits` / `requests`) are so common in charts that inferring them
//! from sample values does more harm than good. Any object with one of
//! these shapes is replaced by a curated fragment.

use crate::schema::{SchemaNode, SchemaType};

const PULL_POLICIES: [&str; 3] = ["Always", "IfNotPresent", "Never"];

/// Canonicalize known shapes below a document root
///
/// The root itself is never replaced, so its `$schema` and `title` survive.
pub fn enrich(root: &mut SchemaNode) {
    if let Some(properties) = root.properties.as_mut() {
        for property in properties.values_mut() {
            specialize(property);
        }
    }
}

/// Canonicalize known shapes in `node` and everything below it
pub fn specialize(node: &mut SchemaNode) {
    if is_image(node) {
        tracing::debug!("'{}' recognized as container image block", node.path);
        *node = image_schema(&node.path);
    } else if is_resources(node) {
        tracing::debug!("'{}' recognized as resource requirements block", node.path);
        *node = resources_schema(&node.path);
    }

    if let Some(properties) = node.properties.as_mut() {
        for property in properties.values_mut() {
            specialize(property);
        }
    }

    if let Some(items) = node.items.as_mut() {
        specialize(items);
    }
}

fn is_image(node: &SchemaNode) -> bool {
    node.has_type(SchemaType::Object) && node.has_property("repository") && node.has_property("tag")
}

fn is_resources(node: &SchemaNode) -> bool {
    node.has_type(SchemaType::Object)
        && (node.has_property("limits") || node.has_property("requests"))
}

fn child(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn string_field(path: String, description: &str) -> SchemaNode {
    SchemaNode::typed(SchemaType::String, path).with_description(description)
}

fn image_schema(path: &str) -> SchemaNode {
    let pull_policy = SchemaNode {
        enum_values: Some(PULL_POLICIES.iter().map(|p| (*p).into()).collect()),
        ..string_field(child(path, "pullPolicy"), "Image pull policy")
    }
    .with_default("IfNotPresent");

    SchemaNode {
        required: vec!["repository".to_string()],
        ..SchemaNode::object(path)
    }
    .with_description("Container image configuration")
    .with_property(
        "repository",
        string_field(child(path, "repository"), "Container image repository"),
    )
    .with_property(
        "tag",
        string_field(child(path, "tag"), "Container image tag").with_default("latest"),
    )
    .with_property("pullPolicy", pull_policy)
}

fn resources_schema(path: &str) -> SchemaNode {
    SchemaNode::object(path)
        .with_description("CPU/Memory resource requirements")
        .with_property(
            "limits",
            quantity_block(&child(path, "limits"), "Resource limits", "limit"),
        )
        .with_property(
            "requests",
            quantity_block(&child(path, "requests"), "Resource requests", "request"),
        )
}

fn quantity_block(path: &str, description: &str, noun: &str) -> SchemaNode {
    SchemaNode::object(path)
        .with_description(description)
        .with_property(
            "cpu",
            string_field(child(path, "cpu"), &format!("CPU {}", noun))
                .with_examples(["100m", "0.1"]),
        )
        .with_property(
            "memory",
            string_field(child(path, "memory"), &format!("Memory {}", noun))
                .with_examples(["128Mi", "1Gi"]),
        )
}

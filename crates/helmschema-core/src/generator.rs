//! Values-to-schema orchestration

use indexmap::IndexMap;

use crate::comments::CommentExtractor;
use crate::enrich;
use crate::error::{Result, SchemaError};
use crate::options::GeneratorOptions;
use crate::schema::SchemaNode;
use crate::value::Value;

/// Turns a values document into its JSON Schema
///
/// A generator holds no state between runs; one instance can be reused for
/// any number of documents.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    pub(crate) options: GeneratorOptions,
}

impl Generator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Generate a schema from raw YAML text
    ///
    /// The text is decoded, inferred, then (when description extraction is
    /// on) annotated from its own comments and canonicalized for well-known
    /// shapes such as container images.
    pub fn generate_from_yaml(&self, source: &str) -> Result<SchemaNode> {
        tracing::info!("generating schema from YAML data");

        let value = Value::parse(source)?;
        let Value::Mapping(entries) = &value else {
            return Err(SchemaError::RootNotMapping {
                kind: value.kind_name().to_string(),
            });
        };

        let mut schema = self.generate_from_mapping(entries);

        if self.options.extract_descriptions {
            tracing::info!("extracting descriptions from comments");
            let extractor = CommentExtractor::extract(source);

            if self.options.debug {
                for (path, text) in extractor.entries() {
                    tracing::debug!(path = %path, "extracted comment: {}", text);
                }
            }

            extractor.apply(&mut schema);

            enrich::enrich(&mut schema);
        }

        tracing::info!(
            properties = schema.properties.as_ref().map_or(0, |p| p.len()),
            "schema generation completed"
        );
        Ok(schema)
    }

    /// Build the root schema for already-decoded top-level entries
    pub fn generate_from_mapping(&self, entries: &IndexMap<String, Value>) -> SchemaNode {
        let (properties, required) = self.infer_entries(entries, "");

        SchemaNode {
            schema: Some(self.options.schema_version.uri().to_string()),
            title: self.options.title.clone(),
            description: self.options.description.clone(),
            properties: Some(properties),
            required,
            ..SchemaNode::object("")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{SchemaType, SchemaVersion, TypeSet};
    use serde_json::{Value as JsonValue, json};

    fn generate(source: &str) -> SchemaNode {
        Generator::default().generate_from_yaml(source).unwrap()
    }

    fn as_json(schema: &SchemaNode) -> JsonValue {
        serde_json::to_value(schema).unwrap()
    }

    #[test]
    fn test_end_to_end_simple_values() {
        let schema = generate("# Test values\nkey1: value1\nkey2: 42\n");
        let doc = as_json(&schema);

        assert_eq!(doc["$schema"], "http://json-schema.org/draft-07/schema#");
        assert_eq!(doc["title"], "Helm Values Schema");
        assert_eq!(doc["type"], "object");
        assert_eq!(doc["description"], "Test values");
        assert_eq!(doc["properties"]["key1"]["type"], "string");
        assert_eq!(doc["properties"]["key2"]["type"], "integer");
        assert!(doc.get("required").is_none());
    }

    #[test]
    fn test_annotations_get_union_type() {
        let doc = as_json(&generate("annotations:\n  app: nginx\n"));
        assert_eq!(doc["properties"]["annotations"]["type"], json!(["object", "string"]));
    }

    #[test]
    fn test_empty_mapping_has_initialized_properties() {
        let schema = generate("{}");
        assert_eq!(schema.schema_type, Some(TypeSet::Single(SchemaType::Object)));
        assert!(schema.properties.as_ref().is_some_and(|p| p.is_empty()));
        assert_eq!(as_json(&schema)["properties"], json!({}));
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = Generator::default().generate_from_yaml("").unwrap_err();
        assert!(matches!(err, SchemaError::RootNotMapping { .. }));
    }

    #[test]
    fn test_non_mapping_root_is_rejected() {
        let err = Generator::default().generate_from_yaml("- a\n- b\n").unwrap_err();
        match err {
            SchemaError::RootNotMapping { kind } => assert_eq!(kind, "sequence"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_string_key_aborts_run() {
        let err = Generator::default()
            .generate_from_yaml("service:\n  80: http\n")
            .unwrap_err();
        assert!(matches!(err, SchemaError::NonStringKey { .. }));
    }

    #[test]
    fn test_require_all_skips_null_values() {
        let generator = Generator::new(GeneratorOptions {
            require_by_default: true,
            ..GeneratorOptions::default()
        });
        let schema = generator
            .generate_from_yaml("name: web\nport: null\nimage:\n  repository: nginx\n")
            .unwrap();
        assert_eq!(schema.required, vec!["name", "image"]);
    }

    #[test]
    fn test_configured_metadata() {
        let generator = Generator::new(GeneratorOptions {
            schema_version: SchemaVersion::Draft2020_12,
            title: Some("My Chart".into()),
            description: Some("Explicit".into()),
            ..GeneratorOptions::default()
        });
        let schema = generator
            .generate_from_yaml("# From comment\nname: web\n")
            .unwrap();
        assert_eq!(
            schema.schema.as_deref(),
            Some("https://json-schema.org/draft/2020-12/schema")
        );
        assert_eq!(schema.title.as_deref(), Some("My Chart"));
        assert_eq!(schema.description.as_deref(), Some("Explicit"));
    }

    #[test]
    fn test_descriptions_and_shapes_disabled() {
        let generator = Generator::new(GeneratorOptions {
            extract_descriptions: false,
            ..GeneratorOptions::default()
        });
        let schema = generator
            .generate_from_yaml("# Image\nimage:\n  repository: nginx\n  tag: \"1.25\"\n")
            .unwrap();
        assert_eq!(schema.description, None);

        let image = schema.property("image").unwrap();
        assert_eq!(image.description, None);
        assert!(!image.has_property("pullPolicy"));
    }

    #[test]
    fn test_named_shapes_replace_comment_descriptions() {
        let source = r#"# Workload image
image:
  repository: nginx
  # pinned tag
  tag: "1.25"
resources:
  limits:
    cpu: 100m
"#;
        let schema = generate(source);

        let image = schema.property("image").unwrap();
        assert_eq!(image.description.as_deref(), Some("Container image configuration"));
        assert_eq!(image.required, vec!["repository"]);
        assert_eq!(
            image.property("tag").unwrap().description.as_deref(),
            Some("Container image tag")
        );

        let resources = schema.property("resources").unwrap();
        assert!(resources.has_property("requests"));
    }

    #[test]
    fn test_root_keeps_schema_metadata_after_enrichment() {
        // A root that itself looks like a named shape keeps its metadata
        let schema = generate("repository: nginx\ntag: latest\n");
        assert!(schema.schema.is_some());
        assert_eq!(schema.title.as_deref(), Some("Helm Values Schema"));
        assert!(!schema.has_property("pullPolicy"));
    }

    #[test]
    fn test_debug_option_does_not_change_output() {
        let source = "# Port\nport: 80\n";
        let quiet = generate(source);
        let noisy = Generator::new(GeneratorOptions {
            debug: true,
            ..GeneratorOptions::default()
        })
        .generate_from_yaml(source)
        .unwrap();
        assert_eq!(quiet, noisy);
    }

    #[test]
    fn test_output_is_a_valid_json_schema() {
        let source = r#"
replicaCount: 1
image:
  repository: nginx
  tag: stable
service:
  type: ClusterIP
  port: 80
ingress:
  enabled: false
  hosts:
    - host: chart-example.local
      paths: []
tolerations: []
mixed: [1, "a", true]
"#;
        let doc = as_json(&generate(source));
        assert!(jsonschema::validator_for(&doc).is_ok());
    }
}

//! Core error types

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while turning a values document into a schema
#[derive(Error, Debug, Diagnostic)]
pub enum SchemaError {
    #[error("Failed to parse YAML: {0}")]
    #[diagnostic(code(helmschema::decode::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    #[diagnostic(code(helmschema::decode::json))]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    #[diagnostic(code(helmschema::io))]
    Io(#[from] std::io::Error),

    #[error("Non-string key {key} in mapping at '{path}'")]
    #[diagnostic(
        code(helmschema::infer::non_string_key),
        help("values.yaml keys must be strings; quote numeric or boolean keys")
    )]
    NonStringKey { path: String, key: String },

    #[error("Root value must be a mapping, got {kind}")]
    #[diagnostic(
        code(helmschema::infer::root),
        help("a values file must start with `key: value` entries")
    )]
    RootNotMapping { kind: String },

    #[error("Unknown JSON Schema version: {value}")]
    #[diagnostic(
        code(helmschema::options::schema_version),
        help("use one of draft-07, 2019-09, 2020-12 or a full $schema URI")
    )]
    UnknownSchemaVersion { value: String },
}

pub type Result<T> = std::result::Result<T, SchemaError>;

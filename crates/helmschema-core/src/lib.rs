//! Helmschema Core - JSON Schema inference for Helm values files
//!
//! This crate turns a chart's `values.yaml` into a JSON Schema document:
//! - `Value`: the decoded values document
//! - `Generator`: type inference, comment descriptions, known-shape enrichment
//! - `patterns`: path heuristics for fields that accept more than one type
//! - `SchemaNode`: the emitted schema tree
//! - `lint`: best-practices checks over a finished schema

pub mod comments;
pub mod enrich;
pub mod error;
pub mod generator;
pub mod infer;
pub mod lint;
pub mod options;
pub mod patterns;
pub mod schema;
pub mod value;

pub use comments::CommentExtractor;
pub use error::{Result, SchemaError};
pub use generator::Generator;
pub use lint::{Diagnostic, LintReport, Severity, SeverityCounts, lint};
pub use options::{DEFAULT_TITLE, GeneratorOptions};
pub use schema::{SchemaNode, SchemaType, SchemaVersion, TypeSet};
pub use value::Value;

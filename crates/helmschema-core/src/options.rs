//! Generator configuration
//!
//! Options can be built in code, or loaded from a YAML file such as:
//!
//! ```yaml
//! schemaVersion: 2020-12
//! title: My Chart
//! requireByDefault: true
//! includeExamples: false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::schema::SchemaVersion;

/// Title used when none is configured
pub const DEFAULT_TITLE: &str = "Helm Values Schema";

/// Options controlling schema generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorOptions {
    /// Emitted `$schema` URI
    pub schema_version: SchemaVersion,

    /// Root `title`
    pub title: Option<String>,

    /// Root `description`; takes precedence over a top-of-file comment
    pub description: Option<String>,

    /// List every non-null key in `required`
    pub require_by_default: bool,

    /// Attach literal values as `default` (booleans) or `examples`
    pub include_examples: bool,

    /// Turn source comments into descriptions and canonicalize known shapes
    pub extract_descriptions: bool,

    /// Emit the extracted comment table as debug events
    pub debug: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            schema_version: SchemaVersion::Draft07,
            title: Some(DEFAULT_TITLE.to_string()),
            description: None,
            require_by_default: false,
            include_examples: true,
            extract_descriptions: true,
            debug: false,
        }
    }
}

impl GeneratorOptions {
    /// Load options from a YAML file; missing keys keep their defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse options from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }
}

//! Source comments as schema descriptions
//!
//! A single line-oriented pass over the raw values file. Comments on their
//! own line(s) directly above a key describe that key; the `# --` prefix
//! used by helm-docs is stripped. Trailing comments (`key: v # note`) are
//! ignored. Comments above the first key also describe the document.

use std::collections::HashMap;

use crate::schema::SchemaNode;

/// Path → description table built from a values file
#[derive(Debug, Default, Clone)]
pub struct CommentExtractor {
    comments: HashMap<String, String>,
}

/// Indentation stack: each open level and the key path recorded at it
#[derive(Debug, Default)]
struct IndentStack {
    levels: Vec<(usize, Vec<String>)>,
}

impl IndentStack {
    /// Record `key` at `indent` and return its full path
    fn push_key(&mut self, indent: usize, key: &str) -> Vec<String> {
        let mut path = self
            .levels
            .iter()
            .rev()
            .find(|(level, _)| *level < indent)
            .map(|(_, parent)| parent.clone())
            .unwrap_or_default();
        path.push(key.to_string());

        match self.levels.iter().position(|(level, _)| *level == indent) {
            Some(idx) => {
                self.levels.truncate(idx + 1);
                self.levels[idx].1 = path.clone();
            }
            None => self.levels.push((indent, path.clone())),
        }

        path
    }
}

impl CommentExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `source` and collect descriptions
    pub fn extract(source: &str) -> Self {
        let mut comments = HashMap::new();
        let mut stack = IndentStack::default();
        let mut pending: Vec<String> = Vec::new();
        let mut top_level: Vec<String> = Vec::new();
        let mut seen_key = false;

        for line in source.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if let Some(body) = trimmed.strip_prefix('#') {
                let text = strip_description_marker(body.trim());
                if !seen_key {
                    top_level.push(text.to_string());
                }
                pending.push(text.to_string());
                continue;
            }

            let Some((raw_key, _)) = trimmed.split_once(':') else {
                continue;
            };
            seen_key = true;

            let indent = line.len() - line.trim_start_matches(' ').len();
            let path = stack.push_key(indent, unquote(raw_key.trim())).join(".");

            if !pending.is_empty() {
                let text = pending.join("\n");
                tracing::debug!("comment for '{}': {}", path, text);
                comments.insert(path, text);
                pending.clear();
            }
        }

        if !top_level.is_empty() {
            comments.insert(String::new(), top_level.join("\n"));
        }

        Self { comments }
    }

    /// Description recorded for `path`
    pub fn get(&self, path: &str) -> Option<&str> {
        self.comments.get(path).map(String::as_str)
    }

    /// Comment block preceding the first key
    pub fn top_level(&self) -> Option<&str> {
        self.get("")
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// All entries, sorted by path
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self
            .comments
            .iter()
            .map(|(path, text)| (path.as_str(), text.as_str()))
            .collect();
        entries.sort_unstable_by_key(|(path, _)| *path);
        entries
    }

    /// Fill empty descriptions in `schema` from the table
    ///
    /// Existing descriptions are never overwritten.
    pub fn apply(&self, schema: &mut SchemaNode) {
        if !schema.has_description() {
            if let Some(text) = self.comments.get(&schema.path) {
                schema.description = Some(text.clone());
            }
        }

        if let Some(properties) = schema.properties.as_mut() {
            for property in properties.values_mut() {
                self.apply(property);
            }
        }

        if let Some(items) = schema.items.as_mut() {
            self.apply(items);
        }
    }
}

/// Drop the `--` marker that flags an explicit description
fn strip_description_marker(text: &str) -> &str {
    text.strip_prefix("-- ")
        .or_else(|| text.strip_prefix("--"))
        .unwrap_or(text)
}

fn unquote(key: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = key
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    key
}

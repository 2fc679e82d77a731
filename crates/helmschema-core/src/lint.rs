//! Best-practices checks over a finished schema
//!
//! The linter never touches the schema: it walks it once, depth first, and
//! returns findings as data. Every rule runs at every node.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schema::{SchemaNode, SchemaType};

/// Nesting deeper than this is reported
pub const MAX_NESTING_DEPTH: usize = 5;

/// Path fragments for arrays that usually want explicit bounds
const BOUNDED_ARRAY_HINTS: &[&str] = &["secret", "config", "certificate"];

/// Severity of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub path: String,
    pub message: String,
    pub severity: Severity,
}

impl Diagnostic {
    fn new(path: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            severity,
        }
    }
}

/// Per-severity totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
}

/// Run every rule over `schema`, in traversal order
pub fn lint(schema: &SchemaNode) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    visit(schema, "", 0, &mut diagnostics);
    tracing::debug!("lint produced {} diagnostics", diagnostics.len());
    diagnostics
}

fn visit(node: &SchemaNode, path: &str, depth: usize, out: &mut Vec<Diagnostic>) {
    check_naming(node, path, out);
    check_depth(path, depth, out);
    check_array(node, path, out);
    check_documentation(node, path, out);

    if let Some(properties) = &node.properties {
        for (name, property) in properties {
            let child = if path.is_empty() {
                name.clone()
            } else {
                format!("{}.{}", path, name)
            };
            visit(property, &child, depth + 1, out);
        }
    }

    if node.has_type(SchemaType::Array) {
        if let Some(items) = &node.items {
            visit(items, &format!("{}[]", path), depth + 1, out);
        }
    }
}

fn check_naming(node: &SchemaNode, path: &str, out: &mut Vec<Diagnostic>) {
    let Some(properties) = &node.properties else {
        return;
    };
    if path.is_empty() {
        return;
    }

    for name in properties.keys() {
        let property_path = format!("{}.{}", path, name);

        if name.chars().next().is_some_and(char::is_uppercase) {
            out.push(Diagnostic::new(
                &property_path,
                "Property names should follow camelCase convention",
                Severity::Warning,
            ));
        }

        if name.contains(['-', '_']) {
            out.push(Diagnostic::new(
                &property_path,
                "Property names should not contain hyphens or underscores",
                Severity::Error,
            ));
        }
    }
}

fn check_depth(path: &str, depth: usize, out: &mut Vec<Diagnostic>) {
    if depth > MAX_NESTING_DEPTH {
        out.push(Diagnostic::new(
            path,
            format!(
                "Excessive nesting depth ({} levels). Consider flattening the structure or using dot notation for paths.",
                depth
            ),
            Severity::Warning,
        ));
    }
}

fn check_array(node: &SchemaNode, path: &str, out: &mut Vec<Diagnostic>) {
    if !node.has_type(SchemaType::Array) {
        return;
    }

    if node.items.is_none() {
        out.push(Diagnostic::new(
            path,
            "Array should define an items schema for validation",
            Severity::Warning,
        ));
    }

    let lowered = path.to_lowercase();
    let wants_bounds = BOUNDED_ARRAY_HINTS.iter().any(|hint| lowered.contains(hint));
    if wants_bounds && node.min_items.is_none() && node.max_items.is_none() {
        out.push(Diagnostic::new(
            path,
            "Consider adding minItems/maxItems constraints for this array",
            Severity::Info,
        ));
    }
}

fn check_documentation(node: &SchemaNode, path: &str, out: &mut Vec<Diagnostic>) {
    if path.is_empty() {
        return;
    }

    if !node.has_description() {
        let severity = if path.matches('.').count() <= 1 {
            Severity::Warning
        } else {
            Severity::Info
        };
        out.push(Diagnostic::new(
            path,
            "Property should have a description",
            severity,
        ));
    }

    let is_leaf = node.properties.as_ref().is_none_or(|p| p.is_empty());
    if is_leaf
        && node.examples.is_none()
        && node.default.is_none()
        && !node.is_type(SchemaType::Object)
        && !node.is_type(SchemaType::Array)
    {
        out.push(Diagnostic::new(
            path,
            "Consider adding examples or default value",
            Severity::Info,
        ));
    }
}

/// Diagnostics of one lint run, with the grouped text rendering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LintReport {
    diagnostics: Vec<Diagnostic>,
}

impl LintReport {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Lint `schema` and wrap the result
    pub fn of(schema: &SchemaNode) -> Self {
        Self::new(lint(schema))
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn counts(&self) -> SeverityCounts {
        let mut counts = SeverityCounts::default();
        for d in &self.diagnostics {
            match d.severity {
                Severity::Error => counts.errors += 1,
                Severity::Warning => counts.warnings += 1,
                Severity::Info => counts.info += 1,
            }
        }
        counts
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    /// Diagnostics of one severity, in discovery order
    pub fn by_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity == severity)
    }
}

impl fmt::Display for LintReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("No validation issues found.");
        }

        let counts = self.counts();
        writeln!(
            f,
            "Found {} issues: {} errors, {} warnings, {} info",
            self.len(),
            counts.errors,
            counts.warnings,
            counts.info
        )?;

        for (severity, heading) in [
            (Severity::Error, "ERRORS:"),
            (Severity::Warning, "WARNINGS:"),
            (Severity::Info, "INFO:"),
        ] {
            let mut group = self.by_severity(severity).peekable();
            if group.peek().is_none() {
                continue;
            }
            writeln!(f)?;
            writeln!(f, "{}", heading)?;
            for d in group {
                writeln!(f, "- {}: {}", d.path, d.message)?;
            }
        }

        Ok(())
    }
}

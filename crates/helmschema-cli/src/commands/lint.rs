//! Lint command - check an existing schema against Helm best practices

use console::style;
use helmschema_core::{LintReport, SchemaNode};
use std::io::{self, Write};
use std::path::Path;

use crate::display;
use crate::error::{CliError, Result};

pub fn run(path: &Path, strict: bool, json_output: bool) -> Result<()> {
    let content = std::fs::read_to_string(path).map_err(|e| CliError::read(path, e))?;
    let schema = SchemaNode::from_json(&content)?;
    let report = LintReport::of(&schema);

    if json_output {
        let json = serde_json::to_string_pretty(report.diagnostics())
            .map_err(helmschema_core::SchemaError::from)?;
        println!("{}", json);
    } else {
        println!(
            "{} Linting schema at {}",
            style("→").blue(),
            path.display()
        );
        println!();
        print_report(&report).map_err(|e| CliError::write(Path::new("-"), e))?;
    }

    if strict && report.has_errors() {
        let counts = report.counts();
        return Err(CliError::lint_failed(counts.errors, counts.warnings));
    }

    Ok(())
}

fn print_report(report: &LintReport) -> io::Result<()> {
    let mut out = io::stdout().lock();
    display::write_report(&mut out, report)?;
    writeln!(out)?;
    display::write_summary(&mut out, report)
}

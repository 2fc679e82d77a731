//! Terminal rendering of lint reports

use console::style;
use helmschema_core::{LintReport, Severity};
use std::io::{self, Write};

/// Write `report` grouped by severity, errors first
pub fn write_report(out: &mut impl Write, report: &LintReport) -> io::Result<()> {
    if report.is_empty() {
        writeln!(out, "{} No validation issues found.", style("✓").green().bold())?;
        return Ok(());
    }

    let counts = report.counts();
    writeln!(
        out,
        "Found {} issues: {} errors, {} warnings, {} info",
        report.len(),
        style(counts.errors).red(),
        style(counts.warnings).yellow(),
        style(counts.info).cyan()
    )?;

    for severity in [Severity::Error, Severity::Warning, Severity::Info] {
        let mut group = report.by_severity(severity).peekable();
        if group.peek().is_none() {
            continue;
        }

        writeln!(out)?;
        writeln!(out, "{}", heading(severity))?;
        for d in group {
            writeln!(out, "  {} {}: {}", icon(severity), style(&d.path).dim(), d.message)?;
        }
    }

    Ok(())
}

fn heading(severity: Severity) -> console::StyledObject<&'static str> {
    match severity {
        Severity::Error => style("ERRORS:").red().bold(),
        Severity::Warning => style("WARNINGS:").yellow().bold(),
        Severity::Info => style("INFO:").cyan().bold(),
    }
}

fn icon(severity: Severity) -> console::StyledObject<&'static str> {
    match severity {
        Severity::Error => style("✗").red(),
        Severity::Warning => style("⚠").yellow(),
        Severity::Info => style("ℹ").cyan(),
    }
}

/// One-line outcome after the report
pub fn write_summary(out: &mut impl Write, report: &LintReport) -> io::Result<()> {
    let counts = report.counts();
    if counts.errors > 0 {
        writeln!(
            out,
            "{} Lint failed: {} error(s), {} warning(s)",
            style("✗").red().bold(),
            counts.errors,
            counts.warnings
        )
    } else if counts.warnings > 0 {
        writeln!(
            out,
            "{} Lint passed with {} warning(s)",
            style("⚠").yellow().bold(),
            counts.warnings
        )
    } else {
        writeln!(out, "{} Lint passed!", style("✓").green().bold())
    }
}

//! CLI error types with exit code handling

use helmschema_core::SchemaError;
use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::exit_codes;

#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Decode, inference or schema loading failure
    #[error(transparent)]
    #[diagnostic(transparent)]
    Schema(#[from] SchemaError),

    #[error("Failed to read {}: {message}", path.display())]
    #[diagnostic(code(helmschema::cli::read), help("check that the file exists and is readable"))]
    Read { path: PathBuf, message: String },

    #[error("Failed to write {}: {message}", path.display())]
    #[diagnostic(code(helmschema::cli::write))]
    Write { path: PathBuf, message: String },

    #[error("Lint failed with {errors} error(s) and {warnings} warning(s)")]
    #[diagnostic(code(helmschema::cli::lint), help("fix the reported errors or drop --strict"))]
    LintFailed { errors: usize, warnings: usize },

    #[error("Invalid value for {option}: {message}")]
    #[diagnostic(code(helmschema::cli::usage))]
    Usage {
        option: &'static str,
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Schema(SchemaError::Io(_)) => exit_codes::IO_ERROR,
            CliError::Schema(_) => exit_codes::ERROR,
            CliError::Read { .. } | CliError::Write { .. } => exit_codes::IO_ERROR,
            CliError::LintFailed { .. } => exit_codes::VALIDATION_ERROR,
            CliError::Usage { .. } => exit_codes::USAGE_ERROR,
        }
    }

    pub fn read(path: &Path, err: std::io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    pub fn write(path: &Path, err: std::io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    pub fn lint_failed(errors: usize, warnings: usize) -> Self {
        Self::LintFailed { errors, warnings }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

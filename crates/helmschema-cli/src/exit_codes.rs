//! Process exit codes
//!
//! Follows sysexits.h where a matching code exists.

/// Schema generated or lint run completed
pub const SUCCESS: i32 = 0;

/// Decode or inference failure, no output written
pub const ERROR: i32 = 1;

/// Lint found errors under `--strict`
pub const VALIDATION_ERROR: i32 = 2;

/// Input or output file could not be read or written
pub const IO_ERROR: i32 = 5;

/// Invalid option value
pub const USAGE_ERROR: i32 = 64;

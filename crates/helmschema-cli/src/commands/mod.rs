//! CLI commands

pub mod generate;
pub mod lint;

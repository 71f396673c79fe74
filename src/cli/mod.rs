//! CLI support for qs-grammar
//!
//! Provides programmatic access to the `qsg` operations so other tools can
//! embed them without spawning the binary.

mod check;
mod docs;

pub use check::{CheckOptions, CheckResult, OutputFormat, UnknownFormat, execute_check};
pub use docs::get_grammar_reference;

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Lexing, parsing or depth-limit failure
    #[error("{0}")]
    Query(#[from] crate::Error),

    /// Flattening failure
    #[error("cannot flatten: {0}")]
    Flatten(#[from] crate::FlattenError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No query given and nothing on stdin
    #[error("No query provided. Pass one as an argument or pipe it to stdin.")]
    NoInput,
}

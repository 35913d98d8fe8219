//! CLI support for jimongo
//!
//! Provides programmatic access to the `jimongo` commands so they can be
//! embedded in other tools and tested without spawning a process.

mod check;
mod tokens;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use tokens::{format_tokens, list_tokens};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Compile(#[from] crate::CompileError),

    #[error(transparent)]
    Lex(#[from] crate::LexError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No query provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,
}

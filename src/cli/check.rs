//! Compile a query and report the outcome

use tracing::info;

use super::CliError;
use crate::{compile, to_value};

/// Options for the check and ast commands
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The query to compile
    pub query: String,
    /// Only validate syntax, don't render the AST
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Query compiled, with its AST rendered as JSON
    Ast(serde_json::Value),
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let compiled = compile(&options.query)?;
    info!(segments = compiled.segments().len(), "query is valid");

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }
    Ok(CheckResult::Ast(to_value(&compiled)))
}

//! Token stream listing, for debugging queries

use super::CliError;
use crate::{Lexer, Token};

/// Scans a query without parsing it.
pub fn list_tokens(query: &str) -> Result<Vec<Token>, CliError> {
    Ok(Lexer::new(query).tokenize()?)
}

/// One line per token: `KIND lexeme @offset`.
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| format!("{} @{}\n", token, token.span.start))
        .collect()
}

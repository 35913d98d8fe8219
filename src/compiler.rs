//! Compiler façade: scan, then parse.

use thiserror::Error;
use tracing::debug;

use crate::ast::Query;
use crate::lexer::{LexError, Lexer};
use crate::parser::{ParseError, Parser};

/// First error met while compiling a query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("lexer error: {0}")]
    Lex(#[from] LexError),

    #[error("parser error: {0}")]
    Parse(#[from] ParseError),
}

impl CompileError {
    /// Byte offset of the offending input.
    pub fn position(&self) -> usize {
        match self {
            CompileError::Lex(e) => e.position(),
            CompileError::Parse(e) => e.position(),
        }
    }
}

/// Compiles a query into its AST.
///
/// The whole input is scanned before parsing starts, so a lexical error is
/// reported even when a syntax error comes earlier in the text.
///
/// # Examples
///
/// ```
/// use jimongo::{compile, Query, Segment, Selector};
///
/// let query = compile("$.store.book").unwrap();
/// assert_eq!(
///     query,
///     Query::Absolute(vec![
///         Segment::DotChild(Selector::Name("store".to_string())),
///         Segment::DotChild(Selector::Name("book".to_string())),
///     ])
/// );
///
/// assert!(compile("$[]").is_err());
/// ```
pub fn compile(source: &str) -> Result<Query, CompileError> {
    debug!(source, "compiling query");

    let tokens = Lexer::new(source).tokenize()?;
    debug!(tokens = tokens.len(), "scanned query");

    let query = Parser::new(tokens).parse()?;
    debug!(segments = query.segments().len(), "parsed query");

    Ok(query)
}

pub mod ast;
pub mod compiler;
pub mod lexer;
pub mod output;
pub mod parser;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{
    BinOp, CastType, Expr, Query, Segment, Selector, Slice, Span, Token, TokenKind, UnaryOp,
    Visitor,
};
pub use compiler::{CompileError, compile};
pub use lexer::{LexError, Lexer};
pub use output::{JsonRenderer, to_json, to_json_pretty, to_value};
pub use parser::{ParseError, Parser};

//! # jimongo - Abstract Syntax Tree
//!
//! This module defines the tokens and the Abstract Syntax Tree (AST) of the
//! jimongo query language: JSONPath-style paths with MongoDB-flavored
//! filters, typed casts and function calls.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[query]** - Query roots (`$` and `@`)
//! - **[segments]** - Path steps (`.name`, `[...]`, `..name`)
//! - **[selectors]** - Element selection rules inside a segment
//! - **[expressions]** - Filter and value expressions
//! - **[operators]** - Binary and unary operators, cast types
//! - **[visit]** - Traversal protocol for consumers of the tree
//!
//! ## Quick Start
//!
//! ```text
//! $.store.book[?(@.price < 10 && @int(@.stock) > 0)].title
//! ```
//!
//! This query selects the titles of books that are cheap and in stock.
//!
//! ## Core Concepts
//!
//! ### Queries and Segments
//!
//! Every query starts at a root and applies segments in order:
//!
//! - `$` - the document root (absolute query)
//! - `@` - the current element (relative query, used inside filters)
//!
//! ```text
//! $.store         // dot child
//! $['store']      // bracketed child
//! $..author       // descendant
//! ```
//!
//! ### Selectors
//!
//! A bracketed segment holds one or more comma separated selectors:
//!
//! ```text
//! $[0, 'name', *, 1:5:2, ?(@.active == true)]
//! ```
//!
//! ### Expressions
//!
//! Filters use a small expression language. From lowest to highest
//! precedence: `&&`, `||`, relational (`<`, `<=`, `>`, `>=`), equality
//! (`==`, `!=`), prefix `!` and `-`. Relational and equality operators do
//! not chain.
//!
//! ### Typed Casts
//!
//! ```text
//! @int(@.count) >= 3
//! @str($.id) == '42'
//! ```
pub mod expressions;
pub mod operators;
pub mod query;
pub mod segments;
pub mod selectors;
pub mod tokens;
pub mod visit;

pub use expressions::Expr;
pub use operators::{BinOp, CastType, UnaryOp};
pub use query::Query;
pub use segments::Segment;
pub use selectors::{Selector, Slice};
pub use tokens::{Span, Token, TokenKind};
pub use visit::Visitor;

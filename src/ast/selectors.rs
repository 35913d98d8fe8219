use std::fmt;

use crate::ast::Expr;
use crate::ast::expressions::{is_plain_identifier, write_name, write_quoted};

/// A single element-selection rule within a segment.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Member name
    ///
    /// # Examples
    /// ```text
    /// $.store
    /// $..author
    /// $[store]
    /// ```
    Name(String),

    /// Any child
    ///
    /// # Examples
    /// ```text
    /// $.*
    /// $[*]
    /// ```
    Wildcard,

    /// Array slice
    ///
    /// # Examples
    /// ```text
    /// $[0:3]
    /// $[::-1]
    /// ```
    Slice(Slice),

    /// Predicate over candidate elements
    ///
    /// # Example
    /// ```text
    /// $[?(@.price < 10)]
    /// ```
    Filter(Expr),

    /// Any other bracketed element: quoted keys, indices, nested queries
    ///
    /// # Examples
    /// ```text
    /// $['store']
    /// $[0]
    /// $[-1]
    /// ```
    Expr(Expr),
}

impl Selector {
    /// Lifts a bracketed element parsed as an expression into a selector.
    ///
    /// Bare names and `*` become their dedicated selector kinds.
    pub fn from_expr(expr: Expr) -> Self {
        match expr {
            Expr::Name(name) => Selector::Name(name),
            Expr::Wildcard => Selector::Wildcard,
            other => Selector::Expr(other),
        }
    }

    pub fn node_name(&self) -> &'static str {
        match self {
            Selector::Name(_) => "NameSelector",
            Selector::Wildcard => "WildCardSelector",
            Selector::Slice(_) => "SliceSelector",
            Selector::Filter(_) => "FilterSelector",
            Selector::Expr(expr) => expr.node_name(),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Name(name) => write_name(f, name),
            Selector::Wildcard => f.write_str("*"),
            Selector::Slice(slice) => write!(f, "{}", slice),
            Selector::Filter(cond) => write!(f, "?({})", cond),
            Selector::Expr(expr) => write!(f, "{}", expr),
        }
    }
}

/// `start:stop:step`. A missing part is `None`, which is not the same as zero.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Slice {
    pub start: Option<Expr>,
    pub stop: Option<Expr>,
    pub step: Option<Expr>,
}

impl Slice {
    pub fn new(start: Option<Expr>, stop: Option<Expr>, step: Option<Expr>) -> Self {
        Slice { start, stop, step }
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(start) = &self.start {
            write!(f, "{}", start)?;
        }
        f.write_str(":")?;
        if let Some(stop) = &self.stop {
            write!(f, "{}", stop)?;
        }
        if let Some(step) = &self.step {
            write!(f, ":{}", step)?;
        }
        Ok(())
    }
}

/// Writes a selector in dot position, falling back to brackets for names
/// that do not scan as identifiers.
pub(crate) fn write_dot_selector(f: &mut fmt::Formatter<'_>, selector: &Selector) -> fmt::Result {
    match selector {
        Selector::Name(name) if is_plain_identifier(name) => write!(f, ".{}", name),
        Selector::Name(name) => {
            f.write_str("[")?;
            write_quoted(f, name)?;
            f.write_str("]")
        }
        Selector::Wildcard => f.write_str(".*"),
        other => write!(f, "[{}]", other),
    }
}

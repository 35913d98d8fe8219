use std::fmt;

use crate::ast::{BinOp, CastType, Query, UnaryOp};

/// Filter and value expression.
///
/// Expressions appear as filter conditions, slice bounds, function arguments
/// and as plain bracketed selectors (`$['key']`, `$[0]`).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    // Literals
    /// String literal, quotes stripped
    ///
    /// # Example
    /// ```text
    /// 'hello'
    /// "it\"s"
    /// ```
    String(String),

    /// Unsigned integer literal. Negative numbers are `Unary { op: Minus, .. }`.
    Integer(i64),

    True,
    False,
    Null,

    /// Typed cast of the inner expression
    ///
    /// # Example
    /// ```text
    /// @int(@.count)
    /// @array($.items)
    /// ```
    Typed { ty: CastType, expr: Box<Expr> },

    /// Parenthesized group
    Paren(Box<Expr>),

    /// Function call
    ///
    /// # Example
    /// ```text
    /// size(@.tags)
    /// now()
    /// ```
    Call { name: String, args: Vec<Expr> },

    /// Prefix operation (`!`, `-`)
    Unary { op: UnaryOp, expr: Box<Expr> },

    /// Logical, relational or equality operation
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    /// Bare identifier
    Name(String),

    /// `*`
    Wildcard,

    /// Nested absolute or relative query
    ///
    /// # Example
    /// ```text
    /// @.price < $.limits.max
    /// ```
    Query(Box<Query>),
}

impl Expr {
    pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn unary(op: UnaryOp, expr: Expr) -> Self {
        Expr::Unary {
            op,
            expr: Box::new(expr),
        }
    }

    /// Signed value of an integer literal, optionally negated once. `None`
    /// when the negation does not fit in an `i64`.
    pub fn as_signed_integer(&self) -> Option<i64> {
        match self {
            Expr::Integer(n) => Some(*n),
            Expr::Unary {
                op: UnaryOp::Minus,
                expr,
            } => match expr.as_ref() {
                Expr::Integer(n) => n.checked_neg(),
                _ => None,
            },
            _ => None,
        }
    }

    /// Node name used by the JSON rendering.
    pub fn node_name(&self) -> &'static str {
        match self {
            Expr::String(_) => "StringExpr",
            Expr::Integer(_) => "IntExpr",
            Expr::True => "TrueExpr",
            Expr::False => "FalseExpr",
            Expr::Null => "NullExpr",
            Expr::Typed { ty, .. } => ty.node_name(),
            Expr::Paren(_) => "ParExpr",
            Expr::Call { .. } => "FnExpr",
            Expr::Unary { op, .. } => op.node_name(),
            Expr::Binary { op, .. } => op.node_name(),
            Expr::Name(_) => "NameSelector",
            Expr::Wildcard => "WildCardSelector",
            Expr::Query(query) => query.node_name(),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::String(s) => write_quoted(f, s),
            Expr::Integer(n) => write!(f, "{}", n),
            Expr::True => f.write_str("true"),
            Expr::False => f.write_str("false"),
            Expr::Null => f.write_str("null"),
            Expr::Typed { ty, expr } => write!(f, "@{}({})", ty, expr),
            Expr::Paren(expr) => write!(f, "({})", expr),
            Expr::Call { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
            Expr::Unary { op, expr } => write!(f, "{}{}", op, expr),
            Expr::Binary { op, lhs, rhs } => write!(f, "{} {} {}", lhs, op, rhs),
            Expr::Name(name) => write_name(f, name),
            Expr::Wildcard => f.write_str("*"),
            Expr::Query(query) => write!(f, "{}", query),
        }
    }
}

/// Decodes the text of a string token.
///
/// Strips the surrounding quotes and resolves `\<quote>` and `\\`. Any other
/// backslash pair is kept as written, so `\n` stays two characters.
pub(crate) fn unquote(lexeme: &str) -> String {
    let mut chars = lexeme.chars();
    let quote = match chars.next() {
        Some(q @ ('"' | '\'')) => q,
        _ => return lexeme.to_string(),
    };

    let inner = chars.as_str();
    let inner = inner.strip_suffix(quote).unwrap_or(inner);

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.peek() {
                Some(&next) if next == quote || next == '\\' => {
                    result.push(next);
                    chars.next();
                    continue;
                }
                _ => {}
            }
        }
        result.push(ch);
    }
    result
}

pub(crate) fn write_quoted(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_str("'")?;
    for ch in value.chars() {
        match ch {
            '\'' => f.write_str("\\'")?,
            '\\' => f.write_str("\\\\")?,
            c => write!(f, "{}", c)?,
        }
    }
    f.write_str("'")
}

/// Whether `name` would scan back as a single IDENTIFIER token.
pub(crate) fn is_plain_identifier(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| b.is_ascii_alphabetic() || b == b'_')
        && crate::ast::TokenKind::keyword(name).is_none()
}

/// Writes a name bare when it scans as an identifier, quoted otherwise.
pub(crate) fn write_name(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    if is_plain_identifier(name) {
        f.write_str(name)
    } else {
        write_quoted(f, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquote_resolves_quote_and_backslash() {
        assert_eq!(unquote(r#"'it\'s'"#), "it's");
        assert_eq!(unquote(r#""a\\b""#), r"a\b");
        assert_eq!(unquote(r#""say \"hi\"""#), r#"say "hi""#);
    }

    #[test]
    fn test_unquote_keeps_other_escapes() {
        assert_eq!(unquote(r"'line\nbreak'"), r"line\nbreak");
        assert_eq!(unquote(r#"'\"'"#), r#"\""#);
    }

    #[test]
    fn test_signed_integer() {
        assert_eq!(Expr::Integer(3).as_signed_integer(), Some(3));
        assert_eq!(
            Expr::unary(UnaryOp::Minus, Expr::Integer(1)).as_signed_integer(),
            Some(-1)
        );
        assert_eq!(
            Expr::unary(UnaryOp::Not, Expr::Integer(1)).as_signed_integer(),
            None
        );
        assert_eq!(Expr::Name("x".into()).as_signed_integer(), None);
    }

    #[test]
    fn test_signed_integer_negation_overflow() {
        assert_eq!(
            Expr::unary(UnaryOp::Minus, Expr::Integer(i64::MIN)).as_signed_integer(),
            None
        );
        assert_eq!(
            Expr::unary(UnaryOp::Minus, Expr::Integer(i64::MAX)).as_signed_integer(),
            Some(-i64::MAX)
        );
    }

    #[test]
    fn test_display_quotes_strings() {
        assert_eq!(Expr::String("it's".into()).to_string(), r"'it\'s'");
        assert_eq!(Expr::String(r"a\b".into()).to_string(), r"'a\\b'");
    }
}

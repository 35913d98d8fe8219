use thiserror::Error;
use tracing::trace;

use crate::ast::expressions::unquote;
use crate::ast::{BinOp, CastType, Expr, Query, Segment, Selector, Slice, Token, TokenKind, UnaryOp};

/// Syntax error. Every variant carries the byte offset of the offending
/// token, or of the end of input when the tokens ran out. Positions are
/// displayed 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected token {found} at position {}", .position + 1)]
    UnexpectedToken { found: TokenKind, position: usize },

    #[error("unterminated query at position {}", .position + 1)]
    UnterminatedQuery { position: usize },

    #[error("missing closing bracket at position {}", .position + 1)]
    MissingClosingBracket { position: usize },

    #[error("missing closing parenthesis at position {}", .position + 1)]
    MissingClosingParen { position: usize },

    #[error("missing opening parenthesis at position {}", .position + 1)]
    MissingOpeningParen { position: usize },

    #[error("missing opening parenthesis in call to '{name}' at position {}", .position + 1)]
    MissingOpeningParenInCall { name: String, position: usize },

    #[error("missing closing parenthesis in call to '{name}' at position {}", .position + 1)]
    MissingClosingParenInCall { name: String, position: usize },

    #[error("empty bracketed selectors at position {}", .position + 1)]
    EmptyBracketedSelectors { position: usize },

    #[error("trailing comma in bracketed selectors at position {}", .position + 1)]
    TrailingComma { position: usize },

    #[error("slice syntax not correct at position {}: at most start:stop:step", .position + 1)]
    SliceSyntax { position: usize },

    #[error("incorrect descendant segment syntax at position {}", .position + 1)]
    DescendantSegmentSyntax { position: usize },

    #[error("dot child segment error at position {}: expected a name or '*'", .position + 1)]
    DotChildSegment { position: usize },

    #[error("expected an integer at position {}, found '{found}'", .position + 1)]
    NotAnInteger { found: String, position: usize },

    #[error("expected type after @ at position {}, found '{found}' (int, str, bool or array)", .position + 1)]
    ExpectedType { found: String, position: usize },

    #[error("expression nested too deeply at position {} (limit {})", .position + 1, MAX_DEPTH)]
    NestingTooDeep { position: usize },
}

impl ParseError {
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { position, .. }
            | ParseError::UnterminatedQuery { position }
            | ParseError::MissingClosingBracket { position }
            | ParseError::MissingClosingParen { position }
            | ParseError::MissingOpeningParen { position }
            | ParseError::MissingOpeningParenInCall { position, .. }
            | ParseError::MissingClosingParenInCall { position, .. }
            | ParseError::EmptyBracketedSelectors { position }
            | ParseError::TrailingComma { position }
            | ParseError::SliceSyntax { position }
            | ParseError::DescendantSegmentSyntax { position }
            | ParseError::DotChildSegment { position }
            | ParseError::NotAnInteger { position, .. }
            | ParseError::ExpectedType { position, .. }
            | ParseError::NestingTooDeep { position } => *position,
        }
    }
}

/// Deepest allowed nesting of expressions, groups, nested queries and
/// prefix operators.
pub const MAX_DEPTH: usize = 64;

/// Recursive-descent parser over a scanned token sequence.
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn current_kind(&self) -> Option<TokenKind> {
        self.peek_kind(0)
    }

    fn peek_kind(&self, offset: usize) -> Option<TokenKind> {
        self.tokens.get(self.position + offset).map(|t| t.kind)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == Some(kind)
    }

    fn check_next(&self, kind: TokenKind) -> bool {
        self.peek_kind(1) == Some(kind)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    /// Consumes the current token and hands back its lexeme.
    fn take_lexeme(&mut self) -> String {
        let lexeme = self
            .tokens
            .get_mut(self.position)
            .and_then(|t| t.lexeme.take())
            .unwrap_or_default();
        self.advance();
        lexeme
    }

    /// Offset of the current token, or of the end of input.
    fn offset(&self) -> usize {
        match self.current() {
            Some(token) => token.span.start,
            None => self.tokens.last().map_or(0, |t| t.span.end),
        }
    }

    fn unexpected(&self) -> ParseError {
        match self.current_kind() {
            Some(found) => ParseError::UnexpectedToken {
                found,
                position: self.offset(),
            },
            None => ParseError::UnterminatedQuery {
                position: self.offset(),
            },
        }
    }

    fn expect(
        &mut self,
        kind: TokenKind,
        error: impl FnOnce(usize) -> ParseError,
    ) -> Result<(), ParseError> {
        if !self.check(kind) {
            return Err(error(self.offset()));
        }
        self.advance();
        Ok(())
    }

    /// Runs `parse` one nesting level deeper, failing past [`MAX_DEPTH`].
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::NestingTooDeep {
                position: self.offset(),
            });
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Parses a complete query. Every token must be consumed.
    pub fn parse(&mut self) -> Result<Query, ParseError> {
        let query = self.parse_query()?;

        if !self.is_at_end() {
            return Err(self.unexpected());
        }
        Ok(query)
    }

    fn parse_query(&mut self) -> Result<Query, ParseError> {
        match self.current_kind() {
            Some(TokenKind::Dollar) => {
                self.advance();
                Ok(Query::Absolute(self.parse_segments()?))
            }
            Some(TokenKind::At) => {
                self.advance();
                Ok(Query::Relative(self.parse_segments()?))
            }
            _ => Err(self.unexpected()),
        }
    }

    /// Segments run until a token that cannot start one. An empty list is fine.
    fn parse_segments(&mut self) -> Result<Vec<Segment>, ParseError> {
        let mut segments = vec![];

        loop {
            let segment = match self.current_kind() {
                Some(TokenKind::LBrack) => {
                    self.advance();
                    Segment::Child(self.parse_bracketed_selectors()?)
                }
                Some(TokenKind::Dot) => {
                    self.advance();
                    Segment::DotChild(self.parse_dot_selector()?)
                }
                Some(TokenKind::RecursiveOp) => {
                    self.advance();
                    Segment::Descendant(self.parse_descendant_selectors()?)
                }
                _ => break,
            };

            trace!(segment = segment.node_name(), "parsed segment");
            segments.push(segment);
        }
        Ok(segments)
    }

    fn parse_dot_selector(&mut self) -> Result<Selector, ParseError> {
        match self.current_kind() {
            Some(TokenKind::Identifier) => Ok(Selector::Name(self.take_lexeme())),
            Some(TokenKind::Star) => {
                self.advance();
                Ok(Selector::Wildcard)
            }
            _ => Err(ParseError::DotChildSegment {
                position: self.offset(),
            }),
        }
    }

    fn parse_descendant_selectors(&mut self) -> Result<Vec<Selector>, ParseError> {
        match self.current_kind() {
            Some(TokenKind::Identifier) => Ok(vec![Selector::Name(self.take_lexeme())]),
            Some(TokenKind::LBrack) => {
                self.advance();
                self.parse_bracketed_selectors()
            }
            Some(TokenKind::Star) => {
                self.advance();
                Ok(vec![Selector::Wildcard])
            }
            _ => Err(ParseError::DescendantSegmentSyntax {
                position: self.offset(),
            }),
        }
    }

    /// Selectors after an opening `[`, up to and including the closing `]`.
    fn parse_bracketed_selectors(&mut self) -> Result<Vec<Selector>, ParseError> {
        let mut selectors = vec![];

        loop {
            match self.current_kind() {
                None => {
                    return Err(ParseError::MissingClosingBracket {
                        position: self.offset(),
                    });
                }
                Some(TokenKind::RBrack) => {
                    if selectors.is_empty() {
                        return Err(ParseError::EmptyBracketedSelectors {
                            position: self.offset(),
                        });
                    }
                    self.advance();
                    return Ok(selectors);
                }
                Some(_) => {}
            }

            selectors.push(self.parse_selector()?);

            match self.current_kind() {
                Some(TokenKind::Comma) => {
                    if self.check_next(TokenKind::RBrack) {
                        return Err(ParseError::TrailingComma {
                            position: self.offset(),
                        });
                    }
                    self.advance();
                }
                Some(TokenKind::RBrack) | None => {}
                Some(_) => return Err(self.unexpected()),
            }
        }
    }

    /// `:`, `INTEGER :` or `- INTEGER :` opens a slice.
    fn is_slice_start(&self) -> bool {
        self.check(TokenKind::Colon)
            || (self.check(TokenKind::Integer) && self.check_next(TokenKind::Colon))
            || (self.check(TokenKind::Minus)
                && self.check_next(TokenKind::Integer)
                && self.peek_kind(2) == Some(TokenKind::Colon))
    }

    fn parse_selector(&mut self) -> Result<Selector, ParseError> {
        if self.is_slice_start() {
            return Ok(Selector::Slice(self.parse_slice()?));
        }

        if self.check(TokenKind::QuestionMark) {
            self.advance();
            let condition = match self.parse_expression()? {
                // `?( ... )`: the parentheses delimit the filter
                Expr::Paren(inner) => *inner,
                other => other,
            };
            return Ok(Selector::Filter(condition));
        }

        Ok(Selector::from_expr(self.parse_expression()?))
    }

    fn parse_slice(&mut self) -> Result<Slice, ParseError> {
        let mut parts: [Option<Expr>; 3] = [None, None, None];
        let mut index = 0;

        while !self.is_at_end() {
            if index >= parts.len() {
                return Err(ParseError::SliceSyntax {
                    position: self.offset(),
                });
            }

            if !self.check(TokenKind::Colon) {
                parts[index] = self.parse_slice_bound()?;
            }
            index += 1;

            if !self.check(TokenKind::Colon) {
                break;
            }
            self.advance();
        }

        let [start, stop, step] = parts;
        Ok(Slice::new(start, stop, step))
    }

    /// A signed integer, or nothing when the part is left empty.
    fn parse_slice_bound(&mut self) -> Result<Option<Expr>, ParseError> {
        if !(self.check(TokenKind::Minus) || self.check(TokenKind::Integer)) {
            return Ok(None);
        }

        let position = self.offset();
        let bound = self.parse_unary()?;
        if bound.as_signed_integer().is_none() {
            return Err(ParseError::NotAnInteger {
                found: bound.to_string(),
                position,
            });
        }
        Ok(Some(bound))
    }

    /// Every recursive production re-enters through here or through a
    /// prefix operator, so both count toward the nesting limit.
    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.nested(Self::parse_and)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_or()?;

        while self.check(TokenKind::And) {
            self.advance();
            let rhs = self.parse_or()?;
            lhs = Expr::binary(BinOp::And, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_relation()?;

        while self.check(TokenKind::Or) {
            self.advance();
            let rhs = self.parse_relation()?;
            lhs = Expr::binary(BinOp::Or, lhs, rhs);
        }
        Ok(lhs)
    }

    /// At most one relational operator; `a < b < c` does not chain.
    fn parse_relation(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.parse_comparison()?;

        let op = match self.current_kind() {
            Some(TokenKind::Lt) => BinOp::Lt,
            Some(TokenKind::Lte) => BinOp::Lte,
            Some(TokenKind::Gt) => BinOp::Gt,
            Some(TokenKind::Gte) => BinOp::Gte,
            _ => return Ok(lhs),
        };

        self.advance();
        let rhs = self.parse_comparison()?;
        Ok(Expr::binary(op, lhs, rhs))
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.parse_unary()?;

        let op = match self.current_kind() {
            Some(TokenKind::EqEq) => BinOp::EqEq,
            Some(TokenKind::Neq) => BinOp::Neq,
            _ => return Ok(lhs),
        };

        self.advance();
        let rhs = self.parse_unary()?;
        Ok(Expr::binary(op, lhs, rhs))
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.current_kind() {
            Some(TokenKind::Minus) => UnaryOp::Minus,
            Some(TokenKind::Not) => UnaryOp::Not,
            _ => return self.parse_literal(),
        };

        self.advance();
        let operand = self.nested(Self::parse_unary)?; // Right-associative
        Ok(Expr::unary(op, operand))
    }

    fn parse_literal(&mut self) -> Result<Expr, ParseError> {
        let Some(kind) = self.current_kind() else {
            return Err(ParseError::UnterminatedQuery {
                position: self.offset(),
            });
        };

        match kind {
            TokenKind::String => Ok(Expr::String(unquote(&self.take_lexeme()))),
            TokenKind::Integer => self.parse_integer(),
            TokenKind::True => {
                self.advance();
                Ok(Expr::True)
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::False)
            }
            TokenKind::Null => {
                self.advance();
                Ok(Expr::Null)
            }
            TokenKind::LParen => Ok(Expr::Paren(Box::new(self.parse_paren()?))),
            TokenKind::Identifier => {
                if self.check_next(TokenKind::LParen) {
                    self.parse_call()
                } else {
                    Ok(Expr::Name(self.take_lexeme()))
                }
            }
            TokenKind::Dollar => {
                self.advance();
                let segments = self.parse_segments()?;
                Ok(Expr::Query(Box::new(Query::Absolute(segments))))
            }
            TokenKind::Star => {
                self.advance();
                Ok(Expr::Wildcard)
            }
            TokenKind::At => {
                self.advance();
                if self.check(TokenKind::Identifier) {
                    self.parse_typed()
                } else {
                    let segments = self.parse_segments()?;
                    Ok(Expr::Query(Box::new(Query::Relative(segments))))
                }
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parse_integer(&mut self) -> Result<Expr, ParseError> {
        let position = self.offset();
        let digits = self.take_lexeme();
        digits
            .parse::<i64>()
            .map(Expr::Integer)
            .map_err(|_| ParseError::NotAnInteger {
                found: digits,
                position,
            })
    }

    /// `( expr )`, returning the inner expression.
    fn parse_paren(&mut self) -> Result<Expr, ParseError> {
        self.expect(TokenKind::LParen, |position| ParseError::MissingOpeningParen {
            position,
        })?;
        let inner = self.parse_expression()?;
        self.expect(TokenKind::RParen, |position| ParseError::MissingClosingParen {
            position,
        })?;
        Ok(inner)
    }

    /// `IDENTIFIER ( params )`. The literal rule only dispatches here when
    /// `(` follows the name.
    fn parse_call(&mut self) -> Result<Expr, ParseError> {
        let name = self.take_lexeme();

        if !self.check(TokenKind::LParen) {
            return Err(ParseError::MissingOpeningParenInCall {
                name,
                position: self.offset(),
            });
        }
        self.advance();

        let args = self.parse_params()?;

        if !self.check(TokenKind::RParen) {
            return Err(ParseError::MissingClosingParenInCall {
                name,
                position: self.offset(),
            });
        }
        self.advance();

        Ok(Expr::Call { name, args })
    }

    fn parse_params(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut params = vec![];
        if self.check(TokenKind::RParen) {
            return Ok(params);
        }

        loop {
            params.push(self.parse_expression()?);
            if !self.check(TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        Ok(params)
    }

    /// `@` has been consumed and an identifier follows: `int(...)`, `str(...)`,
    /// `bool(...)` or `array(...)`.
    fn parse_typed(&mut self) -> Result<Expr, ParseError> {
        let position = self.offset();
        let name = self.take_lexeme();

        let Some(ty) = CastType::from_name(&name) else {
            return Err(ParseError::ExpectedType {
                found: name,
                position,
            });
        };

        let expr = self.parse_paren()?;
        Ok(Expr::Typed {
            ty,
            expr: Box::new(expr),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse(input: &str) -> Result<Query, ParseError> {
        let tokens = Lexer::new(input).tokenize().unwrap();
        Parser::new(tokens).parse()
    }

    #[test]
    fn test_slice_lookahead() {
        let query = parse("$[-1:]").unwrap();
        assert_eq!(
            query.segments(),
            &[Segment::Child(vec![Selector::Slice(Slice::new(
                Some(Expr::unary(UnaryOp::Minus, Expr::Integer(1))),
                None,
                None
            ))])]
        );
    }

    #[test]
    fn test_negative_index_is_not_a_slice() {
        let query = parse("$[-1]").unwrap();
        assert_eq!(
            query.segments(),
            &[Segment::Child(vec![Selector::Expr(Expr::unary(
                UnaryOp::Minus,
                Expr::Integer(1)
            ))])]
        );
    }

    #[test]
    fn test_error_positions() {
        assert_eq!(
            parse("$[1,]").unwrap_err(),
            ParseError::TrailingComma { position: 3 }
        );
        assert_eq!(
            parse("$.a[").unwrap_err(),
            ParseError::MissingClosingBracket { position: 4 }
        );
    }

    #[test]
    fn test_call_rule_requires_opening_paren() {
        let tokens = Lexer::new("f 1").tokenize().unwrap();
        assert_eq!(
            Parser::new(tokens).parse_call().unwrap_err(),
            ParseError::MissingOpeningParenInCall {
                name: "f".to_string(),
                position: 2
            }
        );
    }

    #[test]
    fn test_nesting_depth_is_released_on_exit() {
        let group = format!("{}@.a{}", "(".repeat(MAX_DEPTH - 2), ")".repeat(MAX_DEPTH - 2));
        let query = format!("$[?{} && {}]", group, group);
        let mut parser = Parser::new(Lexer::new(&query).tokenize().unwrap());
        assert!(parser.parse().is_ok());
        assert_eq!(parser.depth, 0);
    }

    #[test]
    fn test_integer_overflow() {
        assert!(matches!(
            parse("$[99999999999999999999]"),
            Err(ParseError::NotAnInteger { .. })
        ));
    }
}

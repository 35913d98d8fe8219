use thiserror::Error;
use tracing::trace;

use crate::ast::{Span, Token, TokenKind};

/// Lexical error. Positions are byte offsets into the source and are
/// displayed 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// `&`, `|` or `=` without its paired character
    #[error("unexpected character: {ch} at position {}", .position + 1)]
    UnexpectedCharacter { ch: char, position: usize },

    #[error("unterminated string literal starting at position {}", .position + 1)]
    UnterminatedString { position: usize },
}

impl LexError {
    pub fn position(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { position, .. }
            | LexError::UnterminatedString { position } => *position,
        }
    }
}

/// Single-pass scanner over the bytes of a query.
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input, position: 0 }
    }

    /// Scans the whole input. The first error aborts the scan.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            trace!(token = %token, offset = token.span.start, "scanned token");
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn current_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.position).copied()
    }

    fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.input.as_bytes().get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\r' | b'\n') = self.current_byte() {
            self.advance();
        }
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let start = self.position;
        self.advance();
        Token::new(kind, Span::new(start, self.position))
    }

    /// One- or two-character operator. `pair` is the character that turns
    /// `single` into `double`.
    fn one_or_two(&mut self, pair: u8, single: TokenKind, double: TokenKind) -> Token {
        if self.peek_byte(1) == Some(pair) {
            let start = self.position;
            self.position += 2;
            Token::new(double, Span::new(start, self.position))
        } else {
            self.single(single)
        }
    }

    /// Operator that only exists doubled (`&&`, `||`, `==`).
    fn doubled(&mut self, ch: u8, kind: TokenKind) -> Result<Token, LexError> {
        if self.peek_byte(1) == Some(ch) {
            let start = self.position;
            self.position += 2;
            Ok(Token::new(kind, Span::new(start, self.position)))
        } else {
            Err(LexError::UnexpectedCharacter {
                ch: char::from(ch),
                position: self.position,
            })
        }
    }

    fn read_identifier(&mut self) -> Token {
        let start = self.position;
        while let Some(b) = self.current_byte() {
            if b.is_ascii_alphabetic() || b == b'_' {
                self.advance();
            } else {
                break;
            }
        }

        let text = &self.input[start..self.position];
        let kind = TokenKind::keyword(text).unwrap_or(TokenKind::Identifier);
        Token::with_lexeme(kind, text, Span::new(start, self.position))
    }

    fn read_number(&mut self) -> Token {
        let start = self.position;
        while self.current_byte().is_some_and(|b| b.is_ascii_digit()) {
            self.advance();
        }
        Token::with_lexeme(
            TokenKind::Integer,
            &self.input[start..self.position],
            Span::new(start, self.position),
        )
    }

    fn read_string(&mut self, quote: u8) -> Result<Token, LexError> {
        let start = self.position;
        self.advance(); // Consume opening quote

        while let Some(b) = self.current_byte() {
            match b {
                b if b == quote => {
                    self.advance();
                    return Ok(Token::with_lexeme(
                        TokenKind::String,
                        &self.input[start..self.position],
                        Span::new(start, self.position),
                    ));
                }
                b'\\' => {
                    // The escaped byte is taken as is, whatever it is
                    self.advance();
                    if self.current_byte().is_some() {
                        self.advance();
                    }
                }
                _ => self.advance(),
            }
        }

        Err(LexError::UnterminatedString { position: start })
    }

    /// Returns the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        loop {
            self.skip_whitespace();

            let Some(b) = self.current_byte() else {
                return Ok(None);
            };

            let token = match b {
                b':' => self.single(TokenKind::Colon),
                b'(' => self.single(TokenKind::LParen),
                b')' => self.single(TokenKind::RParen),
                b',' => self.single(TokenKind::Comma),
                b'{' => self.single(TokenKind::LBrace),
                b'}' => self.single(TokenKind::RBrace),
                b'[' => self.single(TokenKind::LBrack),
                b']' => self.single(TokenKind::RBrack),
                b'$' => self.single(TokenKind::Dollar),
                b'?' => self.single(TokenKind::QuestionMark),
                b'@' => self.single(TokenKind::At),
                b'*' => self.single(TokenKind::Star),
                b'+' => self.single(TokenKind::Plus),
                b'-' => self.single(TokenKind::Minus),
                b'/' => self.single(TokenKind::Slash),
                b'&' => self.doubled(b'&', TokenKind::And)?,
                b'|' => self.doubled(b'|', TokenKind::Or)?,
                b'=' => self.doubled(b'=', TokenKind::EqEq)?,
                b'!' => self.one_or_two(b'=', TokenKind::Not, TokenKind::Neq),
                b'<' => self.one_or_two(b'=', TokenKind::Lt, TokenKind::Lte),
                b'>' => self.one_or_two(b'=', TokenKind::Gt, TokenKind::Gte),
                b'.' => self.one_or_two(b'.', TokenKind::Dot, TokenKind::RecursiveOp),
                b'"' | b'\'' => self.read_string(b)?,
                b if b.is_ascii_digit() => self.read_number(),
                b if b.is_ascii_alphabetic() || b == b'_' => self.read_identifier(),
                _ => {
                    // Bytes with no meaning in the language are ignored
                    self.advance();
                    continue;
                }
            };

            return Ok(Some(token));
        }
    }
}

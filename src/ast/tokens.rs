use std::fmt;

/// Lexical category of a token.
///
/// The set is closed. Some kinds (`LBrace`, `RBrace`, `Plus`, `Slash`,
/// `Length`, `Count`, `Match`) are produced by the lexer but have no grammar
/// production yet; the parser rejects them as unexpected tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Structural
    /// `:`
    Colon,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBrack,
    /// `]`
    RBrack,
    /// Root of an absolute query
    ///
    /// # Examples
    /// ```text
    /// $
    /// $.store.book
    /// ```
    Dollar,
    /// Descendant segment operator
    ///
    /// # Examples
    /// ```text
    /// $..author
    /// $..[0]
    /// ```
    RecursiveOp,

    // Logical
    /// `&&`
    And,
    /// `||`
    Or,

    // Relational and equality
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Lte,
    /// `>=`
    Gte,
    /// `==`
    EqEq,
    /// `!=`
    Neq,

    // Misc
    /// Root of a relative query, or the prefix of a typed cast
    ///
    /// # Examples
    /// ```text
    /// @.price
    /// @int(@.count)
    /// ```
    At,
    /// `.`
    Dot,
    /// Filter prefix
    ///
    /// # Examples
    /// ```text
    /// $[?(@.price < 10)]
    /// ```
    QuestionMark,
    /// `!`
    Not,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `/`
    Slash,
    /// `*`
    Star,

    // Reserved words
    Length,
    Count,
    Match,

    // Literals and identifiers
    /// Unsigned run of decimal digits
    Integer,
    /// Single or double quoted string, quotes included in the lexeme
    String,
    /// `[A-Za-z_]+` that is not a keyword
    Identifier,
    True,
    False,
    Null,
}

impl TokenKind {
    /// Whether tokens of this kind carry their source text.
    pub fn carries_lexeme(self) -> bool {
        matches!(
            self,
            TokenKind::Integer
                | TokenKind::String
                | TokenKind::Identifier
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
                | TokenKind::Match
                | TokenKind::Count
                | TokenKind::Length
        )
    }

    /// Keyword lookup, ASCII case-insensitive.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        const KEYWORDS: [(&str, TokenKind); 6] = [
            ("null", TokenKind::Null),
            ("true", TokenKind::True),
            ("false", TokenKind::False),
            ("match", TokenKind::Match),
            ("count", TokenKind::Count),
            ("length", TokenKind::Length),
        ];

        KEYWORDS
            .iter()
            .find(|(kw, _)| kw.eq_ignore_ascii_case(word))
            .map(|(_, kind)| *kind)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Colon => "COLON",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Comma => "COMMA",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::LBrack => "LBRACK",
            TokenKind::RBrack => "RBRACK",
            TokenKind::Dollar => "DOLLAR",
            TokenKind::RecursiveOp => "RECURSIVE_OP",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Lt => "LT",
            TokenKind::Gt => "GT",
            TokenKind::Lte => "LTE",
            TokenKind::Gte => "GTE",
            TokenKind::EqEq => "EQEQ",
            TokenKind::Neq => "NEQ",
            TokenKind::At => "AT",
            TokenKind::Dot => "DOT",
            TokenKind::QuestionMark => "QUESTION_MARK",
            TokenKind::Not => "NOT",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Slash => "SLASH",
            TokenKind::Star => "STAR",
            TokenKind::Length => "LENGTH",
            TokenKind::Count => "COUNT",
            TokenKind::Match => "MATCH",
            TokenKind::Integer => "INTEGER",
            TokenKind::String => "STRING",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Null => "NULL",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Byte range of a token in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }
}

/// A scanned token.
///
/// `lexeme` is present exactly when [`TokenKind::carries_lexeme`] holds for
/// `kind`, and keeps the source text as written (string quotes and keyword case
/// included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: Option<String>,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token {
            kind,
            lexeme: None,
            span,
        }
    }

    pub fn with_lexeme(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Token {
            kind,
            lexeme: Some(lexeme.into()),
            span,
        }
    }

    pub fn lexeme(&self) -> &str {
        self.lexeme.as_deref().unwrap_or_default()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.lexeme {
            Some(lexeme) => write!(f, "{} {}", self.kind, lexeme),
            None => write!(f, "{}", self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup_ignores_case() {
        assert_eq!(TokenKind::keyword("NuLl"), Some(TokenKind::Null));
        assert_eq!(TokenKind::keyword("LENGTH"), Some(TokenKind::Length));
        assert_eq!(TokenKind::keyword("nullable"), None);
    }

    #[test]
    fn test_lexeme_bearing_kinds() {
        assert!(TokenKind::Match.carries_lexeme());
        assert!(TokenKind::Integer.carries_lexeme());
        assert!(!TokenKind::Dollar.carries_lexeme());
        assert!(!TokenKind::Star.carries_lexeme());
    }
}

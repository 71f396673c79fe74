use std::fmt;

use crate::lexer::Position;

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Opens an index group
    ///
    /// # Examples
    /// ```text
    /// ?filter[status]=open
    /// ```
    LBracket,

    /// Closes an index group
    RBracket,

    /// Separates the items of a piped list
    ///
    /// # Examples
    /// ```text
    /// ?tags=red|green|blue
    /// ```
    Pipe,

    /// Separates the items of a comma list (extended grammar only)
    ///
    /// # Examples
    /// ```text
    /// ?sort=name,date
    /// ```
    Comma,

    /// Leading marker of every query string
    Question,

    /// Joins params together
    ///
    /// # Examples
    /// ```text
    /// ?a=1&b=2
    /// ```
    Amp,

    /// Separates a param's name (and index) from its value
    Eq,

    /// Run of identifier characters
    ///
    /// Letters, digits, and `_ % . - : /`.
    ///
    /// # Examples
    /// ```text
    /// status
    /// 2024-01-01
    /// /api/v1
    /// ```
    String,

    /// Space, tab, carriage return or newline. Never reaches the parser.
    Whitespace,

    /// End of input
    Eof,
}

impl TokenKind {
    /// Kind produced by a single-character delimiter, if `ch` is one.
    pub fn from_delimiter(ch: char) -> Option<Self> {
        match ch {
            '[' => Some(TokenKind::LBracket),
            ']' => Some(TokenKind::RBracket),
            '|' => Some(TokenKind::Pipe),
            ',' => Some(TokenKind::Comma),
            '?' => Some(TokenKind::Question),
            '&' => Some(TokenKind::Amp),
            '=' => Some(TokenKind::Eq),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Pipe => "'|'",
            TokenKind::Comma => "','",
            TokenKind::Question => "'?'",
            TokenKind::Amp => "'&'",
            TokenKind::Eq => "'='",
            TokenKind::String => "STRING",
            TokenKind::Whitespace => "WS",
            TokenKind::Eof => "EOF",
        };
        f.write_str(name)
    }
}

/// A token with its source text and starting position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Token {
            kind,
            text: text.into(),
            position,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

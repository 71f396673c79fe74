use std::fmt;

use tracing::trace;

use crate::ast::{Token, TokenKind};
use crate::config::Grammar;

/// Location of a character in the input.
///
/// `offset` is a 0-based character index; `line` and `column` are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn start() -> Self {
        Position {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A character that belongs to no token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unexpected character '{character}' at {position}")]
pub struct LexError {
    pub position: Position,
    pub character: char,
}

/// Characters allowed inside a STRING token.
pub fn is_string_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '%' | '.' | '-' | ':' | '/')
}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n')
}

pub struct Lexer {
    input: Vec<char>,
    position: Position,
    grammar: Grammar,
    finished: bool,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self::with_grammar(input, Grammar::default())
    }

    pub fn with_grammar(input: &str, grammar: Grammar) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: Position::start(),
            grammar,
            finished: false,
        }
    }

    pub fn grammar(&self) -> Grammar {
        self.grammar
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position.offset).copied()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position.offset += 1;
            if ch == '\n' {
                self.position.line += 1;
                self.position.column = 1;
            } else {
                self.position.column += 1;
            }
        }
    }

    fn read_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if pred(ch) {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    /// Next token including whitespace.
    pub fn next_raw_token(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        let grammar = self.grammar;

        let token = match self.current_char() {
            None => Token::new(TokenKind::Eof, "", start),
            Some(ch) if is_whitespace(ch) => {
                let text = self.read_while(is_whitespace);
                Token::new(TokenKind::Whitespace, text, start)
            }
            Some(ch) if grammar.is_delimiter(ch) => {
                // every configured delimiter maps to a kind
                let kind = TokenKind::from_delimiter(ch).ok_or(LexError {
                    position: start,
                    character: ch,
                })?;
                self.advance();
                Token::new(kind, ch.to_string(), start)
            }
            Some(ch) if is_string_char(ch) => {
                let text = self.read_while(is_string_char);
                Token::new(TokenKind::String, text, start)
            }
            Some(ch) => {
                return Err(LexError {
                    position: start,
                    character: ch,
                });
            }
        };

        trace!(kind = %token.kind, text = %token.text, offset = start.offset, "token");
        Ok(token)
    }

    /// Next token, skipping whitespace. Returns `Eof` repeatedly at the end.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        loop {
            let token = self.next_raw_token()?;
            if token.kind != TokenKind::Whitespace {
                return Ok(token);
            }
        }
    }

    /// Remaining tokens up to and including a single `Eof`.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while !self.finished {
            let token = self.next_token()?;
            self.finished = token.kind == TokenKind::Eof;
            tokens.push(token);
        }
        Ok(tokens)
    }
}

/// Tokenizes `input` under `grammar`, dropping whitespace.
pub fn tokenize(input: &str, grammar: Grammar) -> Result<Vec<Token>, LexError> {
    Lexer::with_grammar(input, grammar).tokenize()
}

#[test]
fn test_delimiters() {
    let mut lexer = Lexer::new("?[]|,&=");
    let kinds: Vec<TokenKind> = std::iter::from_fn(|| lexer.next_token().ok())
        .map(|t| t.kind)
        .take_while(|k| *k != TokenKind::Eof)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Question,
            TokenKind::LBracket,
            TokenKind::RBracket,
            TokenKind::Pipe,
            TokenKind::Comma,
            TokenKind::Amp,
            TokenKind::Eq,
        ]
    );
}

#[test]
fn test_position_tracks_lines() {
    let mut lexer = Lexer::new("?a\n =b");
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Question);
    assert_eq!(lexer.next_token().unwrap().text, "a");
    let eq = lexer.next_token().unwrap();
    assert_eq!(eq.kind, TokenKind::Eq);
    assert_eq!(
        eq.position,
        Position {
            offset: 4,
            line: 2,
            column: 2
        }
    );
}

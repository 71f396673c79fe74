use std::fmt;

use tracing::{debug, trace};

use crate::{
    ast::{Index, Param, Querystring, Token, TokenKind, Value},
    config::{DEFAULT_MAX_DEPTH, Grammar, ParseOptions},
    error::Error,
    lexer::{LexError, Lexer, Position},
};

/// The token stream stopped matching the grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {} but found {found} at {position}", ExpectedList(.expected))]
pub struct ParseError {
    pub position: Position,
    /// Every kind that would have been accepted here
    pub expected: Vec<TokenKind>,
    pub found: TokenKind,
}

struct ExpectedList<'a>(&'a [TokenKind]);

impl fmt::Display for ExpectedList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            [] => f.write_str("nothing"),
            [single] => write!(f, "{}", single),
            many => {
                f.write_str("one of ")?;
                for (i, kind) in many.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", kind)?;
                }
                Ok(())
            }
        }
    }
}

/// Recursive-descent parser over a token stream.
///
/// ```text
/// querystring := '?' params            (basic: '?' param)
/// params      := param ('&' param)*
/// param       := STRING index? '=' value
/// index       := group+
/// group       := '[' (STRING | group+) ']'
/// value       := STRING ('|' STRING)* | STRING (',' STRING)*
/// ```
pub struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
    grammar: Grammar,
    max_depth: usize,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, LexError> {
        let grammar = lexer.grammar();
        let tokens = lexer.tokenize()?;
        Ok(Self::from_tokens(tokens, grammar))
    }

    /// Parser over pre-lexed tokens. Whitespace is dropped and the stream is
    /// cut after the first `Eof`, or given one if it has none.
    pub fn from_tokens(tokens: Vec<Token>, grammar: Grammar) -> Self {
        let mut tokens: Vec<Token> = tokens
            .into_iter()
            .filter(|t| t.kind != TokenKind::Whitespace)
            .collect();

        match tokens.iter().position(|t| t.is(TokenKind::Eof)) {
            Some(eof) => tokens.truncate(eof + 1),
            None => {
                let end = tokens.last().map(end_of).unwrap_or_else(Position::start);
                tokens.push(Token::new(TokenKind::Eof, "", end));
            }
        }

        Parser {
            tokens,
            cursor: 0,
            grammar,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = limit;
        self
    }

    pub fn grammar(&self) -> Grammar {
        self.grammar
    }

    fn current(&self) -> &Token {
        // from_tokens guarantees a trailing Eof
        &self.tokens[self.cursor.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if token.kind != TokenKind::Eof {
            self.cursor += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().is(kind)
    }

    fn unexpected(&self, expected: &[TokenKind]) -> ParseError {
        let token = self.current();
        ParseError {
            position: token.position,
            expected: expected.to_vec(),
            found: token.kind,
        }
    }

    /// Consumes a `kind` token, reporting `expected` on mismatch.
    fn expect_in(&mut self, kind: TokenKind, expected: &[TokenKind]) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        self.expect_in(kind, &[kind])
    }

    /// Parse the whole token stream. Each call starts again from the first token.
    pub fn parse_querystring(&mut self) -> Result<Querystring, Error> {
        self.cursor = 0;
        self.expect(TokenKind::Question)?;

        let params = match self.grammar {
            Grammar::Extended => self.parse_params()?,
            Grammar::Basic => vec![self.parse_param()?],
        };

        if let Some(last) = params.last() {
            self.expect_end(&last.value)?;
        }

        debug!(params = params.len(), grammar = %self.grammar, "parsed query string");
        Ok(Querystring::new(params))
    }

    fn parse_params(&mut self) -> Result<Vec<Param>, Error> {
        let mut params = vec![self.parse_param()?];
        while self.check(TokenKind::Amp) {
            self.advance();
            params.push(self.parse_param()?);
        }
        Ok(params)
    }

    fn expect_end(&mut self, last: &Value) -> Result<(), ParseError> {
        if self.check(TokenKind::Eof) {
            return Ok(());
        }

        let mut expected = match (last, self.grammar) {
            (Value::Scalar(_), Grammar::Extended) => vec![TokenKind::Pipe, TokenKind::Comma],
            (Value::Scalar(_), Grammar::Basic) | (Value::Piped(_), _) => vec![TokenKind::Pipe],
            (Value::Commaed(_), _) => vec![TokenKind::Comma],
        };
        if self.grammar == Grammar::Extended {
            expected.push(TokenKind::Amp);
        }
        expected.push(TokenKind::Eof);
        Err(self.unexpected(&expected))
    }

    fn parse_param(&mut self) -> Result<Param, Error> {
        let name = self.expect(TokenKind::String)?.text;

        let mut index = Index::new();
        if self.check(TokenKind::LBracket) {
            self.parse_index(&mut index)?;
        }

        let before_eq: &[TokenKind] = match self.grammar {
            Grammar::Basic if !index.is_empty() => &[TokenKind::Eq],
            _ => &[TokenKind::LBracket, TokenKind::Eq],
        };
        self.expect_in(TokenKind::Eq, before_eq)?;

        let value = self.parse_value()?;
        trace!(name = %name, index = %index, value = value.kind_name(), "param");
        Ok(Param::new(name, index, value))
    }

    fn parse_index(&mut self, index: &mut Index) -> Result<(), Error> {
        match self.grammar {
            Grammar::Extended => {
                while self.check(TokenKind::LBracket) {
                    self.parse_group(index, 1)?;
                }
            }
            Grammar::Basic => self.parse_group(index, 1)?,
        }
        Ok(())
    }

    /// One bracket group at nesting level `depth` (outermost is 1).
    fn parse_group(&mut self, index: &mut Index, depth: usize) -> Result<(), Error> {
        if depth > self.max_depth {
            return Err(Error::DepthExceeded {
                limit: self.max_depth,
                position: self.current().position,
            });
        }
        self.expect(TokenKind::LBracket)?;

        if self.grammar == Grammar::Extended && self.check(TokenKind::LBracket) {
            while self.check(TokenKind::LBracket) {
                self.parse_group(index, depth + 1)?;
            }
            self.expect_in(TokenKind::RBracket, &[TokenKind::LBracket, TokenKind::RBracket])?;
            return Ok(());
        }

        let inner: &[TokenKind] = match self.grammar {
            Grammar::Extended => &[TokenKind::String, TokenKind::LBracket],
            Grammar::Basic => &[TokenKind::String],
        };
        let fragment = self.expect_in(TokenKind::String, inner)?;
        index.push(fragment.text);
        self.expect(TokenKind::RBracket)?;
        Ok(())
    }

    fn parse_value(&mut self) -> Result<Value, Error> {
        let first = Value::Scalar(self.expect(TokenKind::String)?.text);

        // one token of lookahead picks the list kind
        let separator = match self.current().kind {
            TokenKind::Pipe => TokenKind::Pipe,
            TokenKind::Comma if self.grammar == Grammar::Extended => TokenKind::Comma,
            _ => return Ok(first),
        };

        let mut rest = Vec::new();
        while self.check(separator) {
            self.advance();
            let item = self.expect(TokenKind::String)?;
            rest.push(Value::Scalar(item.text));
        }

        Ok(match separator {
            TokenKind::Pipe => Value::piped(first, rest),
            _ => Value::commaed(first, rest),
        })
    }
}

/// Position just past `token`. Tokens given here never span a newline.
fn end_of(token: &Token) -> Position {
    let len = token.text.chars().count();
    Position {
        offset: token.position.offset + len,
        line: token.position.line,
        column: token.position.column + len,
    }
}

/// Parses `input` with the default options.
pub fn parse(input: &str) -> Result<Querystring, Error> {
    parse_with(input, &ParseOptions::default())
}

/// Parses `input` under `options`.
///
/// The whole input is tokenized before parsing starts, so a lex error
/// anywhere in the input is reported ahead of any parse error.
pub fn parse_with(input: &str, options: &ParseOptions) -> Result<Querystring, Error> {
    let lexer = Lexer::with_grammar(input, options.grammar);
    Parser::new(lexer)?
        .with_max_depth(options.max_depth)
        .parse_querystring()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_list_display() {
        assert_eq!(ExpectedList(&[TokenKind::RBracket]).to_string(), "']'");
        assert_eq!(
            ExpectedList(&[TokenKind::Amp, TokenKind::Eof]).to_string(),
            "one of '&', EOF"
        );
    }

    #[test]
    fn test_from_tokens_appends_eof() {
        let tokens = vec![
            Token::new(TokenKind::Question, "?", Position::start()),
            Token::new(
                TokenKind::String,
                "key",
                Position {
                    offset: 1,
                    line: 1,
                    column: 2,
                },
            ),
        ];
        let mut parser = Parser::from_tokens(tokens, Grammar::Extended);
        let err = parser.parse_querystring().unwrap_err();
        assert_eq!(
            err,
            Error::Parse(ParseError {
                position: Position {
                    offset: 4,
                    line: 1,
                    column: 5
                },
                expected: vec![TokenKind::LBracket, TokenKind::Eq],
                found: TokenKind::Eof,
            })
        );
    }

    #[test]
    fn test_parse_is_repeatable() {
        let mut parser = Parser::new(Lexer::new("?a=1")).unwrap();
        let first = parser.parse_querystring().unwrap();
        let second = parser.parse_querystring().unwrap();
        assert_eq!(first, second);
    }
}

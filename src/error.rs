use crate::lexer::{LexError, Position};
use crate::parser::ParseError;

/// Any failure of a parse call. The first failure aborts the parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Input character outside every token alphabet
    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    /// Token stream does not match the grammar
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Bracket nesting went past the configured limit
    #[error("nesting depth exceeds limit of {limit} at {position}")]
    DepthExceeded { limit: usize, position: Position },
}

impl Error {
    /// Position of the offending character or token.
    pub fn position(&self) -> Position {
        match self {
            Error::Lex(e) => e.position,
            Error::Parse(e) => e.position,
            Error::DepthExceeded { position, .. } => *position,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

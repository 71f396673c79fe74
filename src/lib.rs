pub mod ast;
pub mod cli;
pub mod config;
pub mod error;
pub mod flatten;
pub mod lexer;
pub mod output;
pub mod parser;

pub use ast::{Index, Param, Querystring, Token, TokenKind, Value};
pub use config::{DEFAULT_MAX_DEPTH, Grammar, ParseOptions};
pub use error::{Error, Result};
pub use flatten::{FlattenError, flatten};
pub use lexer::{LexError, Lexer, Position, tokenize};
pub use output::{to_canonical, to_json, to_json_pretty};
pub use parser::{ParseError, Parser, parse, parse_with};

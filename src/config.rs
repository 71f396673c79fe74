//! Parser configuration: grammar mode and resource limits.

use std::fmt;
use std::str::FromStr;

/// Default cap on bracket nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Which query-string grammar the lexer and parser accept.
///
/// The two grammars are not mixed: a single parse runs entirely in one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Grammar {
    /// Full grammar: `&` chains, nested brackets, `|` and `,` lists.
    ///
    /// ```text
    /// ?filter[status][0]=open|closed&sort=name,date
    /// ```
    #[default]
    Extended,

    /// Restricted grammar: a single param, at most one bracket group,
    /// and `|` lists only.
    ///
    /// ```text
    /// ?ids[0]=a|b|c
    /// ```
    Basic,
}

impl Grammar {
    /// Single-character delimiters recognized by the lexer in this mode.
    pub fn delimiters(self) -> &'static [char] {
        match self {
            Grammar::Extended => &['[', ']', '|', ',', '?', '&', '='],
            Grammar::Basic => &['[', ']', '?', '&', '=', '|'],
        }
    }

    pub fn is_delimiter(self, ch: char) -> bool {
        self.delimiters().contains(&ch)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grammar::Extended => "extended",
            Grammar::Basic => "basic",
        }
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a grammar name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown grammar '{0}' (expected 'extended' or 'basic')")]
pub struct UnknownGrammar(pub String);

impl FromStr for Grammar {
    type Err = UnknownGrammar;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "extended" | "a" => Ok(Grammar::Extended),
            "basic" | "b" => Ok(Grammar::Basic),
            _ => Err(UnknownGrammar(s.to_string())),
        }
    }
}

/// Options controlling a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Grammar mode
    pub grammar: Grammar,
    /// Maximum bracket nesting depth before failing with `DepthExceeded`
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            grammar: Grammar::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grammar(mut self, grammar: Grammar) -> Self {
        self.grammar = grammar;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

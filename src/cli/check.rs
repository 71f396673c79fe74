//! Parse a query string and render the result

use std::str::FromStr;

use super::CliError;
use crate::{ParseOptions, flatten, output, parse_with};

/// How a successful parse is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JSON structure of the parse tree
    #[default]
    Tree,
    /// Nested JSON object keyed by param path
    Flat,
    /// Canonical query string
    Canonical,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown format '{0}' (expected 'tree', 'flat' or 'canonical')")]
pub struct UnknownFormat(pub String);

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tree" => Ok(Self::Tree),
            "flat" | "flatten" => Ok(Self::Flat),
            "canonical" | "qs" => Ok(Self::Canonical),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

/// Options for the parse command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The query string to parse
    pub query: Option<String>,
    pub parse: ParseOptions,
    pub format: OutputFormat,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Only validate syntax, don't render
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Rendered output
    Success(String),
}

/// Parse the query and render it according to `options`
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let query = options.query.as_deref().ok_or(CliError::NoInput)?;
    let qs = parse_with(query, &options.parse)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    let rendered = match options.format {
        OutputFormat::Canonical => output::to_canonical(&qs),
        OutputFormat::Tree if options.pretty => output::to_json_pretty(&qs),
        OutputFormat::Tree => output::to_json(&qs),
        OutputFormat::Flat => {
            let flat = serde_json::Value::Object(flatten(&qs)?);
            if options.pretty {
                format!("{:#}", flat)
            } else {
                flat.to_string()
            }
        }
    };
    Ok(CheckResult::Success(rendered))
}

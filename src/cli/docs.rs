//! Grammar reference text for the qsg CLI

use crate::Grammar;

/// Reference card for `grammar`
pub fn get_grammar_reference(grammar: Grammar) -> &'static str {
    match grammar {
        Grammar::Extended => EXTENDED,
        Grammar::Basic => BASIC,
    }
}

const EXTENDED: &str = r#"QUERY STRING GRAMMAR (extended)

  querystring := '?' params
  params      := param ('&' param)*
  param       := STRING index? '=' value
  index       := group+
  group       := '[' (STRING | group+) ']'
  value       := STRING ('|' STRING)*
               | STRING (',' STRING)*

TOKENS
  Delimiters   [ ] | , ? & =
  STRING       letters, digits and _ % . - : /
  Whitespace   space, tab, CR, LF (ignored)

EXAMPLES
  ?k=v                      scalar
  ?k[0][b]=v                index ["0", "b"]
  ?k[[0][b]]=v              same index, nested groups
  ?k=a|b|c                  piped list
  ?k=a,b                    comma list
  ?a=1&b=2                  two params

NOTES
  '|' and ',' cannot be mixed inside one value.
  Bracket nesting beyond --max-depth is rejected.
"#;

const BASIC: &str = r#"QUERY STRING GRAMMAR (basic)

  querystring := '?' param
  param       := STRING ('[' STRING ']')? '=' value
  value       := STRING ('|' STRING)*

TOKENS
  Delimiters   [ ] ? & = |
  STRING       letters, digits and _ % . - : /
  Whitespace   space, tab, CR, LF (ignored)

EXAMPLES
  ?k=v                      scalar
  ?k[0]=a|b                 index ["0"], piped list

NOTES
  Only one param is accepted; '&' is rejected by the parser.
  ',' is not part of this grammar.
"#;

// tests/parser_tests.rs

use qs_grammar::ast::{Index, Param, Querystring, TokenKind, Value};
use qs_grammar::config::{Grammar, ParseOptions};
use qs_grammar::lexer::{Lexer, Position};
use qs_grammar::parser::{ParseError, Parser, parse, parse_with};
use qs_grammar::Error;
use rstest::rstest;

fn scalar(s: &str) -> Value {
    Value::scalar(s)
}

fn index(fragments: &[&str]) -> Index {
    fragments.iter().copied().collect()
}

fn basic(input: &str) -> Result<Querystring, Error> {
    parse_with(input, &ParseOptions::new().with_grammar(Grammar::Basic))
}

fn parse_error(err: Error) -> ParseError {
    match err {
        Error::Parse(e) => e,
        other => panic!("Expected parse error, got {:?}", other),
    }
}

// ============================================================================
// Scalars and indices
// ============================================================================

#[test]
fn test_scalar_param() {
    let qs = parse("?k=v").unwrap();
    assert_eq!(
        qs,
        Querystring::new(vec![Param::new("k", Index::new(), scalar("v"))])
    );
}

#[test]
fn test_single_index() {
    let qs = parse("?k[0]=v").unwrap();
    assert_eq!(qs.params[0].name, "k");
    assert_eq!(qs.params[0].index, index(&["0"]));
    assert_eq!(qs.params[0].value, scalar("v"));
}

#[test]
fn test_sequenced_indices() {
    let qs = parse("?a[0][b][c_d]=v").unwrap();
    assert_eq!(qs.params[0].index, index(&["0", "b", "c_d"]));
}

#[test]
fn test_nested_groups_flatten_in_order() {
    let nested = parse("?a[[0][b]]=v").unwrap();
    let sequenced = parse("?a[0][b]=v").unwrap();
    assert_eq!(nested, sequenced);

    let deeper = parse("?a[x][[[y]]][z]=v").unwrap();
    assert_eq!(deeper.params[0].index, index(&["x", "y", "z"]));
}

// ============================================================================
// Lists
// ============================================================================

#[test]
fn test_piped_list_is_flat() {
    let qs = parse("?k=a|b|c").unwrap();
    assert_eq!(
        qs.params[0].value,
        Value::Piped(vec![scalar("a"), scalar("b"), scalar("c")])
    );
}

#[test]
fn test_commaed_list() {
    let qs = parse("?k=a,b").unwrap();
    assert_eq!(qs.params[0].value, Value::Commaed(vec![scalar("a"), scalar("b")]));
}

#[test]
fn test_list_with_index() {
    let qs = parse("?filter[status]=open|closed").unwrap();
    let param = &qs.params[0];
    assert_eq!(param.index, index(&["status"]));
    assert_eq!(param.value.items().map(<[Value]>::len), Some(2));
}

#[test]
fn test_mixed_list_delimiters_rejected() {
    let err = parse_error(parse("?k=a|b,c").unwrap_err());
    assert_eq!(err.found, TokenKind::Comma);
    assert_eq!(
        err.expected,
        vec![TokenKind::Pipe, TokenKind::Amp, TokenKind::Eof]
    );
    assert_eq!(err.position.offset, 6);
}

// ============================================================================
// Chaining
// ============================================================================

#[test]
fn test_params_in_input_order() {
    let qs = parse("?a=1&b=2").unwrap();
    let names: Vec<&str> = qs.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(qs.get("b").map(|p| &p.value), Some(&scalar("2")));
}

#[test]
fn test_long_chain() {
    let input = format!(
        "?{}",
        (0..500)
            .map(|i| format!("p{}[{}]=x|y", i, i))
            .collect::<Vec<_>>()
            .join("&")
    );
    let qs = parse(&input).unwrap();
    assert_eq!(qs.len(), 500);
    assert_eq!(qs.params[499].index, index(&["499"]));
}

#[test]
fn test_whitespace_between_tokens() {
    let qs = parse(" ? a [ 0 ] = x | y\n& b = z ").unwrap();
    assert_eq!(qs.to_string(), "?a[0]=x|y&b=z");
}

// ============================================================================
// Malformed input
// ============================================================================

#[test]
fn test_missing_value_points_at_eof() {
    let err = parse_error(parse("?k=").unwrap_err());
    assert_eq!(
        err,
        ParseError {
            position: Position {
                offset: 3,
                line: 1,
                column: 4
            },
            expected: vec![TokenKind::String],
            found: TokenKind::Eof,
        }
    );
}

#[test]
fn test_unclosed_bracket_points_at_eq() {
    let err = parse_error(parse("?k[0=v").unwrap_err());
    assert_eq!(err.position.offset, 4);
    assert_eq!(err.expected, vec![TokenKind::RBracket]);
    assert_eq!(err.found, TokenKind::Eq);
    assert_eq!(err.to_string(), "expected ']' but found '=' at 1:5");
}

#[rstest]
#[case("k=v", vec![TokenKind::Question], TokenKind::String)]
#[case("?=v", vec![TokenKind::String], TokenKind::Eq)]
#[case("?k", vec![TokenKind::LBracket, TokenKind::Eq], TokenKind::Eof)]
#[case("?k[]=v", vec![TokenKind::String, TokenKind::LBracket], TokenKind::RBracket)]
#[case("?k[[0]=v", vec![TokenKind::LBracket, TokenKind::RBracket], TokenKind::Eq)]
#[case("?k=a|", vec![TokenKind::String], TokenKind::Eof)]
#[case("?k=a,,b", vec![TokenKind::String], TokenKind::Comma)]
#[case("?a=1&", vec![TokenKind::String], TokenKind::Eof)]
#[case("?k=v w", vec![TokenKind::Pipe, TokenKind::Comma, TokenKind::Amp, TokenKind::Eof], TokenKind::String)]
#[case("?k=v?", vec![TokenKind::Pipe, TokenKind::Comma, TokenKind::Amp, TokenKind::Eof], TokenKind::Question)]
fn test_malformed(#[case] input: &str, #[case] expected: Vec<TokenKind>, #[case] found: TokenKind) {
    let err = parse_error(parse(input).unwrap_err());
    assert_eq!(err.expected, expected, "Failed for input: {}", input);
    assert_eq!(err.found, found, "Failed for input: {}", input);
}

#[test]
fn test_lex_error_surfaces() {
    let err = parse("?k=v;").unwrap_err();
    assert!(matches!(err, Error::Lex(ref e) if e.character == ';'));
    assert_eq!(err.position().offset, 4);
}

#[test]
fn test_lex_error_reported_before_earlier_parse_error() {
    // missing '?' at offset 0, bad character at offset 3
    let err = parse("k=v;").unwrap_err();
    assert!(matches!(err, Error::Lex(ref e) if e.character == ';'));
    assert_eq!(err.position().offset, 3);
}

// ============================================================================
// Depth guard
// ============================================================================

#[test]
fn test_depth_within_limit() {
    let options = ParseOptions::new().with_max_depth(3);
    let qs = parse_with("?a[[[0]]]=v", &options).unwrap();
    assert_eq!(qs.params[0].index, index(&["0"]));
}

#[test]
fn test_depth_exceeded() {
    let options = ParseOptions::new().with_max_depth(3);
    let err = parse_with("?a[[[[0]]]]=v", &options).unwrap_err();
    assert!(matches!(err, Error::DepthExceeded { limit: 3, .. }));
    assert_eq!(err.position().offset, 5);
}

#[test]
fn test_adversarial_nesting_does_not_overflow() {
    let depth = 100_000;
    let input = format!("?a{}0{}=v", "[".repeat(depth), "]".repeat(depth));
    let err = parse(&input).unwrap_err();
    assert!(matches!(err, Error::DepthExceeded { limit: 64, .. }));
}

#[test]
fn test_sequenced_groups_do_not_accumulate_depth() {
    let options = ParseOptions::new().with_max_depth(1);
    let input = format!("?a{}=v", "[x]".repeat(200));
    let qs = parse_with(&input, &options).unwrap();
    assert_eq!(qs.params[0].index.len(), 200);
}

// ============================================================================
// Basic grammar
// ============================================================================

#[test]
fn test_basic_scalar_and_piped_index() {
    assert_eq!(basic("?k=v").unwrap(), parse("?k=v").unwrap());

    let qs = basic("?ids[0]=a|b|c").unwrap();
    assert_eq!(qs.params[0].index, index(&["0"]));
    assert_eq!(
        qs.params[0].value,
        Value::Piped(vec![scalar("a"), scalar("b"), scalar("c")])
    );
}

#[test]
fn test_basic_single_param_only() {
    let err = parse_error(basic("?a=1&b=2").unwrap_err());
    assert_eq!(err.found, TokenKind::Amp);
    assert_eq!(err.expected, vec![TokenKind::Pipe, TokenKind::Eof]);
}

#[test]
fn test_basic_single_bracket_group() {
    let err = parse_error(basic("?a[0][1]=v").unwrap_err());
    assert_eq!(err.found, TokenKind::LBracket);
    assert_eq!(err.expected, vec![TokenKind::Eq]);

    let err = parse_error(basic("?a[[0]]=v").unwrap_err());
    assert_eq!(err.expected, vec![TokenKind::String]);
}

#[test]
fn test_basic_rejects_comma_at_lex_time() {
    assert!(matches!(basic("?k=a,b"), Err(Error::Lex(_))));
}

// ============================================================================
// Parser API
// ============================================================================

#[test]
fn test_parser_over_lexer() {
    let lexer = Lexer::with_grammar("?k=a|b", Grammar::Basic);
    let mut parser = Parser::new(lexer).unwrap();
    assert_eq!(parser.grammar(), Grammar::Basic);
    let qs = parser.parse_querystring().unwrap();
    assert_eq!(qs.to_string(), "?k=a|b");
}

#[test]
fn test_parser_from_tokens() {
    let mut lexer = Lexer::new("?a=1&b=x,y trailing");
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_raw_token().unwrap();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }
    // cut before the trailing word
    let cut = tokens.iter().position(|t| t.text == "trailing").unwrap();
    tokens.truncate(cut);

    let mut parser = Parser::from_tokens(tokens, Grammar::Extended);
    let qs = parser.parse_querystring().unwrap();
    assert_eq!(qs.to_string(), "?a=1&b=x,y");
}

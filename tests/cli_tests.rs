use qs_grammar::cli::{
    CheckOptions, CheckResult, CliError, OutputFormat, execute_check, get_grammar_reference,
};
use qs_grammar::{Error, Grammar, ParseOptions};

fn check(query: &str, format: OutputFormat) -> Result<CheckResult, CliError> {
    execute_check(&CheckOptions {
        query: Some(query.to_string()),
        format,
        ..Default::default()
    })
}

#[test]
fn test_tree_output() {
    let result = check("?k[0]=v", OutputFormat::Tree).unwrap();
    assert_eq!(
        result,
        CheckResult::Success(
            r#"{"params":[{"index":["0"],"name":"k","value":{"scalar":"v"}}]}"#.to_string()
        )
    );
}

#[test]
fn test_pretty_tree_output() {
    let options = CheckOptions {
        query: Some("?k=v".to_string()),
        pretty: true,
        ..Default::default()
    };
    let CheckResult::Success(output) = execute_check(&options).unwrap() else {
        panic!("Expected rendered output");
    };
    assert!(output.contains('\n'));
    let reparsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(reparsed["params"][0]["name"], "k");
}

#[test]
fn test_flat_output() {
    let result = check("?a[b]=1|2&c=3", OutputFormat::Flat).unwrap();
    assert_eq!(
        result,
        CheckResult::Success(r#"{"a":{"b":["1","2"]},"c":"3"}"#.to_string())
    );
}

#[test]
fn test_canonical_output() {
    let result = check(" ?a = 1 , 2 ", OutputFormat::Canonical).unwrap();
    assert_eq!(result, CheckResult::Success("?a=1,2".to_string()));
}

#[test]
fn test_syntax_only() {
    let options = CheckOptions {
        query: Some("?a=1".to_string()),
        syntax_only: true,
        ..Default::default()
    };
    assert_eq!(execute_check(&options).unwrap(), CheckResult::SyntaxValid);
}

#[test]
fn test_no_input() {
    let err = execute_check(&CheckOptions::default()).unwrap_err();
    assert!(matches!(err, CliError::NoInput));
}

#[test]
fn test_parse_failure_is_reported() {
    let err = check("?k=", OutputFormat::Tree).unwrap_err();
    assert!(matches!(err, CliError::Query(Error::Parse(_))));
    assert_eq!(
        err.to_string(),
        "parse error: expected STRING but found EOF at 1:4"
    );
}

#[test]
fn test_flatten_failure_is_reported() {
    let err = check("?a=1&a[b]=2", OutputFormat::Flat).unwrap_err();
    assert!(matches!(err, CliError::Flatten(_)));
}

#[test]
fn test_grammar_option_is_honored() {
    let options = CheckOptions {
        query: Some("?a=1&b=2".to_string()),
        parse: ParseOptions::new().with_grammar(Grammar::Basic),
        syntax_only: true,
        ..Default::default()
    };
    assert!(execute_check(&options).is_err());
}

#[test]
fn test_format_from_str() {
    assert_eq!("flat".parse::<OutputFormat>(), Ok(OutputFormat::Flat));
    assert_eq!("Canonical".parse::<OutputFormat>(), Ok(OutputFormat::Canonical));
    assert!("xml".parse::<OutputFormat>().is_err());
}

#[test]
fn test_grammar_reference() {
    assert!(get_grammar_reference(Grammar::Extended).contains("params      := param ('&' param)*"));
    assert!(get_grammar_reference(Grammar::Basic).contains("querystring := '?' param"));
}

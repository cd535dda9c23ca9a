// Error recovery across function boundaries

use std::fs;

use toyc::parser::ast::SourceLocation;
use toyc::parser::parse::Parser;

fn names(source: &str) -> (Vec<String>, usize) {
    let outcome = Parser::new(source).parse_program();
    let names = outcome
        .program
        .functions
        .iter()
        .map(|f| f.proto.name.clone())
        .collect();
    (names, outcome.diagnostics.len())
}

#[test]
fn test_bad_function_does_not_hide_the_next() {
    let (functions, diagnostics) = names("FUNC bad() x = 1\nFUNC good() RETURN 1");
    assert_eq!(functions, vec!["good"]);
    assert!(diagnostics >= 1);
}

#[test]
fn test_one_diagnostic_per_skipped_token() {
    // `=` fails the assignment, then `1` is not a FUNC
    let (functions, diagnostics) = names("FUNC bad() x = 1 FUNC good() RETURN 1");
    assert_eq!(functions, vec!["good"]);
    assert_eq!(diagnostics, 2);
}

#[test]
fn test_garbage_only_input_terminates() {
    let (functions, diagnostics) = names(") ) 1 + }");
    assert!(functions.is_empty());
    assert_eq!(diagnostics, 5);
}

#[test]
fn test_clean_input_has_no_diagnostics() {
    let outcome = Parser::new("FUNC a() RETURN 1 FUNC b(x) RETURN x").parse_program();
    assert!(outcome.is_ok());
    assert_eq!(outcome.program.functions.len(), 2);
}

#[test]
fn test_broken_demo() {
    let source = fs::read_to_string("demos/broken.toy").expect("Failed to read demo file");
    let outcome = Parser::new(&source).parse_program();

    let functions: Vec<&str> = outcome
        .program
        .functions
        .iter()
        .map(|f| f.proto.name.as_str())
        .collect();
    assert_eq!(functions, vec!["ok", "main"]);

    let first = &outcome.diagnostics[0];
    assert_eq!(first.location, SourceLocation::new(6, 7));
    assert!(first.message.starts_with("need := in assignment statement"));

    assert!(outcome
        .diagnostics
        .iter()
        .any(|d| d.message.starts_with("expected THEN")));
}

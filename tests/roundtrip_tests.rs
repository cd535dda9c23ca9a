// Rendering a parsed program and parsing it again gives the same tree

use std::fs;

use toyc::parser::parse::Parser;
use toyc::parser::precedence::PrecedenceTable;
use toyc::printer::outline_text;

fn reparse(source: &str, table: PrecedenceTable) {
    let first = Parser::with_precedence(source, table).parse_program();
    assert!(first.is_ok(), "diagnostics: {:?}", first.diagnostics);

    let rendered = first.program.to_string();
    let second = Parser::new(&rendered).parse_program();
    assert!(second.is_ok(), "rendered source failed:\n{}", rendered);

    assert_eq!(outline_text(&first.program), outline_text(&second.program));
    assert_eq!(rendered, second.program.to_string());
}

#[test]
fn test_demos_roundtrip() {
    for path in ["demos/factorial.toy", "demos/loop.toy"] {
        let source = fs::read_to_string(path).expect("Failed to read demo file");
        reparse(&source, PrecedenceTable::default());
    }
}

#[test]
fn test_custom_precedence_survives_rendering() {
    let mut table = PrecedenceTable::default();
    table.parse_overrides("+=50").unwrap();

    let source = "FUNC f(a, b, c) RETURN a + b * c";
    let outcome = Parser::with_precedence(source, table.clone()).parse_program();
    assert_eq!(
        outcome.program.functions[0].body.to_string(),
        "RETURN ((a + b) * c)"
    );

    reparse(source, table);
}

#[test]
fn test_nested_control_flow_roundtrip() {
    let source = "FUNC g(x) { VAR y WHILE x DO IF x < 3 THEN { y := x PRINT \"y=\", y } ELSE x := -x FI DONE RETURN f(y, 1) }";
    reparse(source, PrecedenceTable::default());
}

#[test]
fn test_empty_print_followed_by_assignment() {
    reparse("FUNC main() { PRINT CONTINUE x := 1 }", PrecedenceTable::default());
    reparse(
        "FUNC main() { VAR x PRINT CONTINUE x := 1 PRINT x RETURN x }",
        PrecedenceTable::default(),
    );
}

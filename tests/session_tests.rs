// The session hands parsed functions to a backend

use std::fs;

use toyc::codegen::{Backend, BackendError, Session};
use toyc::parser::ast::{Function, Prototype, Stmt};
use toyc::printer::AstPrinter;

#[derive(Default)]
struct Collector {
    runtime: Vec<Prototype>,
    functions: Vec<Function>,
}

impl Backend for Collector {
    fn declare_runtime(&mut self, proto: &Prototype) -> Result<(), BackendError> {
        assert!(self.functions.is_empty(), "runtime must come first");
        self.runtime.push(proto.clone());
        Ok(())
    }

    fn lower_function(&mut self, function: &Function) -> Result<(), BackendError> {
        self.functions.push(function.clone());
        Ok(())
    }
}

fn demo(name: &str) -> String {
    fs::read_to_string(format!("demos/{}", name)).expect("Failed to read demo file")
}

#[test]
fn test_factorial_demo_lowers_every_function() {
    let mut backend = Collector::default();
    let outcome = Session::default()
        .compile(&demo("factorial.toy"), &mut backend)
        .unwrap();

    assert!(outcome.is_ok());
    assert_eq!(backend.runtime.len(), 1);
    assert!(backend.runtime[0].variadic);

    let names: Vec<&str> = backend
        .functions
        .iter()
        .map(|f| f.proto.name.as_str())
        .collect();
    assert_eq!(names, vec!["fact", "rfact", "main"]);
    assert_eq!(outcome.program.functions, backend.functions);
}

#[test]
fn test_broken_functions_never_reach_backend() {
    let mut backend = Collector::default();
    let outcome = Session::default()
        .compile(&demo("broken.toy"), &mut backend)
        .unwrap();

    assert_eq!(backend.functions.len(), 2);
    assert!(!outcome.diagnostics.is_empty());
}

#[test]
fn test_print_lowering_inputs() {
    let mut backend = Collector::default();
    Session::default()
        .compile(&demo("loop.toy"), &mut backend)
        .unwrap();

    let main = backend
        .functions
        .iter()
        .find(|f| f.proto.name == "main")
        .expect("main should parse");
    let print = match &main.body {
        Stmt::Block(block) => match &block.stmts[0] {
            Stmt::Print { print, .. } => print,
            other => panic!("Expected print, got {:?}", other),
        },
        other => panic!("Expected block, got {:?}", other),
    };
    assert_eq!(print.format_string(), "sum: %d");
    assert_eq!(print.args().len(), 1);
}

#[test]
fn test_ast_printer_output() {
    let mut printer = AstPrinter::source(Vec::new());
    Session::default()
        .compile("FUNC main() RETURN 1 + 2 * 3", &mut printer)
        .unwrap();

    let text = String::from_utf8(printer.into_inner()).unwrap();
    assert!(text.starts_with("// runtime: printf() ..."));
    assert!(text.contains("FUNC main() RETURN (1 + (2 * 3))"));
}

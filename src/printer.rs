//! Renderer for toy language ASTs
//!
//! Two views of the same tree:
//!
//! - `Display` on [`Program`], [`Function`], [`Stmt`] and [`Expr`] renders
//!   concrete syntax. Binary operations and negations are always wrapped in
//!   parentheses, so parsing the output again gives back the same tree no
//!   matter which precedence table was used originally.
//! - [`outline`] flattens a program into indented labelled lines for the AST
//!   dump and the TUI.
//!
//! [`AstPrinter`] is a [`Backend`] that writes each function as it arrives.

use crate::codegen::{Backend, BackendError};
use crate::parser::ast::*;
use std::fmt::{self, Display};
use std::io::Write;

const INDENT: &str = "  ";

struct Formatter {
    buffer: String,
    indent_level: usize,
}

impl Formatter {
    fn new() -> Self {
        Self {
            buffer: String::new(),
            indent_level: 0,
        }
    }

    fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(INDENT);
        }
    }

    fn write_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    fn write_newline(&mut self) {
        self.buffer.push('\n');
    }

    fn finish(self) -> String {
        self.buffer
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, function) in self.functions.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", function)?;
        }
        Ok(())
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fmt = Formatter::new();
        fmt.write_str(&format!("FUNC {} ", self.proto));
        format_stmt(&self.body, &mut fmt);
        write!(f, "{}", fmt.finish())
    }
}

impl Display for Prototype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.params.join(", "))
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fmt = Formatter::new();
        format_stmt(self, &mut fmt);
        write!(f, "{}", fmt.finish())
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{}", n),
            Expr::Variable(name) => write!(f, "{}", name),
            Expr::Negate(operand) => write!(f, "(-{})", operand),
            Expr::Binary { op, left, right } => write!(f, "({} {} {})", left, op, right),
            Expr::Call { callee, args } => {
                write!(f, "{}(", callee)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl Display for PrintItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrintItem::Text(text) => write!(f, "\"{}\"", text),
            PrintItem::Expr(expr) => write!(f, "{}", expr),
        }
    }
}

/// Write `stmt` at the current position; continuation lines are indented
fn format_stmt(stmt: &Stmt, fmt: &mut Formatter) {
    match stmt {
        Stmt::Assign { target, value, .. } => {
            fmt.write_str(&format!("{} := {}", target, value));
        }
        Stmt::Print { print, .. } => {
            fmt.write_str("PRINT");
            for (i, item) in print.items.iter().enumerate() {
                fmt.write_str(if i == 0 { " " } else { ", " });
                fmt.write_str(&item.to_string());
            }
        }
        Stmt::Return { value, .. } => fmt.write_str(&format!("RETURN {}", value)),
        Stmt::Null { .. } => fmt.write_str("CONTINUE"),
        Stmt::If {
            condition,
            then_branch,
            else_branch,
            ..
        } => {
            fmt.write_str(&format!("IF {} THEN", condition));
            format_nested(then_branch, fmt);
            if let Some(else_branch) = else_branch {
                fmt.write_str("ELSE");
                format_nested(else_branch, fmt);
            }
            fmt.write_str("FI");
        }
        Stmt::While {
            condition, body, ..
        } => {
            fmt.write_str(&format!("WHILE {} DO", condition));
            format_nested(body, fmt);
            fmt.write_str("DONE");
        }
        Stmt::Block(block) => format_block(block, fmt),
    }
}

/// Branch or loop body on its own indented line, leaving the cursor at the
/// start of the following line
fn format_nested(stmt: &Stmt, fmt: &mut Formatter) {
    fmt.write_newline();
    fmt.indent();
    fmt.write_indent();
    format_stmt(stmt, fmt);
    fmt.dedent();
    fmt.write_newline();
    fmt.write_indent();
}

fn format_block(block: &Block, fmt: &mut Formatter) {
    fmt.write_str("{");
    fmt.indent();
    for decl in &block.decls {
        fmt.write_newline();
        fmt.write_indent();
        fmt.write_str(&format!("VAR {}", decl.names.join(", ")));
    }
    let mut previous: Option<&Stmt> = None;
    for stmt in &block.stmts {
        // an empty PRINT would swallow the target of the next assignment
        if ends_with_empty_print(previous) && matches!(stmt, Stmt::Assign { .. }) {
            fmt.write_newline();
            fmt.write_indent();
            fmt.write_str("CONTINUE");
        }
        fmt.write_newline();
        fmt.write_indent();
        format_stmt(stmt, fmt);
        previous = Some(stmt);
    }
    fmt.dedent();
    fmt.write_newline();
    fmt.write_indent();
    fmt.write_str("}");
}

fn ends_with_empty_print(stmt: Option<&Stmt>) -> bool {
    matches!(stmt, Some(Stmt::Print { print, .. }) if print.items.is_empty())
}

/// One line of an AST outline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineLine {
    pub depth: usize,
    pub label: String,
}

/// Flatten `program` into an indented outline, one node per line
pub fn outline(program: &Program) -> Vec<OutlineLine> {
    let mut lines = Vec::new();
    for function in &program.functions {
        push(&mut lines, 0, format!("FUNC {}", function.proto));
        outline_stmt(&function.body, 1, &mut lines);
    }
    lines
}

/// Render an outline as plain text, two spaces per level
pub fn outline_text(program: &Program) -> String {
    outline(program)
        .iter()
        .map(|line| format!("{}{}\n", INDENT.repeat(line.depth), line.label))
        .collect()
}

fn push(lines: &mut Vec<OutlineLine>, depth: usize, label: String) {
    lines.push(OutlineLine { depth, label });
}

fn outline_stmt(stmt: &Stmt, depth: usize, lines: &mut Vec<OutlineLine>) {
    match stmt {
        Stmt::Block(block) => {
            push(lines, depth, "Block".to_string());
            for decl in &block.decls {
                push(lines, depth + 1, format!("VAR {}", decl.names.join(", ")));
            }
            for stmt in &block.stmts {
                outline_stmt(stmt, depth + 1, lines);
            }
        }
        Stmt::If {
            condition,
            then_branch,
            else_branch,
            ..
        } => {
            push(lines, depth, format!("IF {}", condition));
            push(lines, depth + 1, "THEN".to_string());
            outline_stmt(then_branch, depth + 2, lines);
            if let Some(else_branch) = else_branch {
                push(lines, depth + 1, "ELSE".to_string());
                outline_stmt(else_branch, depth + 2, lines);
            }
        }
        Stmt::While {
            condition, body, ..
        } => {
            push(lines, depth, format!("WHILE {}", condition));
            outline_stmt(body, depth + 1, lines);
        }
        Stmt::Print { print, .. } => {
            push(lines, depth, format!("PRINT \"{}\"", print.format_string()));
            for arg in print.args() {
                push(lines, depth + 1, arg.to_string());
            }
        }
        other => push(lines, depth, other.to_string()),
    }
}

/// Backend that renders every function it is handed to a writer
pub struct AstPrinter<W: Write> {
    out: W,
    outline: bool,
}

impl<W: Write> AstPrinter<W> {
    /// Render concrete syntax
    pub fn source(out: W) -> Self {
        Self { out, outline: false }
    }

    /// Render the indented outline
    pub fn outline(out: W) -> Self {
        Self { out, outline: true }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Backend for AstPrinter<W> {
    fn declare_runtime(&mut self, proto: &Prototype) -> Result<(), BackendError> {
        writeln!(self.out, "// runtime: {}{}", proto, if proto.variadic { " ..." } else { "" })?;
        Ok(())
    }

    fn lower_function(&mut self, function: &Function) -> Result<(), BackendError> {
        if self.outline {
            let single = Program {
                functions: vec![function.clone()],
            };
            write!(self.out, "{}", outline_text(&single))?;
        } else {
            writeln!(self.out, "{}", function)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::Parser;

    fn program(source: &str) -> Program {
        let outcome = Parser::new(source).parse_program();
        assert!(outcome.is_ok(), "{:?}", outcome.diagnostics);
        outcome.program
    }

    #[test]
    fn test_expression_rendering() {
        let expr = Parser::new("-a + b * f(1, c)").parse_expression_only().unwrap();
        assert_eq!(expr.to_string(), "(-(a + (b * f(1, c))))");
    }

    #[test]
    fn test_function_rendering() {
        let program = program(
            r#"FUNC main() { VAR i i := 0 WHILE i < 3 DO i := i + 1 DONE PRINT "i=", i RETURN i }"#,
        );
        let expected = "FUNC main() {\n  VAR i\n  i := 0\n  WHILE (i < 3) DO\n    i := (i + 1)\n  DONE\n  PRINT \"i=\", i\n  RETURN i\n}\n";
        assert_eq!(program.to_string(), expected);
    }

    #[test]
    fn test_empty_print_before_assignment() {
        let program = program("FUNC main() { PRINT CONTINUE x := 1 PRINT RETURN x }");
        let expected = "FUNC main() {\n  PRINT\n  CONTINUE\n  x := 1\n  PRINT\n  RETURN x\n}\n";
        assert_eq!(program.to_string(), expected);
    }

    #[test]
    fn test_if_rendering() {
        let stmt = Parser::new("IF a THEN RETURN a ELSE RETURN 0 FI")
            .parse_statement_only()
            .unwrap();
        assert_eq!(stmt.to_string(), "IF a THEN\n  RETURN a\nELSE\n  RETURN 0\nFI");
    }

    #[test]
    fn test_outline() {
        let program = program("FUNC f(n) { VAR x IF n THEN x := 1 FI PRINT \"v\", x }");
        let text = outline_text(&program);
        let expected = "FUNC f(n)\n  Block\n    VAR x\n    IF n\n      THEN\n        x := 1\n    PRINT \"v%d\"\n      x\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_ast_printer_backend() {
        let program = program("FUNC one() RETURN 1");
        let mut printer = AstPrinter::source(Vec::new());
        printer.lower_function(&program.functions[0]).unwrap();

        let out = String::from_utf8(printer.into_inner()).unwrap();
        assert_eq!(out, "FUNC one() RETURN 1\n");
    }
}

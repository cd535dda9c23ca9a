// AST (Abstract Syntax Tree) definitions for the toy language front end

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Expressions
///
/// Binary operators are kept as the raw operator character: which characters
/// act as operators is decided by the precedence table, not by the AST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Number(i64),
    Variable(String),
    /// `-expr`; the operand is the whole expression following the minus sign
    Negate(Box<Expr>),
    Binary {
        op: char,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        callee: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn binary(op: char, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// One item of a PRINT statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintItem {
    /// Text between the quotes, kept verbatim (no escape processing)
    Text(String),
    Expr(Expr),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintStmt {
    pub items: Vec<PrintItem>,
}

impl PrintStmt {
    /// printf-style format: text fragments verbatim, `%d` per expression
    pub fn format_string(&self) -> String {
        let mut format = String::new();
        for item in &self.items {
            match item {
                PrintItem::Text(text) => format.push_str(text),
                PrintItem::Expr(_) => format.push_str("%d"),
            }
        }
        format
    }

    /// Expressions evaluated for the `%d` placeholders, in order
    pub fn args(&self) -> Vec<&Expr> {
        self.items
            .iter()
            .filter_map(|item| match item {
                PrintItem::Expr(expr) => Some(expr),
                PrintItem::Text(_) => None,
            })
            .collect()
    }
}

/// `VAR a, b, c`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    pub names: Vec<String>,
    pub location: SourceLocation,
}

/// `{ VAR ... stmt* }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// At most one entry: a block only accepts a leading declaration
    pub decls: Vec<VarDecl>,
    pub stmts: Vec<Stmt>,
    pub location: SourceLocation,
}

/// Statements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Assign {
        /// Parsed with the shared identifier rule, so a call-shaped target
        /// gets through here and must be rejected by the backend
        target: Expr,
        value: Expr,
        location: SourceLocation,
    },
    Print {
        print: PrintStmt,
        location: SourceLocation,
    },
    Return {
        value: Expr,
        location: SourceLocation,
    },
    Null {
        location: SourceLocation,
    },
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
        location: SourceLocation,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
        location: SourceLocation,
    },
    Block(Block),
}

impl Stmt {
    /// Get the source location of this statement
    pub fn location(&self) -> &SourceLocation {
        match self {
            Stmt::Assign { location, .. } => location,
            Stmt::Print { location, .. } => location,
            Stmt::Return { location, .. } => location,
            Stmt::Null { location } => location,
            Stmt::If { location, .. } => location,
            Stmt::While { location, .. } => location,
            Stmt::Block(block) => &block.location,
        }
    }

    /// Name being assigned, for both the plain and the call-shaped target
    pub fn assign_target_name(&self) -> Option<&str> {
        match self {
            Stmt::Assign {
                target: Expr::Variable(name),
                ..
            }
            | Stmt::Assign {
                target: Expr::Call { callee: name, .. },
                ..
            } => Some(name.as_str()),
            _ => None,
        }
    }
}

/// A function's name and parameter list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prototype {
    pub name: String,
    pub params: Vec<String>,
    /// Accepts extra arguments past `params` (only the runtime's printf)
    pub variadic: bool,
}

impl Prototype {
    pub fn new(name: impl Into<String>, params: Vec<String>) -> Self {
        Prototype {
            name: name.into(),
            params,
            variadic: false,
        }
    }
}

/// `FUNC name(params) statement`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub proto: Prototype,
    pub body: Stmt,
    pub location: SourceLocation,
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub functions: Vec<Function>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.proto.name == name)
    }
}

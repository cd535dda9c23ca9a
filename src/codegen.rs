//! Hand-off to code generation
//!
//! The front end does not generate code itself. A [`Backend`] receives the
//! runtime library declarations first, then every function right after it
//! parses, in source order. [`Session`] drives that loop.
//!
//! ```text
//! Source → Lexer → Parser ──Function──▶ Backend
//!                     │
//!                     └── diagnostics (one per failed function)
//! ```

use crate::parser::ast::{Function, Program, Prototype, SourceLocation};
use crate::parser::lexer::Lexer;
use crate::parser::parse::{ParseError, ParseOutcome, Parser};
use crate::parser::precedence::PrecedenceTable;
use log::{debug, info, warn};
use std::fmt;

/// Name of the function execution starts from
pub const ENTRY_POINT: &str = "main";

/// Backend error type
#[derive(Debug)]
pub struct BackendError {
    pub message: String,
    /// Location of the function being lowered, if any
    pub location: Option<SourceLocation>,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(loc) => write!(
                f,
                "Backend error at line {}, column {}: {}",
                loc.line, loc.column, self.message
            ),
            None => write!(f, "Backend error: {}", self.message),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        BackendError::new(err.to_string())
    }
}

/// Consumer of parsed functions
pub trait Backend {
    /// Called once per runtime library function before any user function
    fn declare_runtime(&mut self, proto: &Prototype) -> Result<(), BackendError>;

    /// Called once per successfully parsed function, in source order
    fn lower_function(&mut self, function: &Function) -> Result<(), BackendError>;
}

/// Functions provided by the runtime library
pub fn runtime_prototypes() -> Vec<Prototype> {
    vec![Prototype {
        name: "printf".to_string(),
        params: Vec::new(),
        variadic: true,
    }]
}

/// One compilation of one input
pub struct Session {
    precedence: PrecedenceTable,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(PrecedenceTable::default())
    }
}

impl Session {
    pub fn new(precedence: PrecedenceTable) -> Self {
        Self { precedence }
    }

    pub fn precedence(&self) -> &PrecedenceTable {
        &self.precedence
    }

    /// Parse a whole input without a backend
    pub fn parse(&self, source: &str) -> ParseOutcome {
        Parser::with_precedence(source, self.precedence.clone()).parse_program()
    }

    /// Parse `source` and hand every function to `backend` as soon as it parses.
    ///
    /// Parse failures become diagnostics and parsing carries on; a backend
    /// failure stops the run.
    pub fn compile<B: Backend>(
        &self,
        source: &str,
        backend: &mut B,
    ) -> Result<ParseOutcome, BackendError> {
        self.compile_lexer(Lexer::new(source), backend)
    }

    /// Like [`Session::compile`], over any (possibly streaming) lexer
    pub fn compile_lexer<B: Backend>(
        &self,
        lexer: Lexer<'_>,
        backend: &mut B,
    ) -> Result<ParseOutcome, BackendError> {
        for proto in runtime_prototypes() {
            debug!("Declaring runtime function '{}'", proto.name);
            backend.declare_runtime(&proto)?;
        }

        let mut parser = Parser::from_lexer(lexer, self.precedence.clone());
        let mut outcome = ParseOutcome::default();

        while let Some(result) = parser.next_function() {
            match result {
                Ok(function) => {
                    backend
                        .lower_function(&function)
                        .map_err(|err| match err.location {
                            Some(_) => err,
                            None => err.at(function.location),
                        })?;
                    outcome.program.functions.push(function);
                }
                Err(err) => outcome.diagnostics.push(err),
            }
        }

        info!(
            "Compiled {} function(s) with {} diagnostic(s)",
            outcome.program.functions.len(),
            outcome.diagnostics.len()
        );
        check_entry_point(&outcome.program);
        Ok(outcome)
    }
}

/// Warn when there is nothing to start execution from
pub fn check_entry_point(program: &Program) -> bool {
    let found = program.function(ENTRY_POINT).is_some();
    if !found {
        warn!("Program has no '{}' function", ENTRY_POINT);
    }
    found
}

/// Tokenize `source` eagerly, for the token dump
pub fn tokens(source: &str) -> Result<Vec<String>, ParseError> {
    let tokens = Lexer::new(source).tokenize()?;
    Ok(tokens
        .into_iter()
        .map(|(token, loc)| format!("{}:{}\t{}", loc.line, loc.column, token))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        runtime: Vec<String>,
        lowered: Vec<String>,
        fail_on: Option<String>,
    }

    impl Backend for Recorder {
        fn declare_runtime(&mut self, proto: &Prototype) -> Result<(), BackendError> {
            self.runtime.push(proto.name.clone());
            Ok(())
        }

        fn lower_function(&mut self, function: &Function) -> Result<(), BackendError> {
            if self.fail_on.as_deref() == Some(function.proto.name.as_str()) {
                return Err(BackendError::new("cannot lower"));
            }
            self.lowered.push(function.proto.name.clone());
            Ok(())
        }
    }

    #[test]
    fn test_runtime_declared_first() {
        let mut backend = Recorder::default();
        let outcome = Session::default()
            .compile("FUNC main() RETURN 0", &mut backend)
            .unwrap();

        assert_eq!(backend.runtime, vec!["printf"]);
        assert_eq!(backend.lowered, vec!["main"]);
        assert!(outcome.is_ok());
    }

    #[test]
    fn test_backend_error_carries_function_location() {
        let mut backend = Recorder {
            fail_on: Some("b".to_string()),
            ..Recorder::default()
        };
        let err = Session::default()
            .compile("FUNC a() RETURN 1\nFUNC b() RETURN 2", &mut backend)
            .unwrap_err();

        assert_eq!(err.location, Some(SourceLocation::new(2, 1)));
        assert_eq!(backend.lowered, vec!["a"]);
    }

    #[test]
    fn test_entry_point_check() {
        let outcome = Session::default().parse("FUNC helper() RETURN 1");
        assert!(!check_entry_point(&outcome.program));

        let outcome = Session::default().parse("FUNC main() RETURN 1");
        assert!(check_entry_point(&outcome.program));
    }

    #[test]
    fn test_token_dump() {
        let lines = tokens("x := 1").unwrap();
        assert_eq!(lines, vec!["1:1\tidentifier 'x'", "1:3\t':='", "1:6\tinteger 1", "1:7\tend of input"]);

        let err = tokens("\"open").unwrap_err();
        assert_eq!(err.message, "unterminated text literal");
    }
}

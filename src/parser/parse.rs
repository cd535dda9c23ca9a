//! Main parser coordinator
//!
//! This module provides the [`Parser`] session and core parsing
//! infrastructure: the error type, token helpers, and the top-level
//! program loop with its error recovery.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, program assembly
//! - `declarations`: function prototypes, function definitions, `VAR` lists
//! - `statements`: blocks, IF, WHILE, PRINT, RETURN, assignment
//! - `expressions`: primaries and precedence climbing for binary operators
//!
//! # Scan state
//!
//! The session holds exactly one lookahead token (and its location). Every
//! parse method starts with the first token of its construct in
//! `self.current` and leaves the first token after it there.
//!
//! # Error recovery
//!
//! A failed function is recorded as a diagnostic and exactly one token is
//! skipped before the next attempt. Leftovers of the bad function can then
//! produce further, spurious diagnostics; nothing inside a function is ever
//! recovered.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token};
use crate::parser::precedence::PrecedenceTable;
use log::{debug, info};
use std::fmt;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            message: err.message,
            location: err.location,
        }
    }
}

/// Result of parsing a whole input: every function that parsed, plus one
/// diagnostic per function that did not
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub program: Program,
    pub diagnostics: Vec<ParseError>,
}

impl ParseOutcome {
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Recursive descent parser session
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    pub(crate) current: Token,
    pub(crate) location: SourceLocation,
    pub(crate) precedence: PrecedenceTable,
}

impl<'a> Parser<'a> {
    /// Parser over `source` with the default precedence table
    pub fn new(source: &'a str) -> Self {
        Self::with_precedence(source, PrecedenceTable::default())
    }

    pub fn with_precedence(source: &'a str, precedence: PrecedenceTable) -> Self {
        Self::from_lexer(Lexer::new(source), precedence)
    }

    /// Parser over an already constructed (possibly streaming) lexer
    pub fn from_lexer(mut lexer: Lexer<'a>, precedence: PrecedenceTable) -> Self {
        let current = lexer.next_token();
        let location = lexer.token_location();
        info!("Parser created with {} binary operators", precedence.operators().len());
        Self {
            lexer,
            current,
            location,
            precedence,
        }
    }

    /// Parse the entire program: functions until end of input
    pub fn parse_program(&mut self) -> ParseOutcome {
        info!("Beginning parse phase");
        let mut outcome = ParseOutcome::default();

        while let Some(result) = self.next_function() {
            match result {
                Ok(function) => outcome.program.functions.push(function),
                Err(err) => outcome.diagnostics.push(err),
            }
        }

        info!(
            "Parse finished: {} function(s), {} diagnostic(s)",
            outcome.program.functions.len(),
            outcome.diagnostics.len()
        );
        outcome
    }

    /// Parse the next function definition, or `None` at end of input.
    ///
    /// On failure one token has already been skipped when this returns, so
    /// calling it in a loop always makes progress.
    pub fn next_function(&mut self) -> Option<Result<Function, ParseError>> {
        if self.is_at_end() {
            return None;
        }

        let result = self.parse_function();
        if let Err(err) = &result {
            debug!("Skipping {} after: {}", self.current, err);
            self.advance();
        }
        Some(result)
    }

    /// Parse a single expression from the current position
    pub fn parse_expression_only(&mut self) -> Result<Expr, ParseError> {
        self.parse_expression()
    }

    /// Parse a single statement from the current position
    pub fn parse_statement_only(&mut self) -> Result<Stmt, ParseError> {
        self.parse_statement()
    }

    // ===== Helper methods =====

    /// Consume the current token and scan the next one; returns the consumed token
    pub(crate) fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        self.location = self.lexer.token_location();
        std::mem::replace(&mut self.current, next)
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.current == Token::Eof
    }

    pub(crate) fn check(&self, token: &Token) -> bool {
        &self.current == token
    }

    pub(crate) fn check_char(&self, c: char) -> bool {
        self.current.is_char(c)
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.location
    }

    /// Report a diagnostic at the current token
    pub(crate) fn error(&self, message: &str) -> ParseError {
        let err = ParseError {
            message: format!("{}, found {}", message, self.current),
            location: self.location,
        };
        debug!("{}", err);
        err
    }

    pub(crate) fn expect_token(&mut self, token: &Token, message: &str) -> Result<(), ParseError> {
        if self.check(token) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    pub(crate) fn expect_char(&mut self, c: char, message: &str) -> Result<(), ParseError> {
        if self.check_char(c) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    pub(crate) fn expect_identifier(&mut self, message: &str) -> Result<String, ParseError> {
        if let Token::Variable(name) = &self.current {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(self.error(message))
        }
    }
}

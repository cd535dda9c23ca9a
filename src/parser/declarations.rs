//! Declaration parsing implementation
//!
//! - Function definitions: `FUNC name(params) statement`
//! - Prototypes: the `name(params)` part of a function definition
//! - Variable declarations: `VAR a, b, c`
//!
//! # Grammar
//!
//! ```text
//! function  ::= "FUNC" ident "(" (ident ("," ident)*)? ")" statement
//! decl      ::= "VAR" ident ("," ident)*
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};
use log::debug;

impl Parser<'_> {
    /// Parse function definition: FUNC name(params) statement
    pub(crate) fn parse_function(&mut self) -> Result<Function, ParseError> {
        let location = self.current_location();
        self.expect_token(&Token::Func, "expected FUNC at start of function definition")?;

        let proto = self.parse_prototype()?;
        debug!("Parsing body of function '{}'", proto.name);
        let body = self.parse_statement()?;

        Ok(Function {
            proto,
            body,
            location,
        })
    }

    /// Parse prototype: name '(' parameter_list ')'
    pub(crate) fn parse_prototype(&mut self) -> Result<Prototype, ParseError> {
        let name = self.expect_identifier("Expected function name in prototype")?;
        self.expect_char('(', "Expected '(' in prototype")?;

        let mut params = Vec::new();
        if !self.check_char(')') {
            loop {
                params.push(self.expect_identifier("Expected parameter name in prototype")?);
                if !self.check_char(',') {
                    break;
                }
                self.advance(); // consume ','
            }
        }
        self.expect_char(')', "Expected ')' in prototype")?;

        Ok(Prototype::new(name, params))
    }

    /// Parse variable declaration: VAR ident (',' ident)*
    pub(crate) fn parse_var_decl(&mut self) -> Result<VarDecl, ParseError> {
        let location = self.current_location();
        self.expect_token(&Token::Var, "expected VAR")?;

        let mut names = vec![self.expect_identifier("expected identifier after VAR")?];
        while self.check_char(',') {
            self.advance(); // consume ','
            names.push(self.expect_identifier("expected identifier list after VAR")?);
        }

        Ok(VarDecl { names, location })
    }
}

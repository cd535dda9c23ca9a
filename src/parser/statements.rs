//! Statement parsing implementation
//!
//! This module handles parsing of all statement types:
//!
//! - Blocks with an optional leading `VAR` declaration: `{ VAR x, y ... }`
//! - Control flow: `IF ... THEN ... [ELSE ...] FI`, `WHILE ... DO ... DONE`
//! - `PRINT`, `RETURN`, `CONTINUE`
//! - Assignment: `x := expr`
//!
//! # Grammar
//!
//! ```text
//! statement  ::= block | "IF" expr "THEN" statement ("ELSE" statement)? "FI"
//!              | "WHILE" expr "DO" statement "DONE"
//!              | "PRINT" printitem ("," printitem)*
//!              | "RETURN" expr | "CONTINUE" | assignment
//! block      ::= "{" decl? statement* "}"
//! assignment ::= ident ":=" expr
//! printitem  ::= TEXT | expr
//! ```
//!
//! A `VAR` declaration is only accepted as the first thing in a block;
//! anywhere else it fails the statement with "Can't declare VAR here!".
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

impl Parser<'_> {
    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        match self.current {
            Token::If => self.parse_if_statement(),
            Token::While => self.parse_while_statement(),
            Token::Print => self.parse_print_statement(),
            Token::Return => self.parse_return_statement(),
            Token::Continue => {
                let location = self.current_location();
                self.advance();
                Ok(Stmt::Null { location })
            }
            Token::Char('{') => Ok(Stmt::Block(self.parse_block()?)),
            Token::Var => Err(self.error("Can't declare VAR here!")),
            _ => self.parse_assignment(),
        }
    }

    /// Parse block: '{' declaration? statement* '}'
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        let location = self.current_location();
        self.expect_char('{', "expected '{'")?;

        let mut decls = Vec::new();
        if self.check(&Token::Var) {
            decls.push(self.parse_var_decl()?);
        }

        let mut stmts = Vec::new();
        while !self.check_char('}') {
            match self.current {
                Token::Eof => return Err(self.error("expected '}' at end of block")),
                // no-op inside a block
                Token::Continue => {
                    self.advance();
                }
                _ => stmts.push(self.parse_statement()?),
            }
        }
        self.advance(); // consume '}'

        Ok(Block {
            decls,
            stmts,
            location,
        })
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        self.advance(); // consume IF

        let condition = self.parse_expression()?;
        self.expect_token(&Token::Then, "expected THEN")?;

        let then_branch = Box::new(self.parse_statement()?);

        let else_branch = if self.check(&Token::Else) {
            self.advance();
            let branch = self.parse_statement()?;
            self.expect_token(&Token::Fi, "expected FI after ELSE branch")?;
            Some(Box::new(branch))
        } else {
            self.expect_token(&Token::Fi, "expected FI or ELSE")?;
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
            location,
        })
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        self.advance(); // consume WHILE

        let condition = self.parse_expression()?;
        self.expect_token(&Token::Do, "expect DO in WHILE statement")?;

        let body = Box::new(self.parse_statement()?);
        self.expect_token(&Token::Done, "expect DONE in WHILE statement")?;

        Ok(Stmt::While {
            condition,
            body,
            location,
        })
    }

    /// Parse print statement: PRINT item (',' item)*
    ///
    /// Stops at the first token that cannot start an item; a missing item
    /// after PRINT or after a comma is not an error.
    fn parse_print_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        self.advance(); // consume PRINT

        let mut items = Vec::new();
        while self.starts_print_item() {
            if let Token::Text(literal) = &self.current {
                items.push(PrintItem::Text(Token::text_body(literal).to_string()));
                self.advance();
            } else {
                items.push(PrintItem::Expr(self.parse_expression()?));
            }

            if !self.check_char(',') {
                break;
            }
            self.advance(); // consume ','
        }

        Ok(Stmt::Print {
            print: PrintStmt { items },
            location,
        })
    }

    fn starts_print_item(&self) -> bool {
        matches!(
            self.current,
            Token::Variable(_)
                | Token::Text(_)
                | Token::Integer(_)
                | Token::Char('(')
                | Token::Char('-')
        )
    }

    /// Parse return statement: RETURN expr
    fn parse_return_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        self.advance(); // consume RETURN

        let value = self.parse_expression()?;
        Ok(Stmt::Return { value, location })
    }

    /// Parse assignment: ident ':=' expr
    fn parse_assignment(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        if !matches!(self.current, Token::Variable(_)) {
            return Err(self.error("expected identifier in assignment statement"));
        }

        let target = self.parse_identifier_expr()?;
        self.expect_token(&Token::Assign, "need := in assignment statement")?;
        let value = self.parse_expression()?;

        Ok(Stmt::Assign {
            target,
            value,
            location,
        })
    }
}

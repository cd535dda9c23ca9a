//! Expression parsing implementation
//!
//! Primaries are parsed by recursive descent; binary operators by precedence
//! climbing against the session's [`PrecedenceTable`].
//!
//! # Grammar
//!
//! ```text
//! expr    ::= unary (binop unary)*        // precedence-climbed
//! unary   ::= "-" expr | primary
//! primary ::= NUMBER | ident | ident "(" (expr ("," expr)*)? ")" | "(" expr ")"
//! ```
//!
//! Note the scope of unary minus: it negates the *whole* expression that
//! follows it, so `-a + b` is `-(a + b)`.
//!
//! [`PrecedenceTable`]: crate::parser::precedence::PrecedenceTable

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::precedence::NOT_AN_OPERATOR;

impl Parser<'_> {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.parse_primary()?;
        self.parse_binop_rhs(0, lhs)
    }

    /// Parse a primary: number, identifier/call, parenthesized or negated expression
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match &self.current {
            Token::Variable(_) => self.parse_identifier_expr(),
            Token::Integer(value) => {
                let value = *value;
                self.advance();
                Ok(Expr::Number(value))
            }
            Token::Char('(') => self.parse_paren_expr(),
            Token::Char('-') => self.parse_negation(),
            Token::Error(message) => Err(ParseError {
                message: message.clone(),
                location: self.current_location(),
            }),
            _ => Err(self.error("unknown token when expecting an expression")),
        }
    }

    /// `ident` or `ident(args)`
    ///
    /// Also used for assignment targets, which is why a call can show up on
    /// the left of `:=`.
    pub(crate) fn parse_identifier_expr(&mut self) -> Result<Expr, ParseError> {
        let name = self.expect_identifier("expected identifier")?;

        if !self.check_char('(') {
            return Ok(Expr::Variable(name));
        }
        self.advance(); // consume '('

        let mut args = Vec::new();
        if !self.check_char(')') {
            loop {
                args.push(self.parse_expression()?);

                if self.check_char(')') {
                    break;
                }
                self.expect_char(',', "Expected ')' or ',' in argument list")?;
            }
        }
        self.advance(); // consume ')'

        Ok(Expr::Call { callee: name, args })
    }

    /// `"(" expr ")"`
    fn parse_paren_expr(&mut self) -> Result<Expr, ParseError> {
        self.advance(); // consume '('
        let expr = self.parse_expression()?;
        self.expect_char(')', "expected ')'")?;
        Ok(expr)
    }

    /// `"-" expr`
    fn parse_negation(&mut self) -> Result<Expr, ParseError> {
        self.advance(); // consume '-'
        let operand = self.parse_expression()?;
        Ok(Expr::Negate(Box::new(operand)))
    }

    /// Precedence of the current token as a binary operator
    fn current_precedence(&self) -> i32 {
        match self.current {
            Token::Char(c) => self.precedence.get(c),
            _ => NOT_AN_OPERATOR,
        }
    }

    /// Climb binary operators binding at least as tightly as `min_prec`,
    /// folding them onto `lhs`
    fn parse_binop_rhs(&mut self, min_prec: i32, mut lhs: Expr) -> Result<Expr, ParseError> {
        loop {
            let prec = self.current_precedence();
            if prec < min_prec || self.check_char('}') {
                return Ok(lhs);
            }

            let Token::Char(op) = self.advance() else {
                // only Char tokens have a precedence
                return Ok(lhs);
            };

            let mut rhs = self.parse_primary()?;

            // A tighter operator after rhs takes rhs as its left operand first
            if prec < self.current_precedence() {
                rhs = self.parse_binop_rhs(prec + 1, rhs)?;
            }

            lhs = Expr::binary(op, lhs, rhs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::precedence::PrecedenceTable;

    fn parse(source: &str) -> Expr {
        Parser::new(source).parse_expression_only().unwrap()
    }

    fn var(name: &str) -> Expr {
        Expr::Variable(name.to_string())
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        assert_eq!(
            parse("a + b * c"),
            Expr::binary('+', var("a"), Expr::binary('*', var("b"), var("c")))
        );
        assert_eq!(
            parse("a * b + c"),
            Expr::binary('+', Expr::binary('*', var("a"), var("b")), var("c"))
        );
    }

    #[test]
    fn test_left_associative() {
        assert_eq!(
            parse("a - b - c"),
            Expr::binary('-', Expr::binary('-', var("a"), var("b")), var("c"))
        );
    }

    #[test]
    fn test_relational_lowest() {
        assert_eq!(
            parse("a < b + 1"),
            Expr::binary('<', var("a"), Expr::binary('+', var("b"), Expr::Number(1)))
        );
    }

    #[test]
    fn test_three_levels() {
        // a < b + c * d  =>  a < (b + (c * d))
        assert_eq!(
            parse("a < b + c * d"),
            Expr::binary(
                '<',
                var("a"),
                Expr::binary('+', var("b"), Expr::binary('*', var("c"), var("d")))
            )
        );
    }

    #[test]
    fn test_negation_scope() {
        assert_eq!(
            parse("-a + b"),
            Expr::Negate(Box::new(Expr::binary('+', var("a"), var("b"))))
        );
        assert_eq!(
            parse("a * -b + c"),
            Expr::binary(
                '*',
                var("a"),
                Expr::Negate(Box::new(Expr::binary('+', var("b"), var("c"))))
            )
        );
    }

    #[test]
    fn test_parentheses() {
        assert_eq!(
            parse("(a + b) * c"),
            Expr::binary('*', Expr::binary('+', var("a"), var("b")), var("c"))
        );
    }

    #[test]
    fn test_calls() {
        assert_eq!(parse("foo"), var("foo"));
        assert_eq!(
            parse("foo()"),
            Expr::Call {
                callee: "foo".to_string(),
                args: vec![]
            }
        );
        match parse("foo(a, b + 1)") {
            Expr::Call { callee, args } => {
                assert_eq!(callee, "foo");
                assert_eq!(args.len(), 2);
                assert_eq!(args[1], Expr::binary('+', var("b"), Expr::Number(1)));
            }
            other => panic!("Expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_stops_at_non_operator() {
        let mut parser = Parser::new("a + b THEN");
        let expr = parser.parse_expression_only().unwrap();

        assert_eq!(expr, Expr::binary('+', var("a"), var("b")));
        assert_eq!(parser.current, Token::Then);
    }

    #[test]
    fn test_stops_at_closing_brace_even_if_ranked() {
        let mut table = PrecedenceTable::default();
        table.insert('}', 99);
        let mut parser = Parser::with_precedence("a }", table);

        assert_eq!(parser.parse_expression_only().unwrap(), var("a"));
        assert!(parser.check_char('}'));
    }

    #[test]
    fn test_custom_table() {
        let mut table = PrecedenceTable::empty();
        table.insert('+', 50);
        table.insert('*', 10);
        let mut parser = Parser::with_precedence("a + b * c", table);

        assert_eq!(
            parser.parse_expression_only().unwrap(),
            Expr::binary('*', Expr::binary('+', var("a"), var("b")), var("c"))
        );
    }

    #[test]
    fn test_errors() {
        let err = Parser::new("foo(a b)").parse_expression_only().unwrap_err();
        assert!(err.message.starts_with("Expected ')' or ',' in argument list"));

        let err = Parser::new("(a + b").parse_expression_only().unwrap_err();
        assert!(err.message.starts_with("expected ')'"));

        let err = Parser::new("a + THEN").parse_expression_only().unwrap_err();
        assert!(err
            .message
            .starts_with("unknown token when expecting an expression"));

        let err = Parser::new("\"open").parse_expression_only().unwrap_err();
        assert_eq!(err.message, "unterminated text literal");
    }
}

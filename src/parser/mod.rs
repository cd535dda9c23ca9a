//! Toy language parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (characters → tokens, on demand)
//! - [`precedence`]: Binary operator ranks used by expression parsing
//! - [`parse`]: Parser session, errors and the top-level program loop
//! - [`ast`]: AST node definitions
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary
//! operators, one token of lookahead. No external parser generator dependencies.

pub mod ast;
pub mod lexer;
pub mod parse;
pub mod precedence;

mod declarations;
mod expressions;
mod statements;

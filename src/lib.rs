//! # Introduction
//!
//! toyc is the front end of a small imperative language: a streaming
//! tokenizer, a precedence-climbing expression parser, and a
//! recursive-descent parser for functions, statements and blocks. Every
//! function that parses is handed to a code-generation [`codegen::Backend`]
//! straight away; every one that does not becomes a diagnostic, and parsing
//! picks up again one token later.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → Function → Backend
//!                        └→ ParseError (diagnostics)
//! ```
//!
//! 1. [`parser`]: tokens, the precedence table, the AST and the parser.
//! 2. [`codegen`]: the backend seam and the [`codegen::Session`] driver.
//! 3. [`printer`]: source-like and outline renderings of the AST.
//! 4. [`ui`]: ratatui-based explorer; not part of the stable library API.
//!
//! ## Language at a glance
//!
//! ```text
//! FUNC fact(n)
//! {
//!     VAR r
//!     r := 1
//!     WHILE n DO { r := r * n  n := n - 1 } DONE
//!     RETURN r
//! }
//! ```
//!
//! Operators: `<`, `>`, `=`, `+`, `-`, `*`, `/`, `%` and unary `-`.
//! Statements: `:=`, `PRINT`, `RETURN`, `CONTINUE`, `IF/THEN/ELSE/FI`,
//! `WHILE/DO/DONE`, `{ ... }` blocks with an optional leading `VAR` list.

pub mod codegen;
pub mod parser;
pub mod printer;
pub mod ui;

//! # Introduction
//!
//! Scriptling is a small statement-and-expression language: integer and
//! string literals, `let` declarations, assignment, binary arithmetic, and
//! nestable block statements.  This crate turns Scriptling source text into
//! an abstract syntax tree; it does not resolve names, check types, or
//! execute anything.
//!
//! ## Parsing pipeline
//!
//! ```text
//! Source → Tokenizer → Parser → AST
//! ```
//!
//! 1. [`lexer`] — scans source text into [`lexer::Token`]s by trying an
//!    ordered list of lexical rules at the cursor; whitespace and comments
//!    are skipped. Tokens are pulled lazily, one at a time.
//! 2. [`parser`] — recursive descent with a single token of lookahead;
//!    standard precedence for `+ - * /`, right-associative assignment,
//!    fail-fast errors with no recovery.
//! 3. [`ast`] — the default tree representation, one tagged variant per node
//!    kind; serializes to the stable `type`-tagged interchange shape when the
//!    `serde` feature (on by default) is enabled.
//! 4. [`factory`] — the construction seam: every node is built through a
//!    [`factory::NodeFactory`], so the same grammar can emit alternate AST
//!    encodings.
//!
//! ## Example
//!
//! ```
//! use scriptling::parser::Parser;
//!
//! let mut parser = Parser::new();
//! let ast = parser.parse("let x = (1 + 2) * 3;").unwrap();
//! assert!(matches!(ast, scriptling::ast::Node::Program { .. }));
//! ```

pub mod ast;
pub mod factory;
pub mod lexer;
pub mod parser;

//! AST node definitions for the default tree representation
//!
//! One tagged variant per node kind; children are owned through `Box`/`Vec`
//! and every node is immutable once built. Variant and field names are a
//! stable interchange surface that downstream consumers pattern-match and
//! deserialize against, so renames here are breaking changes.
//!
//! With the `serde` feature (on by default) the tree serializes internally
//! tagged as `type`, e.g. `{"type":"NumericLiteral","value":42}`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A node of the syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum Node {
    /// Root node; owns every top-level statement in source order.
    Program { body: Vec<Node> },

    /// An expression in statement position, e.g. `x + 1;`.
    ExpressionStatement { expression: Box<Node> },

    /// A lone `;`.
    EmptyStatement,

    /// `{ ... }`: a possibly empty statement list; blocks nest arbitrarily.
    BlockStatement { body: Vec<Node> },

    /// `let` with one or more comma-separated declarations.
    VariableStatement { declarations: Vec<Node> },

    /// A single declared name, with `init` absent for `let y;`.
    VariableDeclaration {
        id: Box<Node>,
        init: Option<Box<Node>>,
    },

    /// `left = right` or a compound form; `operator` holds the exact lexeme
    /// (`"="`, `"+="`, ...). Right-associative when chained.
    AssignmentExpression {
        operator: String,
        left: Box<Node>,
        right: Box<Node>,
    },

    /// A binary arithmetic expression; `operator` holds the exact lexeme.
    BinaryExpression {
        operator: String,
        left: Box<Node>,
        right: Box<Node>,
    },

    /// A variable reference by name.
    Identifier { name: String },

    /// An integer literal.
    NumericLiteral { value: i64 },

    /// A string literal, delimiting quotes stripped, no escape decoding.
    StringLiteral { value: String },
}

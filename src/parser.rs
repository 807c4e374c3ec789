//! Recursive descent parser for Scriptling
//!
//! Builds an AST from source text with a single token of lookahead. Each
//! grammar production is one method; the only place parser position advances
//! is the [`Parser::expect`] primitive, which consumes the lookahead and
//! pulls the next token from the lexer.
//!
//! # Grammar
//!
//! ```text
//! program        ::= statement_list
//! statement      ::= empty_stmt | block_stmt | variable_stmt | expr_stmt
//! empty_stmt     ::= ';'
//! block_stmt     ::= '{' statement_list? '}'
//! variable_stmt  ::= 'let' variable_decl (',' variable_decl)* ';'
//! variable_decl  ::= identifier ('=' assignment)?
//! expr_stmt      ::= expression ';'
//! expression     ::= assignment
//! assignment     ::= additive (('=' | '+=' | '-=' | '*=' | '/=') assignment)?
//! additive       ::= multiplicative (('+' | '-') multiplicative)*
//! multiplicative ::= primary (('*' | '/') primary)*
//! primary        ::= literal | '(' expression ')' | identifier
//! ```
//!
//! Binary operators are left-associative within a level, assignment is
//! right-associative, and parentheses override precedence. Nodes are built
//! through the parser's [`NodeFactory`], so the same grammar can produce
//! different output representations.

use std::fmt;

use crate::factory::{NodeFactory, TreeFactory};
use crate::lexer::{LexError, Token, TokenKind, Tokenizer};

/// Maximum block/parenthesis nesting before the parser refuses the input
/// rather than risking call-stack exhaustion.
const MAX_NESTING: usize = 256;

/// Parser error type.
///
/// Every variant is fatal: the first error aborts the whole parse and no
/// partial AST is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No lexical rule matched the remaining input.
    UnexpectedCharacter { ch: char, position: usize },

    /// A token was required but the input was exhausted.
    UnexpectedEndOfInput { expected: TokenKind },

    /// The next token is not of the required kind.
    UnexpectedToken {
        kind: TokenKind,
        value: String,
        expected: TokenKind,
    },

    /// The literal production saw a token that is neither a number nor a
    /// string.
    UnexpectedLiteral,

    /// The left-hand side of an assignment is not an assignable expression.
    InvalidAssignmentTarget,

    /// A numeric literal does not fit the AST's integer type.
    InvalidNumericLiteral { text: String },

    /// Blocks or parentheses nest deeper than [`MAX_NESTING`].
    NestingTooDeep { limit: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter { ch, position } => {
                write!(f, "unexpected character '{}' at offset {}", ch, position)
            }
            Self::UnexpectedEndOfInput { expected } => {
                write!(f, "unexpected end of input, expected {}", expected)
            }
            Self::UnexpectedToken {
                kind,
                value,
                expected,
            } => {
                write!(f, "unexpected {} '{}', expected {}", kind, value, expected)
            }
            Self::UnexpectedLiteral => {
                write!(f, "expected a number or string literal")
            }
            Self::InvalidAssignmentTarget => {
                write!(f, "invalid left-hand side in assignment")
            }
            Self::InvalidNumericLiteral { text } => {
                write!(f, "numeric literal '{}' is out of range", text)
            }
            Self::NestingTooDeep { limit } => {
                write!(f, "nesting exceeds the maximum depth of {}", limit)
            }
        }
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        Self::UnexpectedCharacter {
            ch: err.ch,
            position: err.position,
        }
    }
}

/// Recursive descent parser, generic over the node representation it emits.
///
/// A parser value holds per-parse state (tokenizer cursor, lookahead, nesting
/// depth) and is not meant to be shared; parse independent inputs
/// concurrently with independent parsers.
pub struct Parser<F: NodeFactory = TreeFactory> {
    factory: F,
    tokenizer: Tokenizer,
    /// The next not-yet-consumed token; `None` once input is exhausted.
    lookahead: Option<Token>,
    depth: usize,
}

impl Parser<TreeFactory> {
    /// Parser producing the default tree-shaped AST.
    pub fn new() -> Self {
        Self::with_factory(TreeFactory)
    }
}

impl Default for Parser<TreeFactory> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: NodeFactory> Parser<F> {
    /// Parser building its output through `factory`.
    pub fn with_factory(factory: F) -> Self {
        Self {
            factory,
            tokenizer: Tokenizer::new(),
            lookahead: None,
            depth: 0,
        }
    }

    /// Parse `source` into an AST root.
    ///
    /// Resets the tokenizer, primes the lookahead, and descends from the
    /// program production. Reusing a parser for another source is fine; a
    /// single parse either returns the root node or the first error.
    pub fn parse(&mut self, source: &str) -> Result<F::Output, ParseError> {
        self.tokenizer.init(source);
        self.lookahead = self.tokenizer.next_token()?;
        self.depth = 0;
        self.program()
    }

    /// program ::= statement_list (until end of input)
    fn program(&mut self) -> Result<F::Output, ParseError> {
        let body = self.statement_list(None)?;
        Ok(self.factory.program(body))
    }

    /// One or more statements, accumulated while lookahead remains and does
    /// not equal `stop`. Blocks stop at `'}'`; the program stops at end of
    /// input.
    fn statement_list(&mut self, stop: Option<TokenKind>) -> Result<Vec<F::Output>, ParseError> {
        let mut statements = vec![self.statement()?];

        while let Some(token) = &self.lookahead {
            if stop == Some(token.kind) {
                break;
            }
            statements.push(self.statement()?);
        }

        Ok(statements)
    }

    /// Dispatch on the lookahead kind; everything that is not a dedicated
    /// statement form parses as an expression statement.
    fn statement(&mut self) -> Result<F::Output, ParseError> {
        match self.lookahead.as_ref().map(|t| t.kind) {
            Some(TokenKind::Semicolon) => self.empty_statement(),
            Some(TokenKind::BraceOpen) => self.block_statement(),
            Some(TokenKind::Let) => self.variable_statement(),
            _ => self.expression_statement(),
        }
    }

    /// empty_stmt ::= ';'
    fn empty_statement(&mut self) -> Result<F::Output, ParseError> {
        self.expect(TokenKind::Semicolon)?;
        Ok(self.factory.empty_statement())
    }

    /// block_stmt ::= '{' statement_list? '}'
    fn block_statement(&mut self) -> Result<F::Output, ParseError> {
        self.enter_nested()?;
        self.expect(TokenKind::BraceOpen)?;

        let body = if self.lookahead_is(TokenKind::BraceClose) {
            Vec::new()
        } else {
            self.statement_list(Some(TokenKind::BraceClose))?
        };

        self.expect(TokenKind::BraceClose)?;
        self.leave_nested();
        Ok(self.factory.block_statement(body))
    }

    /// variable_stmt ::= 'let' variable_decl (',' variable_decl)* ';'
    fn variable_statement(&mut self) -> Result<F::Output, ParseError> {
        self.expect(TokenKind::Let)?;

        let mut declarations = vec![self.variable_declaration()?];
        while self.lookahead_is(TokenKind::Comma) {
            self.expect(TokenKind::Comma)?;
            declarations.push(self.variable_declaration()?);
        }

        self.expect(TokenKind::Semicolon)?;
        Ok(self.factory.variable_statement(declarations))
    }

    /// variable_decl ::= identifier ('=' assignment)?
    ///
    /// The initializer is absent when the declaration ends at `,` or `;`
    /// (`let y;`).
    fn variable_declaration(&mut self) -> Result<F::Output, ParseError> {
        let id = self.identifier()?;

        let init = if self.lookahead_is(TokenKind::Semicolon) || self.lookahead_is(TokenKind::Comma)
        {
            None
        } else {
            self.expect(TokenKind::SimpleAssign)?;
            Some(self.assignment_expression()?)
        };

        Ok(self.factory.variable_declaration(id, init))
    }

    /// expr_stmt ::= expression ';'
    fn expression_statement(&mut self) -> Result<F::Output, ParseError> {
        let expression = self.expression()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(self.factory.expression_statement(expression))
    }

    /// expression ::= assignment
    fn expression(&mut self) -> Result<F::Output, ParseError> {
        self.assignment_expression()
    }

    /// assignment ::= additive (assignment_op assignment)?
    ///
    /// Right-associative: `a = b = 10` recurses on the right-hand side. The
    /// left-hand side must be an assignable node, checked through the
    /// factory before the right-hand side is parsed.
    fn assignment_expression(&mut self) -> Result<F::Output, ParseError> {
        let left = self.additive_expression()?;

        if !matches!(
            self.lookahead.as_ref().map(|t| t.kind),
            Some(TokenKind::SimpleAssign) | Some(TokenKind::ComplexAssign)
        ) {
            return Ok(left);
        }

        let operator = self.assignment_operator()?;
        if !self.factory.is_assignment_target(&left) {
            return Err(ParseError::InvalidAssignmentTarget);
        }

        let right = self.assignment_expression()?;
        Ok(self
            .factory
            .assignment_expression(&operator.value, left, right))
    }

    /// Consume whichever assignment operator kind the lookahead holds.
    fn assignment_operator(&mut self) -> Result<Token, ParseError> {
        if self.lookahead_is(TokenKind::SimpleAssign) {
            self.expect(TokenKind::SimpleAssign)
        } else {
            self.expect(TokenKind::ComplexAssign)
        }
    }

    /// additive ::= multiplicative (('+' | '-') multiplicative)*
    fn additive_expression(&mut self) -> Result<F::Output, ParseError> {
        self.binary_expression(Self::multiplicative_expression, TokenKind::AdditiveOperator)
    }

    /// multiplicative ::= primary (('*' | '/') primary)*
    fn multiplicative_expression(&mut self) -> Result<F::Output, ParseError> {
        self.binary_expression(Self::primary_expression, TokenKind::MultiplicativeOperator)
    }

    /// Generic left-associative fold for one binary precedence level:
    /// parse an operand with the next-tighter production, then fold
    /// `left = (operator left right)` while the lookahead holds `operator`.
    fn binary_expression(
        &mut self,
        operand: fn(&mut Self) -> Result<F::Output, ParseError>,
        operator: TokenKind,
    ) -> Result<F::Output, ParseError> {
        let mut left = operand(self)?;

        while self.lookahead_is(operator) {
            let op = self.expect(operator)?;
            let right = operand(self)?;
            left = self.factory.binary_expression(&op.value, left, right);
        }

        Ok(left)
    }

    /// primary ::= literal | '(' expression ')' | identifier
    fn primary_expression(&mut self) -> Result<F::Output, ParseError> {
        match self.lookahead.as_ref().map(|t| t.kind) {
            Some(TokenKind::Number) | Some(TokenKind::String) => self.literal(),
            Some(TokenKind::ParenOpen) => self.parenthesized_expression(),
            _ => self.identifier(),
        }
    }

    /// '(' expression ')' returns the inner expression unchanged; grouping
    /// only affects how the tree nests.
    fn parenthesized_expression(&mut self) -> Result<F::Output, ParseError> {
        self.enter_nested()?;
        self.expect(TokenKind::ParenOpen)?;
        let expression = self.expression()?;
        self.expect(TokenKind::ParenClose)?;
        self.leave_nested();
        Ok(expression)
    }

    /// literal ::= NUMBER | STRING
    fn literal(&mut self) -> Result<F::Output, ParseError> {
        match self.lookahead.as_ref().map(|t| t.kind) {
            Some(TokenKind::Number) => self.numeric_literal(),
            Some(TokenKind::String) => self.string_literal(),
            _ => Err(ParseError::UnexpectedLiteral),
        }
    }

    fn numeric_literal(&mut self) -> Result<F::Output, ParseError> {
        let token = self.expect(TokenKind::Number)?;
        let value = token
            .value
            .parse::<i64>()
            .map_err(|_| ParseError::InvalidNumericLiteral {
                text: token.value.clone(),
            })?;
        Ok(self.factory.numeric_literal(value))
    }

    /// The token value still carries its delimiting quotes; the literal node
    /// gets the inner text, with no escape decoding.
    fn string_literal(&mut self) -> Result<F::Output, ParseError> {
        let token = self.expect(TokenKind::String)?;
        let inner = &token.value[1..token.value.len() - 1];
        Ok(self.factory.string_literal(inner))
    }

    fn identifier(&mut self) -> Result<F::Output, ParseError> {
        let token = self.expect(TokenKind::Identifier)?;
        Ok(self.factory.identifier(&token.value))
    }

    // ===== Helper methods =====

    /// Consume the lookahead if it has the `expected` kind and pull the next
    /// token into its place. This is the only method that advances parser
    /// position; every grammar method goes through it.
    fn expect(&mut self, expected: TokenKind) -> Result<Token, ParseError> {
        match self.lookahead.take() {
            None => Err(ParseError::UnexpectedEndOfInput { expected }),
            Some(token) if token.kind != expected => Err(ParseError::UnexpectedToken {
                kind: token.kind,
                value: token.value,
                expected,
            }),
            Some(token) => {
                self.lookahead = self.tokenizer.next_token()?;
                Ok(token)
            }
        }
    }

    fn lookahead_is(&self, kind: TokenKind) -> bool {
        self.lookahead.as_ref().map(|t| t.kind) == Some(kind)
    }

    /// Track block/parenthesis nesting. Errors are fatal, so the counter is
    /// simply reset at the start of each parse.
    fn enter_nested(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(ParseError::NestingTooDeep { limit: MAX_NESTING });
        }
        Ok(())
    }

    fn leave_nested(&mut self) {
        self.depth -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Node;
    use crate::factory::{Sexpr, SexprFactory};

    #[test]
    fn test_parse_numeric_statement() {
        let ast = Parser::new().parse("42;").unwrap();

        assert_eq!(
            ast,
            Node::Program {
                body: vec![Node::ExpressionStatement {
                    expression: Box::new(Node::NumericLiteral { value: 42 }),
                }],
            }
        );
    }

    #[test]
    fn test_precedence_shape() {
        let ast = Parser::new().parse("2 + 2 * 2;").unwrap();

        // Multiplication binds tighter: the '*' node is the right child.
        let statement = match &ast {
            Node::Program { body } => &body[0],
            _ => panic!("expected program root"),
        };
        let expression = match statement {
            Node::ExpressionStatement { expression } => expression.as_ref(),
            _ => panic!("expected expression statement"),
        };
        match expression {
            Node::BinaryExpression {
                operator, right, ..
            } => {
                assert_eq!(operator, "+");
                assert!(matches!(
                    right.as_ref(),
                    Node::BinaryExpression { operator, .. } if operator == "*"
                ));
            }
            _ => panic!("expected binary expression"),
        }
    }

    #[test]
    fn test_sexpr_factory() {
        let ast = Parser::with_factory(SexprFactory).parse("1 + 2;").unwrap();

        assert_eq!(
            ast,
            Sexpr::List(vec![
                Sexpr::Symbol("begin".to_string()),
                Sexpr::List(vec![
                    Sexpr::Symbol("+".to_string()),
                    Sexpr::Int(1),
                    Sexpr::Int(2),
                ]),
            ])
        );
    }

    #[test]
    fn test_sexpr_assignment_target() {
        let mut parser = Parser::with_factory(SexprFactory);

        assert!(parser.parse("x = 1;").is_ok());
        assert_eq!(
            parser.parse("10 = 1;").unwrap_err(),
            ParseError::InvalidAssignmentTarget
        );
    }

    #[test]
    fn test_nesting_guard() {
        let source = format!("{}1{};", "(".repeat(MAX_NESTING + 1), ")".repeat(MAX_NESTING + 1));

        assert_eq!(
            Parser::new().parse(&source).unwrap_err(),
            ParseError::NestingTooDeep { limit: MAX_NESTING }
        );
    }

    #[test]
    fn test_nesting_within_limit() {
        let source = format!("{}1{};", "(".repeat(32), ")".repeat(32));
        assert!(Parser::new().parse(&source).is_ok());
    }

    #[test]
    fn test_empty_source_is_an_error() {
        assert_eq!(
            Parser::new().parse("").unwrap_err(),
            ParseError::UnexpectedEndOfInput {
                expected: TokenKind::Identifier
            }
        );
    }

    #[test]
    fn test_numeric_overflow() {
        assert_eq!(
            Parser::new().parse("99999999999999999999;").unwrap_err(),
            ParseError::InvalidNumericLiteral {
                text: "99999999999999999999".to_string()
            }
        );
    }
}

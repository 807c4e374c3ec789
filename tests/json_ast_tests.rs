// Serialization tests for the `type`-tagged interchange form of the AST.
// Downstream consumers match on these exact node-kind and field names, so
// the expected JSON values here double as a compatibility contract.

#![cfg(feature = "serde")]

use scriptling::ast::Node;
use scriptling::parser::Parser;
use serde_json::{json, Value};

fn parse_json(source: &str) -> Value {
    let ast = Parser::new().parse(source).expect("parse failed");
    serde_json::to_value(&ast).expect("serialization failed")
}

#[test]
fn test_numeric_literal_shape() {
    assert_eq!(
        parse_json("42;"),
        json!({
            "type": "Program",
            "body": [
                {
                    "type": "ExpressionStatement",
                    "expression": { "type": "NumericLiteral", "value": 42 },
                },
            ],
        })
    );
}

#[test]
fn test_string_literal_shape() {
    assert_eq!(
        parse_json(r#""Hello";"#),
        json!({
            "type": "Program",
            "body": [
                {
                    "type": "ExpressionStatement",
                    "expression": { "type": "StringLiteral", "value": "Hello" },
                },
            ],
        })
    );
}

#[test]
fn test_statement_list_shape() {
    assert_eq!(
        parse_json("42; 'Hello';"),
        json!({
            "type": "Program",
            "body": [
                {
                    "type": "ExpressionStatement",
                    "expression": { "type": "NumericLiteral", "value": 42 },
                },
                {
                    "type": "ExpressionStatement",
                    "expression": { "type": "StringLiteral", "value": "Hello" },
                },
            ],
        })
    );
}

#[test]
fn test_empty_and_block_statement_shape() {
    assert_eq!(
        parse_json("{ ; }"),
        json!({
            "type": "Program",
            "body": [
                {
                    "type": "BlockStatement",
                    "body": [ { "type": "EmptyStatement" } ],
                },
            ],
        })
    );
}

#[test]
fn test_variable_statement_shape_with_absent_init() {
    assert_eq!(
        parse_json("let c, d = 10;"),
        json!({
            "type": "Program",
            "body": [
                {
                    "type": "VariableStatement",
                    "declarations": [
                        {
                            "type": "VariableDeclaration",
                            "id": { "type": "Identifier", "name": "c" },
                            "init": null,
                        },
                        {
                            "type": "VariableDeclaration",
                            "id": { "type": "Identifier", "name": "d" },
                            "init": { "type": "NumericLiteral", "value": 10 },
                        },
                    ],
                },
            ],
        })
    );
}

#[test]
fn test_assignment_and_binary_shape() {
    assert_eq!(
        parse_json("x = 2 + 2 * 2;"),
        json!({
            "type": "Program",
            "body": [
                {
                    "type": "ExpressionStatement",
                    "expression": {
                        "type": "AssignmentExpression",
                        "operator": "=",
                        "left": { "type": "Identifier", "name": "x" },
                        "right": {
                            "type": "BinaryExpression",
                            "operator": "+",
                            "left": { "type": "NumericLiteral", "value": 2 },
                            "right": {
                                "type": "BinaryExpression",
                                "operator": "*",
                                "left": { "type": "NumericLiteral", "value": 2 },
                                "right": { "type": "NumericLiteral", "value": 2 },
                            },
                        },
                    },
                },
            ],
        })
    );
}

#[test]
fn test_json_round_trip() {
    let ast = Parser::new()
        .parse("{ let x = 1; x += 2 * (x - 1); }")
        .expect("parse failed");

    let value = serde_json::to_value(&ast).expect("serialization failed");
    let back: Node = serde_json::from_value(value).expect("deserialization failed");
    assert_eq!(ast, back);
}

//! Parser tests module
//!
//! - expression: precedence, postfix forms, expression errors
//! - statement: compound and simple statements
//! - function: definitions, parameter lists, decorators
//! - types: type annotations
//! - state: cursor primitives and machine invariants
//! - fuzz: generated inputs (proptest)

mod state;
mod statement;

use crate::frontend::lexer::tokenize;
use crate::frontend::parser::{parse, parse_expression, Expr, ParseError, Program};

pub(super) fn parse_source(source: &str) -> Program {
    let tokens = tokenize(source).unwrap();
    parse(&tokens).unwrap()
}

pub(super) fn parse_error(source: &str) -> ParseError {
    let tokens = tokenize(source).unwrap();
    parse(&tokens).unwrap_err()
}

pub(super) fn expr(source: &str) -> Expr {
    let tokens = tokenize(source).unwrap();
    parse_expression(&tokens).unwrap()
}

pub(super) fn expr_error(source: &str) -> ParseError {
    let tokens = tokenize(source).unwrap();
    parse_expression(&tokens).unwrap_err()
}

pub(super) fn num(text: &str) -> Expr {
    Expr::number(text)
}

pub(super) fn id(name: &str) -> Expr {
    Expr::identifier(name)
}

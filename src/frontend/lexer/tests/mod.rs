//! Lexer tests module
//!
//! - basic: identifiers, keywords, whitespace, comments
//! - indent: INDENT/DEDENT synthesis and line joining
//! - literals: numbers and strings
//! - operators: operator and delimiter scanning
//! - errors: lexical errors


use crate::frontend::lexer::{Token, TokenKind};

/// Kinds of a token stream, for compact assertions
pub(super) fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}

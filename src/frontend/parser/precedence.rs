//! Operator precedence for the expression engine
//!
//! Binding power levels, low to high. Unary prefix operators share the
//! level of `**`; power is checked with a strict comparison so it stays
//! right-associative and a unary operator under it is not reduced early.

use crate::frontend::lexer::tokens::{Token, TokenKind};
use crate::frontend::parser::ast::{BinOp, UnaryOp};

pub const BP_OR: u8 = 1;
pub const BP_AND: u8 = 2;
pub const BP_EQUALITY: u8 = 3;
pub const BP_RELATIONAL: u8 = 4;
pub const BP_BIT_OR: u8 = 5;
pub const BP_BIT_XOR: u8 = 6;
pub const BP_BIT_AND: u8 = 7;
pub const BP_SHIFT: u8 = 8;
pub const BP_ADDITIVE: u8 = 9;
pub const BP_MULTIPLICATIVE: u8 = 10;
pub const BP_POWER: u8 = 11;
pub const BP_UNARY: u8 = 11;

/// Operator associativity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
}

impl BinOp {
    /// Binding power of this operator
    pub fn precedence(self) -> u8 {
        match self {
            BinOp::Or => BP_OR,
            BinOp::And => BP_AND,
            BinOp::Eq | BinOp::NotEq | BinOp::In | BinOp::NotIn | BinOp::Is | BinOp::IsNot => {
                BP_EQUALITY
            }
            BinOp::Lt | BinOp::LtE | BinOp::Gt | BinOp::GtE => BP_RELATIONAL,
            BinOp::BitOr => BP_BIT_OR,
            BinOp::BitXor => BP_BIT_XOR,
            BinOp::BitAnd => BP_BIT_AND,
            BinOp::LShift | BinOp::RShift => BP_SHIFT,
            BinOp::Add | BinOp::Sub => BP_ADDITIVE,
            BinOp::Mul | BinOp::Div | BinOp::FloorDiv | BinOp::Mod | BinOp::MatMul => {
                BP_MULTIPLICATIVE
            }
            BinOp::Pow => BP_POWER,
        }
    }

    pub fn assoc(self) -> Assoc {
        match self {
            BinOp::Pow => Assoc::Right,
            _ => Assoc::Left,
        }
    }
}

impl UnaryOp {
    pub fn precedence(self) -> u8 {
        BP_UNARY
    }

    /// Prefix operator for an operand-position token
    pub fn from_token(token: &Token) -> Option<Self> {
        match token.kind {
            TokenKind::KwNot => Some(UnaryOp::Not),
            TokenKind::Operator => match token.text.as_str() {
                "+" => Some(UnaryOp::Pos),
                "-" => Some(UnaryOp::Neg),
                "~" => Some(UnaryOp::Invert),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Should an operator already on the stack be reduced before pushing `incoming`?
pub fn should_reduce(
    top_precedence: u8,
    incoming: BinOp,
) -> bool {
    match incoming.assoc() {
        Assoc::Left => top_precedence >= incoming.precedence(),
        Assoc::Right => top_precedence > incoming.precedence(),
    }
}

/// Binary operator spelled by a single token (`and`, `+`, `in`, ...).
///
/// `not in` and `is not` span two tokens and are resolved by the caller.
pub fn binary_op_for(token: &Token) -> Option<BinOp> {
    match token.kind {
        TokenKind::KwOr => Some(BinOp::Or),
        TokenKind::KwAnd => Some(BinOp::And),
        TokenKind::KwIn => Some(BinOp::In),
        TokenKind::KwIs => Some(BinOp::Is),
        TokenKind::Operator => BinOp::from_symbol(&token.text),
        _ => None,
    }
}

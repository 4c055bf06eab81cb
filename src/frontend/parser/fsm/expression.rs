//! Expression machine
//!
//! Precedence climbing over an operand stack and an operator stack. A `(`
//! pushes a sentinel onto the operator stack; `)` reduces back to it. Any
//! token that cannot continue the expression finalizes it without being
//! consumed, so callers see the `,`, `:` or `)` that ended it.

use smallvec::SmallVec;

use super::{no_handler, Advance, Fsm, Machine};
use crate::frontend::lexer::tokens::{Token, TokenKind};
use crate::frontend::parser::ast::{BinOp, Expr, KeywordArg, LiteralKind, UnaryOp};
use crate::frontend::parser::parser_state::{ParseError, ParserState};
use crate::frontend::parser::precedence::{binary_op_for, should_reduce};
use crate::util::Spanned;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprState {
    /// Nothing seen yet
    Initial,
    /// An operand or prefix operator must come next
    ExpectOperand,
    /// An operand was just completed
    ExpectOperator,
}

/// Operator stack entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StackOp {
    Binary(BinOp),
    Unary(UnaryOp),
    /// Sentinel for an open `(`
    Paren,
}

impl StackOp {
    fn precedence(self) -> Option<u8> {
        match self {
            StackOp::Binary(op) => Some(op.precedence()),
            StackOp::Unary(op) => Some(op.precedence()),
            StackOp::Paren => None,
        }
    }
}

pub struct ExpressionFsm {
    machine: Machine<ExprState, Expr>,
    operands: SmallVec<[Expr; 4]>,
    operators: SmallVec<[Spanned<StackOp>; 4]>,
}

impl Default for ExpressionFsm {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionFsm {
    pub fn new() -> Self {
        Self {
            machine: Machine::new(ExprState::Initial),
            operands: SmallVec::new(),
            operators: SmallVec::new(),
        }
    }

    fn expect_operand(
        &mut self,
        parser: &mut ParserState<'_>,
        token: &Token,
    ) -> Result<Advance, ParseError> {
        let literal = |kind: LiteralKind| Expr::Literal {
            kind,
            value: token.text.clone(),
        };

        let operand = match token.kind {
            TokenKind::Identifier => Expr::identifier(token.text.as_str()),
            TokenKind::Number => literal(LiteralKind::Number),
            TokenKind::String => literal(LiteralKind::String),
            TokenKind::KwTrue | TokenKind::KwFalse => literal(LiteralKind::Bool),
            TokenKind::KwNone => literal(LiteralKind::None),
            TokenKind::LParen => {
                self.operators.push(Spanned::new(StackOp::Paren, token.span));
                self.machine.goto(ExprState::ExpectOperand);
                return Ok(Advance::Driver);
            }
            TokenKind::LBracket => {
                let elements = parse_sequence(
                    parser,
                    TokenKind::RBracket,
                    "expected ']' to close list",
                )?;
                self.operands.push(Expr::ListLiteral { elements });
                self.machine.goto(ExprState::ExpectOperator);
                return Ok(Advance::SelfAdvanced);
            }
            _ => match UnaryOp::from_token(token) {
                Some(op) => {
                    self.operators.push(Spanned::new(StackOp::Unary(op), token.span));
                    self.machine.goto(ExprState::ExpectOperand);
                    return Ok(Advance::Driver);
                }
                None => {
                    return Err(ParseError::syntax(
                        format!("expected an expression, found {}", token.describe()),
                        token,
                    ))
                }
            },
        };

        self.operands.push(operand);
        self.machine.goto(ExprState::ExpectOperator);
        Ok(Advance::Driver)
    }

    fn expect_operator(
        &mut self,
        parser: &mut ParserState<'_>,
        token: &Token,
    ) -> Result<Advance, ParseError> {
        // `not in` / `is not`
        let composite = match (token.kind, parser.peek(1).kind) {
            (TokenKind::KwNot, TokenKind::KwIn) => Some(BinOp::NotIn),
            (TokenKind::KwIs, TokenKind::KwNot) => Some(BinOp::IsNot),
            _ => None,
        };
        if let Some(op) = composite {
            parser.advance();
            parser.advance();
            self.push_binary(op, token)?;
            return Ok(Advance::SelfAdvanced);
        }

        if let Some(op) = binary_op_for(token) {
            self.push_binary(op, token)?;
            return Ok(Advance::Driver);
        }

        match token.kind {
            TokenKind::LParen => {
                self.parse_call(parser)?;
                Ok(Advance::SelfAdvanced)
            }
            TokenKind::Dot => {
                parser.advance();
                let attr = parser.consume_identifier("expected attribute name after '.'")?;
                let value = self.pop_operand(token)?;
                self.operands.push(Expr::Attribute {
                    value: Box::new(value),
                    attr,
                });
                Ok(Advance::SelfAdvanced)
            }
            TokenKind::LBracket => {
                parser.advance();
                let index = parser.parse_expression()?;
                parser.consume(TokenKind::RBracket, "expected ']' after subscript")?;
                let value = self.pop_operand(token)?;
                self.operands.push(Expr::Subscript {
                    value: Box::new(value),
                    index: Box::new(index),
                });
                Ok(Advance::SelfAdvanced)
            }
            TokenKind::RParen if self.has_open_paren() => {
                self.close_paren(token)?;
                Ok(Advance::Driver)
            }
            _ => {
                self.finalize(token)?;
                Ok(Advance::SelfAdvanced)
            }
        }
    }

    fn push_binary(
        &mut self,
        op: BinOp,
        token: &Token,
    ) -> Result<(), ParseError> {
        while let Some(top) = self.operators.last().copied() {
            match top.value.precedence() {
                Some(p) if should_reduce(p, op) => {
                    self.operators.pop();
                    self.reduce(top)?;
                }
                _ => break,
            }
        }
        self.operators.push(Spanned::new(StackOp::Binary(op), token.span));
        self.machine.goto(ExprState::ExpectOperand);
        Ok(())
    }

    fn has_open_paren(&self) -> bool {
        self.operators.iter().any(|op| op.value == StackOp::Paren)
    }

    fn close_paren(
        &mut self,
        token: &Token,
    ) -> Result<(), ParseError> {
        while let Some(op) = self.operators.pop() {
            if op.value == StackOp::Paren {
                return Ok(());
            }
            self.reduce(op)?;
        }
        Err(ParseError::syntax("unmatched ')'", token))
    }

    /// Pop operands for one operator and push the combined node
    fn reduce(
        &mut self,
        op: Spanned<StackOp>,
    ) -> Result<(), ParseError> {
        let invalid = || ParseError::Syntax {
            message: "invalid expression state".to_string(),
            position: op.span.start,
        };
        let node = match op.value {
            StackOp::Binary(operator) => {
                let right = self.operands.pop().ok_or_else(invalid)?;
                let left = self.operands.pop().ok_or_else(invalid)?;
                Expr::binary(operator, left, right)
            }
            StackOp::Unary(operator) => {
                let operand = self.operands.pop().ok_or_else(invalid)?;
                Expr::unary(operator, operand)
            }
            StackOp::Paren => {
                return Err(ParseError::Structural {
                    message: "cannot reduce a '(' sentinel".to_string(),
                    position: op.span.start,
                })
            }
        };
        self.operands.push(node);
        Ok(())
    }

    /// Reduce everything left and settle with the single remaining operand
    fn finalize(
        &mut self,
        token: &Token,
    ) -> Result<(), ParseError> {
        while let Some(op) = self.operators.pop() {
            if op.value == StackOp::Paren {
                return Err(ParseError::Syntax {
                    message: "unmatched '('".to_string(),
                    position: op.span.start,
                });
            }
            self.reduce(op)?;
        }
        if self.operands.len() != 1 {
            return Err(ParseError::syntax("invalid expression state", token));
        }
        let result = self.pop_operand(token)?;
        self.machine.finish(result);
        Ok(())
    }

    fn pop_operand(
        &mut self,
        token: &Token,
    ) -> Result<Expr, ParseError> {
        self.operands
            .pop()
            .ok_or_else(|| ParseError::syntax("invalid expression state", token))
    }

    /// `f(a, b, key=value)`; the callee is the operand on top of the stack
    fn parse_call(
        &mut self,
        parser: &mut ParserState<'_>,
    ) -> Result<(), ParseError> {
        let open = parser.advance(); // '('
        let mut args = Vec::new();
        let mut keywords = Vec::new();

        while !parser.check(TokenKind::RParen) {
            if parser.check(TokenKind::Identifier) && parser.peek(1).is_operator("=") {
                let name = parser.advance().text;
                parser.advance(); // '='
                let value = parser.parse_expression()?;
                keywords.push(KeywordArg { name, value });
            } else {
                if !keywords.is_empty() {
                    return Err(parser.error("positional argument follows keyword argument"));
                }
                args.push(parser.parse_expression()?);
            }
            if !parser.eat(TokenKind::Comma) {
                break;
            }
        }
        parser.consume(TokenKind::RParen, "expected ')' after arguments")?;

        let func = self.pop_operand(&open)?;
        self.operands.push(Expr::Call {
            func: Box::new(func),
            args,
            keywords,
        });
        Ok(())
    }
}

/// Comma-separated expressions after an opening bracket, up to `close`
fn parse_sequence(
    parser: &mut ParserState<'_>,
    close: TokenKind,
    message: &str,
) -> Result<Vec<Expr>, ParseError> {
    parser.advance(); // opening bracket
    let mut elements = Vec::new();
    while !parser.check(close) {
        elements.push(parser.parse_expression()?);
        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }
    parser.consume(close, message)?;
    Ok(elements)
}

impl Fsm for ExpressionFsm {
    type State = ExprState;
    type Output = Expr;

    const NAME: &'static str = "ExpressionFSM";

    fn machine(&self) -> &Machine<ExprState, Expr> {
        &self.machine
    }

    fn machine_mut(&mut self) -> &mut Machine<ExprState, Expr> {
        &mut self.machine
    }

    fn handle(
        &mut self,
        state: ExprState,
        parser: &mut ParserState<'_>,
        token: &Token,
    ) -> Result<Advance, ParseError> {
        match state {
            ExprState::Initial | ExprState::ExpectOperand => self.expect_operand(parser, token),
            ExprState::ExpectOperator if self.operands.is_empty() => {
                Err(no_handler::<Self>(state, token))
            }
            ExprState::ExpectOperator => self.expect_operator(parser, token),
        }
    }
}

//! Type annotation machine
//!
//! `Name`, `Name[T, ...]` and right-associative arrow types `A -> B`.

use super::{Advance, Fsm, Machine};
use crate::frontend::lexer::tokens::{Token, TokenKind};
use crate::frontend::parser::ast::TypeExpr;
use crate::frontend::parser::parser_state::{ParseError, ParserState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeState {
    Initial,
    /// After the base name; `[` opens parameters
    AfterName,
    /// A type parameter must follow
    Param,
    /// After a type parameter; `,` or `]`
    AfterParam,
    /// A complete type; `->` continues it
    AfterType,
}

pub struct TypeFsm {
    machine: Machine<TypeState, TypeExpr>,
    base: String,
    params: Vec<TypeExpr>,
    current: Option<TypeExpr>,
}

impl Default for TypeFsm {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeFsm {
    pub fn new() -> Self {
        Self {
            machine: Machine::new(TypeState::Initial),
            base: String::new(),
            params: Vec::new(),
            current: None,
        }
    }

    fn after_type(
        &mut self,
        parser: &mut ParserState<'_>,
        token: &Token,
    ) -> Result<Advance, ParseError> {
        let current = self
            .current
            .take()
            .ok_or_else(|| ParseError::structural("type machine lost its operand", token))?;

        if token.is_operator("->") {
            parser.advance();
            let return_type = parser.parse_type()?;
            self.machine.finish(TypeExpr::FunctionType {
                param_type: Box::new(current),
                return_type: Box::new(return_type),
            });
        } else {
            self.machine.finish(current);
        }
        Ok(Advance::SelfAdvanced)
    }
}

impl Fsm for TypeFsm {
    type State = TypeState;
    type Output = TypeExpr;

    const NAME: &'static str = "TypeFSM";

    fn machine(&self) -> &Machine<TypeState, TypeExpr> {
        &self.machine
    }

    fn machine_mut(&mut self) -> &mut Machine<TypeState, TypeExpr> {
        &mut self.machine
    }

    fn handle(
        &mut self,
        state: TypeState,
        parser: &mut ParserState<'_>,
        token: &Token,
    ) -> Result<Advance, ParseError> {
        match state {
            TypeState::Initial => match token.kind {
                TokenKind::Identifier | TokenKind::KwNone => {
                    self.base = token.text.clone();
                    self.machine.goto(TypeState::AfterName);
                    Ok(Advance::Driver)
                }
                _ => Err(ParseError::syntax(
                    format!("expected a type, found {}", token.describe()),
                    token,
                )),
            },
            TypeState::AfterName => {
                if token.kind == TokenKind::LBracket {
                    self.machine.goto(TypeState::Param);
                    return Ok(Advance::Driver);
                }
                self.current = Some(TypeExpr::simple(std::mem::take(&mut self.base)));
                self.machine.goto(TypeState::AfterType);
                self.after_type(parser, token)
            }
            TypeState::Param => {
                let param = parser.parse_type()?;
                self.params.push(param);
                self.machine.goto(TypeState::AfterParam);
                Ok(Advance::SelfAdvanced)
            }
            TypeState::AfterParam => match token.kind {
                TokenKind::Comma => {
                    self.machine.goto(TypeState::Param);
                    Ok(Advance::Driver)
                }
                TokenKind::RBracket => {
                    self.current = Some(TypeExpr::GenericType {
                        base: std::mem::take(&mut self.base),
                        params: std::mem::take(&mut self.params),
                    });
                    self.machine.goto(TypeState::AfterType);
                    Ok(Advance::Driver)
                }
                _ => Err(ParseError::syntax(
                    format!("expected ',' or ']' in type parameters, found {}", token.describe()),
                    token,
                )),
            },
            TypeState::AfterType => self.after_type(parser, token),
        }
    }
}

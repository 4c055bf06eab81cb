//! Function and class definition machine
//!
//! Drives `def name(params) [-> type]: body` and `class name[(bases)]: body`.
//! A leading `async` is consumed by the caller, which also attaches any
//! decorators to the finished node.
//!
//! Parameter-list rules are enforced as transitions:
//! - at most one `*name` and one `**name`, and `**name` comes last
//! - no default value once `*name` or `**name` has been seen
//! - a `,` is only valid after a complete parameter

use super::{no_handler, Advance, Block, Fsm, Machine};
use crate::frontend::lexer::tokens::{Token, TokenKind};
use crate::frontend::parser::ast::{Expr, Param, Stmt, TypeExpr};
use crate::frontend::parser::parser_state::{ParseError, ParserState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FnState {
    /// Expecting `def` or `class`
    Initial,
    Name,
    /// After a class name: `(` bases or `:`
    ClassHeader,
    /// After a function name: `(`
    OpenParams,
    /// Start of a parameter, or `)`
    ParamStart,
    /// After `*` or `**`
    StarName,
    /// After a parameter name: `:` annotation, `=` default, `,` or `)`
    ParamName,
    /// After an annotation: `=` default, `,` or `)`
    ParamAnnotated,
    /// Parameter complete: `,` or `)`
    ParamEnd,
    /// After `)`: optional `->`
    ReturnArrow,
    /// The `:` opening the body
    ExpectColon,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DefKind {
    Function,
    Class,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamKind {
    Plain,
    VarArg,
    KwArg,
}

/// Parameter being accumulated
#[derive(Debug)]
struct PendingParam {
    kind: ParamKind,
    name: String,
    annotation: Option<TypeExpr>,
    default: Option<Expr>,
}

pub struct FunctionFsm {
    machine: Machine<FnState, Stmt>,
    is_async: bool,
    kind: DefKind,
    name: String,
    params: Vec<Param>,
    pending: Option<PendingParam>,
    seen_vararg: bool,
    seen_kwarg: bool,
    bases: Vec<Expr>,
    return_type: Option<TypeExpr>,
    block: Block,
}

impl FunctionFsm {
    pub fn new(is_async: bool) -> Self {
        Self {
            machine: Machine::new(FnState::Initial),
            is_async,
            kind: DefKind::Function,
            name: String::new(),
            params: Vec::new(),
            pending: None,
            seen_vararg: false,
            seen_kwarg: false,
            bases: Vec::new(),
            return_type: None,
            block: Block::new(),
        }
    }

    fn keyword(&self) -> &'static str {
        match self.kind {
            DefKind::Function => "def",
            DefKind::Class => "class",
        }
    }

    fn start_param(
        &mut self,
        kind: ParamKind,
        token: &Token,
    ) -> Result<(), ParseError> {
        if self.seen_kwarg {
            return Err(ParseError::syntax("parameter follows **kwargs", token));
        }
        match kind {
            ParamKind::VarArg if self.seen_vararg => {
                return Err(ParseError::syntax("duplicate *args parameter", token))
            }
            ParamKind::VarArg => self.seen_vararg = true,
            ParamKind::KwArg => self.seen_kwarg = true,
            ParamKind::Plain => {}
        }
        self.pending = Some(PendingParam {
            kind,
            name: token.text.clone(),
            annotation: None,
            default: None,
        });
        Ok(())
    }

    fn pending_mut(
        &mut self,
        token: &Token,
    ) -> Result<&mut PendingParam, ParseError> {
        self.pending
            .as_mut()
            .ok_or_else(|| ParseError::structural("no parameter is being accumulated", token))
    }

    fn commit_param(
        &mut self,
        token: &Token,
    ) -> Result<(), ParseError> {
        let pending = self
            .pending
            .take()
            .ok_or_else(|| ParseError::syntax("unexpected comma in parameter list", token))?;
        let param = match pending.kind {
            ParamKind::Plain => Param::Parameter {
                name: pending.name,
                annotation: pending.annotation,
                default: pending.default,
            },
            ParamKind::VarArg => Param::VarArg {
                name: pending.name,
                annotation: pending.annotation,
            },
            ParamKind::KwArg => Param::KwArg {
                name: pending.name,
                annotation: pending.annotation,
            },
        };
        self.params.push(param);
        Ok(())
    }

    fn param_annotated(
        &mut self,
        parser: &mut ParserState<'_>,
        token: &Token,
    ) -> Result<Advance, ParseError> {
        if !token.is_operator("=") {
            return self.param_end(token);
        }
        let starred = self.pending_mut(token)?.kind != ParamKind::Plain;
        if starred || self.seen_vararg || self.seen_kwarg {
            return Err(ParseError::syntax(
                "default argument follows *args/**kwargs",
                token,
            ));
        }
        parser.advance(); // '='
        let default = parser.parse_expression()?;
        self.pending_mut(token)?.default = Some(default);
        self.machine.goto(FnState::ParamEnd);
        Ok(Advance::SelfAdvanced)
    }

    fn param_end(
        &mut self,
        token: &Token,
    ) -> Result<Advance, ParseError> {
        match token.kind {
            TokenKind::Comma => {
                self.commit_param(token)?;
                self.machine.goto(FnState::ParamStart);
                Ok(Advance::Driver)
            }
            TokenKind::RParen => {
                self.commit_param(token)?;
                self.machine.goto(FnState::ReturnArrow);
                Ok(Advance::Driver)
            }
            _ => Err(ParseError::syntax(
                format!("expected ',' or ')' in parameter list, found {}", token.describe()),
                token,
            )),
        }
    }

    fn expect_colon(
        &mut self,
        token: &Token,
    ) -> Result<Advance, ParseError> {
        if token.kind != TokenKind::Colon {
            return Err(ParseError::syntax(
                format!(
                    "expected ':' before {} body, found {}",
                    self.keyword(),
                    token.describe()
                ),
                token,
            ));
        }
        self.machine.goto(FnState::Body);
        Ok(Advance::Driver)
    }

    fn build(&mut self) -> Stmt {
        let body = self.block.take_body();
        let name = std::mem::take(&mut self.name);
        match self.kind {
            DefKind::Function => Stmt::FunctionDefinition {
                name,
                params: std::mem::take(&mut self.params),
                return_type: self.return_type.take(),
                body,
                is_async: self.is_async,
                decorators: Vec::new(),
            },
            DefKind::Class => Stmt::ClassDefinition {
                name,
                bases: std::mem::take(&mut self.bases),
                body,
                decorators: Vec::new(),
            },
        }
    }
}

impl Fsm for FunctionFsm {
    type State = FnState;
    type Output = Stmt;

    const NAME: &'static str = "FunctionFSM";

    fn machine(&self) -> &Machine<FnState, Stmt> {
        &self.machine
    }

    fn machine_mut(&mut self) -> &mut Machine<FnState, Stmt> {
        &mut self.machine
    }

    fn handle(
        &mut self,
        state: FnState,
        parser: &mut ParserState<'_>,
        token: &Token,
    ) -> Result<Advance, ParseError> {
        match state {
            FnState::Initial => {
                match token.kind {
                    TokenKind::KwDef => self.kind = DefKind::Function,
                    TokenKind::KwClass if !self.is_async => self.kind = DefKind::Class,
                    _ => return Err(no_handler::<Self>(state, token)),
                }
                self.machine.goto(FnState::Name);
                Ok(Advance::Driver)
            }
            FnState::Name => {
                if token.kind != TokenKind::Identifier {
                    return Err(ParseError::syntax(
                        format!(
                            "expected a name after '{}', found {}",
                            self.keyword(),
                            token.describe()
                        ),
                        token,
                    ));
                }
                self.name = token.text.clone();
                self.machine.goto(match self.kind {
                    DefKind::Function => FnState::OpenParams,
                    DefKind::Class => FnState::ClassHeader,
                });
                Ok(Advance::Driver)
            }
            FnState::ClassHeader => {
                if token.kind != TokenKind::LParen {
                    return self.expect_colon(token);
                }
                parser.advance(); // '('
                while !parser.check(TokenKind::RParen) {
                    self.bases.push(parser.parse_expression()?);
                    if !parser.eat(TokenKind::Comma) {
                        break;
                    }
                }
                parser.consume(TokenKind::RParen, "expected ')' after base classes")?;
                self.machine.goto(FnState::ExpectColon);
                Ok(Advance::SelfAdvanced)
            }
            FnState::OpenParams => {
                if token.kind != TokenKind::LParen {
                    return Err(ParseError::syntax(
                        format!("expected '(' after function name, found {}", token.describe()),
                        token,
                    ));
                }
                self.machine.goto(FnState::ParamStart);
                Ok(Advance::Driver)
            }
            FnState::ParamStart => match token.kind {
                TokenKind::RParen => {
                    self.machine.goto(FnState::ReturnArrow);
                    Ok(Advance::Driver)
                }
                TokenKind::Identifier => {
                    self.start_param(ParamKind::Plain, token)?;
                    self.machine.goto(FnState::ParamName);
                    Ok(Advance::Driver)
                }
                TokenKind::Operator if token.text == "*" || token.text == "**" => {
                    let kind = if token.text == "*" {
                        ParamKind::VarArg
                    } else {
                        ParamKind::KwArg
                    };
                    if kind == ParamKind::KwArg && self.seen_kwarg {
                        return Err(ParseError::syntax("duplicate **kwargs parameter", token));
                    }
                    self.start_param(kind, token)?;
                    self.machine.goto(FnState::StarName);
                    Ok(Advance::Driver)
                }
                TokenKind::Comma => Err(ParseError::syntax(
                    "unexpected comma in parameter list",
                    token,
                )),
                _ => Err(ParseError::syntax(
                    format!("expected a parameter name, found {}", token.describe()),
                    token,
                )),
            },
            FnState::StarName => {
                if token.kind != TokenKind::Identifier {
                    return Err(ParseError::syntax(
                        format!("expected a name after '*', found {}", token.describe()),
                        token,
                    ));
                }
                self.pending_mut(token)?.name = token.text.clone();
                self.machine.goto(FnState::ParamName);
                Ok(Advance::Driver)
            }
            FnState::ParamName => {
                if token.kind != TokenKind::Colon {
                    return self.param_annotated(parser, token);
                }
                parser.advance(); // ':'
                let annotation = parser.parse_type()?;
                self.pending_mut(token)?.annotation = Some(annotation);
                self.machine.goto(FnState::ParamAnnotated);
                Ok(Advance::SelfAdvanced)
            }
            FnState::ParamAnnotated => self.param_annotated(parser, token),
            FnState::ParamEnd => self.param_end(token),
            FnState::ReturnArrow => {
                if !token.is_operator("->") {
                    return self.expect_colon(token);
                }
                parser.advance(); // '->'
                self.return_type = Some(parser.parse_type()?);
                self.machine.goto(FnState::ExpectColon);
                Ok(Advance::SelfAdvanced)
            }
            FnState::ExpectColon => self.expect_colon(token),
            FnState::Body => {
                let advance = self.block.step(parser, token)?;
                if self.block.is_closed() {
                    let stmt = self.build();
                    self.machine.finish(stmt);
                }
                Ok(advance)
            }
        }
    }
}

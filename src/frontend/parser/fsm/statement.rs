//! Compound statement machine
//!
//! One machine covers `if`/`while`/`for`, `try`/`except`/`finally`, `with`
//! and `match`/`case`; the construct is picked in `Initial` from the
//! keyword. After a clause body closes, the machine moves to an
//! `AfterBlock` state and decides from the next token, without consuming
//! it, whether another clause (`elif`, `else`, `except`, `finally`) follows.

use super::{no_handler, Advance, Block, Fsm, Machine};
use crate::frontend::lexer::tokens::{Token, TokenKind};
use crate::frontend::parser::ast::{ExceptHandler, Expr, MatchCase, Stmt, WithItem};
use crate::frontend::parser::parser_state::{ParseError, ParserState};

/// Which clause of the construct a body belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
    Main,
    Else,
    Handler,
    Finally,
    Case,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StmtState {
    /// Expecting the construct keyword
    Initial,
    /// `if`/`elif`/`while` condition
    Condition,
    /// `for` loop variable
    ForTarget,
    /// `in` of a `for` header
    ForIn,
    /// `for` iterable
    Iterable,
    /// A `with` item expression
    WithItem,
    /// After a `with` item: `as`, `,` or `:`
    AfterWithItem,
    /// `match` subject
    Subject,
    /// After `match subject:`, waiting for the indented case block
    MatchOpen,
    /// Expecting `case` or the `DEDENT` closing the match block
    CaseClause,
    /// After a case pattern: `if` guard or `:`
    CaseGuard,
    /// After `except`: a type, or `:`
    ExceptClause,
    /// After an exception type: `as` or `:`
    ExceptAfterType,
    /// The `:` opening a clause body
    Colon(Clause),
    /// Feeding a clause body
    Body(Clause),
    /// A clause body closed; look at the next token
    AfterBlock(Clause),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Construct {
    If,
    While,
    For,
    Try,
    With,
    Match,
}

impl Construct {
    fn keyword(self) -> &'static str {
        match self {
            Construct::If => "if",
            Construct::While => "while",
            Construct::For => "for",
            Construct::Try => "try",
            Construct::With => "with",
            Construct::Match => "match",
        }
    }
}

pub struct StatementFsm {
    machine: Machine<StmtState, Stmt>,
    construct: Construct,
    condition: Option<Expr>,
    target: String,
    iterable: Option<Expr>,
    items: Vec<WithItem>,
    subject: Option<Expr>,
    block: Block,
    body: Vec<Stmt>,
    else_body: Option<Vec<Stmt>>,
    handlers: Vec<ExceptHandler>,
    handler: Option<(Option<Expr>, Option<String>)>,
    finalbody: Option<Vec<Stmt>>,
    cases: Vec<MatchCase>,
    case: Option<(Expr, Option<Expr>)>,
}

impl Default for StatementFsm {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementFsm {
    pub fn new() -> Self {
        Self {
            machine: Machine::new(StmtState::Initial),
            construct: Construct::If,
            condition: None,
            target: String::new(),
            iterable: None,
            items: Vec::new(),
            subject: None,
            block: Block::new(),
            body: Vec::new(),
            else_body: None,
            handlers: Vec::new(),
            handler: None,
            finalbody: None,
            cases: Vec::new(),
            case: None,
        }
    }

    fn clause_keyword(
        &self,
        clause: Clause,
    ) -> &'static str {
        match clause {
            Clause::Main => self.construct.keyword(),
            Clause::Else => "else",
            Clause::Handler => "except",
            Clause::Finally => "finally",
            Clause::Case => "case",
        }
    }

    fn initial(
        &mut self,
        token: &Token,
    ) -> Result<Advance, ParseError> {
        let (construct, next) = match token.kind {
            TokenKind::KwIf | TokenKind::KwElif => (Construct::If, StmtState::Condition),
            TokenKind::KwWhile => (Construct::While, StmtState::Condition),
            TokenKind::KwFor => (Construct::For, StmtState::ForTarget),
            TokenKind::KwTry => (Construct::Try, StmtState::Colon(Clause::Main)),
            TokenKind::KwWith => (Construct::With, StmtState::WithItem),
            TokenKind::KwMatch => (Construct::Match, StmtState::Subject),
            _ => return Err(no_handler::<Self>(StmtState::Initial, token)),
        };
        self.construct = construct;
        self.machine.goto(next);
        Ok(Advance::Driver)
    }

    fn expect_colon(
        &mut self,
        clause: Clause,
        token: &Token,
    ) -> Result<Advance, ParseError> {
        if token.kind != TokenKind::Colon {
            return Err(ParseError::syntax(
                format!(
                    "expected ':' after '{}' header, found {}",
                    self.clause_keyword(clause),
                    token.describe()
                ),
                token,
            ));
        }
        if self.construct == Construct::Match && clause == Clause::Main {
            self.machine.goto(StmtState::MatchOpen);
        } else {
            self.block = Block::new();
            self.machine.goto(StmtState::Body(clause));
        }
        Ok(Advance::Driver)
    }

    fn body(
        &mut self,
        clause: Clause,
        parser: &mut ParserState<'_>,
        token: &Token,
    ) -> Result<Advance, ParseError> {
        let advance = self.block.step(parser, token)?;
        if !self.block.is_closed() {
            return Ok(advance);
        }

        let body = self.block.take_body();
        match clause {
            Clause::Main => {
                self.body = body;
                if self.construct == Construct::With {
                    self.complete(token)?;
                } else {
                    self.machine.goto(StmtState::AfterBlock(Clause::Main));
                }
            }
            Clause::Else => {
                self.else_body = Some(body);
                self.complete(token)?;
            }
            Clause::Handler => {
                let (exception, alias) = self.handler.take().unwrap_or((None, None));
                self.handlers.push(ExceptHandler {
                    exception,
                    alias,
                    body,
                });
                self.machine.goto(StmtState::AfterBlock(Clause::Handler));
            }
            Clause::Finally => {
                self.finalbody = Some(body);
                self.complete(token)?;
            }
            Clause::Case => {
                let (pattern, guard) = self
                    .case
                    .take()
                    .ok_or_else(|| ParseError::structural("case body without a pattern", token))?;
                self.cases.push(MatchCase {
                    pattern,
                    guard,
                    body,
                });
                self.machine.goto(StmtState::CaseClause);
            }
        }
        Ok(advance)
    }

    /// One-token lookahead after a clause body
    fn after_block(
        &mut self,
        clause: Clause,
        parser: &mut ParserState<'_>,
        token: &Token,
    ) -> Result<Advance, ParseError> {
        if token.kind == TokenKind::Newline {
            return Ok(Advance::Driver);
        }

        match (self.construct, token.kind) {
            (Construct::If | Construct::While | Construct::For, TokenKind::KwElse) => {
                self.machine.goto(StmtState::Colon(Clause::Else));
                Ok(Advance::Driver)
            }
            // `elif` becomes a nested if statement, the only element of `else_body`
            (Construct::If, TokenKind::KwElif) => {
                let nested = parser.parse_compound()?;
                self.else_body = Some(vec![nested]);
                self.complete(token)?;
                Ok(Advance::SelfAdvanced)
            }
            (Construct::Try, TokenKind::KwExcept) => {
                self.machine.goto(StmtState::ExceptClause);
                Ok(Advance::Driver)
            }
            (Construct::Try, TokenKind::KwFinally) => {
                self.machine.goto(StmtState::Colon(Clause::Finally));
                Ok(Advance::Driver)
            }
            (Construct::Try, _) if clause == Clause::Main => Err(ParseError::syntax(
                format!(
                    "expected 'except' or 'finally' after try block, found {}",
                    token.describe()
                ),
                token,
            )),
            _ => {
                self.complete(token)?;
                Ok(Advance::SelfAdvanced)
            }
        }
    }

    /// Settle with the finished node; the current token is left in place
    fn complete(
        &mut self,
        token: &Token,
    ) -> Result<(), ParseError> {
        let keyword = self.construct.keyword();
        let missing = |what: &str| {
            ParseError::structural(
                format!("{} statement finished without {}", keyword, what),
                token,
            )
        };
        let body = std::mem::take(&mut self.body);
        let else_body = self.else_body.take();

        let stmt = match self.construct {
            Construct::If => Stmt::If {
                condition: self.condition.take().ok_or_else(|| missing("a condition"))?,
                body,
                else_body,
            },
            Construct::While => Stmt::While {
                condition: self.condition.take().ok_or_else(|| missing("a condition"))?,
                body,
                else_body,
            },
            Construct::For => Stmt::For {
                target: std::mem::take(&mut self.target),
                iterable: self.iterable.take().ok_or_else(|| missing("an iterable"))?,
                body,
                else_body,
            },
            Construct::Try => Stmt::Try {
                body,
                handlers: std::mem::take(&mut self.handlers),
                finalbody: self.finalbody.take(),
            },
            Construct::With => Stmt::With {
                items: std::mem::take(&mut self.items),
                body,
            },
            Construct::Match => Stmt::Match {
                subject: self.subject.take().ok_or_else(|| missing("a subject"))?,
                cases: std::mem::take(&mut self.cases),
            },
        };
        self.machine.finish(stmt);
        Ok(())
    }
}

impl Fsm for StatementFsm {
    type State = StmtState;
    type Output = Stmt;

    const NAME: &'static str = "StatementFSM";

    fn machine(&self) -> &Machine<StmtState, Stmt> {
        &self.machine
    }

    fn machine_mut(&mut self) -> &mut Machine<StmtState, Stmt> {
        &mut self.machine
    }

    fn handle(
        &mut self,
        state: StmtState,
        parser: &mut ParserState<'_>,
        token: &Token,
    ) -> Result<Advance, ParseError> {
        match state {
            StmtState::Initial => self.initial(token),
            StmtState::Condition => {
                self.condition = Some(parser.parse_expression()?);
                self.machine.goto(StmtState::Colon(Clause::Main));
                Ok(Advance::SelfAdvanced)
            }
            StmtState::ForTarget => {
                if token.kind != TokenKind::Identifier {
                    return Err(ParseError::syntax(
                        format!("expected a loop variable after 'for', found {}", token.describe()),
                        token,
                    ));
                }
                self.target = token.text.clone();
                self.machine.goto(StmtState::ForIn);
                Ok(Advance::Driver)
            }
            StmtState::ForIn => {
                if token.kind != TokenKind::KwIn {
                    return Err(ParseError::syntax(
                        format!("expected 'in' after loop variable, found {}", token.describe()),
                        token,
                    ));
                }
                self.machine.goto(StmtState::Iterable);
                Ok(Advance::Driver)
            }
            StmtState::Iterable => {
                self.iterable = Some(parser.parse_expression()?);
                self.machine.goto(StmtState::Colon(Clause::Main));
                Ok(Advance::SelfAdvanced)
            }
            StmtState::WithItem => {
                let context = parser.parse_expression()?;
                self.items.push(WithItem {
                    context,
                    alias: None,
                });
                self.machine.goto(StmtState::AfterWithItem);
                Ok(Advance::SelfAdvanced)
            }
            StmtState::AfterWithItem => match token.kind {
                TokenKind::KwAs if self.items.last().is_some_and(|i| i.alias.is_none()) => {
                    parser.advance(); // 'as'
                    let alias = parser.consume_identifier("expected a name after 'as'")?;
                    if let Some(item) = self.items.last_mut() {
                        item.alias = Some(alias);
                    }
                    Ok(Advance::SelfAdvanced)
                }
                TokenKind::Comma => {
                    self.machine.goto(StmtState::WithItem);
                    Ok(Advance::Driver)
                }
                TokenKind::Colon => self.expect_colon(Clause::Main, token),
                _ => Err(ParseError::syntax(
                    format!("expected ',' or ':' after with item, found {}", token.describe()),
                    token,
                )),
            },
            StmtState::Subject => {
                self.subject = Some(parser.parse_expression()?);
                self.machine.goto(StmtState::Colon(Clause::Main));
                Ok(Advance::SelfAdvanced)
            }
            StmtState::MatchOpen => match token.kind {
                TokenKind::Newline => Ok(Advance::Driver),
                TokenKind::Indent => {
                    self.machine.goto(StmtState::CaseClause);
                    Ok(Advance::Driver)
                }
                _ => Err(ParseError::syntax(
                    format!("expected an indented block of 'case' clauses, found {}", token.describe()),
                    token,
                )),
            },
            StmtState::CaseClause => match token.kind {
                TokenKind::Newline => Ok(Advance::Driver),
                TokenKind::KwCase => {
                    parser.advance(); // 'case'
                    let pattern = parser.parse_expression()?;
                    self.case = Some((pattern, None));
                    self.machine.goto(StmtState::CaseGuard);
                    Ok(Advance::SelfAdvanced)
                }
                TokenKind::Dedent if !self.cases.is_empty() => {
                    parser.advance();
                    self.complete(token)?;
                    Ok(Advance::SelfAdvanced)
                }
                _ => Err(ParseError::syntax(
                    format!("expected 'case' in match block, found {}", token.describe()),
                    token,
                )),
            },
            StmtState::CaseGuard => {
                if token.kind != TokenKind::KwIf {
                    return self.expect_colon(Clause::Case, token);
                }
                parser.advance(); // 'if'
                let guard = parser.parse_expression()?;
                if let Some((_, slot)) = self.case.as_mut() {
                    *slot = Some(guard);
                }
                self.machine.goto(StmtState::Colon(Clause::Case));
                Ok(Advance::SelfAdvanced)
            }
            StmtState::ExceptClause => {
                if token.kind == TokenKind::Colon {
                    self.handler = Some((None, None));
                    return self.expect_colon(Clause::Handler, token);
                }
                let exception = parser.parse_expression()?;
                self.handler = Some((Some(exception), None));
                self.machine.goto(StmtState::ExceptAfterType);
                Ok(Advance::SelfAdvanced)
            }
            StmtState::ExceptAfterType => {
                if token.kind != TokenKind::KwAs {
                    return self.expect_colon(Clause::Handler, token);
                }
                parser.advance(); // 'as'
                let alias = parser.consume_identifier("expected a name after 'as'")?;
                if let Some((_, slot)) = self.handler.as_mut() {
                    *slot = Some(alias);
                }
                self.machine.goto(StmtState::Colon(Clause::Handler));
                Ok(Advance::SelfAdvanced)
            }
            StmtState::Colon(clause) => self.expect_colon(clause, token),
            StmtState::Body(clause) => self.body(clause, parser, token),
            StmtState::AfterBlock(clause) => self.after_block(clause, parser, token),
        }
    }
}

//! Parsing state machines
//!
//! Every construct is parsed by a fresh machine implementing [`Fsm`]. A
//! machine holds a [`Machine`] (current state plus error and result slots)
//! and one handler per state. The shared [`Fsm::run`] loop peeks a token,
//! transitions, and advances past the token unless the machine settled or
//! the handler reported [`Advance::SelfAdvanced`].
//!
//! Machines are heap-allocated through [`boxed`] and driven by value.
//!
//! Handlers that delegate to the driver (sub-expressions, nested statements,
//! annotations) consume a variable number of tokens and therefore always
//! report `SelfAdvanced`.

pub mod expression;
pub mod function;
pub mod statement;
pub mod types;

pub use expression::{ExprState, ExpressionFsm};
pub use function::{FnState, FunctionFsm};
pub use statement::{StatementFsm, StmtState};
pub use types::{TypeFsm, TypeState};

use crate::frontend::lexer::tokens::{Token, TokenKind};
use crate::frontend::parser::ast::Stmt;
use crate::frontend::parser::parser_state::{ParseError, ParserState};
use std::fmt;

/// Who moves the cursor after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The run loop consumes the token that was just handled
    Driver,
    /// The handler already moved the cursor itself
    SelfAdvanced,
}

/// State plus the mutually exclusive outcome slots of a machine.
///
/// Once an error or a result is recorded the machine is settled and every
/// further update is ignored.
#[derive(Debug)]
pub struct Machine<S, T> {
    state: S,
    error: Option<ParseError>,
    result: Option<T>,
}

impl<S: Copy + PartialEq, T> Machine<S, T> {
    pub fn new(initial: S) -> Self {
        Self {
            state: initial,
            error: None,
            result: None,
        }
    }

    pub fn state(&self) -> S {
        self.state
    }

    pub fn is_settled(&self) -> bool {
        self.error.is_some() || self.result.is_some()
    }

    pub fn goto(
        &mut self,
        state: S,
    ) {
        if !self.is_settled() {
            self.state = state;
        }
    }

    pub fn finish(
        &mut self,
        value: T,
    ) {
        if !self.is_settled() {
            self.result = Some(value);
        }
    }

    pub fn fail(
        &mut self,
        error: ParseError,
    ) {
        if !self.is_settled() {
            self.error = Some(error);
        }
    }

    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    /// Take the outcome once the machine has settled
    pub fn take_outcome(&mut self) -> Option<Result<T, ParseError>> {
        if let Some(error) = self.error.take() {
            return Some(Err(error));
        }
        self.result.take().map(Ok)
    }
}

/// A parsing state machine for one construct
pub trait Fsm: Sized {
    type State: Copy + PartialEq + fmt::Debug;
    type Output;

    /// Name used in traces and structural errors
    const NAME: &'static str;

    fn machine(&self) -> &Machine<Self::State, Self::Output>;

    fn machine_mut(&mut self) -> &mut Machine<Self::State, Self::Output>;

    /// Handler for `state`, given the token under the cursor
    fn handle(
        &mut self,
        state: Self::State,
        parser: &mut ParserState<'_>,
        token: &Token,
    ) -> Result<Advance, ParseError>;

    /// Feed one token to the handler of the current state.
    ///
    /// A settled machine ignores the token. A handler error is recorded in
    /// the error slot.
    fn transition(
        &mut self,
        parser: &mut ParserState<'_>,
        token: &Token,
    ) -> Advance {
        if self.machine().is_settled() {
            return Advance::SelfAdvanced;
        }
        let state = self.machine().state();
        tracing::trace!(fsm = Self::NAME, state = ?state, token = %token.describe(), "transition");
        match self.handle(state, parser, token) {
            Ok(advance) => advance,
            Err(error) => {
                self.machine_mut().fail(error);
                Advance::SelfAdvanced
            }
        }
    }

    /// Drive the machine until it settles
    fn run(
        mut self: Box<Self>,
        parser: &mut ParserState<'_>,
    ) -> Result<Self::Output, ParseError> {
        loop {
            let token = parser.current().clone();
            let index = parser.index();
            let state = self.machine().state();

            let advance = self.transition(parser, &token);
            if let Some(outcome) = self.machine_mut().take_outcome() {
                return outcome;
            }

            match advance {
                Advance::Driver => {
                    if token.kind == TokenKind::Eof {
                        return Err(ParseError::syntax("unexpected end of input", &token));
                    }
                    parser.advance();
                }
                Advance::SelfAdvanced => {
                    if parser.index() == index && self.machine().state() == state {
                        return Err(ParseError::structural(
                            format!("{} made no progress in state {:?}", Self::NAME, state),
                            &token,
                        ));
                    }
                }
            }
        }
    }
}

/// Allocate a fresh machine on the heap.
///
/// Nested constructs recurse through [`Fsm::run`], so each nesting level
/// keeps only a pointer to its machine on the stack.
#[inline(never)]
pub fn boxed<F: Fsm>(make: impl FnOnce() -> F) -> Box<F> {
    Box::new(make())
}

/// Structural error for a token a state has no transition for
pub fn no_handler<F: Fsm>(
    state: F::State,
    token: &Token,
) -> ParseError {
    ParseError::structural(
        format!("{} has no handler for {} in state {:?}", F::NAME, token.describe(), state),
        token,
    )
}

/// Where an indented block stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockPhase {
    /// Just after the `:` of a header
    #[default]
    AfterColon,
    /// The header line ended; an `INDENT` must follow
    AfterNewline,
    /// Inside the block, collecting statements
    Open,
    /// The closing `DEDENT` (or end of a one-line suite) was consumed
    Closed,
}

/// Body of a compound statement, fed one token at a time by its owner
#[derive(Debug, Default)]
pub struct Block {
    phase: BlockPhase,
    body: Vec<Stmt>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> BlockPhase {
        self.phase
    }

    pub fn is_closed(&self) -> bool {
        self.phase == BlockPhase::Closed
    }

    /// Take the collected statements, leaving a fresh block behind
    pub fn take_body(&mut self) -> Vec<Stmt> {
        std::mem::take(self).body
    }

    pub fn step(
        &mut self,
        parser: &mut ParserState<'_>,
        token: &Token,
    ) -> Result<Advance, ParseError> {
        match (self.phase, token.kind) {
            (BlockPhase::AfterColon, TokenKind::Newline) => {
                self.phase = BlockPhase::AfterNewline;
                Ok(Advance::Driver)
            }
            (BlockPhase::AfterColon | BlockPhase::AfterNewline, TokenKind::Indent) => {
                self.phase = BlockPhase::Open;
                Ok(Advance::Driver)
            }
            (BlockPhase::AfterNewline, TokenKind::Newline) => Ok(Advance::Driver),
            (BlockPhase::AfterColon, TokenKind::Dedent | TokenKind::Eof)
            | (BlockPhase::AfterNewline, _) => {
                Err(ParseError::syntax("expected an indented block", token))
            }
            // One-line suite: `if x: pass`
            (BlockPhase::AfterColon, _) => {
                self.body = parser.parse_inline_suite()?;
                self.phase = BlockPhase::Closed;
                Ok(Advance::SelfAdvanced)
            }
            (BlockPhase::Open, TokenKind::Newline | TokenKind::Semicolon) => Ok(Advance::Driver),
            (BlockPhase::Open, TokenKind::Dedent) => {
                parser.advance();
                self.phase = BlockPhase::Closed;
                Ok(Advance::SelfAdvanced)
            }
            (BlockPhase::Open, TokenKind::Eof) => {
                Err(ParseError::syntax("unexpected end of input inside block", token))
            }
            (BlockPhase::Open, _) => {
                let stmt = parser.parse_statement()?;
                self.body.push(stmt);
                Ok(Advance::SelfAdvanced)
            }
            (BlockPhase::Closed, _) => Err(ParseError::structural(
                "block received a token after it was closed",
                token,
            )),
        }
    }
}

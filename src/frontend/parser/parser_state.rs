//! Parser state, cursor primitives and statement dispatch
//!
//! `ParserState` owns the cursor for one parse. Compound constructs are
//! handed to the state machines in [`super::fsm`], which call back into
//! the dispatch here for every nested statement, expression and type.

use crate::frontend::lexer::symbols::compound_assignment_base;
use crate::frontend::lexer::tokens::*;
use crate::frontend::parser::ast::*;
use crate::frontend::parser::fsm::{boxed, ExpressionFsm, Fsm, FunctionFsm, StatementFsm, TypeFsm};
use crate::util::config::{FrontendConfig, DEFAULT_MAX_NESTING_DEPTH};
use crate::util::span::{Position, Span};

/// Parse error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The input does not match what the active construct expects
    #[error("SyntaxError: {message} at {position}")]
    Syntax { message: String, position: Position },
    /// A state machine reached a state it has no handler for
    #[error("StructuralError: {message} at {position}")]
    Structural { message: String, position: Position },
}

impl ParseError {
    /// Syntax error located at the start of `token`
    pub fn syntax(
        message: impl Into<String>,
        token: &Token,
    ) -> Self {
        ParseError::Syntax {
            message: message.into(),
            position: token.span.start,
        }
    }

    pub fn structural(
        message: impl Into<String>,
        token: &Token,
    ) -> Self {
        ParseError::Structural {
            message: message.into(),
            position: token.span.start,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            ParseError::Syntax { position, .. } | ParseError::Structural { position, .. } => {
                *position
            }
        }
    }

    pub fn line(&self) -> usize {
        self.position().line
    }

    pub fn column(&self) -> usize {
        self.position().column
    }

    pub fn message(&self) -> &str {
        match self {
            ParseError::Syntax { message, .. } | ParseError::Structural { message, .. } => message,
        }
    }

    pub fn is_structural(&self) -> bool {
        matches!(self, ParseError::Structural { .. })
    }
}

/// Parser state: the token cursor plus recursion bookkeeping
pub struct ParserState<'a> {
    tokens: &'a [Token],
    pos: usize,
    /// Returned by `peek` past the end of the buffer
    eof: Token,
    depth: usize,
    max_depth: usize,
}

impl<'a> ParserState<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self::with_max_depth(tokens, DEFAULT_MAX_NESTING_DEPTH)
    }

    pub fn with_config(
        tokens: &'a [Token],
        config: &FrontendConfig,
    ) -> Self {
        Self::with_max_depth(tokens, config.max_nesting_depth)
    }

    fn with_max_depth(
        tokens: &'a [Token],
        max_depth: usize,
    ) -> Self {
        let end = tokens
            .last()
            .map(|t| t.span.end)
            .unwrap_or(Position::new(1, 1, 0));
        Self {
            tokens,
            pos: 0,
            eof: Token::new(TokenKind::Eof, "", Span::point(end)),
            depth: 0,
            max_depth,
        }
    }

    // =========================================================================
    // Cursor primitives
    // =========================================================================

    /// Token `offset` places ahead of the cursor; a synthetic `EOF` past the end
    pub fn peek(
        &self,
        offset: usize,
    ) -> &Token {
        self.tokens.get(self.pos + offset).unwrap_or(&self.eof)
    }

    pub fn current(&self) -> &Token {
        self.peek(0)
    }

    /// The most recently consumed token
    pub fn previous(&self) -> Option<&Token> {
        self.pos.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    /// Consume the current token. Past the end this is a no-op returning `EOF`.
    pub fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    pub fn check(
        &self,
        kind: TokenKind,
    ) -> bool {
        self.current().kind == kind
    }

    pub fn check_operator(
        &self,
        symbol: &str,
    ) -> bool {
        self.current().is_operator(symbol)
    }

    /// Consume the current token if it has the given kind
    pub fn eat(
        &mut self,
        kind: TokenKind,
    ) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or fail with `message`
    pub fn consume(
        &mut self,
        kind: TokenKind,
        message: &str,
    ) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(message))
        }
    }

    /// Consume an identifier and return its name
    pub fn consume_identifier(
        &mut self,
        message: &str,
    ) -> Result<String, ParseError> {
        self.consume(TokenKind::Identifier, message).map(|t| t.text)
    }

    /// Cursor index, for progress checks
    pub fn index(&self) -> usize {
        self.pos
    }

    pub fn at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    pub fn skip_newlines(&mut self) {
        while self.eat(TokenKind::Newline) {}
    }

    /// Syntax error at the current token
    pub fn error(
        &self,
        message: &str,
    ) -> ParseError {
        let token = self.current();
        ParseError::syntax(format!("{}, found {}", message, token.describe()), token)
    }

    /// Fail unless only layout tokens remain
    pub fn expect_end(&mut self) -> Result<(), ParseError> {
        self.skip_newlines();
        if self.at_end() {
            Ok(())
        } else {
            Err(self.error("expected end of input"))
        }
    }

    /// Run `f` one nesting level deeper
    pub fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::syntax(
                "maximum nesting depth exceeded",
                self.current(),
            ));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // =========================================================================
    // Entry points used by the state machines
    // =========================================================================

    /// Parse a whole token stream into a program
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut body = Vec::new();
        loop {
            match self.current().kind {
                TokenKind::Newline | TokenKind::Semicolon => {
                    self.advance();
                }
                TokenKind::Eof => break,
                _ => body.push(self.parse_statement()?),
            }
        }
        Ok(Program { body })
    }

    /// Parse one statement of any kind
    pub fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        self.nested(Self::dispatch_statement)
    }

    /// Parse one expression with a fresh expression machine
    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.nested(|state| boxed(ExpressionFsm::new).run(state))
    }

    /// Parse one type annotation with a fresh type machine
    pub fn parse_type(&mut self) -> Result<TypeExpr, ParseError> {
        self.nested(|state| boxed(TypeFsm::new).run(state))
    }

    /// Parse an `if`/`elif` chain link, a loop or another compound statement
    pub fn parse_compound(&mut self) -> Result<Stmt, ParseError> {
        self.nested(|state| boxed(StatementFsm::new).run(state))
    }

    /// Parse the statements of a one-line suite (`if x: a; b`)
    pub fn parse_inline_suite(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut body = vec![self.parse_statement()?];
        while self.previous().is_some_and(|t| t.kind == TokenKind::Semicolon)
            && !matches!(
                self.current().kind,
                TokenKind::Newline | TokenKind::Dedent | TokenKind::Eof
            )
        {
            body.push(self.parse_statement()?);
        }
        Ok(body)
    }

    // =========================================================================
    // Statement dispatch
    // =========================================================================

    fn dispatch_statement(&mut self) -> Result<Stmt, ParseError> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::Operator if token.text == "@" => self.parse_decorated(),
            TokenKind::KwAsync => {
                self.advance();
                if !self.check(TokenKind::KwDef) {
                    return Err(self.error("expected 'def' after 'async'"));
                }
                boxed(|| FunctionFsm::new(true)).run(self)
            }
            TokenKind::KwDef | TokenKind::KwClass => boxed(|| FunctionFsm::new(false)).run(self),
            TokenKind::KwIf
            | TokenKind::KwWhile
            | TokenKind::KwFor
            | TokenKind::KwTry
            | TokenKind::KwWith
            | TokenKind::KwMatch => boxed(StatementFsm::new).run(self),
            TokenKind::KwReturn => self.parse_return(),
            TokenKind::KwPass => self.parse_keyword_statement(Stmt::Pass),
            TokenKind::KwBreak => self.parse_keyword_statement(Stmt::Break),
            TokenKind::KwContinue => self.parse_keyword_statement(Stmt::Continue),
            TokenKind::KwImport => self.parse_import(),
            TokenKind::KwFrom => self.parse_import_from(),
            TokenKind::Indent => Err(ParseError::syntax("unexpected indent", &token)),
            _ => self.parse_expression_statement(),
        }
    }

    /// `@expr NEWLINE` followed by a definition or another decorator
    fn parse_decorated(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // '@'
        let decorator = self.parse_expression()?;
        self.consume(TokenKind::Newline, "expected newline after decorator")?;
        self.skip_newlines();

        let target = self.current();
        let decoratable = target.is_operator("@")
            || matches!(
                target.kind,
                TokenKind::KwDef | TokenKind::KwClass | TokenKind::KwAsync
            );
        if !decoratable {
            return Err(self.error("expected a function or class definition after decorator"));
        }

        let mut stmt = self.parse_statement()?;
        if let Some(decorators) = stmt.decorators_mut() {
            decorators.insert(0, decorator);
        }
        Ok(stmt)
    }

    fn parse_keyword_statement(
        &mut self,
        stmt: Stmt,
    ) -> Result<Stmt, ParseError> {
        self.advance();
        self.end_simple_statement()?;
        Ok(stmt)
    }

    /// `return [expr]`
    fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // 'return'
        let value = if self.at_statement_end() {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.end_simple_statement()?;
        Ok(Stmt::Return { value })
    }

    /// `import a.b [as c]`
    fn parse_import(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // 'import'
        let module = self.parse_dotted_name()?;
        let alias = self.parse_alias()?;
        self.end_simple_statement()?;
        Ok(Stmt::Import { module, alias })
    }

    /// `from a.b import x [as y], ...`, `from a import (x, y)`, `from a import *`
    fn parse_import_from(&mut self) -> Result<Stmt, ParseError> {
        self.advance(); // 'from'
        let module = self.parse_dotted_name()?;
        self.consume(TokenKind::KwImport, "expected 'import'")?;

        let mut names = Vec::new();
        if self.check_operator("*") {
            self.advance();
            names.push(ImportName {
                name: "*".to_string(),
                alias: None,
            });
        } else {
            let parenthesized = self.eat(TokenKind::LParen);
            loop {
                let name = self.consume_identifier("expected a name to import")?;
                let alias = self.parse_alias()?;
                names.push(ImportName { name, alias });
                if !self.eat(TokenKind::Comma) {
                    break;
                }
                if parenthesized && self.check(TokenKind::RParen) {
                    break;
                }
            }
            if parenthesized {
                self.consume(TokenKind::RParen, "expected ')' after imported names")?;
            }
        }

        self.end_simple_statement()?;
        Ok(Stmt::ImportFrom { module, names })
    }

    fn parse_dotted_name(&mut self) -> Result<String, ParseError> {
        let mut name = self.consume_identifier("expected a module name")?;
        while self.eat(TokenKind::Dot) {
            name.push('.');
            name.push_str(&self.consume_identifier("expected a name after '.'")?);
        }
        Ok(name)
    }

    fn parse_alias(&mut self) -> Result<Option<String>, ParseError> {
        if self.eat(TokenKind::KwAs) {
            self.consume_identifier("expected a name after 'as'").map(Some)
        } else {
            Ok(None)
        }
    }

    /// Expression statement, assignment or augmented assignment
    fn parse_expression_statement(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current().clone();
        let expr = self.parse_expression()?;

        let next = self.current().clone();
        let stmt = if next.is_operator("=") {
            let target = assignment_target(expr, &start)?;
            self.advance();
            let value = self.parse_expression()?;
            Stmt::Assignment { target, value }
        } else if let Some(operator) = compound_assignment_base(&next.text)
            .filter(|_| next.kind == TokenKind::Operator)
            .and_then(BinOp::from_symbol)
        {
            let target = assignment_target(expr, &start)?;
            self.advance();
            let value = self.parse_expression()?;
            Stmt::AugmentedAssignment {
                target,
                operator,
                value,
            }
        } else {
            Stmt::Expr(expr)
        };

        self.end_simple_statement()?;
        Ok(stmt)
    }

    fn at_statement_end(&self) -> bool {
        matches!(
            self.current().kind,
            TokenKind::Newline | TokenKind::Semicolon | TokenKind::Dedent | TokenKind::Eof
        )
    }

    /// A simple statement ends at `NEWLINE`/`;` (consumed) or before `DEDENT`/`EOF`
    pub fn end_simple_statement(&mut self) -> Result<(), ParseError> {
        match self.current().kind {
            TokenKind::Newline | TokenKind::Semicolon => {
                self.advance();
                Ok(())
            }
            TokenKind::Dedent | TokenKind::Eof => Ok(()),
            _ => Err(self.error("expected end of statement")),
        }
    }
}

/// Only a bare name can be assigned to
fn assignment_target(
    expr: Expr,
    start: &Token,
) -> Result<String, ParseError> {
    match expr {
        Expr::Identifier { name } => Ok(name),
        _ => Err(ParseError::syntax("invalid assignment target", start)),
    }
}

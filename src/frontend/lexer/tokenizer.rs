//! Tokenizer implementation
//! Main lexer structure and token generation logic, including the
//! synthesis of INDENT/DEDENT tokens from leading whitespace

use super::literals::{is_digit, is_identifier_start, scan_identifier, scan_number, scan_string};
use super::state::{IndentChange, LexerState};
use super::symbols::{delimiter_kind, match_operator};
use crate::frontend::lexer::tokens::*;
use crate::util::config::DEFAULT_TAB_WIDTH;
use crate::util::span::{Position, Span};

/// Main lexer structure
pub struct Lexer<'a> {
    source: &'a str,
    offset: usize,
    line: usize,
    column: usize,
    start_offset: usize,
    start_line: usize,
    start_column: usize,
    tab_width: usize,
    state: LexerState,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source
    pub fn new(source: &'a str) -> Self {
        Self::with_tab_width(source, DEFAULT_TAB_WIDTH)
    }

    /// Create a lexer that counts a tab as `tab_width` columns of indentation
    pub fn with_tab_width(
        source: &'a str,
        tab_width: usize,
    ) -> Self {
        let offset = if source.starts_with('\u{feff}') {
            '\u{feff}'.len_utf8()
        } else {
            0
        };
        Self {
            source,
            offset,
            line: 1,
            column: 1,
            start_offset: offset,
            start_line: 1,
            start_column: 1,
            tab_width,
            state: LexerState::new(),
        }
    }

    /// Get current position
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column, self.offset)
    }

    /// Get start position of current token
    pub fn start_position(&self) -> Position {
        Position::new(self.start_line, self.start_column, self.start_offset)
    }

    /// Get span of current token
    pub fn span(&self) -> Span {
        Span::new(self.start_position(), self.position())
    }

    /// Byte offset of the cursor
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Unconsumed input
    pub fn rest(&self) -> &'a str {
        &self.source[self.offset..]
    }

    /// Source text from `start` up to the cursor
    pub fn slice_from(
        &self,
        start: usize,
    ) -> &'a str {
        &self.source[start..self.offset]
    }

    pub fn state(&self) -> &LexerState {
        &self.state
    }

    /// Advance to next character
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Peek at next character
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Peek at character after next
    pub fn peek_next(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    /// Create token with current span
    pub fn make_token(
        &self,
        kind: TokenKind,
        text: &str,
    ) -> Token {
        Token::new(kind, text, self.span())
    }

    fn mark_start(&mut self) {
        self.start_offset = self.offset;
        self.start_line = self.line;
        self.start_column = self.column;
    }

    /// Run the lexer to completion
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        self.measure_indent(&mut tokens)?;

        while let Some(c) = self.peek() {
            self.mark_start();
            match c {
                ' ' | '\t' | '\r' => {
                    self.advance();
                }
                '#' => self.skip_comment(),
                '\n' => {
                    self.advance();
                    // Implicit line joining inside brackets
                    if self.state.in_brackets() {
                        continue;
                    }
                    tokens.push(Token::new(TokenKind::Newline, "\n", self.span()));
                    self.measure_indent(&mut tokens)?;
                }
                '"' | '\'' => tokens.push(scan_string(&mut self, c)?),
                '.' if self.peek_next().is_some_and(is_digit) => {
                    tokens.push(scan_number(&mut self));
                }
                c if is_digit(c) => tokens.push(scan_number(&mut self)),
                c if is_identifier_start(c) => tokens.push(scan_identifier(&mut self)),
                c => tokens.push(self.scan_symbol(c)?),
            }
        }

        self.mark_start();
        for _ in 0..self.state.close_all() {
            tokens.push(self.make_token(TokenKind::Dedent, ""));
        }
        tokens.push(self.make_token(TokenKind::Eof, ""));

        Ok(tokens)
    }

    /// Measure leading whitespace of a fresh line and emit layout tokens
    fn measure_indent(
        &mut self,
        tokens: &mut Vec<Token>,
    ) -> Result<(), LexError> {
        let mut width = 0;
        while let Some(c) = self.peek() {
            match c {
                ' ' => width += 1,
                '\t' => width += self.tab_width,
                _ => break,
            }
            self.advance();
        }

        // Blank and comment-only lines do not take part in indentation
        if matches!(self.peek(), None | Some('\n' | '\r' | '#')) {
            return Ok(());
        }

        self.mark_start();
        match self.state.change_indent(width) {
            IndentChange::Unchanged => {}
            IndentChange::Indent => tokens.push(self.make_token(TokenKind::Indent, "")),
            IndentChange::Dedent(levels) => {
                for _ in 0..levels {
                    tokens.push(self.make_token(TokenKind::Dedent, ""));
                }
            }
            IndentChange::Inconsistent => {
                return Err(LexError::InconsistentDedent {
                    position: self.position(),
                });
            }
        }
        Ok(())
    }

    /// Skip a `#` comment up to (not including) the line break
    fn skip_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Scan a delimiter or operator
    fn scan_symbol(
        &mut self,
        c: char,
    ) -> Result<Token, LexError> {
        if let Some(kind) = delimiter_kind(c) {
            match kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => {
                    self.state.open_bracket()
                }
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    self.state.close_bracket()
                }
                _ => {}
            }
            self.advance();
            return Ok(self.make_token(kind, self.slice_from(self.start_offset)));
        }

        match match_operator(self.rest()) {
            Some(op) => {
                for _ in op.chars() {
                    self.advance();
                }
                Ok(self.make_token(TokenKind::Operator, op))
            }
            None => Err(LexError::UnexpectedChar {
                ch: c,
                position: self.start_position(),
            }),
        }
    }
}

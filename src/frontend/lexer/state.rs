//! Lexer state management
//! Handles keyword recognition, the indentation stack, and bracket nesting

use crate::frontend::lexer::tokens::TokenKind;
use std::cmp::Ordering;

/// What a change of indentation produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentChange {
    /// Same width as the enclosing block
    Unchanged,
    /// One new level was opened
    Indent,
    /// This many levels were closed
    Dedent(usize),
    /// Width fell between two open levels
    Inconsistent,
}

/// Lexer state management
pub struct LexerState {
    /// Open indentation widths; never empty, bottom is always 0
    indent_stack: Vec<usize>,
    /// Depth of open `(`, `[` and `{`
    bracket_depth: usize,
}

impl LexerState {
    /// Create new lexer state
    pub fn new() -> Self {
        Self {
            indent_stack: vec![0],
            bracket_depth: 0,
        }
    }

    /// Convert string to keyword token
    pub fn keyword_from_str(
        &self,
        s: &str,
    ) -> Option<TokenKind> {
        match s {
            // Definitions
            "def" => Some(TokenKind::KwDef),
            "class" => Some(TokenKind::KwClass),
            "return" => Some(TokenKind::KwReturn),
            "async" => Some(TokenKind::KwAsync),

            // Control flow keywords
            "if" => Some(TokenKind::KwIf),
            "elif" => Some(TokenKind::KwElif),
            "else" => Some(TokenKind::KwElse),
            "while" => Some(TokenKind::KwWhile),
            "for" => Some(TokenKind::KwFor),
            "in" => Some(TokenKind::KwIn),
            "try" => Some(TokenKind::KwTry),
            "except" => Some(TokenKind::KwExcept),
            "finally" => Some(TokenKind::KwFinally),
            "with" => Some(TokenKind::KwWith),
            "match" => Some(TokenKind::KwMatch),
            "case" => Some(TokenKind::KwCase),
            "pass" => Some(TokenKind::KwPass),
            "break" => Some(TokenKind::KwBreak),
            "continue" => Some(TokenKind::KwContinue),

            // Modules
            "import" => Some(TokenKind::KwImport),
            "from" => Some(TokenKind::KwFrom),
            "as" => Some(TokenKind::KwAs),

            // Word operators
            "and" => Some(TokenKind::KwAnd),
            "or" => Some(TokenKind::KwOr),
            "not" => Some(TokenKind::KwNot),
            "is" => Some(TokenKind::KwIs),

            // Constants
            "None" => Some(TokenKind::KwNone),
            "True" => Some(TokenKind::KwTrue),
            "False" => Some(TokenKind::KwFalse),

            _ => None,
        }
    }

    /// Width of the innermost open block
    pub fn current_indent(&self) -> usize {
        self.indent_stack.last().copied().unwrap_or(0)
    }

    /// Number of open indentation levels above column 0
    pub fn open_levels(&self) -> usize {
        self.indent_stack.len() - 1
    }

    /// Compare a new line's width against the stack, pushing or popping
    pub fn change_indent(
        &mut self,
        width: usize,
    ) -> IndentChange {
        match width.cmp(&self.current_indent()) {
            Ordering::Equal => IndentChange::Unchanged,
            Ordering::Greater => {
                self.indent_stack.push(width);
                IndentChange::Indent
            }
            Ordering::Less => {
                let mut popped = 0;
                while width < self.current_indent() {
                    self.indent_stack.pop();
                    popped += 1;
                }
                if width == self.current_indent() {
                    IndentChange::Dedent(popped)
                } else {
                    IndentChange::Inconsistent
                }
            }
        }
    }

    /// Pop every open level, returning how many `DEDENT`s are owed
    pub fn close_all(&mut self) -> usize {
        let open = self.open_levels();
        self.indent_stack.truncate(1);
        open
    }

    pub fn open_bracket(&mut self) {
        self.bracket_depth += 1;
    }

    pub fn close_bracket(&mut self) {
        self.bracket_depth = self.bracket_depth.saturating_sub(1);
    }

    /// Inside brackets line breaks join lines
    pub fn in_brackets(&self) -> bool {
        self.bracket_depth > 0
    }
}

impl Default for LexerState {
    fn default() -> Self {
        Self::new()
    }
}

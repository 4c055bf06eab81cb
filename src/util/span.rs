//! Source positions
//!
//! Lines and columns are 1-based; columns count characters, not bytes.
//! The zero position marks tokens built outside the lexer.

use std::fmt;

/// A point in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    /// Byte offset into the source
    pub offset: usize,
}

impl Position {
    #[inline]
    pub const fn new(
        line: usize,
        column: usize,
        offset: usize,
    ) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "line {}, col {}", self.line, self.column)
    }
}

/// Half-open range `[start, end)` covered by a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    #[inline]
    pub const fn new(
        start: Position,
        end: Position,
    ) -> Self {
        Self { start, end }
    }

    /// Zero-width span, used for the synthetic `EOF`
    #[inline]
    pub const fn point(at: Position) -> Self {
        Self { start: at, end: at }
    }

    #[inline]
    pub const fn dummy() -> Self {
        Self::point(Position::new(0, 0, 0))
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! Token types

use crate::util::span::{Position, Span};
use std::fmt;

/// Lexer error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("Unterminated string literal at {position}")]
    UnterminatedString { position: Position },
    #[error("Unterminated triple-quoted string literal at {position}")]
    UnterminatedTripleString { position: Position },
    #[error("Unexpected character '{ch}' at {position}")]
    UnexpectedChar { ch: char, position: Position },
    #[error("Unindent does not match any outer indentation level at {position}")]
    InconsistentDedent { position: Position },
}

impl LexError {
    /// Where the offending input starts
    pub fn position(&self) -> Position {
        match self {
            LexError::UnterminatedString { position }
            | LexError::UnterminatedTripleString { position }
            | LexError::UnexpectedChar { position, .. }
            | LexError::InconsistentDedent { position } => *position,
        }
    }

    pub fn line(&self) -> usize {
        self.position().line
    }

    pub fn column(&self) -> usize {
        self.position().column
    }

    /// The diagnostic without its location suffix
    pub fn message(&self) -> String {
        match self {
            LexError::UnterminatedString { .. } => "Unterminated string literal".to_string(),
            LexError::UnterminatedTripleString { .. } => {
                "Unterminated triple-quoted string literal".to_string()
            }
            LexError::UnexpectedChar { ch, .. } => format!("Unexpected character '{}'", ch),
            LexError::InconsistentDedent { .. } => {
                "Unindent does not match any outer indentation level".to_string()
            }
        }
    }
}

/// Token kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    KwDef,
    KwClass,
    KwReturn,
    KwIf,
    KwElif,
    KwElse,
    KwWhile,
    KwFor,
    KwIn,
    KwImport,
    KwFrom,
    KwAs,
    KwTry,
    KwExcept,
    KwFinally,
    KwWith,
    KwPass,
    KwBreak,
    KwContinue,
    KwAnd,
    KwOr,
    KwNot,
    KwIs,
    KwNone,
    KwTrue,
    KwFalse,
    KwAsync,
    KwMatch,
    KwCase,

    // Identifiers and literals (text lives on the token)
    Identifier,
    Number,
    String,

    // Operators (symbol lives on the token)
    Operator,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Colon,
    Comma,
    Semicolon,
    Dot,

    // Layout
    Indent,
    Dedent,
    Newline,

    // Special
    Eof,
}

impl TokenKind {
    /// Whether this kind comes from the keyword table
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::KwDef
                | TokenKind::KwClass
                | TokenKind::KwReturn
                | TokenKind::KwIf
                | TokenKind::KwElif
                | TokenKind::KwElse
                | TokenKind::KwWhile
                | TokenKind::KwFor
                | TokenKind::KwIn
                | TokenKind::KwImport
                | TokenKind::KwFrom
                | TokenKind::KwAs
                | TokenKind::KwTry
                | TokenKind::KwExcept
                | TokenKind::KwFinally
                | TokenKind::KwWith
                | TokenKind::KwPass
                | TokenKind::KwBreak
                | TokenKind::KwContinue
                | TokenKind::KwAnd
                | TokenKind::KwOr
                | TokenKind::KwNot
                | TokenKind::KwIs
                | TokenKind::KwNone
                | TokenKind::KwTrue
                | TokenKind::KwFalse
                | TokenKind::KwAsync
                | TokenKind::KwMatch
                | TokenKind::KwCase
        )
    }

    /// Upper-case name used in diagnostics (`IDENTIFIER`, `DEDENT`, ...)
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::KwDef => "DEF",
            TokenKind::KwClass => "CLASS",
            TokenKind::KwReturn => "RETURN",
            TokenKind::KwIf => "IF",
            TokenKind::KwElif => "ELIF",
            TokenKind::KwElse => "ELSE",
            TokenKind::KwWhile => "WHILE",
            TokenKind::KwFor => "FOR",
            TokenKind::KwIn => "IN",
            TokenKind::KwImport => "IMPORT",
            TokenKind::KwFrom => "FROM",
            TokenKind::KwAs => "AS",
            TokenKind::KwTry => "TRY",
            TokenKind::KwExcept => "EXCEPT",
            TokenKind::KwFinally => "FINALLY",
            TokenKind::KwWith => "WITH",
            TokenKind::KwPass => "PASS",
            TokenKind::KwBreak => "BREAK",
            TokenKind::KwContinue => "CONTINUE",
            TokenKind::KwAnd => "AND",
            TokenKind::KwOr => "OR",
            TokenKind::KwNot => "NOT",
            TokenKind::KwIs => "IS",
            TokenKind::KwNone => "NONE",
            TokenKind::KwTrue => "TRUE",
            TokenKind::KwFalse => "FALSE",
            TokenKind::KwAsync => "ASYNC",
            TokenKind::KwMatch => "MATCH",
            TokenKind::KwCase => "CASE",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Operator => "OPERATOR",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Colon => "COLON",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Dot => "DOT",
            TokenKind::Indent => "INDENT",
            TokenKind::Dedent => "DEDENT",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text of the token. Strings hold their raw content without
    /// quotes; layout tokens hold an empty string.
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    pub fn line(&self) -> usize {
        self.span.start.line
    }

    pub fn column(&self) -> usize {
        self.span.start.column
    }

    /// Check for an `OPERATOR` token with the given symbol
    pub fn is_operator(
        &self,
        symbol: &str,
    ) -> bool {
        self.kind == TokenKind::Operator && self.text == symbol
    }

    /// Short human-readable rendering for diagnostics
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Identifier
            | TokenKind::Number
            | TokenKind::Operator => format!("{} '{}'", self.kind, self.text),
            TokenKind::String => format!("STRING \"{}\"", self.text),
            kind => kind.name().to_string(),
        }
    }
}

impl From<TokenKind> for Token {
    fn from(kind: TokenKind) -> Self {
        Token {
            kind,
            text: String::new(),
            span: Span::dummy(),
        }
    }
}

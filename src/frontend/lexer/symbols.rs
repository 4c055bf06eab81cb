//! Operator and delimiter symbol tables
//! Operators are matched longest-first (maximal munch)

use crate::frontend::lexer::tokens::TokenKind;

/// Three-character operators
pub const THREE_CHAR_OPERATORS: [&str; 4] = ["**=", "//=", ">>=", "<<="];

/// Two-character operators
pub const TWO_CHAR_OPERATORS: [&str; 19] = [
    "==", "!=", "<=", ">=", "**", "//", "<<", ">>", "->", ":=", "+=", "-=", "*=", "/=", "%=",
    "&=", "|=", "^=", "@=",
];

/// Single-character operators
pub const ONE_CHAR_OPERATORS: [char; 14] = [
    '+', '-', '*', '/', '%', '@', '&', '|', '^', '~', '<', '>', '=', '!',
];

/// Map a single delimiter character to its token kind
pub fn delimiter_kind(c: char) -> Option<TokenKind> {
    match c {
        '(' => Some(TokenKind::LParen),
        ')' => Some(TokenKind::RParen),
        '[' => Some(TokenKind::LBracket),
        ']' => Some(TokenKind::RBracket),
        '{' => Some(TokenKind::LBrace),
        '}' => Some(TokenKind::RBrace),
        ':' => Some(TokenKind::Colon),
        ',' => Some(TokenKind::Comma),
        ';' => Some(TokenKind::Semicolon),
        '.' => Some(TokenKind::Dot),
        _ => None,
    }
}

/// Longest operator that starts `rest`, if any
pub fn match_operator(rest: &str) -> Option<&'static str> {
    THREE_CHAR_OPERATORS
        .iter()
        .chain(TWO_CHAR_OPERATORS.iter())
        .find(|op| rest.starts_with(**op))
        .copied()
        .or_else(|| {
            let first = rest.chars().next()?;
            ONE_CHAR_OPERATORS
                .iter()
                .position(|&c| c == first)
                .map(|i| ONE_CHAR_STRS[i])
        })
}

const ONE_CHAR_STRS: [&str; 14] = [
    "+", "-", "*", "/", "%", "@", "&", "|", "^", "~", "<", ">", "=", "!",
];

/// Compound assignment operators and the binary operator they apply
pub fn compound_assignment_base(symbol: &str) -> Option<&'static str> {
    match symbol {
        "+=" => Some("+"),
        "-=" => Some("-"),
        "*=" => Some("*"),
        "/=" => Some("/"),
        "//=" => Some("//"),
        "%=" => Some("%"),
        "**=" => Some("**"),
        "@=" => Some("@"),
        "&=" => Some("&"),
        "|=" => Some("|"),
        "^=" => Some("^"),
        "<<=" => Some("<<"),
        ">>=" => Some(">>"),
        _ => None,
    }
}

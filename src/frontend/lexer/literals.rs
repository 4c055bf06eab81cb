//! Literal scanning implementations
//! Handles number, string, and identifier lexemes

use super::tokenizer::Lexer;
use crate::frontend::lexer::tokens::*;

/// Scan a number literal.
///
/// A number is the maximal run of digits, `.`, `_`, exponent markers, and a
/// sign directly after an exponent marker. The text is not validated here;
/// converting it to a value is left to consumers of the AST.
pub fn scan_number(lexer: &mut Lexer<'_>) -> Token {
    let start = lexer.offset();
    let mut prev: Option<char> = None;

    while let Some(c) = lexer.peek() {
        let accepted = c.is_ascii_digit()
            || matches!(c, '.' | '_' | 'e' | 'E')
            || (matches!(c, '+' | '-') && matches!(prev, Some('e' | 'E')));
        if !accepted {
            break;
        }
        prev = Some(c);
        lexer.advance();
    }

    lexer.make_token(TokenKind::Number, lexer.slice_from(start))
}

/// Scan a single- or double-quoted string, or a `"""` block string.
///
/// Backslash escapes are passed through untouched: the backslash only
/// stops the following character from closing the literal.
pub fn scan_string(
    lexer: &mut Lexer<'_>,
    quote: char,
) -> Result<Token, LexError> {
    if quote == '"' && lexer.rest().starts_with("\"\"\"") {
        return scan_triple_string(lexer);
    }

    let position = lexer.start_position();
    lexer.advance(); // opening quote
    let content_start = lexer.offset();

    loop {
        match lexer.peek() {
            None | Some('\n') => return Err(LexError::UnterminatedString { position }),
            Some('\\') => {
                lexer.advance();
                if lexer.advance().is_none() {
                    return Err(LexError::UnterminatedString { position });
                }
            }
            Some(c) if c == quote => {
                let text = lexer.slice_from(content_start);
                lexer.advance(); // closing quote
                return Ok(lexer.make_token(TokenKind::String, text));
            }
            Some(_) => {
                lexer.advance();
            }
        }
    }
}

/// Scan a `"""` string; it may span lines
fn scan_triple_string(lexer: &mut Lexer<'_>) -> Result<Token, LexError> {
    let position = lexer.start_position();
    for _ in 0..3 {
        lexer.advance();
    }
    let content_start = lexer.offset();

    loop {
        if lexer.rest().starts_with("\"\"\"") {
            let text = lexer.slice_from(content_start);
            for _ in 0..3 {
                lexer.advance();
            }
            return Ok(lexer.make_token(TokenKind::String, text));
        }
        match lexer.advance() {
            None => return Err(LexError::UnterminatedTripleString { position }),
            Some('\\') => {
                if lexer.advance().is_none() {
                    return Err(LexError::UnterminatedTripleString { position });
                }
            }
            Some(_) => {}
        }
    }
}

/// Scan an identifier, resolving keywords through the lexer state
pub fn scan_identifier(lexer: &mut Lexer<'_>) -> Token {
    let start = lexer.offset();
    lexer.advance();
    while lexer.peek().is_some_and(is_identifier_char) {
        lexer.advance();
    }

    let text = lexer.slice_from(start);
    let kind = lexer
        .state()
        .keyword_from_str(text)
        .unwrap_or(TokenKind::Identifier);
    lexer.make_token(kind, text)
}

/// Check if character can start an identifier
pub fn is_identifier_start(c: char) -> bool {
    c == '_' || unicode_ident::is_xid_start(c)
}

/// Check if character is valid identifier continuation
pub fn is_identifier_char(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}

/// Check if character is a digit
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

//! Lexer module
//!
//! Turns source text into tokens. Layout is significant: leading
//! whitespace is measured at the start of every logical line and turned
//! into `INDENT`/`DEDENT` tokens, so the stream always ends with enough
//! `DEDENT`s to close every open block, followed by `EOF`.

pub mod literals;
pub mod state;
pub mod symbols;
pub mod tokenizer;
pub mod tokens;
#[cfg(test)]
mod tests;

// Re-export types
pub use tokenizer::Lexer;
pub use tokens::{LexError, Token, TokenKind};

use crate::util::config::FrontendConfig;

/// Tokenize source code with the default configuration
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    tokenize_with_config(source, &FrontendConfig::default())
}

/// Tokenize source code
///
/// Fails on the first malformed lexeme and then produces no tokens at all.
pub fn tokenize_with_config(
    source: &str,
    config: &FrontendConfig,
) -> Result<Vec<Token>, LexError> {
    tracing::debug!("Tokenizing source ({} bytes)", source.len());

    let tokens = Lexer::with_tab_width(source, config.tab_width)
        .tokenize()
        .inspect_err(|e| tracing::debug!("Lexing failed: {}", e))?;

    for token in &tokens {
        log_token(token);
    }
    tracing::debug!("Tokenized into {} tokens", tokens.len());

    Ok(tokens)
}

/// Log a token for debugging
fn log_token(token: &Token) {
    match token.kind {
        TokenKind::Indent | TokenKind::Dedent | TokenKind::Newline | TokenKind::Eof => {
            tracing::trace!(line = token.line(), column = token.column(), "{}", token.kind)
        }
        _ => tracing::trace!(
            line = token.line(),
            column = token.column(),
            "{}",
            token.describe()
        ),
    }
}

//! Parser module
//!
//! Turns a token stream into a [`Program`]. The driver in
//! [`parser_state`] dispatches each statement; compound constructs,
//! expressions and type annotations are parsed by the state machines in
//! [`fsm`]. The first error aborts the whole parse.

pub mod ast;
pub mod fsm;
pub mod parser_state;
pub mod precedence;
#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use ast::*;
pub use parser_state::{ParseError, ParserState};

use crate::frontend::lexer::tokens::Token;
use crate::util::config::FrontendConfig;

/// Parse tokens into a program
///
/// # Example
/// ```
/// use pyplus::frontend::{lexer::tokenize, parser::parse};
///
/// let tokens = tokenize("x = 1 + 2\n").unwrap();
/// let program = parse(&tokens).unwrap();
/// assert_eq!(program.body.len(), 1);
/// ```
pub fn parse(tokens: &[Token]) -> Result<Program, ParseError> {
    parse_with_config(tokens, &FrontendConfig::default())
}

/// Parse tokens into a program, bounding nesting by `config.max_nesting_depth`
pub fn parse_with_config(
    tokens: &[Token],
    config: &FrontendConfig,
) -> Result<Program, ParseError> {
    tracing::debug!("Parsing {} tokens", tokens.len());

    let mut state = ParserState::with_config(tokens, config);
    let program = state
        .parse_program()
        .inspect_err(|e| tracing::debug!("Parsing failed: {}", e))?;

    tracing::debug!("Parsed {} top-level statements", program.body.len());
    Ok(program)
}

/// Parse a token stream holding exactly one expression
pub fn parse_expression(tokens: &[Token]) -> Result<Expr, ParseError> {
    let mut state = ParserState::new(tokens);
    let expr = state.parse_expression()?;
    state.expect_end()?;
    Ok(expr)
}

/// Parse a token stream holding exactly one type annotation
pub fn parse_type(tokens: &[Token]) -> Result<TypeExpr, ParseError> {
    let mut state = ParserState::new(tokens);
    let ty = state.parse_type()?;
    state.expect_end()?;
    Ok(ty)
}

//! Frontend pipeline
//!
//! Source text goes through the lexer and then the parser. [`Frontend`]
//! carries the configuration both stages read; the free functions use the
//! defaults.

use thiserror::Error;
use tracing::debug;

use crate::util::config::FrontendConfig;
use crate::util::span::Position;

pub mod lexer;
pub mod parser;

use lexer::{LexError, Token};
use parser::{ParseError, Program};

/// Configured front end
#[derive(Debug, Clone, Default)]
pub struct Frontend {
    config: FrontendConfig,
}

impl Frontend {
    /// Create a front end with the default configuration
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FrontendConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FrontendConfig {
        &self.config
    }

    /// Tokenize source code
    pub fn tokenize(
        &self,
        source: &str,
    ) -> Result<Vec<Token>, FrontendError> {
        Ok(lexer::tokenize_with_config(source, &self.config)?)
    }

    /// Tokenize and parse source code into a program
    pub fn parse(
        &self,
        source: &str,
    ) -> Result<Program, FrontendError> {
        debug!("Parsing source ({} bytes)", source.len());
        let tokens = self.tokenize(source)?;
        let program = parser::parse_with_config(&tokens, &self.config)?;
        debug!("Parsing successful, got {} statements", program.body.len());
        Ok(program)
    }
}

/// The single failure surface of the front end
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontendError {
    #[error("Lexical error: {0}")]
    Lex(#[from] LexError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

impl FrontendError {
    pub fn position(&self) -> Position {
        match self {
            FrontendError::Lex(e) => e.position(),
            FrontendError::Parse(e) => e.position(),
        }
    }

    pub fn line(&self) -> usize {
        self.position().line
    }

    pub fn column(&self) -> usize {
        self.position().column
    }

    /// The diagnostic without its location
    pub fn message(&self) -> String {
        match self {
            FrontendError::Lex(e) => e.message(),
            FrontendError::Parse(e) => e.message().to_string(),
        }
    }
}

/// Tokenize and parse source code with the default configuration
pub fn parse_source(source: &str) -> Result<Program, FrontendError> {
    Frontend::new().parse(source)
}

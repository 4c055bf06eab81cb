//! Python++ front end
//!
//! An indentation-aware tokenizer and a state-machine driven parser for a
//! Python-superset language. Source text becomes a token stream with
//! synthetic `INDENT`/`DEDENT` tokens, and the token stream becomes a
//! [`Program`] whose nodes serialize with a `type` discriminant.
//!
//! # Example
//!
//! ```
//! use pyplus::{parse_source, Stmt};
//!
//! let program = parse_source("def add(a, b=1):\n    return a + b\n").unwrap();
//! assert!(matches!(program.body[0], Stmt::FunctionDefinition { .. }));
//!
//! let err = parse_source("def f(*args, b=1): pass").unwrap_err();
//! assert_eq!(err.message(), "default argument follows *args/**kwargs");
//! ```

#![warn(rust_2018_idioms)]

pub mod frontend;
pub mod util;

pub use frontend::lexer::{tokenize, LexError, Token, TokenKind};
pub use frontend::parser::{parse, ParseError};
pub use frontend::parser::ast::*;
pub use frontend::{parse_source, Frontend, FrontendError};
pub use util::config::FrontendConfig;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Language name
pub const NAME: &str = "Python++";

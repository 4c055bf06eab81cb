//! Parser state tests - ParserState and machine invariants

use crate::frontend::lexer::{tokenize, Token, TokenKind};
use crate::frontend::parser::fsm::{boxed, Fsm, FunctionFsm, StatementFsm};
use crate::frontend::parser::ParserState;
use crate::util::span::{Position, Span};

fn create_token(
    kind: TokenKind,
    text: &str,
    column: usize,
) -> Token {
    Token::new(
        kind,
        text,
        Span::new(
            Position::new(1, column, column - 1),
            Position::new(1, column + text.len(), column - 1 + text.len()),
        ),
    )
}

#[cfg(test)]
mod parser_state_tests {
    use super::*;

    #[test]
    fn test_peek_past_end_is_eof() {
        let tokens: Vec<Token> = vec![];
        let mut state = ParserState::new(&tokens);
        assert!(state.at_end());
        assert_eq!(state.peek(5).kind, TokenKind::Eof);
        assert_eq!(state.advance().kind, TokenKind::Eof);
        assert_eq!(state.index(), 0);
    }

    #[test]
    fn test_synthetic_eof_follows_last_token() {
        let tokens = vec![create_token(TokenKind::Identifier, "abc", 1)];
        let state = ParserState::new(&tokens);
        let eof = state.peek(1);
        assert_eq!(eof.kind, TokenKind::Eof);
        assert_eq!(eof.column(), 4);
    }

    #[test]
    fn test_check_eat_and_advance() {
        let tokens = vec![
            create_token(TokenKind::Identifier, "a", 1),
            create_token(TokenKind::Comma, ",", 2),
        ];
        let mut state = ParserState::new(&tokens);
        assert!(state.check(TokenKind::Identifier));
        assert!(!state.eat(TokenKind::Comma));
        assert_eq!(state.advance().text, "a");
        assert!(state.eat(TokenKind::Comma));
        assert_eq!(state.previous().map(|t| t.kind), Some(TokenKind::Comma));
        assert!(state.at_end());
    }

    #[test]
    fn test_consume_mismatch_reports_position() {
        let tokens = vec![
            create_token(TokenKind::Identifier, "a", 1),
            create_token(TokenKind::Number, "1", 3),
        ];
        let mut state = ParserState::new(&tokens);
        state.advance();
        let err = state.consume(TokenKind::Colon, "expected ':'").unwrap_err();
        assert_eq!(err.message(), "expected ':', found NUMBER '1'");
        assert_eq!((err.line(), err.column()), (1, 3));
        assert_eq!(err.to_string(), "SyntaxError: expected ':', found NUMBER '1' at line 1, col 3");
    }

    #[test]
    fn test_statement_machine_without_handler() {
        let tokens = tokenize("x\n").unwrap();
        let mut state = ParserState::new(&tokens);
        let err = boxed(StatementFsm::new).run(&mut state).unwrap_err();
        assert!(err.is_structural());
        assert!(err.message().contains("StatementFSM"));
    }

    #[test]
    fn test_function_machine_without_handler() {
        let tokens = tokenize("class A: pass\n").unwrap();
        let mut state = ParserState::new(&tokens);
        let err = boxed(|| FunctionFsm::new(true)).run(&mut state).unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn test_fresh_machines_per_construct() {
        // Two functions in a row share no parameters
        let tokens = tokenize("def f(a, b): pass\ndef g(): pass\n").unwrap();
        let mut state = ParserState::new(&tokens);
        let program = state.parse_program().unwrap();
        let counts: Vec<usize> = program
            .body
            .iter()
            .map(|stmt| match stmt {
                crate::frontend::parser::Stmt::FunctionDefinition { params, .. } => params.len(),
                _ => usize::MAX,
            })
            .collect();
        assert_eq!(counts, vec![2, 0]);
    }
}

//! Diagnostics surfaced through the front end

use pyplus::{parse_source, Frontend, FrontendError, LexError};

#[test]
fn test_lex_error_is_reported_before_parsing() {
    let err = parse_source("x = 1\ny = $\n").unwrap_err();
    assert!(matches!(
        err,
        FrontendError::Lex(LexError::UnexpectedChar { ch: '$', .. })
    ));
    assert_eq!((err.line(), err.column()), (2, 5));
    assert_eq!(err.message(), "Unexpected character '$'");
}

#[test]
fn test_parse_error_location() {
    let err = parse_source("def f(x y):\n    pass\n").unwrap_err();
    let FrontendError::Parse(inner) = &err else {
        panic!("Expected parse error, got {:?}", err);
    };
    assert!(!inner.is_structural());
    assert_eq!((err.line(), err.column()), (1, 9));
    assert_eq!(
        err.message(),
        "expected ',' or ')' in parameter list, found IDENTIFIER 'y'"
    );
    assert_eq!(
        err.to_string(),
        "Parse error: SyntaxError: expected ',' or ')' in parameter list, found IDENTIFIER 'y' at line 1, col 9"
    );
}

#[test]
fn test_inconsistent_dedent() {
    let err = parse_source("if a:\n        b\n    c\n").unwrap_err();
    assert!(matches!(err, FrontendError::Lex(LexError::InconsistentDedent { .. })));
    assert_eq!(err.line(), 3);
}

#[test]
fn test_unclosed_block_at_end_of_input() {
    let err = Frontend::new().parse("while x:\n").unwrap_err();
    assert_eq!(err.message(), "expected an indented block");
}

#[test]
fn test_first_error_wins() {
    let err = parse_source("if x\n    y = )\n").unwrap_err();
    assert_eq!(err.line(), 1);
    assert!(err.message().starts_with("expected ':' after 'if' header"));
}

#[test]
fn test_unmatched_paren() {
    let err = parse_source("x = (1 + 2\n").unwrap_err();
    assert_eq!(err.message(), "unmatched '('");
    assert_eq!((err.line(), err.column()), (1, 5));
}

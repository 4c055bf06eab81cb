//! Statement parsing tests

use super::{id, num, parse_error, parse_source};
use crate::frontend::lexer::tokenize;
use crate::frontend::parser::{parse_with_config, BinOp, Expr, ImportName, Stmt};
use crate::util::config::{FrontendConfig, DEFAULT_MAX_NESTING_DEPTH};

/// `levels` nested `if` blocks around a `pass`
fn nested_ifs(levels: usize) -> String {
    let mut source = String::new();
    for i in 0..levels {
        source.push_str(&"    ".repeat(i));
        source.push_str("if x:\n");
    }
    source.push_str(&"    ".repeat(levels));
    source.push_str("pass\n");
    source
}

/// `x = f(f(...f(1)...))` with `levels` calls
fn nested_calls(levels: usize) -> String {
    format!("x = {}1{}\n", "f(".repeat(levels), ")".repeat(levels))
}

fn assign(
    target: &str,
    value: Expr,
) -> Stmt {
    Stmt::Assignment {
        target: target.to_string(),
        value,
    }
}

#[cfg(test)]
mod statement_control_flow_tests {
    use super::*;

    #[test]
    fn test_if_elif_else_chain() {
        let program = parse_source(
            "if a:\n    x = 1\nelif b:\n    x = 2\nelse:\n    x = 3\n",
        );
        let expected = Stmt::If {
            condition: id("a"),
            body: vec![assign("x", num("1"))],
            else_body: Some(vec![Stmt::If {
                condition: id("b"),
                body: vec![assign("x", num("2"))],
                else_body: Some(vec![assign("x", num("3"))]),
            }]),
        };
        assert_eq!(program.body, vec![expected]);
    }

    #[test]
    fn test_if_without_else() {
        let program = parse_source("if a:\n    pass\ny = 1\n");
        assert_eq!(program.body.len(), 2);
        match &program.body[0] {
            Stmt::If { else_body, body, .. } => {
                assert!(else_body.is_none());
                assert_eq!(body, &vec![Stmt::Pass]);
            }
            other => panic!("Expected if statement, got {:?}", other),
        }
    }

    #[test]
    fn test_while_else() {
        let program = parse_source("while n > 0:\n    n -= 1\nelse:\n    done()\n");
        match &program.body[0] {
            Stmt::While {
                condition,
                body,
                else_body,
            } => {
                assert_eq!(condition, &Expr::binary(BinOp::Gt, id("n"), num("0")));
                assert_eq!(
                    body,
                    &vec![Stmt::AugmentedAssignment {
                        target: "n".to_string(),
                        operator: BinOp::Sub,
                        value: num("1"),
                    }]
                );
                assert_eq!(else_body.as_ref().map(Vec::len), Some(1));
            }
            other => panic!("Expected while statement, got {:?}", other),
        }
    }

    #[test]
    fn test_for_loop() {
        let program = parse_source("for i in range(10):\n    total += i\n");
        match &program.body[0] {
            Stmt::For {
                target, iterable, ..
            } => {
                assert_eq!(target, "i");
                assert_eq!(iterable.kind_name(), "Call");
            }
            other => panic!("Expected for statement, got {:?}", other),
        }
    }

    #[test]
    fn test_try_handlers_and_finally() {
        let program = parse_source(
            "try:\n    x\nexcept A as e:\n    y\nexcept B:\n    z\nfinally:\n    w\n",
        );
        match &program.body[0] {
            Stmt::Try {
                body,
                handlers,
                finalbody,
            } => {
                assert_eq!(body, &vec![Stmt::Expr(id("x"))]);
                assert_eq!(handlers.len(), 2);
                assert_eq!(handlers[0].exception, Some(id("A")));
                assert_eq!(handlers[0].alias.as_deref(), Some("e"));
                assert_eq!(handlers[1].exception, Some(id("B")));
                assert!(handlers[1].alias.is_none());
                assert_eq!(finalbody, &Some(vec![Stmt::Expr(id("w"))]));
            }
            other => panic!("Expected try statement, got {:?}", other),
        }
    }

    #[test]
    fn test_try_finally_only_and_bare_except() {
        let program = parse_source("try:\n    x\nfinally:\n    y\n");
        assert!(matches!(&program.body[0], Stmt::Try { handlers, finalbody: Some(_), .. } if handlers.is_empty()));

        let program = parse_source("try:\n    x\nexcept:\n    y\nz\n");
        assert_eq!(program.body.len(), 2);
        match &program.body[0] {
            Stmt::Try {
                handlers,
                finalbody,
                ..
            } => {
                assert!(handlers[0].exception.is_none());
                assert!(finalbody.is_none());
            }
            other => panic!("Expected try statement, got {:?}", other),
        }
    }

    #[test]
    fn test_try_requires_handler() {
        let err = parse_error("try:\n    x\ny\n");
        assert!(err
            .message()
            .starts_with("expected 'except' or 'finally' after try block"));
        assert_eq!(err.line(), 3);
    }

    #[test]
    fn test_with_items() {
        let program = parse_source("with open(p) as fh, lock:\n    read(fh)\n");
        match &program.body[0] {
            Stmt::With { items, body } => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].alias.as_deref(), Some("fh"));
                assert_eq!(items[1].context, id("lock"));
                assert!(items[1].alias.is_none());
                assert_eq!(body.len(), 1);
            }
            other => panic!("Expected with statement, got {:?}", other),
        }
    }

    #[test]
    fn test_match_cases_with_guard() {
        let program = parse_source(
            "match x:\n    case 1:\n        pass\n    case y if y > 0:\n        go(y)\n",
        );
        match &program.body[0] {
            Stmt::Match { subject, cases } => {
                assert_eq!(subject, &id("x"));
                assert_eq!(cases.len(), 2);
                assert_eq!(cases[0].pattern, num("1"));
                assert!(cases[0].guard.is_none());
                assert_eq!(
                    cases[1].guard,
                    Some(Expr::binary(BinOp::Gt, id("y"), num("0")))
                );
            }
            other => panic!("Expected match statement, got {:?}", other),
        }
    }

    #[test]
    fn test_match_requires_case() {
        let err = parse_error("match x:\n    y = 1\n");
        assert!(err.message().starts_with("expected 'case' in match block"));
    }

    #[test]
    fn test_deep_nesting() {
        let source = "def f():\n    while a:\n        for i in b:\n            if i:\n                break\n            else:\n                continue\n    return a\n";
        let program = parse_source(source);
        let Stmt::FunctionDefinition { body, .. } = &program.body[0] else {
            panic!("Expected function definition");
        };
        assert_eq!(body.len(), 2);
        assert_eq!(body[1], Stmt::Return { value: Some(id("a")) });
    }

    #[test]
    fn test_inline_suites() {
        let program = parse_source("if x: pass\nelse: y = 1; z = 2\n");
        match &program.body[0] {
            Stmt::If {
                body, else_body, ..
            } => {
                assert_eq!(body, &vec![Stmt::Pass]);
                assert_eq!(else_body.as_ref().map(Vec::len), Some(2));
            }
            other => panic!("Expected if statement, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_lines_inside_blocks() {
        let program = parse_source("if a:\n    x\n\n    # note\n    y\n\nz\n");
        assert_eq!(program.body.len(), 2);
    }

    #[test]
    fn test_missing_colon() {
        let err = parse_error("if x\n    y\n");
        assert!(err.message().starts_with("expected ':' after 'if' header"));
        assert_eq!((err.line(), err.column()), (1, 5));
    }

    #[test]
    fn test_missing_indented_block() {
        let err = parse_error("while x:\ny\n");
        assert_eq!(err.message(), "expected an indented block");
        assert_eq!(err.line(), 2);
    }
}

#[cfg(test)]
mod statement_simple_tests {
    use super::*;

    #[test]
    fn test_assignment() {
        let program = parse_source("x = 1 + 2\n");
        assert_eq!(
            program.body,
            vec![assign("x", Expr::binary(BinOp::Add, num("1"), num("2")))]
        );
    }

    #[test]
    fn test_invalid_assignment_target() {
        let err = parse_error("a.b = 1\n");
        assert_eq!(err.message(), "invalid assignment target");
        assert_eq!(err.column(), 1);
        let err = parse_error("1 += x\n");
        assert_eq!(err.message(), "invalid assignment target");
    }

    #[test]
    fn test_augmented_assignment() {
        let program = parse_source("x **= 2\n");
        assert_eq!(
            program.body,
            vec![Stmt::AugmentedAssignment {
                target: "x".to_string(),
                operator: BinOp::Pow,
                value: num("2"),
            }]
        );
    }

    #[test]
    fn test_keyword_statements() {
        let program = parse_source("return\npass; break\ncontinue\n");
        assert_eq!(
            program.body,
            vec![
                Stmt::Return { value: None },
                Stmt::Pass,
                Stmt::Break,
                Stmt::Continue
            ]
        );
    }

    #[test]
    fn test_imports() {
        let program = parse_source("import os.path as p\nfrom a.b import c as d, e\nfrom m import *\n");
        assert_eq!(
            program.body[0],
            Stmt::Import {
                module: "os.path".to_string(),
                alias: Some("p".to_string()),
            }
        );
        assert_eq!(
            program.body[1],
            Stmt::ImportFrom {
                module: "a.b".to_string(),
                names: vec![
                    ImportName {
                        name: "c".to_string(),
                        alias: Some("d".to_string()),
                    },
                    ImportName {
                        name: "e".to_string(),
                        alias: None,
                    },
                ],
            }
        );
        assert!(matches!(&program.body[2], Stmt::ImportFrom { names, .. } if names[0].name == "*"));
    }

    #[test]
    fn test_parenthesized_import_list() {
        let program = parse_source("from a import (b,\n    c,)\n");
        assert!(matches!(&program.body[0], Stmt::ImportFrom { names, .. } if names.len() == 2));
    }

    #[test]
    fn test_expected_end_of_statement() {
        let err = parse_error("x = 1 2\n");
        assert!(err.message().starts_with("expected end of statement"));
        assert_eq!(err.column(), 7);
    }

    #[test]
    fn test_unexpected_indent() {
        let err = parse_error("  x = 1\n");
        assert_eq!(err.message(), "unexpected indent");
        assert_eq!((err.line(), err.column()), (1, 3));
    }

    #[test]
    fn test_stray_clause_keyword() {
        let err = parse_error("else:\n    x\n");
        assert!(err.message().starts_with("expected an expression"));
    }

    #[test]
    fn test_nesting_depth_limit() {
        let config = FrontendConfig {
            max_nesting_depth: 3,
            ..FrontendConfig::default()
        };
        let tokens = tokenize("f(f(f(f(1))))\n").unwrap();
        let err = parse_with_config(&tokens, &config).unwrap_err();
        assert_eq!(err.message(), "maximum nesting depth exceeded");

        let tokens = tokenize("f(1)\n").unwrap();
        assert!(parse_with_config(&tokens, &config).is_ok());
    }

    #[test]
    fn test_deepest_blocks_within_default_limit() {
        // The innermost `pass` sits one level below the last `if`.
        let program = parse_source(&nested_ifs(DEFAULT_MAX_NESTING_DEPTH - 1));
        let mut depth = 0;
        let mut body = &program.body;
        while let Some(Stmt::If { body: inner, .. }) = body.first() {
            depth += 1;
            body = inner;
        }
        assert_eq!(depth, DEFAULT_MAX_NESTING_DEPTH - 1);
        assert_eq!(body, &vec![Stmt::Pass]);

        let err = parse_error(&nested_ifs(DEFAULT_MAX_NESTING_DEPTH + 1));
        assert_eq!(err.message(), "maximum nesting depth exceeded");
    }

    #[test]
    fn test_deepest_calls_within_default_limit() {
        // Statement and assigned value take the first two levels.
        let program = parse_source(&nested_calls(DEFAULT_MAX_NESTING_DEPTH - 2));
        let Stmt::Assignment { value, .. } = &program.body[0] else {
            panic!("Expected assignment, got {:?}", program.body[0]);
        };
        let mut calls = 0;
        let mut expr = value;
        while let Expr::Call { args, .. } = expr {
            calls += 1;
            expr = &args[0];
        }
        assert_eq!(calls, DEFAULT_MAX_NESTING_DEPTH - 2);
        assert_eq!(expr, &num("1"));

        let err = parse_error(&nested_calls(DEFAULT_MAX_NESTING_DEPTH + 2));
        assert_eq!(err.message(), "maximum nesting depth exceeded");
    }

    #[test]
    fn test_empty_program() {
        assert!(parse_source("").body.is_empty());
        assert!(parse_source("\n\n# only a comment\n").body.is_empty());
    }
}

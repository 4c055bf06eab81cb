//! Whole-program parsing through the public API

use pyplus::{parse_source, tokenize, BinOp, Expr, Param, Stmt, TokenKind, TypeExpr};

const SAMPLE: &str = r#"import os
from typing import List, Optional as Opt

@register
class Point(Base):
    def norm(self, scale: float = 1.0) -> float:
        return (self.x ** 2 + self.y ** 2) ** 0.5 * scale

async def fetch(url: str, *args, **kwargs) -> Dict[str, int]:
    with session(url) as s:
        data = s.get()
    return data

def main():
    total = 0
    for i in range(10):
        if i % 2 == 0:
            continue
        elif i > 7:
            break
        else:
            total += i
    while total > 0:
        total -= 1
    try:
        risky()
    except ValueError as e:
        pass
    finally:
        cleanup()
    match total:
        case 0:
            print("zero")
        case n if n > 0:
            print(n)

main()
"#;

fn kinds(body: &[Stmt]) -> Vec<&'static str> {
    body.iter().map(Stmt::kind_name).collect()
}

#[test]
fn test_sample_program_top_level() {
    let program = parse_source(SAMPLE).unwrap();
    assert_eq!(
        kinds(&program.body),
        vec![
            "ImportStatement",
            "ImportFromStatement",
            "ClassDefinition",
            "FunctionDefinition",
            "FunctionDefinition",
            "Call",
        ]
    );
}

#[test]
fn test_sample_class_and_method() {
    let program = parse_source(SAMPLE).unwrap();
    let Stmt::ClassDefinition {
        name,
        bases,
        body,
        decorators,
    } = &program.body[2]
    else {
        panic!("Expected class, got {:?}", program.body[2]);
    };
    assert_eq!(name, "Point");
    assert_eq!(bases, &vec![Expr::identifier("Base")]);
    assert_eq!(decorators, &vec![Expr::identifier("register")]);

    let Stmt::FunctionDefinition {
        params,
        return_type,
        body,
        ..
    } = &body[0]
    else {
        panic!("Expected method, got {:?}", body[0]);
    };
    assert_eq!(params.len(), 2);
    assert_eq!(
        params[1],
        Param::Parameter {
            name: "scale".to_string(),
            annotation: Some(TypeExpr::simple("float")),
            default: Some(Expr::number("1.0")),
        }
    );
    assert_eq!(return_type, &Some(TypeExpr::simple("float")));

    // `(...) ** 0.5 * scale` groups the power first
    let Stmt::Return { value: Some(Expr::BinaryOp { operator, left, .. }) } = &body[0] else {
        panic!("Expected return, got {:?}", body[0]);
    };
    assert_eq!(*operator, BinOp::Mul);
    assert!(matches!(
        left.as_ref(),
        Expr::BinaryOp {
            operator: BinOp::Pow,
            ..
        }
    ));
}

#[test]
fn test_sample_async_function() {
    let program = parse_source(SAMPLE).unwrap();
    let Stmt::FunctionDefinition {
        name,
        params,
        return_type,
        body,
        is_async,
        ..
    } = &program.body[3]
    else {
        panic!("Expected function, got {:?}", program.body[3]);
    };
    assert_eq!(name, "fetch");
    assert!(*is_async);
    let names: Vec<&str> = params.iter().map(Param::name).collect();
    assert_eq!(names, vec!["url", "args", "kwargs"]);
    assert!(matches!(params[1], Param::VarArg { .. }));
    assert!(matches!(params[2], Param::KwArg { .. }));
    assert_eq!(
        return_type.as_ref().map(ToString::to_string),
        Some("Dict[str, int]".to_string())
    );
    assert_eq!(kinds(body), vec!["WithStatement", "ReturnStatement"]);
}

#[test]
fn test_sample_control_flow() {
    let program = parse_source(SAMPLE).unwrap();
    let Stmt::FunctionDefinition { body, .. } = &program.body[4] else {
        panic!("Expected function, got {:?}", program.body[4]);
    };
    assert_eq!(
        kinds(body),
        vec![
            "Assignment",
            "ForStatement",
            "WhileStatement",
            "TryStatement",
            "MatchStatement",
        ]
    );

    let Stmt::For { target, body: loop_body, .. } = &body[1] else {
        panic!("Expected for loop, got {:?}", body[1]);
    };
    assert_eq!(target, "i");
    let Stmt::If { else_body: Some(elif), .. } = &loop_body[0] else {
        panic!("Expected if with else branch, got {:?}", loop_body[0]);
    };
    assert_eq!(kinds(elif), vec!["IfStatement"]);

    let Stmt::Try {
        handlers,
        finalbody,
        ..
    } = &body[3]
    else {
        panic!("Expected try, got {:?}", body[3]);
    };
    assert_eq!(handlers.len(), 1);
    assert_eq!(handlers[0].exception, Some(Expr::identifier("ValueError")));
    assert_eq!(handlers[0].alias.as_deref(), Some("e"));
    assert_eq!(finalbody.as_ref().map(Vec::len), Some(1));

    let Stmt::Match { cases, .. } = &body[4] else {
        panic!("Expected match, got {:?}", body[4]);
    };
    assert_eq!(cases.len(), 2);
    assert!(cases[1].guard.is_some());
}

#[test]
fn test_sample_token_stream_is_balanced() {
    let tokens = tokenize(SAMPLE).unwrap();
    let indents = tokens.iter().filter(|t| t.kind == TokenKind::Indent).count();
    let dedents = tokens.iter().filter(|t| t.kind == TokenKind::Dedent).count();
    assert_eq!(indents, dedents);
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
}

#[test]
fn test_line_joining_inside_brackets() {
    let program = parse_source("total = sum([1,\n    2,\n        3])\nprint(total)\n").unwrap();
    assert_eq!(kinds(&program.body), vec!["Assignment", "Call"]);
}

#[test]
fn test_windows_line_endings() {
    let program = parse_source("if x:\r\n    y = 1\r\nz = 2\r\n").unwrap();
    assert_eq!(kinds(&program.body), vec!["IfStatement", "Assignment"]);
}

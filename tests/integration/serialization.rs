//! JSON shape of the syntax tree

use pyplus::parse_source;
use serde_json::{json, Value};

fn to_json(source: &str) -> Value {
    let program = parse_source(source).unwrap();
    serde_json::to_value(&program).unwrap()
}

#[test]
fn test_program_root() {
    assert_eq!(to_json(""), json!({ "type": "Program", "body": [] }));
}

#[test]
fn test_function_definition_json() {
    let value = to_json("def f(x: int = 0) -> int:\n    return x\n");
    assert_eq!(
        value["body"][0],
        json!({
            "type": "FunctionDefinition",
            "name": "f",
            "params": [{
                "type": "Parameter",
                "name": "x",
                "annotation": { "type": "SimpleType", "name": "int" },
                "default": { "type": "Literal", "kind": "number", "value": "0" }
            }],
            "return_type": { "type": "SimpleType", "name": "int" },
            "body": [{
                "type": "ReturnStatement",
                "value": { "type": "Identifier", "name": "x" }
            }],
            "async": false
        })
    );
}

#[test]
fn test_absent_optional_fields_are_omitted() {
    let value = to_json("if a:\n    pass\n");
    assert_eq!(
        value["body"][0],
        json!({
            "type": "IfStatement",
            "condition": { "type": "Identifier", "name": "a" },
            "body": [{ "type": "PassStatement" }]
        })
    );

    let value = to_json("def g(): return\n");
    let function = &value["body"][0];
    assert!(function.get("return_type").is_none());
    assert!(function.get("decorators").is_none());
    assert_eq!(function["body"][0], json!({ "type": "ReturnStatement" }));
}

#[test]
fn test_expression_statement_is_bare_expression() {
    let value = to_json("print(\"hi\", end=x)\n");
    assert_eq!(
        value["body"][0],
        json!({
            "type": "Call",
            "func": { "type": "Identifier", "name": "print" },
            "args": [{ "type": "Literal", "kind": "string", "value": "hi" }],
            "keywords": [{
                "name": "end",
                "value": { "type": "Identifier", "name": "x" }
            }]
        })
    );
}

#[test]
fn test_operator_symbols() {
    let value = to_json("x = -a ** 2 not in b\n");
    assert_eq!(
        value["body"][0]["value"],
        json!({
            "type": "BinaryOp",
            "operator": "not in",
            "left": {
                "type": "UnaryOp",
                "operator": "-",
                "operand": {
                    "type": "BinaryOp",
                    "operator": "**",
                    "left": { "type": "Identifier", "name": "a" },
                    "right": { "type": "Literal", "kind": "number", "value": "2" }
                }
            },
            "right": { "type": "Identifier", "name": "b" }
        })
    );
}

#[test]
fn test_import_and_handler_fields() {
    let value = to_json("from m import a as b, c\ntry:\n    x\nexcept:\n    y\n");
    assert_eq!(
        value["body"][0],
        json!({
            "type": "ImportFromStatement",
            "module": "m",
            "names": [{ "name": "a", "alias": "b" }, { "name": "c" }]
        })
    );
    assert_eq!(
        value["body"][1]["handlers"][0],
        json!({ "body": [{ "type": "Identifier", "name": "y" }] })
    );
}

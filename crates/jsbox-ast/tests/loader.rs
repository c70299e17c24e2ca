use super::*;
use crate::kind::{AssignOp, NodeKind};
use jsbox_common::limits::MAX_JSON_NESTING;
use serde_json::json;

fn ident(name: &str) -> serde_json::Value {
    json!({"kind": "Identifier", "name": name})
}

#[test]
fn test_load_program_from_json() {
    let text = json!({
        "kind": "Program",
        "children": [{
            "kind": "Assignment",
            "op": "+=",
            "line": 3,
            "children": [ident("x"), {"kind": "NumericLiteral", "value": 1}]
        }]
    })
    .to_string();

    let program = load_program(&text).expect("valid program");
    let assignment = program.child(0).expect("one statement");
    assert_eq!(
        assignment.kind(),
        &NodeKind::Assignment {
            op: AssignOp::PlusAssign
        }
    );
    assert_eq!(assignment.line(), Some(3));
    assert_eq!(
        assignment.child(1).map(Node::kind),
        Some(&NodeKind::NumericLiteral { value: 1.0 })
    );
}

#[test]
fn test_null_children_are_absent_slots() {
    let text = json!({
        "kind": "Program",
        "children": [{
            "kind": "If",
            "children": [ident("a"), ident("b"), null]
        }]
    })
    .to_string();

    let program = load_program(&text).expect("valid program");
    let if_stmt = program.child(0).expect("if statement");
    assert_eq!(if_stmt.len(), 3);
    assert!(if_stmt.child(2).is_none());
}

#[test]
fn test_json_round_trip() {
    let tree = Node::program(vec![
        Node::var_decl(vec![Node::declarator("x", Some(Node::string("a\"b")))]).at_line(1),
        Node::if_stmt(
            Node::ident("x"),
            Node::statement_list(vec![Node::ret(None)]),
            None,
        ),
        Node::for_in(
            Node::iterator_var("k"),
            Node::ident("o"),
            Node::statement_list(vec![]),
        ),
        Node::regex("a+", "g"),
    ]);

    for pretty in [false, true] {
        let text = to_json_string(&tree, pretty).expect("serializes");
        assert_eq!(parse_tree(&text).expect("decodes"), tree);
    }
}

#[test]
fn test_operators_serialize_as_javascript_spelling() {
    let node = Node::assign_op(
        AssignOp::UnsignedRightShiftAssign,
        Node::ident("a"),
        Node::ident("b"),
    );
    let text = to_json_string(&node, false).expect("serializes");
    assert!(text.contains(r#""op":">>>=""#), "{text}");
    assert!(text.contains(r#""kind":"Assignment""#), "{text}");
}

#[test]
fn test_malformed_json_is_a_parse_error() {
    let err = parse_tree("{\"kind\": \"Program\",\n \"children\": [").expect_err("truncated");
    match err {
        InputError::Parse { location, .. } => assert_eq!(location.line, 2),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_unknown_kind_is_a_parse_error() {
    let err = parse_tree(r#"{"kind": "Spaceship"}"#).expect_err("unknown kind");
    assert!(matches!(err, InputError::Parse { .. }), "{err:?}");
    assert!(err.to_string().contains("Spaceship"), "{err}");
}

#[test]
fn test_excessive_nesting_is_rejected_before_decoding() {
    let text = "[".repeat(MAX_JSON_NESTING + 1);
    let err = parse_tree(&text).expect_err("too deep");
    assert_eq!(
        err,
        InputError::TooDeep {
            depth: MAX_JSON_NESTING + 1,
            limit: MAX_JSON_NESTING,
        }
    );
}

#[test]
fn test_brackets_inside_strings_do_not_count_as_nesting() {
    let name = format!("{}\\\"{}", "[".repeat(MAX_JSON_NESTING + 5), "{");
    let text = json!({"kind": "StringLiteral", "value": name}).to_string();
    let node = parse_tree(&text).expect("string content is not nesting");
    assert!(matches!(node.kind(), NodeKind::StringLiteral { .. }));
}

#[test]
fn test_root_must_be_a_program() {
    let err = load_program(&ident("x").to_string()).expect_err("not a program");
    assert!(matches!(err, InputError::Shape { kind: "Identifier", .. }), "{err:?}");
}

#[test]
fn test_shape_errors_surface_through_load_program() {
    let text = json!({
        "kind": "Program",
        "children": [{
            "kind": "Assignment",
            "op": "=",
            "line": 12,
            "children": [{"kind": "NumericLiteral", "value": 1}, ident("x")]
        }]
    })
    .to_string();
    let err = load_program(&text).expect_err("literal target");
    assert_eq!(err.line(), Some(12));
}

use super::*;
use jsbox_ast::BinaryOp;

fn tx(args: Vec<Node>) -> Node {
    Node::call(Node::ident("tx"), args)
}

#[test]
fn test_string_literal_arguments_pass() {
    let program = Node::program(vec![
        tx(vec![Node::string("Hello"), Node::ident("name")]).at_line(1),
        Node::call(Node::ident("other"), vec![Node::ident("x")]).at_line(2),
    ]);
    assert!(check_translation_calls(&program, DEFAULT_TRANSLATION_FUNCTION).is_empty());
}

#[test]
fn test_non_literal_arguments_are_reported_with_their_line() {
    let program = Node::program(vec![
        tx(vec![Node::ident("greeting")]).at_line(3),
        tx(vec![Node::binary(
            Node::string("a"),
            BinaryOp::Plus,
            Node::ident("b"),
        )])
        .at_line(7),
    ]);
    let violations = check_translation_calls(&program, "tx");
    assert_eq!(
        violations,
        [
            Violation {
                line: Some(3),
                call: "tx(greeting)".to_string(),
            },
            Violation {
                line: Some(7),
                call: r#"tx("a"+b)"#.to_string(),
            },
        ]
    );
}

#[test]
fn test_missing_argument_is_a_violation() {
    let program = Node::program(vec![tx(vec![])]);
    let violations = check_translation_calls(&program, "tx");
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].line, None);
}

#[test]
fn test_nested_calls_inherit_the_enclosing_line() {
    let inner = tx(vec![Node::ident("label")]);
    let program = Node::program(vec![
        Node::ret(Some(Node::call(Node::ident("f"), vec![inner]))).at_line(12),
    ]);
    let violations = check_translation_calls(&program, "tx");
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].line, Some(12));
}

#[test]
fn test_function_name_is_configurable() {
    let program = Node::program(vec![Node::call(
        Node::ident("translate"),
        vec![Node::ident("x")],
    )]);
    assert!(check_translation_calls(&program, "tx").is_empty());
    assert_eq!(check_translation_calls(&program, "translate").len(), 1);
}

#[test]
fn test_member_calls_are_not_translation_calls() {
    let program = Node::program(vec![Node::call(
        Node::static_member(Node::ident("intl"), "tx"),
        vec![Node::ident("x")],
    )]);
    assert!(check_translation_calls(&program, "tx").is_empty());
}

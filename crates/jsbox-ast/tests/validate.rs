use super::*;
use crate::kind::{BinaryOp, JumpKind, PostfixOp};

fn rejects(node: &Node) -> InputError {
    validate(node).expect_err("malformed tree should be rejected")
}

fn message(err: &InputError) -> String {
    match err {
        InputError::Shape { message, .. } => message.clone(),
        other => panic!("expected a shape error, got {other:?}"),
    }
}

#[test]
fn test_builder_trees_are_valid() {
    let program = Node::program(vec![
        Node::var_decl(vec![
            Node::declarator("a", None),
            Node::declarator("b", Some(Node::number(1.0))),
        ]),
        Node::function_decl("f", ["x"], vec![Node::ret(Some(Node::ident("x")))]),
        Node::for_in(
            Node::iterator_var("k"),
            Node::ident("o"),
            Node::statement_list(vec![Node::continue_stmt(None)]),
        ),
        Node::try_stmt(
            Node::statement_list(vec![]),
            None,
            Some(Node::statement_list(vec![])),
        ),
        Node::switch_stmt(
            Node::ident("x"),
            vec![Node::case_clause(Node::number(1.0)), Node::default_clause()],
        ),
        Node::postfix(PostfixOp::Increment, Node::static_member(Node::ident("o"), "n")),
    ]);
    assert_eq!(validate_program(&program), Ok(()));
}

#[test]
fn test_missing_required_child_reports_line() {
    let broken = Node::new(NodeKind::While)
        .push(Node::ident("x"))
        .push_opt(None)
        .at_line(8);
    let err = rejects(&Node::program(vec![broken]));
    assert_eq!(err.line(), Some(8));
    assert_eq!(message(&err), "missing loop body");
}

#[test]
fn test_wrong_arity() {
    let err = rejects(&Node::new(NodeKind::Operator { op: BinaryOp::Plus }).push(Node::ident("a")));
    assert_eq!(message(&err), "expected 2 children, found 1");
}

#[test]
fn test_call_arguments_must_be_an_arg_list() {
    let call = Node::new(NodeKind::FunctionConstructor)
        .push(Node::ident("F"))
        .push(Node::ident("x"));
    let err = rejects(&call);
    assert_eq!(message(&err), "arguments must be an ArgList, found Identifier");
}

#[test]
fn test_assignment_target_must_be_assignable() {
    let assignment = Node::assign(Node::number(1.0), Node::ident("x"));
    assert_eq!(message(&rejects(&assignment)), "cannot assign to a NumericLiteral node");

    let parenthesized = Node::assign(Node::ident("x").paren(), Node::number(1.0));
    assert_eq!(validate(&parenthesized), Ok(()));

    let increment = Node::postfix(PostfixOp::Decrement, Node::call(Node::ident("f"), vec![]));
    assert!(rejects(&increment).to_string().contains("FunctionCall"));
}

#[test]
fn test_var_declarators() {
    let bad = Node::var_decl(vec![Node::number(3.0)]);
    assert_eq!(message(&rejects(&bad)), "declarator cannot be a NumericLiteral node");

    let empty = Node::var_decl(vec![]);
    assert_eq!(message(&rejects(&empty)), "declaration without declarators");
}

#[test]
fn test_function_parameters_must_be_identifiers() {
    let mut function = Node::function_decl("f", ["a"], vec![]);
    if let Some(params) = function.child_mut(1) {
        params.append_child(Some(Node::number(2.0)));
    }
    assert_eq!(
        message(&rejects(&function)),
        "parameter must be an identifier, found NumericLiteral"
    );

    let anonymous = Node::new(NodeKind::FunctionDeclaration)
        .push_opt(None)
        .push(Node::arg_list(vec![]))
        .push(Node::statement_list(vec![]));
    assert_eq!(message(&rejects(&anonymous)), "function declaration without a name");
}

#[test]
fn test_try_needs_a_handler() {
    let bare = Node::try_stmt(Node::statement_list(vec![]), None, None);
    assert_eq!(message(&rejects(&bare)), "try without catch or finally");

    let half_catch = Node::new(NodeKind::Try)
        .push(Node::statement_list(vec![]))
        .push(Node::ident("e"));
    assert_eq!(
        message(&rejects(&half_catch)),
        "catch variable without a catch block"
    );
}

#[test]
fn test_jump_operands() {
    let labelled = Node::jump(JumpKind::Break, Some(Node::number(1.0)));
    assert_eq!(
        message(&rejects(&labelled)),
        "jump label must be an identifier, found NumericLiteral"
    );

    let throw = Node::jump(JumpKind::Throw, None);
    assert_eq!(message(&rejects(&throw)), "throw without an operand");
}

#[test]
fn test_for_in_declares_one_variable() {
    let two = Node::for_in(
        Node::var_decl(vec![Node::ident("a"), Node::ident("b")]),
        Node::ident("o"),
        Node::statement_list(vec![]),
    );
    assert_eq!(message(&rejects(&two)), "for-in declares exactly one variable");
}

#[test]
fn test_switch_allows_one_default() {
    let switch = Node::switch_stmt(
        Node::ident("x"),
        vec![Node::default_clause(), Node::default_clause()],
    );
    assert_eq!(message(&rejects(&switch)), "more than one default clause");
}

#[test]
fn test_object_literal_keys() {
    let object = Node::object(vec![Node::property(
        Node::call(Node::ident("k"), vec![]),
        Node::number(1.0),
    )]);
    assert_eq!(
        message(&rejects(&object)),
        "property key cannot be a FunctionCall node"
    );
}

#[test]
fn test_statements_are_rejected_where_values_are_read() {
    let argument = Node::call(
        Node::ident("f"),
        vec![Node::var_decl(vec![Node::ident("x")])],
    );
    assert_eq!(
        message(&rejects(&Node::program(vec![argument]))),
        "argument must be an expression, found VarDeclaration"
    );

    let operand = Node::new(NodeKind::Operator { op: BinaryOp::Plus })
        .push(Node::ident("a"))
        .push(Node::var_decl(vec![Node::ident("x")]));
    assert_eq!(
        message(&rejects(&operand)),
        "right operand must be an expression, found VarDeclaration"
    );

    let object = Node::static_member(Node::statement_list(vec![]), "x");
    assert_eq!(
        message(&rejects(&object)),
        "object must be an expression, found StatementList"
    );

    let value = Node::object(vec![Node::property(
        Node::ident("k"),
        Node::while_stmt(Node::ident("c"), Node::empty()),
    )]);
    assert_eq!(
        message(&rejects(&value)),
        "property value must be an expression, found While"
    );

    let returned = Node::ret(Some(Node::break_stmt(None)));
    assert_eq!(
        message(&rejects(&returned)),
        "operand must be an expression, found Jump"
    );
}

#[test]
fn test_optional_value_slots() {
    let holes = Node::new(NodeKind::ArrayLiteral)
        .push(Node::number(1.0))
        .push_opt(None)
        .push(Node::empty());
    assert_eq!(validate(&holes), Ok(()));

    let spread = Node::new(NodeKind::ArrayLiteral).push(Node::default_clause());
    assert_eq!(
        message(&rejects(&spread)),
        "array element must be an expression, found DefaultClause"
    );

    let counted = Node::for_loop(
        Some(Node::var_decl(vec![Node::declarator("i", Some(Node::number(0.0)))])),
        Some(Node::empty()),
        None,
        Node::empty(),
    );
    assert_eq!(validate(&counted), Ok(()));

    let stepped = Node::for_loop(
        None,
        None,
        Some(Node::if_stmt(Node::ident("a"), Node::empty(), None)),
        Node::empty(),
    );
    assert_eq!(
        message(&rejects(&stepped)),
        "loop update must be an expression, found If"
    );
}

#[test]
fn test_errors_are_reported_depth_first() {
    let program = Node::program(vec![
        Node::if_stmt(
            Node::ident("a"),
            Node::statement_list(vec![Node::var_decl(vec![]).at_line(2)]),
            None,
        ),
        Node::var_decl(vec![]).at_line(5),
    ]);
    assert_eq!(rejects(&program).line(), Some(2));
}

#[test]
fn test_deep_trees_are_rejected() {
    let mut node = Node::ident("x");
    for _ in 0..MAX_TREE_DEPTH {
        node = node.paren();
    }
    assert!(matches!(rejects(&node), InputError::TooDeep { .. }));
}

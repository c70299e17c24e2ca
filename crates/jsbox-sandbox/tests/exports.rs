use super::*;

#[test]
fn test_top_level_vars_and_functions_are_exported() {
    let program = Node::program(vec![
        Node::var_decl(vec![
            Node::declarator("b", None),
            Node::declarator("a", Some(Node::number(1.0))),
        ]),
        Node::function_decl("render", ["x"], vec![Node::var_decl(vec![Node::ident("local")])]),
        Node::if_stmt(
            Node::ident("c"),
            Node::statement_list(vec![Node::var_decl(vec![Node::ident("nested")])]),
            None,
        ),
    ]);
    let globals: Vec<_> = collect_exported_globals(&program).into_iter().collect();
    assert_eq!(globals, ["a", "b", "nested", "render"]);
}

#[test]
fn test_function_expressions_export_nothing() {
    let program = Node::program(vec![Node::var_decl(vec![Node::declarator(
        "handler",
        Some(Node::function_expr(
            Some("named".to_string()),
            Vec::<&str>::new(),
            vec![Node::var_decl(vec![Node::ident("inner")])],
        )),
    )])]);
    let globals: Vec<_> = collect_exported_globals(&program).into_iter().collect();
    assert_eq!(globals, ["handler"]);
}

#[test]
fn test_empty_program_exports_nothing() {
    assert!(collect_exported_globals(&Node::program(vec![])).is_empty());
}

use super::*;
use smallvec::smallvec;

fn scope_of(names: &[&str]) -> Scope {
    names.iter().map(|name| name.to_string()).collect()
}

fn locals(body: Vec<Node>) -> Vec<String> {
    let mut scope = Scope::default();
    collect_locals(&Node::statement_list(body), &mut scope);
    scope.into_iter().collect()
}

#[test]
fn test_collect_locals_finds_vars_and_function_declarations() {
    let body = vec![
        Node::var_decl(vec![
            Node::declarator("a", None),
            Node::declarator("b", Some(Node::number(1.0))),
        ]),
        Node::if_stmt(
            Node::ident("c"),
            Node::statement_list(vec![Node::var_decl(vec![Node::declarator("d", None)])]),
            None,
        ),
        Node::function_decl("inner", ["p"], vec![Node::var_decl(vec![Node::ident("hidden")])]),
        Node::for_in(
            Node::iterator_var("k"),
            Node::ident("o"),
            Node::statement_list(vec![]),
        ),
    ];
    assert_eq!(locals(body), ["a", "b", "d", "inner", "k"]);
}

#[test]
fn test_collect_locals_skips_function_expressions() {
    let body = vec![Node::assign(
        Node::ident("f"),
        Node::function_expr(
            Some("named".to_string()),
            ["x"],
            vec![Node::var_decl(vec![Node::ident("y")])],
        ),
    )];
    assert!(locals(body).is_empty());
}

#[test]
fn test_collect_locals_walks_with_and_try_bodies() {
    let body = vec![
        Node::with_stmt(
            Node::ident("o"),
            Node::statement_list(vec![Node::var_decl(vec![Node::ident("w")])]),
        ),
        Node::try_stmt(
            Node::statement_list(vec![Node::var_decl(vec![Node::ident("t")])]),
            Some((
                "e".to_string(),
                Node::statement_list(vec![Node::var_decl(vec![Node::ident("c")])]),
            )),
            None,
        ),
    ];
    assert_eq!(locals(body), ["w", "t", "c"]);
}

#[test]
fn test_check_scope_searches_every_level() {
    let stack = vec![scope_of(&[]), scope_of(&["a"]), scope_of(&["b"])];
    assert!(check_scope("a", &stack));
    assert!(check_scope("b", &stack));
    assert!(!check_scope("c", &stack));
    assert!(!check_scope("a", &[]));
}

#[test]
fn test_resolve_without_with() {
    let mut stack = ScopeStack::new();
    stack.push(Scope::default());
    stack.push(scope_of(&["x"]));
    assert_eq!(stack.resolve("x"), Resolution::Local);
    assert_eq!(stack.resolve("y"), Resolution::Global);
}

#[test]
fn test_resolve_through_nested_withs_is_innermost_first() {
    let mut stack = ScopeStack::new();
    stack.push(Scope::default());
    stack.push_with("$$with0".to_string());
    stack.push_with("$$with1".to_string());
    assert_eq!(
        stack.resolve("x"),
        Resolution::Dynamic {
            withs: smallvec!["$$with1".to_string(), "$$with0".to_string()],
            bound: false,
        }
    );
    assert_eq!(stack.with_bindings().collect::<Vec<_>>(), ["$$with0", "$$with1"]);
}

#[test]
fn test_resolve_stops_at_the_binding_scope() {
    let mut stack = ScopeStack::new();
    stack.push(Scope::default());
    stack.push_with("$$with0".to_string());
    stack.push(scope_of(&["x"]));
    stack.push_with("$$with1".to_string());

    // Only the with between the use and the binding matters.
    assert_eq!(
        stack.resolve("x"),
        Resolution::Dynamic {
            withs: smallvec!["$$with1".to_string()],
            bound: true,
        }
    );
    assert_eq!(
        stack.resolve("y"),
        Resolution::Dynamic {
            withs: smallvec!["$$with1".to_string(), "$$with0".to_string()],
            bound: false,
        }
    );
}

#[test]
fn test_function_inside_with_sees_its_own_locals_statically() {
    let mut stack = ScopeStack::new();
    stack.push(Scope::default());
    stack.push_with("$$with0".to_string());
    stack.push(scope_of(&["local"]));
    assert_eq!(stack.resolve("local"), Resolution::Local);
    assert!(matches!(
        stack.resolve("free"),
        Resolution::Dynamic { bound: false, .. }
    ));
}

#[test]
fn test_push_and_pop_stay_balanced() {
    let mut stack = ScopeStack::new();
    stack.push(Scope::default());
    stack.push_with("$$with0".to_string());
    assert_eq!((stack.depth(), stack.with_depth()), (2, 1));

    let frame = stack.pop_with().expect("with frame");
    assert_eq!(frame.binding, "$$with0");
    assert_eq!((stack.depth(), stack.with_depth()), (1, 0));
    assert!(stack.pop().is_some());
    assert_eq!(stack.depth(), 0);
}

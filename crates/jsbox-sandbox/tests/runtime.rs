use super::*;
use jsbox_ast::RenderOptions;

fn render(node: &Node) -> String {
    node.render(RenderOptions::COMPACT)
}

#[test]
fn test_namespace_access() {
    let runtime = Runtime::new("sbx", "app");
    assert_eq!(runtime.namespace(), "sbx");
    assert_eq!(runtime.app_id(), "app");
    assert_eq!(render(&runtime.global("x")), r#"sbx.$["app"].x"#);
    assert_eq!(render(&runtime.dont_enum()), "sbx.dontEnum");
}

#[test]
fn test_optional_arguments() {
    let runtime = Runtime::default();
    let object = || Node::ident("o");

    assert_eq!(
        render(&runtime.invoke(object(), Node::string("m"), vec![])),
        r#"jsbox.invoke(o,"m")"#
    );
    assert_eq!(
        render(&runtime.invoke(object(), Node::string("m"), vec![Node::number(1.0)])),
        r#"jsbox.invoke(o,"m",[1])"#
    );
    assert_eq!(
        render(&runtime.alloc(Node::ident("F"), vec![])),
        "jsbox.alloc(F,[])"
    );

    let function = || Node::function_expr(None, Vec::<&str>::new(), vec![]);
    assert_eq!(render(&runtime.ctx(function(), None)), "jsbox.ctx(function(){})");
    assert_eq!(
        render(&runtime.ctx(function(), Some("f"))),
        r#"jsbox.ctx(function(){},"f")"#
    );
}

#[test]
fn test_scope_lists_candidates_in_order() {
    let runtime = Runtime::new("jsbox", "7");
    let probe = runtime.scope(
        vec![runtime.globals(), Node::ident("$$with0")],
        runtime.globals(),
        "x",
    );
    assert_eq!(
        render(&probe),
        r#"jsbox.scope([jsbox.$["7"],$$with0],jsbox.$["7"],"x")"#
    );
}

#[test]
fn test_get_arguments_are_recovered() {
    let runtime = Runtime::default();
    let read = runtime.get(Node::ident("o"), Node::string("p"));
    assert!(runtime.is_primitive_call(&read, "get"));
    assert!(!runtime.is_primitive_call(&read, "set"));

    let (object, property) = runtime
        .into_get_arguments(read)
        .expect("a get call splits into its arguments");
    assert_eq!(object.identifier_name(), Some("o"));
    assert_eq!(render(&property), r#""p""#);

    let foreign = Runtime::new("other", "0").get(Node::ident("o"), Node::string("p"));
    assert!(runtime.into_get_arguments(foreign).is_none());
    assert!(runtime.into_get_arguments(Node::ident("o")).is_none());
}

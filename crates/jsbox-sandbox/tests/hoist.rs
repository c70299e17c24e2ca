use super::*;
use jsbox_ast::RenderOptions;

fn run(body: &mut Node) -> (Vec<String>, Vec<String>) {
    let mut out = Vec::new();
    let mut implied = Scope::default();
    hoist(body, &mut out, &mut implied);
    let rendered = out
        .iter()
        .map(|declaration| declaration.render(RenderOptions::COMPACT))
        .collect();
    (rendered, implied.into_iter().collect())
}

#[test]
fn test_declarations_are_extracted_in_encounter_order() {
    let mut body = Node::statement_list(vec![
        Node::call(Node::ident("a"), vec![]),
        Node::function_decl("f", ["x"], vec![Node::ret(Some(Node::ident("x")))]),
        Node::function_decl("g", Vec::<&str>::new(), vec![]),
    ]);
    let (declarations, implied) = run(&mut body);
    assert_eq!(
        declarations,
        ["f=function(x){return x;}", "g=function(){}"]
    );
    assert_eq!(implied, ["f", "g"]);
    // Vacated slots disappear from statement sequences.
    assert_eq!(body.len(), 1);
    assert_eq!(body.render(RenderOptions::COMPACT), "a();");
}

#[test]
fn test_nested_blocks_are_searched() {
    let mut body = Node::statement_list(vec![Node::if_stmt(
        Node::ident("c"),
        Node::function_decl("inner", Vec::<&str>::new(), vec![]),
        None,
    )]);
    let (declarations, implied) = run(&mut body);
    assert_eq!(declarations, ["inner=function(){}"]);
    assert_eq!(implied, ["inner"]);
    // Outside a sequence the declaration leaves an empty statement.
    assert_eq!(body.render(RenderOptions::COMPACT), "if(c);");
}

#[test]
fn test_function_bodies_are_not_entered() {
    let mut body = Node::statement_list(vec![
        Node::function_decl(
            "outer",
            Vec::<&str>::new(),
            vec![Node::function_decl("hidden", Vec::<&str>::new(), vec![])],
        ),
        Node::assign(
            Node::ident("h"),
            Node::function_expr(
                None,
                Vec::<&str>::new(),
                vec![Node::function_decl("also_hidden", Vec::<&str>::new(), vec![])],
            ),
        ),
    ]);
    let (declarations, implied) = run(&mut body);
    assert_eq!(
        declarations,
        ["outer=function(){function hidden(){}}"]
    );
    assert_eq!(implied, ["outer"]);
    assert!(
        body.render(RenderOptions::COMPACT)
            .contains("function also_hidden(){}")
    );
}

#[test]
fn test_hoist_reports_whether_the_node_stays() {
    let mut out = Vec::new();
    let mut implied = Scope::default();

    let mut declaration = Node::function_decl("f", Vec::<&str>::new(), vec![]).at_line(4);
    assert!(!hoist(&mut declaration, &mut out, &mut implied));
    assert_eq!(declaration.kind(), &NodeKind::EmptyExpression);
    assert_eq!(declaration.line(), Some(4));
    assert_eq!(out[0].line(), Some(4));

    let mut expression = Node::function_expr(Some("g".to_string()), Vec::<&str>::new(), vec![]);
    assert!(hoist(&mut expression, &mut out, &mut implied));
    assert_eq!(out.len(), 1);
}

#[test]
fn test_into_assignment_drops_the_name_from_the_function() {
    let declaration = Node::function_decl("f", ["a", "b"], vec![]);
    let (name, assignment) = into_assignment(declaration);
    assert_eq!(name, "f");
    let function = assignment.child(1).expect("assigned function");
    assert_eq!(function.kind(), &NodeKind::FunctionExpression);
    assert!(function.child(0).is_none());
    assert_eq!(function.child(1).map(Node::len), Some(2));
}

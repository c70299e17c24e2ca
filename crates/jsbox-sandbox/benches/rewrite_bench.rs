//! Rewriter benchmarks.
//!
//! Measures sandboxing throughput on generated programs, with and without
//! the JSON decode in front of it.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use jsbox_ast::{AssignOp, BinaryOp, Node, PostfixOp, RenderOptions, load_program};
use jsbox_sandbox::rewrite_program;

// =============================================================================
// Generated programs
// =============================================================================

/// One function exercising the common rewrites: locals, globals, member
/// reads and writes, method calls, `new`, for-in and `with`.
fn generate_function(index: usize, statements: usize) -> Node {
    let mut body = vec![Node::var_decl(vec![Node::declarator(
        "acc",
        Some(Node::new_expr(Node::ident("Map"), vec![])),
    )])];
    for s in 0..statements {
        body.push(Node::assign_op(
            AssignOp::PlusAssign,
            Node::static_member(Node::ident("o"), format!("f{s}")),
            Node::binary(Node::ident("x"), BinaryOp::Mult, Node::number(s as f64)),
        ));
        body.push(Node::call(
            Node::static_member(Node::ident("acc"), "set"),
            vec![Node::string(format!("k{s}")), Node::ident("x")],
        ));
    }
    body.push(Node::for_in(
        Node::iterator_var("key"),
        Node::ident("o"),
        Node::call(Node::ident("log"), vec![Node::ident("key")]),
    ));
    body.push(Node::with_stmt(
        Node::ident("o"),
        Node::statement_list(vec![Node::postfix(PostfixOp::Increment, Node::ident("count"))]),
    ));
    body.push(Node::ret(Some(Node::ident("acc"))));
    Node::function_decl(format!("fn{index}"), ["o", "x"], body)
}

fn generate_program(functions: usize, statements: usize) -> Node {
    let mut program: Vec<Node> = (0..functions)
        .map(|f| generate_function(f, statements))
        .collect();
    for f in 0..functions {
        program.push(Node::call(
            Node::ident(format!("fn{f}")),
            vec![Node::object(vec![]), Node::number(f as f64)],
        ));
    }
    Node::program(program)
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_rewrite(c: &mut Criterion) {
    let mut group = c.benchmark_group("rewrite");

    for (functions, statements) in [(10, 5), (50, 5), (100, 10)] {
        let program = generate_program(functions, statements);
        let label = format!("{functions}fn_{statements}stmt");

        group.bench_with_input(BenchmarkId::new("rewrite", &label), &program, |b, program| {
            b.iter(|| black_box(rewrite_program(program.clone(), "bench")))
        });
        group.bench_with_input(
            BenchmarkId::new("rewrite_render", &label),
            &program,
            |b, program| {
                b.iter(|| {
                    let output = rewrite_program(program.clone(), "bench");
                    black_box(output.render(RenderOptions::COMPACT))
                })
            },
        );
    }

    group.finish();
}

fn bench_load_and_rewrite(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_rewrite");

    for functions in [10, 50] {
        let json = serde_json::to_string(&generate_program(functions, 5))
            .unwrap_or_default();
        group.throughput(Throughput::Bytes(json.len() as u64));
        group.bench_with_input(BenchmarkId::new("json", functions), &json, |b, json| {
            b.iter(|| {
                let program = load_program(json).ok()?;
                Some(black_box(
                    rewrite_program(program, "bench").render(RenderOptions::COMPACT),
                ))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rewrite, bench_load_and_rewrite);
criterion_main!(benches);

//! Programs, functions and `var` declarations.
//!
//! Every function is rewritten into
//!
//! ```text
//! NS.ctx(function (_$a, _$b) { var <locals and temps>; <hoisted>; <body> }, "name")
//! ```
//!
//! Locals are renamed with the local prefix and declared once, up front.
//! Hoisted declarations come next, then the remaining statements. A
//! function created inside a `with` body is additionally wrapped in a
//! closure over the active `with` holders.

use jsbox_ast::{AssignOp, Node, NodeKind};
use tracing::{debug, trace};

use super::{Rewriter, required};
use crate::hoist::{hoist, into_assignment};
use crate::invariant_violation;
use crate::names::local_name;
use crate::scope::{Resolution, Scope, collect_locals};

impl Rewriter {
    /// Rewrite the root of a program. The root scope is empty, so every
    /// name the program binds lives in the global namespace.
    pub fn rewrite_program(&mut self, mut program: Node) -> Node {
        let line = program.line();
        let mut hoisted = Vec::new();
        let mut implied = Scope::default();
        hoist(&mut program, &mut hoisted, &mut implied);

        let (mut statements, temps) = {
            let mut guard = self.enter_function(Scope::default());
            let mut statements = guard.rewrite_hoisted(hoisted);
            statements.extend(guard.rewrite_statements(program.into_children()));
            (statements, guard.take_temps())
        };
        if !temps.is_empty() {
            statements.insert(0, declare(temps));
        }

        debug!(
            statements = statements.len(),
            hoisted = implied.len(),
            "program rewritten"
        );
        Node::program(statements).with_line(line)
    }

    /// Rewrite a function expression. `display_name` overrides the name
    /// passed to the runtime context (hoisted declarations lose theirs).
    pub(super) fn rewrite_function(&mut self, function: Node, display_name: Option<&str>) -> Node {
        let (_, line, children) = function.into_parts();
        let mut children = children.into_iter();
        let own_name = children.next().flatten().map(|name| match name.identifier_name() {
            Some(name) => name.to_string(),
            None => invariant_violation("function name is not an identifier"),
        });
        let params: Scope = required(&mut children, "parameter list")
            .into_children()
            .into_iter()
            .map(|param| match param.as_ref().and_then(Node::identifier_name) {
                Some(name) => name.to_string(),
                None => invariant_violation("function parameter is not an identifier"),
            })
            .collect();
        let mut body = required(&mut children, "function body");

        let mut scope = params.clone();
        collect_locals(&body, &mut scope);
        let mut hoisted = Vec::new();
        let mut implied = Scope::default();
        hoist(&mut body, &mut hoisted, &mut implied);

        let mut preface: Vec<String> = scope
            .iter()
            .filter(|name| !params.contains(*name) && !implied.contains(*name))
            .map(|name| local_name(name))
            .collect();
        // A named expression sees itself unless a local shadows it.
        if let Some(name) = &own_name {
            scope.insert(name.clone());
        }
        trace!(
            name = display_name.or(own_name.as_deref()),
            locals = scope.len(),
            hoisted = implied.len(),
            "entering function"
        );

        let (statements, temps) = {
            let mut guard = self.enter_function(scope);
            let mut statements = guard.rewrite_hoisted(hoisted);
            statements.extend(guard.rewrite_statements(body.into_children()));
            (statements, guard.take_temps())
        };
        preface.extend(temps);

        let mut body = Vec::with_capacity(statements.len() + 1);
        if !preface.is_empty() {
            body.push(declare(preface));
        }
        body.extend(statements);

        let function = Node::from_parts(
            NodeKind::FunctionExpression,
            line,
            vec![
                own_name.as_deref().map(|name| Node::ident(local_name(name))),
                Some(Node::arg_list(
                    params.iter().map(|param| Node::ident(local_name(param))).collect(),
                )),
                Some(Node::statement_list(body)),
            ],
        );
        let context = self
            .runtime
            .ctx(function, display_name.or(own_name.as_deref()));
        self.capture_withs(context)
    }

    /// Wrap `value` in `(function ($$with0, ...) { return value; })($$with0, ...)`
    /// when `with` bodies are active, so the function keeps the `with`
    /// objects current at its creation.
    fn capture_withs(&self, value: Node) -> Node {
        if self.scopes.with_depth() == 0 {
            return value;
        }
        let bindings: Vec<&str> = self.scopes.with_bindings().collect();
        trace!(withs = bindings.len(), "capturing with holders");
        let closure = Node::function_expr(
            None,
            bindings.iter().copied(),
            vec![Node::ret(Some(value))],
        );
        Node::call(
            closure.paren(),
            bindings.into_iter().map(Node::ident).collect(),
        )
    }

    /// Rewrite hoisted `name = function () {}` assignments into bindings.
    fn rewrite_hoisted(&mut self, declarations: Vec<Node>) -> Vec<Node> {
        declarations
            .into_iter()
            .map(|declaration| self.rewrite_hoisted_declaration(declaration))
            .collect()
    }

    fn rewrite_hoisted_declaration(&mut self, declaration: Node) -> Node {
        let (_, line, children) = declaration.into_parts();
        let mut children = children.into_iter();
        let name = match required(&mut children, "hoisted name").identifier_name() {
            Some(name) => name.to_string(),
            None => invariant_violation("hoisted name is not an identifier"),
        };
        let function = required(&mut children, "hoisted function");
        let value = self.rewrite_function(function, Some(&name));
        let binding = match self.scopes.resolve(&name) {
            Resolution::Local => {
                Node::var_decl(vec![Node::declarator(local_name(&name), Some(value))])
            }
            Resolution::Global | Resolution::Dynamic { .. } => {
                self.assign_identifier(AssignOp::Assign, &name, value)
            }
        };
        binding.with_line(line)
    }

    /// A function declaration the hoister did not reach.
    pub(super) fn rewrite_stray_declaration(&mut self, declaration: Node) -> Node {
        let (_, assignment) = into_assignment(declaration);
        self.rewrite_hoisted_declaration(assignment)
    }

    /// Rewrite a `var` statement. Declarators without an initializer only
    /// bind a name, which the function preface already does, so they go
    /// away; the rest become assignments.
    ///
    /// In expression position (the head of a `for` loop) the assignments
    /// are chained with commas.
    pub(super) fn rewrite_var(&mut self, declaration: Node, as_expression: bool) -> Option<Node> {
        let iterator = matches!(
            declaration.kind(),
            NodeKind::VarDeclaration { iterator: true }
        );
        let mut assignments = Vec::new();
        for declarator in declaration.into_children().into_iter().flatten() {
            match declarator.kind() {
                NodeKind::Identifier { .. } => {}
                NodeKind::Assignment { .. } => {
                    assignments.push(self.rewrite_expr(Some(declarator)));
                }
                other => {
                    invariant_violation(&format!("declarator cannot be a {} node", other.name()))
                }
            }
        }

        if as_expression || iterator {
            assignments.into_iter().reduce(Node::comma)
        } else if assignments.len() > 1 {
            Some(Node::statement_list(assignments))
        } else {
            assignments.pop()
        }
    }
}

/// `var a, b, c;`
fn declare(names: Vec<String>) -> Node {
    Node::var_decl(names.into_iter().map(Node::ident).collect())
}

//! Statements with their own desugaring: `with`, `for-in`, `for`, `try`,
//! labels, jumps and object literal properties.

use jsbox_ast::{AssignOp, BinaryOp, JumpKind, Node, NodeKind};
use tracing::trace;

use super::{Rewriter, required};
use crate::invariant_violation;
use crate::names::local_name;
use crate::scope::{Scope, declared_name};

impl Rewriter {
    /// `with (o) body` becomes `var $$withN = o; body` with `body` rewritten
    /// under a `with` frame, so free names in it are looked up at run time.
    pub(super) fn rewrite_with(&mut self, node: Node) -> Node {
        let (_, line, children) = node.into_parts();
        let mut children = children.into_iter();
        let object = self.rewrite_expr(children.next().flatten());
        let binding = self.names.with_var();
        trace!(%binding, "desugaring with");

        let holder = Node::var_decl(vec![Node::declarator(&binding, Some(object))]).with_line(line);
        let body = {
            let mut guard = self.enter_with(binding);
            guard.rewrite_statement(children.next().flatten())
        };
        Node::statement_list(vec![holder, body])
    }

    /// ```text
    /// var $$keysN = NS.keys(rhs);
    /// for (I in $$keysN) {
    ///     if ($$keysN[I] !== NS.dontEnum) { [lhs = I;] body }
    /// }
    /// ```
    ///
    /// `I` is the loop variable itself when it is a plain local or global,
    /// otherwise a fresh `$$keyN` stored into the real target on each
    /// iteration.
    pub(super) fn rewrite_for_in(&mut self, node: Node) -> Node {
        let (_, line, children) = node.into_parts();
        let mut children = children.into_iter();
        let lhs = required(&mut children, "loop variable");
        let rhs = children.next().flatten();
        let body = children.next().flatten();

        let keys = self.names.keys_var();
        trace!(%keys, "desugaring for-in");
        let enumerated = self.rewrite_expr(rhs);
        let snapshot = Node::var_decl(vec![Node::declarator(
            &keys,
            Some(self.runtime.keys(enumerated)),
        )])
        .with_line(line);

        let target = match lhs.kind() {
            NodeKind::VarDeclaration { .. } => match lhs.child(0).and_then(declared_name) {
                Some(name) => Node::ident(name),
                None => invariant_violation("for-in declaration without a variable"),
            },
            _ => match lhs.into_assignment_target() {
                Some(target) => target,
                None => invariant_violation("for-in over a non-assignable target"),
            },
        };
        let is_plain = match target.kind() {
            NodeKind::Identifier { name } => !self.is_dynamic(name),
            _ => false,
        };

        let (variable, index, store) = if is_plain {
            let variable = self.rewrite_expr(Some(target));
            (variable.clone(), variable, None)
        } else {
            let key = self.names.key_var();
            let store = self.assign_to(AssignOp::Assign, target, Node::ident(&key));
            (Node::iterator_var(&key), Node::ident(key), Some(store))
        };

        let body = self.rewrite_statement(body);
        let body = match store {
            Some(store) => Node::statement_list(vec![store, body]),
            None => body,
        };
        let enumerable = Node::binary(
            Node::dynamic_member(Node::ident(&keys), index),
            BinaryOp::StrictNotEqual,
            self.runtime.dont_enum(),
        );
        let guarded = Node::if_stmt(enumerable, body, None);
        let the_loop = Node::for_in(
            variable,
            Node::ident(keys),
            Node::statement_list(vec![guarded]),
        )
        .with_line(line);
        Node::statement_list(vec![snapshot, the_loop])
    }

    /// A `var` heading a `for` loop is rewritten as a comma expression.
    pub(super) fn rewrite_for_loop(&mut self, node: Node) -> Node {
        let (kind, line, children) = node.into_parts();
        let mut children = children.into_iter();
        let init = children.next().flatten().and_then(|init| {
            if matches!(init.kind(), NodeKind::VarDeclaration { .. }) {
                self.rewrite_var(init, true)
            } else {
                self.rewrite(init)
            }
        });
        let test = children.next().flatten().and_then(|test| self.rewrite(test));
        let update = children.next().flatten().and_then(|update| self.rewrite(update));
        let body = self.rewrite_statement(children.next().flatten());
        Node::from_parts(kind, line, vec![init, test, update, Some(body)])
    }

    /// The catch variable gets a scope of its own for the handler.
    pub(super) fn rewrite_try(&mut self, node: Node) -> Node {
        let (kind, line, children) = node.into_parts();
        let mut children = children.into_iter();
        let block = self.rewrite_statement(children.next().flatten());
        let catch_var = children.next().flatten();
        let handler = children.next().flatten();
        let finalizer = children.next().flatten();

        let (catch_var, handler) = match (catch_var, handler) {
            (Some(var), Some(handler)) => {
                let name = match var.identifier_name() {
                    Some(name) => name.to_string(),
                    None => invariant_violation("catch variable is not an identifier"),
                };
                let handler = {
                    let scope: Scope = std::iter::once(name.clone()).collect();
                    let mut guard = self.enter_scope(scope);
                    guard.rewrite_statement(Some(handler))
                };
                (
                    Some(Node::ident(local_name(&name)).with_line(var.line())),
                    Some(handler),
                )
            }
            (None, None) => (None, None),
            _ => invariant_violation("catch variable and catch block must come together"),
        };
        let finalizer = finalizer.map(|finalizer| self.rewrite_statement(Some(finalizer)));
        Node::from_parts(kind, line, vec![Some(block), catch_var, handler, finalizer])
    }

    /// Label names are not references. A labelled loop that desugars into a
    /// statement list keeps the label on the loop, so `continue label` still
    /// names an iteration statement.
    pub(super) fn rewrite_label(&mut self, node: Node) -> Node {
        let (kind, line, children) = node.into_parts();
        let mut children = children.into_iter();
        let label = children.next().flatten();
        let statement = children.next().flatten();
        let labels_loop = statement.as_ref().is_some_and(|s| is_loop(s.kind()));
        let statement = self.rewrite_statement(statement);

        if !labels_loop || !matches!(statement.kind(), NodeKind::StatementList) {
            return Node::from_parts(kind, line, vec![label, Some(statement)]);
        }
        let (list_kind, list_line, mut items) = statement.into_parts();
        let Some(last) = items.iter().rposition(Option::is_some) else {
            let list = Node::from_parts(list_kind, list_line, items);
            return Node::from_parts(kind, line, vec![label, Some(list)]);
        };
        let the_loop = items[last].take();
        items[last] = Some(Node::from_parts(kind, line, vec![label, the_loop]));
        trace!("label moved onto desugared loop");
        Node::from_parts(list_kind, list_line, items)
    }

    /// `break`/`continue` carry a label, `return`/`throw` a value.
    pub(super) fn rewrite_jump(&mut self, op: JumpKind, node: Node) -> Node {
        if op.takes_label() {
            return node;
        }
        self.rewrite_children(node)
    }

    /// Property keys are names, not references.
    pub(super) fn rewrite_property(&mut self, node: Node) -> Node {
        let (kind, line, children) = node.into_parts();
        let mut children = children.into_iter();
        let key = children.next().flatten();
        let value = self.rewrite_expr(children.next().flatten());
        Node::from_parts(kind, line, vec![key, Some(value)])
    }
}

fn is_loop(kind: &NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::ForIn | NodeKind::ForLoop | NodeKind::While | NodeKind::DoWhile
    )
}

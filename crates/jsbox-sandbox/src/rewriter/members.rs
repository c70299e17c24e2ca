//! Property access, calls, construction, `delete` and `++`/`--`.
//!
//! Every member expression is split into a rewritten (object, property)
//! pair, `a.b` giving `(a', "b")` and `a[b]` giving `(a', b')`, and the
//! operation becomes a runtime call on that pair. A bare name under a
//! `with` splits the same way: its rewrite is `NS.get(container, "name")`,
//! and the call's two arguments are the pair.

use jsbox_ast::{AssignOp, BinaryOp, Node, NodeKind, UnaryOp};
use tracing::trace;

use super::{Rewriter, grouped, peeled, required, sequence, unwrap_parens};
use crate::invariant_violation;
use crate::scope::Resolution;

impl Rewriter {
    // =========================================================================
    // Member split
    // =========================================================================

    /// Split a member expression (or a name under a `with`) into its
    /// rewritten object and property.
    fn split_member(&mut self, target: Node) -> (Node, Node) {
        let target = unwrap_parens(target);
        match target.kind() {
            NodeKind::StaticMemberExpression => {
                let mut children = target.into_children().into_iter();
                let object = required(&mut children, "member object");
                let object = self.rewrite_expr(Some(object));
                let property = match required(&mut children, "member name").identifier_name() {
                    Some(name) => Node::string(name),
                    None => invariant_violation("static member name is not an identifier"),
                };
                (object, property)
            }
            NodeKind::DynamicMemberExpression => {
                let mut children = target.into_children().into_iter();
                let object = self.rewrite_expr(children.next().flatten());
                let property = self.rewrite_expr(children.next().flatten());
                (object, property)
            }
            NodeKind::Identifier { .. } => {
                let read = self.rewrite_expr(Some(target));
                match self.runtime.into_get_arguments(read) {
                    Some(pair) => pair,
                    None => invariant_violation("statically resolved name split as a member"),
                }
            }
            other => invariant_violation(&format!("cannot split a {} node", other.name())),
        }
    }

    /// Evaluate `expr` once and refer to it again later. Returns the first
    /// use (`$$tmpN = expr`, or `expr` itself when re-evaluating is free)
    /// and the later reference.
    fn evaluate_once(&mut self, expr: Node) -> (Node, Node) {
        if expr.is_trivially_pure() {
            let again = expr.clone();
            return (expr, again);
        }
        let temp = self.temp();
        (Node::assign(Node::ident(&temp), expr), Node::ident(temp))
    }

    pub(super) fn rewrite_member_read(&mut self, member: Node) -> Node {
        let (object, property) = self.split_member(member);
        self.runtime.get(object, property)
    }

    // =========================================================================
    // Assignment
    // =========================================================================

    pub(super) fn rewrite_assignment(&mut self, op: AssignOp, assignment: Node) -> Node {
        let mut children = assignment.into_children().into_iter();
        let target = match required(&mut children, "assignment target").into_assignment_target() {
            Some(target) => target,
            None => invariant_violation("assignment to a non-assignable target"),
        };
        let value = self.rewrite_expr(children.next().flatten());
        self.assign_to(op, target, value)
    }

    /// Store an already rewritten `value` into an unrewritten `target`.
    pub(super) fn assign_to(&mut self, op: AssignOp, target: Node, value: Node) -> Node {
        match target.kind() {
            NodeKind::Identifier { name } => self.assign_identifier(op, name, value),
            NodeKind::StaticMemberExpression | NodeKind::DynamicMemberExpression => {
                self.assign_member(op, target, value)
            }
            other => invariant_violation(&format!("cannot assign to a {} node", other.name())),
        }
    }

    fn assign_member(&mut self, op: AssignOp, target: Node, value: Node) -> Node {
        let (object, property) = self.split_member(target);
        let Some(binary) = op.binary_op() else {
            return self.runtime.set(object, property, value);
        };
        trace!(op = op.as_str(), "desugaring compound member assignment");
        let (object, object_again) = self.evaluate_once(object);
        let (property, property_again) = self.evaluate_once(property);
        let current = self.runtime.get(object_again, property_again);
        self.runtime
            .set(object, property, Node::binary(current, binary, grouped(value)))
    }

    // =========================================================================
    // Increment and decrement
    // =========================================================================

    /// `++x`, `x++`, `--o.p`, ... Plain variables keep the operator; member
    /// operands and names under a `with` are desugared into reads and
    /// writes.
    pub(super) fn rewrite_update(&mut self, node: Node, step: BinaryOp, prefix: bool) -> Node {
        let (kind, line, children) = node.into_parts();
        let mut children = children.into_iter();
        let operand = match required(&mut children, "operand").into_assignment_target() {
            Some(operand) => operand,
            None => invariant_violation("increment of a non-assignable operand"),
        };
        match operand.kind() {
            NodeKind::Identifier { name } => match self.scopes.resolve(name) {
                Resolution::Dynamic { withs, bound } => {
                    self.update_dynamic(name, &withs, bound, step, prefix)
                }
                Resolution::Local | Resolution::Global => {
                    let operand = self.rewrite_expr(Some(operand));
                    Node::from_parts(kind, line, vec![Some(operand)])
                }
            },
            NodeKind::StaticMemberExpression | NodeKind::DynamicMemberExpression => {
                self.update_member(operand, step, prefix)
            }
            other => invariant_violation(&format!("cannot increment a {} node", other.name())),
        }
    }

    /// Prefix: `NS.set(o, p, +NS.get(o, p) + 1)`.
    /// Postfix: `($$v = +NS.get(o, p), NS.set(o, p, $$v + 1), $$v)`.
    ///
    /// `o` and `p` are bound to temporaries first unless re-evaluating
    /// them is free.
    fn update_member(&mut self, operand: Node, step: BinaryOp, prefix: bool) -> Node {
        trace!(prefix, "desugaring member increment");
        let (object, property) = self.split_member(operand);
        let (object, object_again) = self.evaluate_once(object);
        let (property, property_again) = self.evaluate_once(property);
        let one = Node::number(1.0);

        if prefix {
            let current = Node::unary(
                UnaryOp::Plus,
                self.runtime.get(object_again, property_again),
            );
            return self
                .runtime
                .set(object, property, Node::binary(current, step, one));
        }

        let old = self.temp();
        let capture = Node::assign(
            Node::ident(&old),
            Node::unary(UnaryOp::Plus, self.runtime.get(object, property)),
        );
        let store = self.runtime.set(
            object_again,
            property_again,
            Node::binary(Node::ident(&old), step, one),
        );
        sequence(vec![capture, store, Node::ident(old)])
    }

    // =========================================================================
    // Delete
    // =========================================================================

    /// `delete x` is `true`; `delete o.p` is `NS.expunge(o, p)`. Anything
    /// else is evaluated and deleted as before.
    pub(super) fn rewrite_delete(&mut self, node: Node) -> Node {
        let (kind, line, children) = node.into_parts();
        let operand = required(&mut children.into_iter(), "operand");
        match peeled(&operand).kind() {
            NodeKind::Identifier { .. } => Node::boolean(true),
            NodeKind::StaticMemberExpression | NodeKind::DynamicMemberExpression => {
                let (object, property) = self.split_member(operand);
                self.runtime.expunge(object, property)
            }
            _ => {
                let operand = self.rewrite_expr(Some(operand));
                Node::from_parts(kind, line, vec![Some(operand)])
            }
        }
    }

    // =========================================================================
    // Calls and construction
    // =========================================================================

    /// Method calls become `NS.invoke(o, p, [args])`, the argument array
    /// omitted when there are none. Other calls stay direct.
    pub(super) fn rewrite_call(&mut self, call: Node) -> Node {
        let (kind, line, children) = call.into_parts();
        let mut children = children.into_iter();
        let callee = required(&mut children, "callee");
        let args = required(&mut children, "argument list");

        let is_method = match peeled(&callee).kind() {
            NodeKind::StaticMemberExpression | NodeKind::DynamicMemberExpression => true,
            NodeKind::Identifier { name } => self.is_dynamic(name),
            _ => false,
        };
        if is_method {
            let (object, property) = self.split_member(callee);
            let args = self.rewrite_arguments(args, "call");
            return self.runtime.invoke(object, property, args);
        }

        let callee = self.rewrite_expr(Some(callee));
        let args = self.rewrite_arguments(args, "call");
        Node::from_parts(kind, line, vec![Some(callee), Some(Node::arg_list(args))])
    }

    /// `new F(args)` becomes `NS.alloc(F, [args])`.
    pub(super) fn rewrite_new(&mut self, node: Node) -> Node {
        let mut children = node.into_children().into_iter();
        let constructor = required(&mut children, "constructor");
        let args = required(&mut children, "argument list");
        let constructor = self.rewrite_expr(Some(constructor));
        let args = self.rewrite_arguments(args, "new");
        self.runtime.alloc(constructor, args)
    }

    fn rewrite_arguments(&mut self, args: Node, context: &str) -> Vec<Node> {
        if !matches!(args.kind(), NodeKind::ArgList) {
            invariant_violation(&format!(
                "{context} arguments must be an ArgList, found {}",
                args.kind().name()
            ));
        }
        args.into_children()
            .into_iter()
            .map(|arg| self.rewrite_expr(arg))
            .collect()
    }

    pub(super) fn rewrite_this(&self, this: Node) -> Node {
        if self.wrap_this {
            self.runtime.that(this)
        } else {
            this
        }
    }
}

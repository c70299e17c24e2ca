//! Declaration hoisting.
//!
//! Function declarations run before anything else in their scope. The
//! hoister pulls every declaration out of a body (at any depth short of a
//! nested function) and turns it into `name = function (...) {...}`, so the
//! rewriter can emit them ahead of the remaining statements.

use jsbox_ast::{Node, NodeKind};
use tracing::trace;

use crate::invariant_violation;
use crate::scope::Scope;

/// Extract the function declarations under `node`.
///
/// Declarations are appended to `out` in encounter order and their names
/// recorded in `implied`. An extracted declaration leaves nothing behind in
/// a statement sequence and an empty statement anywhere else. Function
/// expressions are not entered.
///
/// Returns whether `node` itself stays in its parent: `false` only for a
/// function declaration, which has been replaced in place by an empty
/// statement.
pub fn hoist(node: &mut Node, out: &mut Vec<Node>, implied: &mut Scope) -> bool {
    match node.kind() {
        NodeKind::FunctionDeclaration => {
            let line = node.line();
            let declaration = std::mem::replace(node, Node::empty().with_line(line));
            let (name, assignment) = into_assignment(declaration);
            trace!(%name, "hoisting function declaration");
            implied.insert(name);
            out.push(assignment);
            false
        }
        NodeKind::FunctionExpression => true,
        _ if node.kind().is_statement_sequence() => {
            let mut children = node.take_children();
            children.retain_mut(|slot| match slot {
                Some(child) => hoist(child, out, implied),
                None => true,
            });
            node.set_children(children);
            true
        }
        _ => {
            for child in node.children_mut().iter_mut().flatten() {
                hoist(child, out, implied);
            }
            true
        }
    }
}

/// Turn `function name(params) { body }` into
/// `name = function (params) { body }`, keeping the declaration's line.
pub fn into_assignment(declaration: Node) -> (String, Node) {
    let (_, line, children) = declaration.into_parts();
    let mut children = children.into_iter();
    let name = children
        .next()
        .flatten()
        .and_then(|name| name.identifier_name().map(str::to_string))
        .unwrap_or_else(|| invariant_violation("function declaration without a name"));
    let function = Node::from_parts(
        NodeKind::FunctionExpression,
        line,
        std::iter::once(None).chain(children).collect(),
    );
    let assignment = Node::assign(Node::ident(&name), function).with_line(line);
    (name, assignment)
}

#[cfg(test)]
#[path = "../tests/hoist.rs"]
mod tests;

//! The sandboxing rewriter.
//!
//! [`Rewriter::rewrite`] consumes a node and returns its sandboxed
//! replacement, or `None` when the node disappears (a `var` without
//! initializers). It dispatches on the node kind with one exhaustive match;
//! the per-kind rewrites live in the submodules:
//!
//! - `functions`: programs, functions, hoisted declarations, `var`
//! - `identifiers`: variable reads and writes, `with` lookups
//! - `members`: property access, calls, `new`, `delete`, `++`/`--`
//! - `statements`: `with`, `for-in`, `for`, `try`, labels and jumps
//!
//! Scope and `with` frames are pushed through [`ScopeGuard`]s, so the stacks
//! are balanced on every exit path.

mod functions;
mod guard;
mod identifiers;
mod members;
mod statements;

use jsbox_ast::{BinaryOp, Node, NodeKind, UnaryOp};

use crate::names::NameGen;
use crate::runtime::Runtime;
use crate::scope::ScopeStack;
use crate::{SandboxOptions, invariant_violation};

pub use guard::ScopeGuard;

/// Per-function bookkeeping.
#[derive(Debug, Default)]
struct FunctionFrame {
    /// Generated temporaries to declare in the function's `var` preface.
    temps: Vec<String>,
}

/// State of one rewrite. Not reentrant; use one per tree.
#[derive(Debug)]
pub struct Rewriter {
    runtime: Runtime,
    wrap_this: bool,
    scopes: ScopeStack,
    functions: Vec<FunctionFrame>,
    names: NameGen,
}

impl Rewriter {
    pub fn new(options: &SandboxOptions) -> Self {
        Self {
            runtime: Runtime::new(&options.runtime, &options.app_id),
            wrap_this: options.wrap_this,
            scopes: ScopeStack::new(),
            functions: Vec::new(),
            names: NameGen::new(),
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// Whether every scope, `with` and function frame has been popped.
    pub fn is_balanced(&self) -> bool {
        self.scopes.depth() == 0 && self.scopes.with_depth() == 0 && self.functions.is_empty()
    }

    /// Rewrite `node`. The result keeps the node's line unless it already
    /// has one of its own.
    pub fn rewrite(&mut self, node: Node) -> Option<Node> {
        let line = node.line();
        let rewritten = match node.kind() {
            NodeKind::FunctionDeclaration => Some(self.rewrite_stray_declaration(node)),
            NodeKind::FunctionExpression => Some(self.rewrite_function(node, None)),
            NodeKind::VarDeclaration { .. } => self.rewrite_var(node, false),
            NodeKind::Identifier { name } => Some(self.read_identifier(name)),
            NodeKind::This => Some(self.rewrite_this(node)),
            NodeKind::StaticMemberExpression | NodeKind::DynamicMemberExpression => {
                Some(self.rewrite_member_read(node))
            }
            NodeKind::Assignment { op } => {
                let op = *op;
                Some(self.rewrite_assignment(op, node))
            }
            NodeKind::Unary { op } => match *op {
                UnaryOp::Delete => Some(self.rewrite_delete(node)),
                UnaryOp::Increment => Some(self.rewrite_update(node, BinaryOp::Plus, true)),
                UnaryOp::Decrement => Some(self.rewrite_update(node, BinaryOp::Minus, true)),
                UnaryOp::Void
                | UnaryOp::TypeOf
                | UnaryOp::Plus
                | UnaryOp::Minus
                | UnaryOp::BitNot
                | UnaryOp::Not => Some(self.rewrite_children(node)),
            },
            NodeKind::Postfix { op } => {
                let step = op.step_op();
                Some(self.rewrite_update(node, step, false))
            }
            NodeKind::FunctionCall => Some(self.rewrite_call(node)),
            NodeKind::FunctionConstructor => Some(self.rewrite_new(node)),
            NodeKind::With => Some(self.rewrite_with(node)),
            NodeKind::ForIn => Some(self.rewrite_for_in(node)),
            NodeKind::ForLoop => Some(self.rewrite_for_loop(node)),
            NodeKind::Try => Some(self.rewrite_try(node)),
            NodeKind::Label => Some(self.rewrite_label(node)),
            NodeKind::Jump { op } => {
                let op = *op;
                Some(self.rewrite_jump(op, node))
            }
            NodeKind::ObjectLiteralProperty => Some(self.rewrite_property(node)),
            NodeKind::Program
            | NodeKind::StatementList
            | NodeKind::ArgList
            | NodeKind::CaseClause
            | NodeKind::DefaultClause
            | NodeKind::If
            | NodeKind::While
            | NodeKind::DoWhile
            | NodeKind::Switch
            | NodeKind::NumericLiteral { .. }
            | NodeKind::StringLiteral { .. }
            | NodeKind::RegexLiteral { .. }
            | NodeKind::BooleanLiteral { .. }
            | NodeKind::NullLiteral
            | NodeKind::EmptyExpression
            | NodeKind::Operator { .. }
            | NodeKind::ConditionalExpression
            | NodeKind::Parenthetical
            | NodeKind::ObjectLiteral
            | NodeKind::ArrayLiteral => Some(self.rewrite_children(node)),
        };
        rewritten.map(|node| match node.line() {
            Some(_) => node,
            None => node.with_line(line),
        })
    }

    // =========================================================================
    // Child helpers
    // =========================================================================

    /// Rewrite every child. Children that disappear are dropped from
    /// statement sequences and left as empty statements elsewhere; under an
    /// expression every child must produce a value.
    fn rewrite_children(&mut self, node: Node) -> Node {
        let (kind, line, children) = node.into_parts();
        let children = if kind.is_statement_sequence() {
            self.rewrite_statements(children)
                .into_iter()
                .map(Some)
                .collect()
        } else if kind.is_expression() || matches!(kind, NodeKind::ArgList) {
            children
                .into_iter()
                .map(|slot| slot.map(|child| self.rewrite_expr(Some(child))))
                .collect()
        } else {
            children
                .into_iter()
                .map(|slot| slot.map(|child| self.rewrite_statement(Some(child))))
                .collect()
        };
        Node::from_parts(kind, line, children)
    }

    fn rewrite_statements(&mut self, statements: Vec<Option<Node>>) -> Vec<Node> {
        statements
            .into_iter()
            .flatten()
            .filter_map(|statement| self.rewrite(statement))
            .collect()
    }

    /// Rewrite a slot that must hold something; a statement that
    /// disappears becomes an empty statement.
    fn rewrite_statement(&mut self, node: Option<Node>) -> Node {
        let Some(node) = node else {
            return Node::empty();
        };
        let line = node.line();
        self.rewrite(node)
            .unwrap_or_else(|| Node::empty().with_line(line))
    }

    /// Rewrite a child that must produce a value.
    fn rewrite_expr(&mut self, node: Option<Node>) -> Node {
        let Some(node) = node else {
            invariant_violation("missing operand");
        };
        let kind = node.kind().name();
        self.rewrite(node)
            .unwrap_or_else(|| invariant_violation(&format!("{kind} used as a value")))
    }

    /// Allocate a temporary in the innermost function.
    fn temp(&mut self) -> String {
        let name = self.names.temp_var();
        match self.functions.last_mut() {
            Some(frame) => frame.temps.push(name.clone()),
            None => invariant_violation("temporary requested outside of any function"),
        }
        name
    }
}

// =============================================================================
// Tree helpers
// =============================================================================

/// Strip any number of enclosing parentheses.
fn unwrap_parens(mut node: Node) -> Node {
    while matches!(node.kind(), NodeKind::Parenthetical) {
        match node.take_child(0) {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

/// The node under any enclosing parentheses.
fn peeled(mut node: &Node) -> &Node {
    while let (NodeKind::Parenthetical, Some(inner)) = (node.kind(), node.child(0)) {
        node = inner;
    }
    node
}

/// Parenthesize `node` if an operator next to it could bind into it.
fn grouped(node: Node) -> Node {
    match node.kind() {
        NodeKind::Operator { .. }
        | NodeKind::Assignment { .. }
        | NodeKind::ConditionalExpression => node.paren(),
        _ => node,
    }
}

/// `(a, b, c)`
fn sequence(expressions: Vec<Node>) -> Node {
    match expressions.into_iter().reduce(Node::comma) {
        Some(chain) => chain.paren(),
        None => invariant_violation("empty comma sequence"),
    }
}

/// Take the next child of a decomposed node, which the layout requires.
fn required(children: &mut impl Iterator<Item = Option<Node>>, what: &str) -> Node {
    children
        .next()
        .flatten()
        .unwrap_or_else(|| invariant_violation(&format!("missing {what}")))
}

#[cfg(test)]
#[path = "../../tests/rewriter.rs"]
mod tests;

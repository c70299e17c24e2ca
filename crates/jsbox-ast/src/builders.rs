//! Constructor helpers for building trees in code.
//!
//! These keep rewriter output and test fixtures readable:
//! `Node::call(Node::ident("f"), vec![Node::number(1.0)])` instead of
//! spelling out kinds and child slots by hand.

use crate::kind::{AssignOp, BinaryOp, JumpKind, NodeKind, PostfixOp, UnaryOp};
use crate::node::Node;

fn some_all(nodes: Vec<Node>) -> Vec<Option<Node>> {
    nodes.into_iter().map(Some).collect()
}

impl Node {
    // =========================================================================
    // Leaves
    // =========================================================================

    /// Create an identifier node
    pub fn ident(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Identifier { name: name.into() })
    }

    /// Create a string literal; the renderer quotes and escapes it
    pub fn string(value: impl Into<String>) -> Self {
        Self::new(NodeKind::StringLiteral {
            value: value.into(),
            quoted: false,
        })
    }

    pub fn number(value: f64) -> Self {
        Self::new(NodeKind::NumericLiteral { value })
    }

    pub fn regex(pattern: impl Into<String>, flags: impl Into<String>) -> Self {
        Self::new(NodeKind::RegexLiteral {
            pattern: pattern.into(),
            flags: flags.into(),
        })
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(NodeKind::BooleanLiteral { value })
    }

    pub fn null() -> Self {
        Self::new(NodeKind::NullLiteral)
    }

    pub fn this() -> Self {
        Self::new(NodeKind::This)
    }

    pub fn empty() -> Self {
        Self::new(NodeKind::EmptyExpression)
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    pub fn binary(left: Self, op: BinaryOp, right: Self) -> Self {
        Self::new(NodeKind::Operator { op }).push(left).push(right)
    }

    /// `left, right`
    pub fn comma(left: Self, right: Self) -> Self {
        Self::binary(left, BinaryOp::Comma, right)
    }

    /// Create a plain `=` assignment
    pub fn assign(target: Self, value: Self) -> Self {
        Self::assign_op(AssignOp::Assign, target, value)
    }

    pub fn assign_op(op: AssignOp, target: Self, value: Self) -> Self {
        Self::new(NodeKind::Assignment { op }).push(target).push(value)
    }

    pub fn unary(op: UnaryOp, operand: Self) -> Self {
        Self::new(NodeKind::Unary { op }).push(operand)
    }

    pub fn postfix(op: PostfixOp, operand: Self) -> Self {
        Self::new(NodeKind::Postfix { op }).push(operand)
    }

    /// Wrap in parentheses
    pub fn paren(self) -> Self {
        Self::new(NodeKind::Parenthetical).push(self)
    }

    pub fn conditional(cond: Self, then: Self, otherwise: Self) -> Self {
        Self::new(NodeKind::ConditionalExpression)
            .push(cond)
            .push(then)
            .push(otherwise)
    }

    pub fn arg_list(args: Vec<Self>) -> Self {
        let mut node = Self::new(NodeKind::ArgList);
        node.set_children(some_all(args));
        node
    }

    /// Create a call expression
    pub fn call(callee: Self, args: Vec<Self>) -> Self {
        Self::new(NodeKind::FunctionCall)
            .push(callee)
            .push(Self::arg_list(args))
    }

    /// `new callee(args)`
    pub fn new_expr(callee: Self, args: Vec<Self>) -> Self {
        Self::new(NodeKind::FunctionConstructor)
            .push(callee)
            .push(Self::arg_list(args))
    }

    /// `object.name`
    pub fn static_member(object: Self, name: impl Into<String>) -> Self {
        Self::new(NodeKind::StaticMemberExpression)
            .push(object)
            .push(Self::ident(name))
    }

    /// `object[property]`
    pub fn dynamic_member(object: Self, property: Self) -> Self {
        Self::new(NodeKind::DynamicMemberExpression)
            .push(object)
            .push(property)
    }

    pub fn array(elements: Vec<Self>) -> Self {
        let mut node = Self::new(NodeKind::ArrayLiteral);
        node.set_children(some_all(elements));
        node
    }

    pub fn object(properties: Vec<Self>) -> Self {
        let mut node = Self::new(NodeKind::ObjectLiteral);
        node.set_children(some_all(properties));
        node
    }

    /// `key: value` inside an object literal
    pub fn property(key: Self, value: Self) -> Self {
        Self::new(NodeKind::ObjectLiteralProperty)
            .push(key)
            .push(value)
    }

    /// Create a function expression
    pub fn function_expr<S: Into<String>>(
        name: Option<String>,
        params: impl IntoIterator<Item = S>,
        body: Vec<Self>,
    ) -> Self {
        Self::function(NodeKind::FunctionExpression, name, params, body)
    }

    /// Create a function declaration
    pub fn function_decl<S: Into<String>>(
        name: impl Into<String>,
        params: impl IntoIterator<Item = S>,
        body: Vec<Self>,
    ) -> Self {
        Self::function(
            NodeKind::FunctionDeclaration,
            Some(name.into()),
            params,
            body,
        )
    }

    fn function<S: Into<String>>(
        kind: NodeKind,
        name: Option<String>,
        params: impl IntoIterator<Item = S>,
        body: Vec<Self>,
    ) -> Self {
        let params = params.into_iter().map(Self::ident).collect();
        Self::new(kind)
            .push_opt(name.map(Self::ident))
            .push(Self::arg_list(params))
            .push(Self::statement_list(body))
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub fn program(statements: Vec<Self>) -> Self {
        let mut node = Self::new(NodeKind::Program);
        node.set_children(some_all(statements));
        node
    }

    pub fn statement_list(statements: Vec<Self>) -> Self {
        let mut node = Self::new(NodeKind::StatementList);
        node.set_children(some_all(statements));
        node
    }

    /// `var` with the given declarators, each an `Identifier` or an
    /// `=` assignment to one (see [`Node::declarator`]).
    pub fn var_decl(declarators: Vec<Self>) -> Self {
        let mut node = Self::new(NodeKind::VarDeclaration { iterator: false });
        node.set_children(some_all(declarators));
        node
    }

    /// `var name` heading a loop.
    pub fn iterator_var(name: impl Into<String>) -> Self {
        Self::new(NodeKind::VarDeclaration { iterator: true }).push(Self::ident(name))
    }

    /// A single declarator: `name` or `name = init`.
    pub fn declarator(name: impl Into<String>, init: Option<Self>) -> Self {
        match init {
            Some(init) => Self::assign(Self::ident(name), init),
            None => Self::ident(name),
        }
    }

    pub fn if_stmt(cond: Self, then: Self, otherwise: Option<Self>) -> Self {
        Self::new(NodeKind::If)
            .push(cond)
            .push(then)
            .push_opt(otherwise)
    }

    pub fn while_stmt(cond: Self, body: Self) -> Self {
        Self::new(NodeKind::While).push(cond).push(body)
    }

    pub fn do_while(body: Self, cond: Self) -> Self {
        Self::new(NodeKind::DoWhile).push(body).push(cond)
    }

    pub fn for_loop(
        init: Option<Self>,
        cond: Option<Self>,
        step: Option<Self>,
        body: Self,
    ) -> Self {
        Self::new(NodeKind::ForLoop)
            .push_opt(init)
            .push_opt(cond)
            .push_opt(step)
            .push(body)
    }

    pub fn for_in(lhs: Self, rhs: Self, body: Self) -> Self {
        Self::new(NodeKind::ForIn).push(lhs).push(rhs).push(body)
    }

    pub fn with_stmt(object: Self, body: Self) -> Self {
        Self::new(NodeKind::With).push(object).push(body)
    }

    /// `try block [catch (name) handler] [finally finalizer]`
    pub fn try_stmt(block: Self, catch: Option<(String, Self)>, finally: Option<Self>) -> Self {
        let (catch_var, handler) = match catch {
            Some((name, handler)) => (Some(Self::ident(name)), Some(handler)),
            None => (None, None),
        };
        Self::new(NodeKind::Try)
            .push(block)
            .push_opt(catch_var)
            .push_opt(handler)
            .push_opt(finally)
    }

    /// `switch (discriminant) { body }` where `body` interleaves clause
    /// markers and statements.
    pub fn switch_stmt(discriminant: Self, body: Vec<Self>) -> Self {
        Self::new(NodeKind::Switch)
            .push(discriminant)
            .push(Self::statement_list(body))
    }

    pub fn case_clause(test: Self) -> Self {
        Self::new(NodeKind::CaseClause).push(test)
    }

    pub fn default_clause() -> Self {
        Self::new(NodeKind::DefaultClause)
    }

    pub fn label(name: impl Into<String>, statement: Self) -> Self {
        Self::new(NodeKind::Label)
            .push(Self::ident(name))
            .push(statement)
    }

    /// Create a return statement
    pub fn ret(value: Option<Self>) -> Self {
        Self::jump(JumpKind::Return, value)
    }

    pub fn throw(value: Self) -> Self {
        Self::jump(JumpKind::Throw, Some(value))
    }

    pub fn break_stmt(label: Option<&str>) -> Self {
        Self::jump(JumpKind::Break, label.map(Self::ident))
    }

    pub fn continue_stmt(label: Option<&str>) -> Self {
        Self::jump(JumpKind::Continue, label.map(Self::ident))
    }

    pub fn jump(op: JumpKind, operand: Option<Self>) -> Self {
        let node = Self::new(NodeKind::Jump { op });
        match operand {
            Some(operand) => node.push(operand),
            None => node,
        }
    }
}

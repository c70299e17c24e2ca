//! Shape validation for trees produced by external parsers.
//!
//! The rewriter assumes every node has the child layout of its kind: an `If`
//! has a condition and a then-branch, a call's second child is an argument
//! list, a `var` declarator is an identifier or an `=` assignment to one,
//! and so on. Trees built in code get that for free from the builders;
//! trees decoded from JSON are checked here first, so a malformed input is
//! reported as an input error instead of tripping a rewriter invariant.

use jsbox_common::InputError;
use jsbox_common::limits::MAX_TREE_DEPTH;
use tracing::debug;

use crate::kind::{AssignOp, JumpKind, NodeKind, UnaryOp};
use crate::node::Node;

type Result<T> = std::result::Result<T, InputError>;

/// Validate a whole program: the root must be a `Program` node.
pub fn validate_program(root: &Node) -> Result<()> {
    if !matches!(root.kind(), NodeKind::Program) {
        return Err(InputError::shape(
            root.kind().name(),
            "the root of a program must be a Program node",
            root.line(),
        ));
    }
    validate(root)
}

/// Validate `node` and everything below it. Reports the first violation in
/// depth-first order.
pub fn validate(node: &Node) -> Result<()> {
    let result = check(node, 1);
    if let Err(err) = &result {
        debug!(%err, "tree rejected by shape validation");
    }
    result
}

fn check(node: &Node, depth: usize) -> Result<()> {
    if depth > MAX_TREE_DEPTH {
        return Err(InputError::TooDeep {
            depth,
            limit: MAX_TREE_DEPTH,
        });
    }
    check_layout(node)?;
    for child in node.present_children() {
        check(child, depth + 1)?;
    }
    Ok(())
}

fn error(node: &Node, message: impl Into<String>) -> InputError {
    InputError::shape(node.kind().name(), message, node.line())
}

fn arity(node: &Node, min: usize, max: usize) -> Result<()> {
    let len = node.len();
    if len < min || len > max {
        let expected = if min == max {
            format!("{min}")
        } else {
            format!("{min} to {max}")
        };
        return Err(error(
            node,
            format!("expected {expected} children, found {len}"),
        ));
    }
    Ok(())
}

fn required<'a>(node: &'a Node, index: usize, what: &str) -> Result<&'a Node> {
    node.child(index)
        .ok_or_else(|| error(node, format!("missing {what}")))
}

fn present(node: &Node, index: usize, what: &str) -> Result<()> {
    required(node, index, what)?;
    Ok(())
}

fn no_holes(node: &Node, what: &str) -> Result<()> {
    if node.children().iter().any(Option::is_none) {
        return Err(error(node, format!("{what} has an empty slot")));
    }
    Ok(())
}

fn identifier<'a>(node: &Node, child: &'a Node, what: &str) -> Result<&'a str> {
    child.identifier_name().ok_or_else(|| {
        error(
            node,
            format!("{what} must be an identifier, found {}", child.kind().name()),
        )
    })
}

/// Statements, clauses and lists cannot stand where a value is read.
fn value(node: &Node, child: &Node, what: &str) -> Result<()> {
    let kind = child.kind();
    if kind.is_expression() && !matches!(kind, NodeKind::ObjectLiteralProperty) {
        return Ok(());
    }
    Err(error(
        node,
        format!("{what} must be an expression, found {}", kind.name()),
    ))
}

fn required_value<'a>(node: &'a Node, index: usize, what: &str) -> Result<&'a Node> {
    let child = required(node, index, what)?;
    value(node, child, what)?;
    Ok(child)
}

/// An absent slot or an empty expression is fine, anything else must be a
/// value.
fn optional_value(node: &Node, index: usize, what: &str) -> Result<()> {
    match node.child(index) {
        Some(child) if !matches!(child.kind(), NodeKind::EmptyExpression) => {
            value(node, child, what)
        }
        _ => Ok(()),
    }
}

fn assignable(node: &Node, target: &Node) -> Result<()> {
    if target.assignment_target().is_none() {
        return Err(error(
            node,
            format!("cannot assign to a {} node", target.kind().name()),
        ));
    }
    Ok(())
}

fn check_layout(node: &Node) -> Result<()> {
    match node.kind() {
        NodeKind::Program | NodeKind::StatementList => Ok(()),
        NodeKind::ArgList => no_holes(node, "argument list"),
        NodeKind::ArrayLiteral => {
            for index in 0..node.len() {
                optional_value(node, index, "array element")?;
            }
            Ok(())
        }
        NodeKind::CaseClause => {
            arity(node, 1, 1)?;
            required_value(node, 0, "case test").map(|_| ())
        }
        NodeKind::DefaultClause => arity(node, 0, 0),
        NodeKind::If => {
            arity(node, 2, 3)?;
            required_value(node, 0, "condition")?;
            present(node, 1, "then branch")
        }
        NodeKind::While => {
            arity(node, 2, 2)?;
            required_value(node, 0, "condition")?;
            present(node, 1, "loop body")
        }
        NodeKind::DoWhile => {
            arity(node, 2, 2)?;
            required(node, 0, "loop body")?;
            required_value(node, 1, "condition").map(|_| ())
        }
        NodeKind::ForLoop => check_for_loop(node),
        NodeKind::ForIn => check_for_in(node),
        NodeKind::With => {
            arity(node, 2, 2)?;
            required_value(node, 0, "scope object")?;
            present(node, 1, "body")
        }
        NodeKind::Try => check_try(node),
        NodeKind::Switch => check_switch(node),
        NodeKind::Label => {
            arity(node, 2, 2)?;
            let name = required(node, 0, "label name")?;
            identifier(node, name, "label name")?;
            present(node, 1, "labelled statement")
        }
        NodeKind::Jump { op } => {
            arity(node, 0, 1)?;
            match node.child(0) {
                Some(label) if op.takes_label() => {
                    identifier(node, label, "jump label").map(|_| ())
                }
                None if matches!(op, JumpKind::Throw) => {
                    Err(error(node, "throw without an operand"))
                }
                Some(operand) if !op.takes_label() => value(node, operand, "operand"),
                _ => Ok(()),
            }
        }
        NodeKind::VarDeclaration { .. } => check_var_declaration(node),
        NodeKind::FunctionDeclaration => check_function(node, true),
        NodeKind::FunctionExpression => check_function(node, false),
        NodeKind::Identifier { name } => {
            arity(node, 0, 0)?;
            if name.is_empty() {
                return Err(error(node, "identifier with an empty name"));
            }
            Ok(())
        }
        NodeKind::NumericLiteral { .. }
        | NodeKind::StringLiteral { .. }
        | NodeKind::RegexLiteral { .. }
        | NodeKind::BooleanLiteral { .. }
        | NodeKind::NullLiteral
        | NodeKind::This
        | NodeKind::EmptyExpression => arity(node, 0, 0),
        NodeKind::Operator { .. } => {
            arity(node, 2, 2)?;
            required_value(node, 0, "left operand")?;
            required_value(node, 1, "right operand").map(|_| ())
        }
        NodeKind::Assignment { .. } => {
            arity(node, 2, 2)?;
            let target = required(node, 0, "assignment target")?;
            assignable(node, target)?;
            required_value(node, 1, "assigned value").map(|_| ())
        }
        NodeKind::ConditionalExpression => {
            arity(node, 3, 3)?;
            required_value(node, 0, "condition")?;
            required_value(node, 1, "then value")?;
            required_value(node, 2, "else value").map(|_| ())
        }
        NodeKind::Parenthetical => {
            arity(node, 1, 1)?;
            required_value(node, 0, "inner expression").map(|_| ())
        }
        NodeKind::Unary { op } => {
            arity(node, 1, 1)?;
            let operand = required_value(node, 0, "operand")?;
            if matches!(op, UnaryOp::Increment | UnaryOp::Decrement) {
                assignable(node, operand)?;
            }
            Ok(())
        }
        NodeKind::Postfix { .. } => {
            arity(node, 1, 1)?;
            let operand = required(node, 0, "operand")?;
            assignable(node, operand)
        }
        NodeKind::FunctionCall | NodeKind::FunctionConstructor => {
            arity(node, 2, 2)?;
            required_value(node, 0, "callee")?;
            let args = required(node, 1, "argument list")?;
            if !matches!(args.kind(), NodeKind::ArgList) {
                return Err(error(
                    node,
                    format!("arguments must be an ArgList, found {}", args.kind().name()),
                ));
            }
            for arg in args.present_children() {
                value(node, arg, "argument")?;
            }
            Ok(())
        }
        NodeKind::ObjectLiteral => {
            for property in node.children() {
                match property {
                    Some(p) if matches!(p.kind(), NodeKind::ObjectLiteralProperty) => {}
                    Some(p) => {
                        return Err(error(
                            node,
                            format!("expected a property, found {}", p.kind().name()),
                        ));
                    }
                    None => return Err(error(node, "object literal has an empty slot")),
                }
            }
            Ok(())
        }
        NodeKind::ObjectLiteralProperty => {
            arity(node, 2, 2)?;
            let key = required(node, 0, "property key")?;
            if !matches!(
                key.kind(),
                NodeKind::Identifier { .. }
                    | NodeKind::StringLiteral { .. }
                    | NodeKind::NumericLiteral { .. }
            ) {
                return Err(error(
                    node,
                    format!("property key cannot be a {} node", key.kind().name()),
                ));
            }
            required_value(node, 1, "property value").map(|_| ())
        }
        NodeKind::StaticMemberExpression => {
            arity(node, 2, 2)?;
            required_value(node, 0, "object")?;
            let name = required(node, 1, "property name")?;
            identifier(node, name, "property name").map(|_| ())
        }
        NodeKind::DynamicMemberExpression => {
            arity(node, 2, 2)?;
            required_value(node, 0, "object")?;
            required_value(node, 1, "property expression").map(|_| ())
        }
    }
}

fn check_for_loop(node: &Node) -> Result<()> {
    arity(node, 4, 4)?;
    match node.child(0) {
        Some(init) if matches!(init.kind(), NodeKind::VarDeclaration { .. }) => {}
        _ => optional_value(node, 0, "loop initializer")?,
    }
    optional_value(node, 1, "loop condition")?;
    optional_value(node, 2, "loop update")?;
    present(node, 3, "loop body")
}

fn check_for_in(node: &Node) -> Result<()> {
    arity(node, 3, 3)?;
    let lhs = required(node, 0, "loop variable")?;
    required_value(node, 1, "enumerated object")?;
    required(node, 2, "loop body")?;
    if matches!(lhs.kind(), NodeKind::VarDeclaration { .. }) {
        let declarator = match (lhs.len(), lhs.child(0)) {
            (1, Some(declarator)) => declarator,
            _ => return Err(error(node, "for-in declares exactly one variable")),
        };
        identifier(node, declarator, "for-in variable").map(|_| ())
    } else {
        assignable(node, lhs)
    }
}

fn check_try(node: &Node) -> Result<()> {
    arity(node, 2, 4)?;
    required(node, 0, "try block")?;
    match (node.child(1), node.child(2)) {
        (Some(var), Some(_)) => {
            identifier(node, var, "catch variable")?;
        }
        (None, None) => {
            if node.child(3).is_none() {
                return Err(error(node, "try without catch or finally"));
            }
        }
        (Some(_), None) => return Err(error(node, "catch variable without a catch block")),
        (None, Some(_)) => return Err(error(node, "catch block without a catch variable")),
    }
    Ok(())
}

fn check_switch(node: &Node) -> Result<()> {
    arity(node, 2, 2)?;
    required_value(node, 0, "discriminant")?;
    let body = required(node, 1, "switch body")?;
    if !matches!(body.kind(), NodeKind::StatementList) {
        return Err(error(
            node,
            format!("body must be a StatementList, found {}", body.kind().name()),
        ));
    }
    let defaults = body
        .present_children()
        .filter(|item| matches!(item.kind(), NodeKind::DefaultClause))
        .count();
    if defaults > 1 {
        return Err(error(node, "more than one default clause"));
    }
    Ok(())
}

fn check_var_declaration(node: &Node) -> Result<()> {
    if node.is_empty() {
        return Err(error(node, "declaration without declarators"));
    }
    for declarator in node.children() {
        let Some(declarator) = declarator else {
            return Err(error(node, "declaration has an empty slot"));
        };
        match declarator.kind() {
            NodeKind::Identifier { .. } => {}
            NodeKind::Assignment {
                op: AssignOp::Assign,
            } => {
                let target = required(declarator, 0, "declared name")?;
                identifier(node, target, "declared name")?;
            }
            other => {
                return Err(error(
                    node,
                    format!("declarator cannot be a {} node", other.name()),
                ));
            }
        }
    }
    Ok(())
}

fn check_function(node: &Node, is_declaration: bool) -> Result<()> {
    arity(node, 3, 3)?;
    match node.child(0) {
        Some(name) => {
            identifier(node, name, "function name")?;
        }
        None if is_declaration => return Err(error(node, "function declaration without a name")),
        None => {}
    }

    let params = required(node, 1, "parameter list")?;
    if !matches!(params.kind(), NodeKind::ArgList) {
        return Err(error(
            node,
            format!("parameters must be an ArgList, found {}", params.kind().name()),
        ));
    }
    for param in params.children() {
        match param {
            Some(param) => {
                identifier(node, param, "parameter")?;
            }
            None => return Err(error(node, "parameter list has an empty slot")),
        }
    }

    let body = required(node, 2, "function body")?;
    if !matches!(body.kind(), NodeKind::StatementList) {
        return Err(error(
            node,
            format!("body must be a StatementList, found {}", body.kind().name()),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/validate.rs"]
mod tests;

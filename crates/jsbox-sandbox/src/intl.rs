//! Translation-call lint.
//!
//! Strings passed to the translation function are extracted by a static
//! tool, so its first argument has to be a string literal: `tx("Hello")`
//! is fine, `tx(greeting)` and `tx("a" + b)` are not.

use jsbox_ast::{Node, NodeKind, RenderOptions};
use tracing::debug;

/// Default name of the translation function.
pub const DEFAULT_TRANSLATION_FUNCTION: &str = "tx";

/// A translation call whose first argument is not a string literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Line of the call, or of the nearest enclosing node that has one.
    pub line: Option<u32>,
    /// The offending call, rendered compactly.
    pub call: String,
}

/// Find every call to `function_name` whose first argument is missing or
/// is not a string literal, in source order.
pub fn check_translation_calls(tree: &Node, function_name: &str) -> Vec<Violation> {
    let mut violations = Vec::new();
    visit(tree, function_name, tree.line(), &mut violations);
    debug!(
        function = function_name,
        violations = violations.len(),
        "translation calls checked"
    );
    violations
}

fn visit(node: &Node, function_name: &str, inherited_line: Option<u32>, out: &mut Vec<Violation>) {
    let line = node.line().or(inherited_line);
    if is_call_to(node, function_name) && !has_literal_first_argument(node) {
        out.push(Violation {
            line,
            call: node.render(RenderOptions::COMPACT),
        });
    }
    for child in node.present_children() {
        visit(child, function_name, line, out);
    }
}

fn is_call_to(node: &Node, function_name: &str) -> bool {
    matches!(node.kind(), NodeKind::FunctionCall)
        && node.child(0).and_then(Node::identifier_name) == Some(function_name)
}

fn has_literal_first_argument(call: &Node) -> bool {
    call.child(1)
        .and_then(|args| args.child(0))
        .is_some_and(|first| matches!(first.kind(), NodeKind::StringLiteral { .. }))
}

#[cfg(test)]
#[path = "../tests/intl.rs"]
mod tests;

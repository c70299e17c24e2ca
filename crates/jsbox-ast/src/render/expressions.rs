//! Expression emission.
//!
//! The tree carries explicit `Parenthetical` nodes, so expressions are
//! emitted as-is without precedence analysis. The only spacing decisions
//! made here keep tokens from merging.

use super::Renderer;
use super::helpers::{escape_string, format_number, leading_sign};
use crate::kind::{BinaryOp, NodeKind, UnaryOp};
use crate::node::Node;

const fn sign_char(op: BinaryOp) -> Option<char> {
    match op {
        BinaryOp::Plus => Some('+'),
        BinaryOp::Minus => Some('-'),
        _ => None,
    }
}

const fn unary_sign_char(op: UnaryOp) -> Option<char> {
    match op {
        UnaryOp::Plus | UnaryOp::Increment => Some('+'),
        UnaryOp::Minus | UnaryOp::Decrement => Some('-'),
        _ => None,
    }
}

impl Renderer {
    pub(super) fn emit_optional_expression(&mut self, node: Option<&Node>) {
        if let Some(node) = node {
            self.emit_expression(node);
        }
    }

    pub(super) fn emit_expression(&mut self, node: &Node) {
        match node.kind() {
            NodeKind::Identifier { name } => self.write(name),
            NodeKind::NumericLiteral { value } => self.write(&format_number(*value)),
            NodeKind::StringLiteral { value, quoted } => {
                if *quoted {
                    self.write(value);
                } else {
                    self.write(&escape_string(value));
                }
            }
            NodeKind::RegexLiteral { pattern, flags } => {
                self.write("/");
                self.write(pattern);
                self.write("/");
                self.write(flags);
            }
            NodeKind::BooleanLiteral { value } => self.write(if *value { "true" } else { "false" }),
            NodeKind::NullLiteral => self.write("null"),
            NodeKind::This => self.write("this"),
            NodeKind::EmptyExpression => {}
            NodeKind::Operator { op } => self.emit_binary(node, *op),
            NodeKind::ConditionalExpression => {
                self.emit_optional_expression(node.child(0));
                self.write_spaced("?");
                self.emit_optional_expression(node.child(1));
                self.write_spaced(":");
                self.emit_optional_expression(node.child(2));
            }
            NodeKind::Parenthetical => {
                self.write("(");
                self.emit_optional_expression(node.child(0));
                self.write(")");
            }
            NodeKind::Assignment { op } => {
                self.emit_optional_expression(node.child(0));
                self.write_spaced(op.as_str());
                self.emit_optional_expression(node.child(1));
            }
            NodeKind::Unary { op } => self.emit_unary(node, *op),
            NodeKind::Postfix { op } => {
                self.emit_optional_expression(node.child(0));
                self.write(op.as_str());
            }
            NodeKind::FunctionExpression => self.emit_function(node),
            NodeKind::FunctionCall => {
                self.emit_optional_expression(node.child(0));
                self.emit_arguments(node.child(1));
            }
            NodeKind::FunctionConstructor => {
                self.write("new ");
                self.emit_optional_expression(node.child(0));
                self.emit_arguments(node.child(1));
            }
            NodeKind::ArgList => self.emit_arguments(Some(node)),
            NodeKind::ObjectLiteral => {
                self.write("{");
                self.emit_comma_separated(node.children());
                self.write("}");
            }
            NodeKind::ObjectLiteralProperty => {
                self.emit_optional_expression(node.child(0));
                self.write(":");
                self.write_space();
                self.emit_optional_expression(node.child(1));
            }
            NodeKind::ArrayLiteral => self.emit_array(node),
            NodeKind::StaticMemberExpression => {
                self.emit_member_object(node.child(0));
                self.write(".");
                self.emit_optional_expression(node.child(1));
            }
            NodeKind::DynamicMemberExpression => {
                self.emit_member_object(node.child(0));
                self.write("[");
                self.emit_optional_expression(node.child(1));
                self.write("]");
            }
            NodeKind::VarDeclaration { .. } => self.emit_var_list(node),
            _ => self.emit_statement(node),
        }
    }

    fn emit_binary(&mut self, node: &Node, op: BinaryOp) {
        self.emit_optional_expression(node.child(0));
        let right = node.child(1);
        match op {
            BinaryOp::Comma => {
                self.write(",");
                self.write_space();
            }
            op if op.is_keyword() => {
                self.write(" ");
                self.write(op.as_str());
                self.write(" ");
            }
            op => {
                self.write_space();
                self.write(op.as_str());
                let collides =
                    sign_char(op).is_some() && sign_char(op) == right.and_then(leading_sign);
                if collides && !self.pretty() {
                    self.write(" ");
                } else {
                    self.write_space();
                }
            }
        }
        self.emit_optional_expression(right);
    }

    fn emit_unary(&mut self, node: &Node, op: UnaryOp) {
        let operand = node.child(0);
        self.write(op.as_str());
        if op.is_keyword() {
            if !operand.is_some_and(|o| matches!(o.kind(), NodeKind::Parenthetical)) {
                self.write(" ");
            }
        } else if unary_sign_char(op).is_some()
            && unary_sign_char(op) == operand.and_then(leading_sign)
        {
            self.write(" ");
        }
        self.emit_optional_expression(operand);
    }

    fn emit_member_object(&mut self, object: Option<&Node>) {
        match object {
            // `1.toString` would lex as a malformed number
            Some(object) if matches!(object.kind(), NodeKind::NumericLiteral { .. }) => {
                self.write("(");
                self.emit_expression(object);
                self.write(")");
            }
            object => self.emit_optional_expression(object),
        }
    }

    fn emit_array(&mut self, node: &Node) {
        self.write("[");
        let elements = node.children();
        for (i, element) in elements.iter().enumerate() {
            if i > 0 {
                self.write(",");
                self.write_space();
            }
            self.emit_optional_expression(element.as_ref());
        }
        // A trailing hole needs its own comma: `[1,,]` has length 2.
        if elements.last().is_some_and(Option::is_none) {
            self.write(",");
        }
        self.write("]");
    }

    fn emit_arguments(&mut self, args: Option<&Node>) {
        self.write("(");
        if let Some(args) = args {
            self.emit_comma_separated(args.children());
        }
        self.write(")");
    }

    /// Present nodes separated by `,` (`, ` in pretty mode).
    pub(super) fn emit_comma_separated(&mut self, nodes: &[Option<Node>]) {
        for (i, node) in nodes.iter().flatten().enumerate() {
            if i > 0 {
                self.write(",");
                self.write_space();
            }
            self.emit_expression(node);
        }
    }

    /// `function name(params) { body }`
    pub(super) fn emit_function(&mut self, node: &Node) {
        self.write("function");
        if let Some(name) = node.child(0).and_then(Node::identifier_name) {
            self.write(" ");
            self.write(name);
        }
        self.emit_arguments(node.child(1));
        self.emit_braced(node.child(2));
    }
}

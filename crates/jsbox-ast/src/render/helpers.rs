use std::fmt::Write as _;

use super::Renderer;
use crate::kind::{NodeKind, UnaryOp};
use crate::node::Node;

impl Renderer {
    // =========================================================================
    // Output primitives
    // =========================================================================

    pub(super) fn write(&mut self, text: &str) {
        let newlines = text.bytes().filter(|&b| b == b'\n').count();
        self.line += u32::try_from(newlines).unwrap_or(u32::MAX);
        self.output.push_str(text);
    }

    pub(super) fn write_line(&mut self) {
        self.output.push('\n');
        self.line += 1;
    }

    pub(super) fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str("  ");
        }
    }

    /// Write a space in pretty mode only.
    pub(super) fn write_space(&mut self) {
        if self.options.pretty {
            self.output.push(' ');
        }
    }

    /// Write `text`, padded with spaces on both sides in pretty mode.
    pub(super) fn write_spaced(&mut self, text: &str) {
        self.write_space();
        self.write(text);
        self.write_space();
    }

    pub(super) const fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub(super) const fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    pub(super) const fn pretty(&self) -> bool {
        self.options.pretty
    }

    /// Pad with newlines until the output reaches `line`. Returns whether
    /// any padding was written.
    pub(super) fn catch_up_to(&mut self, line: Option<u32>) -> bool {
        if !self.options.maintain_line_numbers {
            return false;
        }
        let Some(target) = line else {
            return false;
        };
        let mut padded = false;
        while self.line < target {
            self.write_line();
            padded = true;
        }
        padded
    }

    pub(super) fn is_at_start(&self) -> bool {
        self.output.is_empty()
    }
}

// =============================================================================
// Literal formatting
// =============================================================================

/// Format a number the way JavaScript source spells it.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else {
        format!("{value}")
    }
}

/// Quote `value` as a double-quoted JavaScript string literal.
pub fn escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if (c as u32) < 0x20 || c == '\x7F' => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// The sign an expression's rendering starts with, if any. Used to keep
/// `a - -b` from collapsing into `a--b`.
pub(super) fn leading_sign(node: &Node) -> Option<char> {
    match node.kind() {
        NodeKind::Unary { op } => match op {
            UnaryOp::Plus | UnaryOp::Increment => Some('+'),
            UnaryOp::Minus | UnaryOp::Decrement => Some('-'),
            _ => None,
        },
        NodeKind::NumericLiteral { value } if value.is_sign_negative() => Some('-'),
        NodeKind::Operator { .. }
        | NodeKind::Assignment { .. }
        | NodeKind::ConditionalExpression
        | NodeKind::Postfix { .. }
        | NodeKind::FunctionCall
        | NodeKind::StaticMemberExpression
        | NodeKind::DynamicMemberExpression => node.child(0).and_then(leading_sign),
        _ => None,
    }
}

/// Whether a statement-position expression would start with `function` or
/// `{` and so be misread as a declaration or a block.
pub(super) fn starts_ambiguously(node: &Node) -> bool {
    match node.kind() {
        NodeKind::FunctionExpression | NodeKind::ObjectLiteral => true,
        NodeKind::Operator { .. }
        | NodeKind::Assignment { .. }
        | NodeKind::ConditionalExpression
        | NodeKind::Postfix { .. }
        | NodeKind::FunctionCall
        | NodeKind::StaticMemberExpression
        | NodeKind::DynamicMemberExpression => node.child(0).is_some_and(starts_ambiguously),
        _ => false,
    }
}

//! The syntax tree node.
//!
//! A [`Node`] is a kind, an optional source line, and an ordered list of
//! optional children. Absent children stand for grammar slots that are empty
//! in the source: a missing `else`, an omitted `for` clause, an array hole.
//!
//! Children are owned. Every child-moving operation takes the child by value
//! or hands it back by value, so a node can only ever have one parent.

use serde::{Deserialize, Serialize};

use crate::kind::NodeKind;

/// A syntax tree node.
///
/// Serialized as a JSON object holding a `kind` tag, the kind's payload
/// fields beside it, an optional `line`, and a `children` array whose
/// entries are nodes or `null`:
///
/// ```json
/// {"kind": "Assignment", "op": "+=", "line": 3,
///  "children": [{"kind": "Identifier", "name": "x"},
///               {"kind": "NumericLiteral", "value": 1}]}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(flatten)]
    kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Option<Node>>,
}

impl Node {
    /// Create a childless node of the given kind.
    pub const fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            line: None,
            children: Vec::new(),
        }
    }

    /// Reassemble a node from the parts returned by [`Node::into_parts`].
    pub fn from_parts(kind: NodeKind, line: Option<u32>, children: Vec<Option<Node>>) -> Self {
        Self {
            kind,
            line,
            children,
        }
    }

    /// Split a node into its kind, line and children.
    pub fn into_parts(self) -> (NodeKind, Option<u32>, Vec<Option<Node>>) {
        (self.kind, self.line, self.children)
    }

    pub const fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }

    pub const fn line(&self) -> Option<u32> {
        self.line
    }

    pub fn set_line(&mut self, line: Option<u32>) {
        self.line = line;
    }

    /// Builder form of [`Node::set_line`].
    #[must_use]
    pub fn with_line(mut self, line: Option<u32>) -> Self {
        self.line = line;
        self
    }

    /// Builder form of [`Node::set_line`] for a known line.
    #[must_use]
    pub fn at_line(self, line: u32) -> Self {
        self.with_line(Some(line))
    }

    // =========================================================================
    // Children
    // =========================================================================

    pub fn children(&self) -> &[Option<Node>] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Option<Node>] {
        &mut self.children
    }

    /// Number of child slots, present or absent.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// The child in slot `index`, or `None` when the slot is absent or out of
    /// range.
    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index).and_then(Option::as_ref)
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.children.get_mut(index).and_then(Option::as_mut)
    }

    /// Present children, skipping absent slots.
    pub fn present_children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().flatten()
    }

    /// Append a child slot.
    pub fn append_child(&mut self, child: Option<Node>) -> &mut Self {
        self.children.push(child);
        self
    }

    /// Prepend a child slot.
    pub fn prepend_child(&mut self, child: Option<Node>) -> &mut Self {
        self.children.insert(0, child);
        self
    }

    /// Insert a child slot before `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_child(&mut self, index: usize, child: Option<Node>) -> &mut Self {
        self.children.insert(index, child);
        self
    }

    /// Remove slot `index` entirely, shifting later children down.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove_child(&mut self, index: usize) -> Option<Node> {
        self.children.remove(index)
    }

    /// Take the child out of slot `index`, leaving the slot absent.
    /// Out-of-range slots yield `None`.
    pub fn take_child(&mut self, index: usize) -> Option<Node> {
        self.children.get_mut(index).and_then(Option::take)
    }

    /// Put `child` into slot `index`, growing the child list with absent
    /// slots if needed. Returns the previous occupant.
    pub fn replace_child(&mut self, index: usize, child: Option<Node>) -> Option<Node> {
        if index >= self.children.len() {
            self.children.resize_with(index + 1, || None);
        }
        std::mem::replace(&mut self.children[index], child)
    }

    /// Take every child slot, leaving this node childless.
    pub fn take_children(&mut self) -> Vec<Option<Node>> {
        std::mem::take(&mut self.children)
    }

    pub fn set_children(&mut self, children: Vec<Option<Node>>) {
        self.children = children;
    }

    pub fn into_children(self) -> Vec<Option<Node>> {
        self.children
    }

    /// Builder form of [`Node::append_child`] for a present child.
    #[must_use]
    pub fn push(mut self, child: Node) -> Self {
        self.children.push(Some(child));
        self
    }

    /// Builder form of [`Node::append_child`].
    #[must_use]
    pub fn push_opt(mut self, child: Option<Node>) -> Self {
        self.children.push(child);
        self
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The name of an `Identifier` node.
    pub fn identifier_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Identifier { name } => Some(name),
            _ => None,
        }
    }

    pub const fn is_identifier(&self) -> bool {
        matches!(self.kind, NodeKind::Identifier { .. })
    }

    /// The node an assignment to `self` actually targets: identifiers and
    /// member expressions are their own target, a parenthetical forwards to
    /// its operand. Other kinds cannot be assigned to.
    pub fn assignment_target(&self) -> Option<&Node> {
        match self.kind {
            NodeKind::Identifier { .. }
            | NodeKind::StaticMemberExpression
            | NodeKind::DynamicMemberExpression => Some(self),
            NodeKind::Parenthetical => self.child(0).and_then(Node::assignment_target),
            _ => None,
        }
    }

    /// Consuming form of [`Node::assignment_target`].
    pub fn into_assignment_target(self) -> Option<Node> {
        match self.kind {
            NodeKind::Identifier { .. }
            | NodeKind::StaticMemberExpression
            | NodeKind::DynamicMemberExpression => Some(self),
            NodeKind::Parenthetical => self
                .children
                .into_iter()
                .next()
                .flatten()
                .and_then(Node::into_assignment_target),
            _ => None,
        }
    }

    /// Whether the node is an expression free of side effects and cheap to
    /// evaluate twice: identifiers, literals and `this`.
    pub const fn is_trivially_pure(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Identifier { .. }
                | NodeKind::NumericLiteral { .. }
                | NodeKind::StringLiteral { .. }
                | NodeKind::BooleanLiteral { .. }
                | NodeKind::NullLiteral
                | NodeKind::This
        )
    }
}

#[cfg(test)]
#[path = "../tests/node.rs"]
mod tests;

//! Scope analysis.
//!
//! A [`Scope`] is the set of names bound in one function activation:
//! parameters, `var` targets and the names of nested function declarations.
//! Blocks do not open scopes, and neither does `with` (its body is analyzed
//! at the level of the enclosing function).
//!
//! [`ScopeStack`] is the rewriter's view of all scopes enclosing the current
//! node, together with the `with` statements active between them. It decides
//! how a name is accessed: as a renamed local, through the global virtual
//! namespace, or through a runtime lookup when a `with` object might shadow
//! it.

use indexmap::IndexSet;
use jsbox_ast::{Node, NodeKind};
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;

/// Names bound in one function activation, in first-binding order.
pub type Scope = IndexSet<String, FxBuildHasher>;

/// Add every name `body` binds in the current function to `scope`.
///
/// Parameters are expected to be in `scope` already. Nested function
/// declarations contribute their name; nothing inside a nested function
/// (declaration or expression) is visited.
pub fn collect_locals(body: &Node, scope: &mut Scope) {
    match body.kind() {
        NodeKind::FunctionDeclaration => {
            if let Some(name) = body.child(0).and_then(Node::identifier_name) {
                scope.insert(name.to_string());
            }
        }
        NodeKind::FunctionExpression => {}
        NodeKind::VarDeclaration { .. } => {
            for declarator in body.present_children() {
                if let Some(name) = declared_name(declarator) {
                    scope.insert(name.to_string());
                }
            }
        }
        _ => {
            for child in body.present_children() {
                collect_locals(child, scope);
            }
        }
    }
}

/// The name a `var` declarator binds: `x` or `x = init`.
pub fn declared_name(declarator: &Node) -> Option<&str> {
    match declarator.kind() {
        NodeKind::Identifier { name } => Some(name),
        NodeKind::Assignment { .. } => declarator.child(0).and_then(Node::identifier_name),
        _ => None,
    }
}

/// Whether `name` is bound by any scope on the stack.
pub fn check_scope(name: &str, stack: &[Scope]) -> bool {
    stack.iter().rev().any(|scope| scope.contains(name))
}

/// An active `with` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithFrame {
    /// Index of the (empty) scope pushed for the `with` body.
    pub depth: usize,
    /// Generated variable holding the `with` object.
    pub binding: String,
}

/// How an identifier reference must be accessed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Bound in an enclosing function, with no `with` in between.
    Local,
    /// Not bound anywhere and no `with` is active.
    Global,
    /// A `with` object might provide the name at run time.
    Dynamic {
        /// Bindings of the `with` objects in the way, innermost first.
        withs: SmallVec<[String; 4]>,
        /// Whether a scope beyond the `with`s binds the name.
        bound: bool,
    },
}

/// The scopes and `with` statements enclosing the node being rewritten.
#[derive(Debug, Default)]
pub struct ScopeStack {
    scopes: Vec<Scope>,
    withs: SmallVec<[WithFrame; 4]>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, scope: Scope) {
        self.scopes.push(scope);
    }

    pub fn pop(&mut self) -> Option<Scope> {
        debug_assert!(
            self.withs.last().is_none_or(|w| w.depth + 1 < self.scopes.len()),
            "popping a with scope through ScopeStack::pop"
        );
        self.scopes.pop()
    }

    /// Enter a `with` body: record the frame and push its empty scope.
    pub fn push_with(&mut self, binding: String) {
        self.withs.push(WithFrame {
            depth: self.scopes.len(),
            binding,
        });
        self.scopes.push(Scope::default());
    }

    pub fn pop_with(&mut self) -> Option<WithFrame> {
        let frame = self.withs.pop()?;
        debug_assert_eq!(frame.depth + 1, self.scopes.len());
        self.scopes.truncate(frame.depth);
        Some(frame)
    }

    /// Number of scopes on the stack, `with` bodies included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Number of active `with` statements.
    pub fn with_depth(&self) -> usize {
        self.withs.len()
    }

    /// Bindings of the active `with` objects, outermost first.
    pub fn with_bindings(&self) -> impl Iterator<Item = &str> {
        self.withs.iter().map(|frame| frame.binding.as_str())
    }

    pub fn is_bound(&self, name: &str) -> bool {
        check_scope(name, &self.scopes)
    }

    pub fn resolve(&self, name: &str) -> Resolution {
        let mut withs = SmallVec::new();
        let mut frames = self.withs.iter().rev().peekable();
        for (depth, scope) in self.scopes.iter().enumerate().rev() {
            while let Some(frame) = frames.next_if(|frame| frame.depth == depth) {
                withs.push(frame.binding.clone());
            }
            if scope.contains(name) {
                return if withs.is_empty() {
                    Resolution::Local
                } else {
                    Resolution::Dynamic { withs, bound: true }
                };
            }
        }
        if withs.is_empty() {
            Resolution::Global
        } else {
            Resolution::Dynamic {
                withs,
                bound: false,
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/scope.rs"]
mod tests;

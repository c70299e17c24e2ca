//! Variable reads and writes.
//!
//! A name resolves one of three ways (see [`Resolution`]):
//!
//! - a local is renamed: `x` → `_$x`
//! - a global goes through the program's namespace: `NS.$["app"].x`
//! - under a `with`, the container is looked up at run time:
//!   `NS.get(NS.scope([...], known, "x"), "x")`
//!
//! For the run-time lookup the candidates are the `with` holders between
//! the reference and its binding, plus the binding itself: `{x: _$x}` for
//! a local, the namespace for a global. They are listed outermost first.
//! The `known` argument is what to fall back on when no candidate has the
//! name: the namespace for a global, `false` for a local.
//!
//! Writes to a local under a `with` cannot go through a snapshot object, so
//! they probe only the `with` holders and test for the `false` fallback:
//!
//! ```text
//! ($$tmp0 = NS.scope([$$with0], false, "x")) === false
//!     ? _$x = value
//!     : NS.set($$tmp0, "x", value)
//! ```

use jsbox_ast::{AssignOp, BinaryOp, Node, UnaryOp};
use tracing::trace;

use super::{Rewriter, grouped, sequence};
use crate::names::local_name;
use crate::scope::Resolution;

impl Rewriter {
    pub(super) fn read_identifier(&mut self, name: &str) -> Node {
        match self.scopes.resolve(name) {
            Resolution::Local => Node::ident(local_name(name)),
            Resolution::Global => self.runtime.global(name),
            Resolution::Dynamic { withs, bound } => self.read_dynamic(name, &withs, bound),
        }
    }

    /// Whether `name` needs a run-time lookup.
    pub(super) fn is_dynamic(&self, name: &str) -> bool {
        matches!(self.scopes.resolve(name), Resolution::Dynamic { .. })
    }

    /// `target op= value` for a variable. `value` is already rewritten.
    pub(super) fn assign_identifier(&mut self, op: AssignOp, name: &str, value: Node) -> Node {
        match self.scopes.resolve(name) {
            Resolution::Local => Node::assign_op(op, Node::ident(local_name(name)), value),
            Resolution::Global => Node::assign_op(op, self.runtime.global(name), value),
            Resolution::Dynamic { withs, bound } => {
                let value = match op.binary_op() {
                    Some(binary) => Node::binary(
                        self.read_dynamic(name, &withs, bound),
                        binary,
                        grouped(value),
                    ),
                    None => value,
                };
                self.store_dynamic(name, &withs, bound, value)
            }
        }
    }

    /// `++x`, `x--` and friends on a name a `with` may shadow.
    pub(super) fn update_dynamic(
        &mut self,
        name: &str,
        withs: &[String],
        bound: bool,
        step: BinaryOp,
        prefix: bool,
    ) -> Node {
        trace!(name, prefix, "desugaring increment under with");
        let one = Node::number(1.0);
        if prefix {
            let current = Node::unary(UnaryOp::Plus, self.read_dynamic(name, withs, bound));
            return self.store_dynamic(name, withs, bound, Node::binary(current, step, one));
        }
        let old = self.temp();
        let capture = Node::assign(
            Node::ident(&old),
            Node::unary(UnaryOp::Plus, self.read_dynamic(name, withs, bound)),
        );
        let updated = Node::binary(Node::ident(&old), step, one);
        let store = self.store_dynamic(name, withs, bound, updated);
        sequence(vec![capture, store, Node::ident(old)])
    }

    fn read_dynamic(&self, name: &str, withs: &[String], bound: bool) -> Node {
        let container = self.scope_probe(name, withs, bound, true);
        self.runtime.get(container, Node::string(name))
    }

    fn store_dynamic(&mut self, name: &str, withs: &[String], bound: bool, value: Node) -> Node {
        if !bound {
            let container = self.scope_probe(name, withs, false, false);
            return self.runtime.set(container, Node::string(name), value);
        }
        let holder = self.temp();
        let probe = Node::assign(
            Node::ident(&holder),
            self.scope_probe(name, withs, true, false),
        );
        let shadowed = Node::binary(probe.paren(), BinaryOp::StrictEqual, Node::boolean(false));
        let local = Node::assign(Node::ident(local_name(name)), value.clone());
        let with_object = self.runtime.set(Node::ident(holder), Node::string(name), value);
        Node::conditional(shadowed, local, with_object).paren()
    }

    /// `NS.scope([candidates], known, "name")`. `withs` is innermost first.
    fn scope_probe(&self, name: &str, withs: &[String], bound: bool, reading: bool) -> Node {
        let mut candidates: Vec<Node> = withs.iter().map(Node::ident).collect();
        if !bound {
            candidates.push(self.runtime.globals());
        } else if reading {
            candidates.push(Node::object(vec![Node::property(
                Node::ident(name),
                Node::ident(local_name(name)),
            )]));
        }
        candidates.reverse();
        let known = if bound {
            Node::boolean(false)
        } else {
            self.runtime.globals()
        };
        self.runtime.scope(candidates, known, name)
    }
}

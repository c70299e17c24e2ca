//! The runtime surface rewritten code calls into.
//!
//! Rewritten programs assume a namespace object (`jsbox` by default) that
//! provides the primitives below. Only their call shapes are fixed here:
//!
//! | Primitive | Call |
//! |---|---|
//! | property read | `NS.get(obj, prop)` |
//! | property write | `NS.set(obj, prop, value)` |
//! | method call | `NS.invoke(obj, prop, [args]?)` |
//! | construction | `NS.alloc(ctor, [args])` |
//! | property delete | `NS.expunge(obj, prop)` |
//! | enumeration | `NS.keys(obj)` |
//! | receiver | `NS.that(this)` |
//! | `with` lookup | `NS.scope([candidates], known, "name")` |
//! | function context | `NS.ctx(fn, "name"?)` |
//!
//! Globals of a sandboxed program live in `NS.$["<app id>"]`, and
//! `NS.dontEnum` marks keys the `for-in` guard must skip.

use jsbox_ast::{Node, NodeKind};

/// Default name of the runtime namespace object.
pub const DEFAULT_NAMESPACE: &str = "jsbox";

/// Builds calls to the runtime primitives for one namespace and app id.
#[derive(Debug, Clone)]
pub struct Runtime {
    namespace: String,
    app_id: String,
}

impl Runtime {
    pub fn new(namespace: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            app_id: app_id.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    // =========================================================================
    // Namespace access
    // =========================================================================

    /// `NS`
    pub fn ns(&self) -> Node {
        Node::ident(&self.namespace)
    }

    /// `NS.$["app"]`, the container of the program's globals.
    pub fn globals(&self) -> Node {
        Node::dynamic_member(
            Node::static_member(self.ns(), "$"),
            Node::string(&self.app_id),
        )
    }

    /// `NS.$["app"].name`
    pub fn global(&self, name: &str) -> Node {
        Node::static_member(self.globals(), name)
    }

    /// `NS.dontEnum`
    pub fn dont_enum(&self) -> Node {
        Node::static_member(self.ns(), "dontEnum")
    }

    // =========================================================================
    // Primitive calls
    // =========================================================================

    fn primitive(&self, name: &str, args: Vec<Node>) -> Node {
        Node::call(Node::static_member(self.ns(), name), args)
    }

    pub fn get(&self, object: Node, property: Node) -> Node {
        self.primitive("get", vec![object, property])
    }

    pub fn set(&self, object: Node, property: Node, value: Node) -> Node {
        self.primitive("set", vec![object, property, value])
    }

    /// `NS.invoke(obj, prop)` without arguments, `NS.invoke(obj, prop, [args])`
    /// otherwise.
    pub fn invoke(&self, object: Node, property: Node, args: Vec<Node>) -> Node {
        let mut call_args = vec![object, property];
        if !args.is_empty() {
            call_args.push(Node::array(args));
        }
        self.primitive("invoke", call_args)
    }

    pub fn alloc(&self, constructor: Node, args: Vec<Node>) -> Node {
        self.primitive("alloc", vec![constructor, Node::array(args)])
    }

    pub fn expunge(&self, object: Node, property: Node) -> Node {
        self.primitive("expunge", vec![object, property])
    }

    pub fn keys(&self, object: Node) -> Node {
        self.primitive("keys", vec![object])
    }

    pub fn that(&self, this: Node) -> Node {
        self.primitive("that", vec![this])
    }

    /// `NS.scope([candidates], known, "name")`. Candidates are listed
    /// outermost first; the runtime probes them from the end.
    pub fn scope(&self, candidates: Vec<Node>, known: Node, name: &str) -> Node {
        self.primitive(
            "scope",
            vec![Node::array(candidates), known, Node::string(name)],
        )
    }

    pub fn ctx(&self, function: Node, name: Option<&str>) -> Node {
        let mut args = vec![function];
        args.extend(name.map(Node::string));
        self.primitive("ctx", args)
    }

    // =========================================================================
    // Recognizers
    // =========================================================================

    /// The `(obj, prop)` arguments of a `NS.get(obj, prop)` call.
    pub fn into_get_arguments(&self, call: Node) -> Option<(Node, Node)> {
        if !self.is_primitive_call(&call, "get") {
            return None;
        }
        let args = call.into_children().into_iter().nth(1).flatten()?;
        let mut args = args.into_children().into_iter();
        match (args.next(), args.next(), args.next()) {
            (Some(Some(object)), Some(Some(property)), None) => Some((object, property)),
            _ => None,
        }
    }

    /// Whether `node` is a call to `NS.<primitive>`.
    pub fn is_primitive_call(&self, node: &Node, primitive: &str) -> bool {
        if !matches!(node.kind(), NodeKind::FunctionCall) {
            return false;
        }
        let Some(callee) = node.child(0) else {
            return false;
        };
        matches!(callee.kind(), NodeKind::StaticMemberExpression)
            && callee.child(0).and_then(Node::identifier_name) == Some(self.namespace.as_str())
            && callee.child(1).and_then(Node::identifier_name) == Some(primitive)
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE, "0")
    }
}

#[cfg(test)]
#[path = "../tests/runtime.rs"]
mod tests;

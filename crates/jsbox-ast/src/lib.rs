//! Syntax tree model for the jsbox sandboxing compiler.
//!
//! The tree is an owned tree: every [`Node`] owns its children outright, and
//! moving a child from one parent to another consumes it. There are no shared
//! references and no cycles, so dropping a subtree reclaims all of it.
//!
//! # Modules
//!
//! - [`kind`] - the closed set of node kinds and their operator payloads
//! - [`node`] - the `Node` type and its child-list operations
//! - [`builders`] - constructor helpers used by tests and tree rewriters
//! - [`render`] - compact / pretty / line-preserving JavaScript output
//! - [`validate`] - child-layout checks for trees from external parsers
//! - [`loader`] - JSON decoding of serialized trees

pub mod builders;
pub mod kind;
pub mod loader;
pub mod node;
pub mod render;
pub mod validate;

pub use kind::{AssignOp, BinaryOp, JumpKind, NodeKind, PostfixOp, UnaryOp};
pub use loader::{load_program, parse_tree, to_json_string};
pub use node::Node;
pub use render::{RenderOptions, Renderer};
pub use validate::{validate, validate_program};

//! Sandboxing rewrite pass for JavaScript syntax trees.
//!
//! [`rewrite_program`] turns a program into one whose every free variable,
//! property access, method call, construction and `for-in`/`with`/`delete`
//! goes through the runtime surface described in [`runtime`].
//!
//! # Architecture
//!
//! | Module | Role |
//! |--------|------|
//! | [`scope`] | Scope Analyzer: names bound per function, scope stack |
//! | [`hoist`] | Declaration Hoister |
//! | [`rewriter`] | Sandboxing Rewriter, one exhaustive match over node kinds |
//! | [`runtime`] | Builders for runtime primitive calls |
//! | [`names`] | Local renaming and generated-name counters |
//! | [`exports`] | Globals a program introduces |
//! | [`intl`] | Translation-call lint |
//!
//! # Failure semantics
//!
//! Trees that passed `jsbox_ast::validate_program` always rewrite. A shape
//! the rewriter does not expect is a bug, never an input error: it panics
//! through [`invariant_violation`] instead of emitting a partially
//! sandboxed program.

pub mod exports;
pub mod hoist;
pub mod intl;
pub mod names;
pub mod rewriter;
pub mod runtime;
pub mod scope;

pub use exports::collect_exported_globals;
pub use hoist::hoist;
pub use intl::{DEFAULT_TRANSLATION_FUNCTION, Violation, check_translation_calls};
pub use rewriter::Rewriter;
pub use runtime::{DEFAULT_NAMESPACE, Runtime};
pub use scope::{Resolution, Scope, ScopeStack, check_scope, collect_locals};

use jsbox_ast::Node;
use tracing::instrument;

/// Options for one rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxOptions {
    /// Key of the program's global namespace, `NS.$["<app_id>"]`.
    pub app_id: String,
    /// Name of the runtime namespace object.
    pub runtime: String,
    /// Rewrite `this` to `NS.that(this)`.
    pub wrap_this: bool,
}

impl SandboxOptions {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            ..Self::default()
        }
    }
}

impl Default for SandboxOptions {
    fn default() -> Self {
        Self {
            app_id: "0".to_string(),
            runtime: DEFAULT_NAMESPACE.to_string(),
            wrap_this: false,
        }
    }
}

/// Rewrite `tree` with default options for `app_id`.
pub fn rewrite_program(tree: Node, app_id: &str) -> Node {
    rewrite_program_with(tree, &SandboxOptions::new(app_id))
}

/// Rewrite `tree`. A root that is not a `Program` is treated as the only
/// statement of one.
#[instrument(level = "debug", skip_all, fields(app_id = %options.app_id))]
pub fn rewrite_program_with(tree: Node, options: &SandboxOptions) -> Node {
    let program = if matches!(tree.kind(), jsbox_ast::NodeKind::Program) {
        tree
    } else {
        let line = tree.line();
        Node::program(vec![tree]).with_line(line)
    };
    let mut rewriter = Rewriter::new(options);
    let output = rewriter.rewrite_program(program);
    debug_assert!(rewriter.is_balanced(), "scope stack unbalanced after rewrite");
    output
}

/// Abort the rewrite: the tree has a shape the rewriter cannot sandbox.
#[cold]
#[track_caller]
pub(crate) fn invariant_violation(message: &str) -> ! {
    tracing::error!(reason = message, "rewriter invariant violated");
    panic!("rewriter invariant violated: {message}");
}

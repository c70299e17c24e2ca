//! Globals a program introduces.

use std::collections::BTreeSet;

use jsbox_ast::Node;

use crate::scope::{Scope, collect_locals};

/// Names a program defines on the global object: its top-level `var`
/// names and function declaration names, sorted. Functions are not
/// entered; nothing they declare is global.
pub fn collect_exported_globals(program: &Node) -> BTreeSet<String> {
    let mut scope = Scope::default();
    collect_locals(program, &mut scope);
    scope.into_iter().collect()
}

#[cfg(test)]
#[path = "../tests/exports.rs"]
mod tests;

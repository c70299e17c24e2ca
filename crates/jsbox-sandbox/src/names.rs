//! Name generation.
//!
//! Two disjoint name spaces keep rewritten code free of collisions: every
//! user local gets the [`LOCAL_PREFIX`], every generated variable starts
//! with `$$`. A user name never starts with `$$` after renaming because
//! renaming prepends `_$`.

/// Prefix applied to every name bound in a function scope.
pub const LOCAL_PREFIX: &str = "_$";

/// The renamed form of a local `name`.
pub fn local_name(name: &str) -> String {
    format!("{LOCAL_PREFIX}{name}")
}

/// Monotonic counters for generated variables, one per purpose.
///
/// Counters only grow during one rewrite, so two generated names never
/// collide even across sibling functions.
#[derive(Debug, Default)]
pub struct NameGen {
    keys: u32,
    key: u32,
    with: u32,
    temp: u32,
}

impl NameGen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the keys enumerated by a `for-in` loop.
    pub fn keys_var(&mut self) -> String {
        next(&mut self.keys, "$$keys")
    }

    /// Loop variable of a `for-in` whose target is not a plain variable.
    pub fn key_var(&mut self) -> String {
        next(&mut self.key, "$$key")
    }

    /// Holder of a `with` object.
    pub fn with_var(&mut self) -> String {
        next(&mut self.with, "$$with")
    }

    /// Temporary used to evaluate a subexpression once.
    pub fn temp_var(&mut self) -> String {
        next(&mut self.temp, "$$tmp")
    }
}

fn next(counter: &mut u32, prefix: &str) -> String {
    let name = format!("{prefix}{counter}");
    *counter += 1;
    name
}

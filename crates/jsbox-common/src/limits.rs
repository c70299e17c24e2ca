//! Centralized limits and thresholds for the jsbox pipeline.
//!
//! The loader, the shape validator, the rewriter and the renderer all recurse
//! along the depth of the syntax tree. Input trees come from an external
//! parser, so their depth is checked once, before decoding, against the
//! limits below.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum syntax tree depth accepted by the loader.
///
/// Measured in tree levels, not JSON levels: every node contributes one
/// object and one `children` array, so the JSON nesting limit is twice this
/// value (see [`MAX_JSON_NESTING`]).
///
/// # JavaScript example
///
/// ```javascript
/// // Deeply nested calls and member chains grow the tree quickly:
/// f(f(f(f(f(f(f(f(/* ... */))))))));
/// a.b.c.d.e.f.g.h /* ... */;
/// ```
pub const MAX_TREE_DEPTH: usize = 1_000;

/// Maximum JSON nesting depth of a serialized tree.
pub const MAX_JSON_NESTING: usize = MAX_TREE_DEPTH * 2 + 1;

// =============================================================================
// Threading
// =============================================================================

/// Stack size for worker threads that rewrite trees in parallel.
///
/// The rewriter and renderer use one or two frames per tree level; 64 MiB
/// keeps [`MAX_TREE_DEPTH`] trees well clear of the guard page.
pub const WORKER_STACK_SIZE: usize = 64 * 1024 * 1024;

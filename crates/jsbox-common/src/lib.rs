//! Common types and utilities for the jsbox sandboxing compiler.
//!
//! This crate provides foundational types used across all jsbox crates:
//! - Input error reporting (`InputError`, `SourceLocation`)
//! - Limits and thresholds shared by the loader, validator and rewriter

// Errors raised while loading and validating an input tree
pub mod diagnostics;
pub use diagnostics::{InputError, SourceLocation};

// Centralized limits and thresholds
pub mod limits;

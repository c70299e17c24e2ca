//! Input error reporting.
//!
//! The syntax tree handed to jsbox is produced by an external parser and
//! arrives serialized. Everything that can go wrong before the rewrite pass
//! starts is an *input error*: it carries a message and, when known, the
//! location it refers to, and it is fatal for that one input.
//!
//! Bugs inside the rewrite pass are not input errors; they are invariant
//! violations and abort the rewrite instead (see `jsbox_sandbox`).

use std::fmt;
use thiserror::Error;

/// A position in the input, 1-based.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// A location that only knows its line.
    pub const fn line(line: u32) -> Self {
        Self { line, column: 0 }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.column == 0 {
            write!(f, "{}", self.line)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Errors raised while loading or validating an input tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The serialized tree could not be decoded.
    #[error("parse error at {location}: {message}")]
    Parse {
        message: String,
        location: SourceLocation,
    },

    /// The serialized tree nests deeper than the pipeline accepts.
    #[error("input nests {depth} levels deep (limit is {limit})")]
    TooDeep { depth: usize, limit: usize },

    /// A node does not have the child layout its kind requires.
    #[error("malformed {kind} node{}: {message}", format_line(.line))]
    Shape {
        kind: &'static str,
        message: String,
        line: Option<u32>,
    },
}

fn format_line(line: &Option<u32>) -> String {
    line.map(|line| format!(" on line {line}")).unwrap_or_default()
}

impl InputError {
    pub fn parse(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::Parse {
            message: message.into(),
            location,
        }
    }

    pub fn shape(kind: &'static str, message: impl Into<String>, line: Option<u32>) -> Self {
        Self::Shape {
            kind,
            message: message.into(),
            line,
        }
    }

    /// Line the error refers to, when it refers to one.
    pub fn line(&self) -> Option<u32> {
        match self {
            Self::Parse { location, .. } => Some(location.line),
            Self::TooDeep { .. } => None,
            Self::Shape { line, .. } => *line,
        }
    }
}

#[cfg(test)]
#[path = "../tests/diagnostics.rs"]
mod tests;

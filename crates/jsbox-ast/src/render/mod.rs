//! JavaScript renderer.
//!
//! Turns a tree back into source text. Two layout modes:
//!
//! - **compact**: no optional whitespace, single-statement blocks lose their
//!   braces (unless the statement is an `if`, which would capture a
//!   following `else`)
//! - **pretty**: two-space indentation, one statement per line, every block
//!   braced
//!
//! Independently of layout, `maintain_line_numbers` pads the output with
//! newlines so that each statement starts on the line it was recorded at,
//! whenever that line is still ahead of the output. Stack traces from
//! rewritten code then point at the original lines.
//!
//! Rendering is a pure function of the tree and the options.

mod expressions;
mod helpers;
mod statements;

use crate::node::Node;

pub use helpers::{escape_string, format_number};

/// Layout options for [`Renderer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub pretty: bool,
    pub maintain_line_numbers: bool,
}

impl RenderOptions {
    pub const COMPACT: Self = Self {
        pretty: false,
        maintain_line_numbers: false,
    };

    pub const PRETTY: Self = Self {
        pretty: true,
        maintain_line_numbers: false,
    };

    #[must_use]
    pub const fn keep_lines(mut self) -> Self {
        self.maintain_line_numbers = true;
        self
    }
}

/// Writes a tree as JavaScript text.
pub struct Renderer {
    output: String,
    indent_level: u32,
    /// 1-based line the next character lands on.
    line: u32,
    options: RenderOptions,
}

impl Renderer {
    pub const fn new(options: RenderOptions) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            line: 1,
            options,
        }
    }

    /// Render `node` to a string.
    pub fn render(node: &Node, options: RenderOptions) -> String {
        let mut renderer = Self::new(options);
        renderer.emit(node);
        renderer.finish()
    }

    /// Emit one node at the current position: statement sequences and
    /// statements with their layout, expressions bare.
    pub fn emit(&mut self, node: &Node) {
        if node.kind().is_statement_sequence() {
            self.emit_statements(node.children());
        } else if node.kind().is_expression() {
            self.emit_expression(node);
        } else {
            self.emit_statement(node);
        }
    }

    pub fn finish(self) -> String {
        self.output
    }
}

impl Node {
    /// Render this node with the given options.
    pub fn render(&self, options: RenderOptions) -> String {
        Renderer::render(self, options)
    }
}

#[cfg(test)]
#[path = "../../tests/render.rs"]
mod tests;

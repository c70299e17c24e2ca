//! Statement layout: sequences, blocks, and the compound statements.

use super::Renderer;
use super::helpers::starts_ambiguously;
use crate::kind::NodeKind;
use crate::node::Node;

/// How a statement body is laid out.
enum BlockLayout<'a> {
    /// Nothing to run: a lone `;`.
    Empty,
    /// A single statement without braces (compact mode only).
    Bare(&'a Node),
    /// `{ ... }`, possibly with nothing inside.
    Braced(Option<&'a Node>),
}

/// Whether a statement would swallow or confuse its surroundings if emitted
/// without braces.
fn needs_braces(node: &Node) -> bool {
    matches!(
        node.kind(),
        NodeKind::If | NodeKind::FunctionDeclaration | NodeKind::StatementList
    )
}

fn is_nothing(node: &Node) -> bool {
    match node.kind() {
        NodeKind::EmptyExpression => true,
        NodeKind::StatementList => node.present_children().all(is_nothing),
        _ => false,
    }
}

impl Renderer {
    /// Emit a statement sequence. Nested statement lists are flattened into
    /// the enclosing sequence and empty statements are dropped.
    pub(super) fn emit_statements(&mut self, statements: &[Option<Node>]) {
        for statement in statements.iter().flatten() {
            self.emit_statement_item(statement);
        }
    }

    fn emit_statement_item(&mut self, statement: &Node) {
        match statement.kind() {
            NodeKind::StatementList => self.emit_statements(statement.children()),
            NodeKind::EmptyExpression => {}
            _ => {
                self.begin_statement(statement.line());
                self.emit_statement(statement);
            }
        }
    }

    /// Move to where the next statement in a sequence starts.
    fn begin_statement(&mut self, line: Option<u32>) {
        let padded = self.catch_up_to(line);
        if self.pretty() {
            if !padded && !self.is_at_start() {
                self.write_line();
            }
            self.write_indent();
        }
    }

    pub(super) fn emit_statement(&mut self, node: &Node) {
        match node.kind() {
            NodeKind::Program | NodeKind::StatementList => self.emit_statements(node.children()),
            NodeKind::If => self.emit_if(node),
            NodeKind::While => {
                self.emit_keyword_head("while", node.child(0));
                self.emit_block(node.child(1), false);
            }
            NodeKind::DoWhile => {
                self.write("do");
                self.emit_block(node.child(0), true);
                if self.pretty() {
                    self.write(" ");
                }
                self.emit_keyword_head("while", node.child(1));
                self.write(";");
            }
            NodeKind::ForLoop => self.emit_for_loop(node),
            NodeKind::ForIn => {
                self.write("for");
                self.write_space();
                self.write("(");
                self.emit_for_head(node.child(0));
                self.write(" in ");
                self.emit_optional_expression(node.child(1));
                self.write(")");
                self.emit_block(node.child(2), false);
            }
            NodeKind::With => {
                self.emit_keyword_head("with", node.child(0));
                self.emit_block(node.child(1), false);
            }
            NodeKind::Try => self.emit_try(node),
            NodeKind::Switch => self.emit_switch(node),
            NodeKind::CaseClause | NodeKind::DefaultClause => self.emit_clause(node),
            NodeKind::Label => {
                self.emit_optional_expression(node.child(0));
                self.write(":");
                match node.child(1) {
                    Some(body) if body.kind().is_statement_sequence() || needs_braces(body) => {
                        self.emit_braced(Some(body));
                    }
                    Some(body) => {
                        self.write_space();
                        self.emit_statement(body);
                    }
                    None => self.write(";"),
                }
            }
            NodeKind::Jump { op } => {
                self.write(op.as_str());
                if let Some(operand) = node.child(0) {
                    self.write(" ");
                    self.emit_expression(operand);
                }
                self.write(";");
            }
            NodeKind::VarDeclaration { .. } => {
                self.emit_var_list(node);
                self.write(";");
            }
            NodeKind::FunctionDeclaration => self.emit_function(node),
            NodeKind::EmptyExpression => self.write(";"),
            NodeKind::ArgList => self.emit_expression(node),
            _ => {
                if starts_ambiguously(node) {
                    self.write("(");
                    self.emit_expression(node);
                    self.write(")");
                } else {
                    self.emit_expression(node);
                }
                self.write(";");
            }
        }
    }

    /// `keyword (expr)`
    fn emit_keyword_head(&mut self, keyword: &str, expr: Option<&Node>) {
        self.write(keyword);
        self.write_space();
        self.write("(");
        self.emit_optional_expression(expr);
        self.write(")");
    }

    fn emit_if(&mut self, node: &Node) {
        self.emit_keyword_head("if", node.child(0));
        self.emit_block(node.child(1), false);

        let Some(otherwise) = node.child(2) else {
            return;
        };
        if self.pretty() {
            self.write(" else");
        } else {
            self.write("else");
        }
        if matches!(otherwise.kind(), NodeKind::If) {
            self.write(" ");
            self.emit_statement(otherwise);
            return;
        }
        match self.block_layout(Some(otherwise), false) {
            BlockLayout::Bare(statement) => {
                self.write(" ");
                self.emit_statement(statement);
            }
            layout => self.emit_layout(layout),
        }
    }

    fn emit_for_loop(&mut self, node: &Node) {
        self.write("for");
        self.write_space();
        self.write("(");
        self.emit_for_head(node.child(0));
        self.write(";");
        if let Some(cond) = node.child(1) {
            self.write_space();
            self.emit_expression(cond);
        }
        self.write(";");
        if let Some(step) = node.child(2) {
            self.write_space();
            self.emit_expression(step);
        }
        self.write(")");
        self.emit_block(node.child(3), false);
    }

    fn emit_for_head(&mut self, head: Option<&Node>) {
        match head {
            Some(head) if matches!(head.kind(), NodeKind::VarDeclaration { .. }) => {
                self.emit_var_list(head);
            }
            Some(head) => self.emit_expression(head),
            None => {}
        }
    }

    fn emit_try(&mut self, node: &Node) {
        self.write("try");
        self.emit_block(node.child(0), true);
        if let Some(catch_var) = node.child(1) {
            if self.pretty() {
                self.write(" ");
            }
            self.emit_keyword_head("catch", Some(catch_var));
            self.emit_block(node.child(2), true);
        }
        if let Some(finalizer) = node.child(3) {
            if self.pretty() {
                self.write(" ");
            }
            self.write("finally");
            self.emit_block(Some(finalizer), true);
        }
    }

    fn emit_switch(&mut self, node: &Node) {
        self.emit_keyword_head("switch", node.child(0));
        self.write_space();
        self.write("{");
        let items: Vec<&Node> = node
            .child(1)
            .map(|body| body.present_children().collect())
            .unwrap_or_default();
        if items.is_empty() {
            self.write("}");
            return;
        }

        self.increase_indent();
        for item in items {
            match item.kind() {
                NodeKind::CaseClause | NodeKind::DefaultClause => {
                    self.begin_statement(item.line());
                    self.emit_clause(item);
                }
                _ => {
                    self.increase_indent();
                    self.emit_statement_item(item);
                    self.decrease_indent();
                }
            }
        }
        self.decrease_indent();
        if self.pretty() {
            self.write_line();
            self.write_indent();
        }
        self.write("}");
    }

    fn emit_clause(&mut self, node: &Node) {
        match node.child(0) {
            Some(test) if matches!(node.kind(), NodeKind::CaseClause) => {
                self.write("case ");
                self.emit_expression(test);
            }
            _ => self.write("default"),
        }
        self.write(":");
    }

    /// `var a, b = 1` without the trailing semicolon.
    pub(super) fn emit_var_list(&mut self, node: &Node) {
        self.write("var ");
        self.emit_comma_separated(node.children());
    }

    // =========================================================================
    // Blocks
    // =========================================================================

    fn block_layout<'a>(&self, body: Option<&'a Node>, must_brace: bool) -> BlockLayout<'a> {
        let Some(body) = body else {
            return if must_brace {
                BlockLayout::Braced(None)
            } else {
                BlockLayout::Empty
            };
        };
        if is_nothing(body) {
            return if must_brace {
                BlockLayout::Braced(None)
            } else {
                BlockLayout::Empty
            };
        }
        if must_brace || self.pretty() {
            return BlockLayout::Braced(Some(body));
        }

        let single = if body.kind().is_statement_sequence() {
            let mut statements = body.present_children().filter(|s| !is_nothing(s));
            match (statements.next(), statements.next()) {
                (Some(only), None) => only,
                _ => return BlockLayout::Braced(Some(body)),
            }
        } else {
            body
        };
        if needs_braces(single) {
            BlockLayout::Braced(Some(single))
        } else {
            BlockLayout::Bare(single)
        }
    }

    /// Emit the body of a compound statement.
    pub(super) fn emit_block(&mut self, body: Option<&Node>, must_brace: bool) {
        let layout = self.block_layout(body, must_brace);
        self.emit_layout(layout);
    }

    fn emit_layout(&mut self, layout: BlockLayout<'_>) {
        match layout {
            BlockLayout::Empty => self.write(";"),
            BlockLayout::Bare(statement) => self.emit_statement(statement),
            BlockLayout::Braced(body) => self.emit_braced(body),
        }
    }

    /// `{ statements }`, with a leading space in pretty mode.
    pub(super) fn emit_braced(&mut self, body: Option<&Node>) {
        self.write_space();
        self.write("{");
        let Some(body) = body.filter(|b| !is_nothing(b)) else {
            self.write("}");
            return;
        };

        self.increase_indent();
        self.emit_statement_item(body);
        self.decrease_indent();
        if self.pretty() {
            self.write_line();
            self.write_indent();
        }
        self.write("}");
    }
}

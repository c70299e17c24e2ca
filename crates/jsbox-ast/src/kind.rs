//! Node kinds and operator payloads.
//!
//! `NodeKind` is the closed set of syntax node variants. Each variant carries
//! only its literal or operator payload; children live on [`crate::Node`].
//! Operators serialize as their JavaScript spelling so serialized trees stay
//! readable (`{"kind": "Assignment", "op": "+="}`).

use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

/// The kind of a syntax node, with its payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum NodeKind {
    // =========================================================================
    // Containers
    // =========================================================================
    /// Root of a program: statements.
    Program,
    /// A `{ ... }` block or a synthetic statement sequence.
    StatementList,
    /// Call / `new` arguments, or function parameters.
    ArgList,
    /// `case test:` marker inside a switch body.
    CaseClause,
    /// `default:` marker inside a switch body.
    DefaultClause,

    // =========================================================================
    // Statements
    // =========================================================================
    /// `if (cond) then else otherwise`
    If,
    /// `while (cond) body`
    While,
    /// `do body while (cond);`
    DoWhile,
    /// `for (init; cond; step) body`
    ForLoop,
    /// `for (lhs in rhs) body`
    ForIn,
    /// `with (object) body`
    With,
    /// `try block catch (id) block finally block`
    Try,
    /// `switch (discriminant) { clauses }`
    Switch,
    /// `label: statement`
    Label,
    /// `return` / `break` / `continue` / `throw`
    Jump { op: JumpKind },
    /// `var a, b = 1`. `iterator` marks the declaration heading a `for-in`
    /// or `for(;;)` loop, which renders without a trailing semicolon.
    VarDeclaration {
        #[serde(default, skip_serializing_if = "is_false")]
        iterator: bool,
    },
    /// `function name(params) { body }` in statement position.
    FunctionDeclaration,

    // =========================================================================
    // Expressions
    // =========================================================================
    FunctionExpression,
    Identifier {
        name: String,
    },
    NumericLiteral {
        value: f64,
    },
    /// A string literal. When `quoted` is set, `value` is the source spelling
    /// including its quotes and is emitted verbatim.
    StringLiteral {
        value: String,
        #[serde(default, skip_serializing_if = "is_false")]
        quoted: bool,
    },
    RegexLiteral {
        pattern: String,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        flags: String,
    },
    BooleanLiteral {
        value: bool,
    },
    NullLiteral,
    This,
    /// Nothing at all: an empty statement or an omitted expression.
    EmptyExpression,
    /// Binary operator, including the comma operator.
    Operator {
        op: BinaryOp,
    },
    ConditionalExpression,
    Parenthetical,
    Assignment {
        op: AssignOp,
    },
    Unary {
        op: UnaryOp,
    },
    Postfix {
        op: PostfixOp,
    },
    FunctionCall,
    /// `new callee(args)`
    FunctionConstructor,
    ObjectLiteral,
    ObjectLiteralProperty,
    ArrayLiteral,
    /// `object.name`
    StaticMemberExpression,
    /// `object[property]`
    DynamicMemberExpression,
}

impl NodeKind {
    /// Name of the kind as it appears in the serialized `kind` tag.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Program => "Program",
            Self::StatementList => "StatementList",
            Self::ArgList => "ArgList",
            Self::CaseClause => "CaseClause",
            Self::DefaultClause => "DefaultClause",
            Self::If => "If",
            Self::While => "While",
            Self::DoWhile => "DoWhile",
            Self::ForLoop => "ForLoop",
            Self::ForIn => "ForIn",
            Self::With => "With",
            Self::Try => "Try",
            Self::Switch => "Switch",
            Self::Label => "Label",
            Self::Jump { .. } => "Jump",
            Self::VarDeclaration { .. } => "VarDeclaration",
            Self::FunctionDeclaration => "FunctionDeclaration",
            Self::FunctionExpression => "FunctionExpression",
            Self::Identifier { .. } => "Identifier",
            Self::NumericLiteral { .. } => "NumericLiteral",
            Self::StringLiteral { .. } => "StringLiteral",
            Self::RegexLiteral { .. } => "RegexLiteral",
            Self::BooleanLiteral { .. } => "BooleanLiteral",
            Self::NullLiteral => "NullLiteral",
            Self::This => "This",
            Self::EmptyExpression => "EmptyExpression",
            Self::Operator { .. } => "Operator",
            Self::ConditionalExpression => "ConditionalExpression",
            Self::Parenthetical => "Parenthetical",
            Self::Assignment { .. } => "Assignment",
            Self::Unary { .. } => "Unary",
            Self::Postfix { .. } => "Postfix",
            Self::FunctionCall => "FunctionCall",
            Self::FunctionConstructor => "FunctionConstructor",
            Self::ObjectLiteral => "ObjectLiteral",
            Self::ObjectLiteralProperty => "ObjectLiteralProperty",
            Self::ArrayLiteral => "ArrayLiteral",
            Self::StaticMemberExpression => "StaticMemberExpression",
            Self::DynamicMemberExpression => "DynamicMemberExpression",
        }
    }

    /// Whether this kind is an expression, i.e. needs a `;` when it stands
    /// alone as a statement.
    pub const fn is_expression(&self) -> bool {
        matches!(
            self,
            Self::FunctionExpression
                | Self::Identifier { .. }
                | Self::NumericLiteral { .. }
                | Self::StringLiteral { .. }
                | Self::RegexLiteral { .. }
                | Self::BooleanLiteral { .. }
                | Self::NullLiteral
                | Self::This
                | Self::Operator { .. }
                | Self::ConditionalExpression
                | Self::Parenthetical
                | Self::Assignment { .. }
                | Self::Unary { .. }
                | Self::Postfix { .. }
                | Self::FunctionCall
                | Self::FunctionConstructor
                | Self::ObjectLiteral
                | Self::ObjectLiteralProperty
                | Self::ArrayLiteral
                | Self::StaticMemberExpression
                | Self::DynamicMemberExpression
        )
    }

    /// `Program` or `StatementList`.
    pub const fn is_statement_sequence(&self) -> bool {
        matches!(self, Self::Program | Self::StatementList)
    }

    pub const fn is_function(&self) -> bool {
        matches!(self, Self::FunctionDeclaration | Self::FunctionExpression)
    }

    pub const fn is_member_expression(&self) -> bool {
        matches!(
            self,
            Self::StaticMemberExpression | Self::DynamicMemberExpression
        )
    }
}

// =============================================================================
// Operators
// =============================================================================

/// Binary operators. `Comma` is the sequence operator `a, b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    #[serde(rename = ",")]
    Comma,
    #[serde(rename = "||")]
    Or,
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "|")]
    BitOr,
    #[serde(rename = "^")]
    BitXor,
    #[serde(rename = "&")]
    BitAnd,
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = "===")]
    StrictEqual,
    #[serde(rename = "!==")]
    StrictNotEqual,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<=")]
    LessThanEqual,
    #[serde(rename = ">=")]
    GreaterThanEqual,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "instanceof")]
    InstanceOf,
    #[serde(rename = "<<")]
    LeftShift,
    #[serde(rename = ">>")]
    RightShift,
    #[serde(rename = ">>>")]
    UnsignedRightShift,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "*")]
    Mult,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "%")]
    Mod,
}

impl BinaryOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comma => ",",
            Self::Or => "||",
            Self::And => "&&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::BitAnd => "&",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::StrictEqual => "===",
            Self::StrictNotEqual => "!==",
            Self::LessThan => "<",
            Self::GreaterThan => ">",
            Self::LessThanEqual => "<=",
            Self::GreaterThanEqual => ">=",
            Self::In => "in",
            Self::InstanceOf => "instanceof",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::UnsignedRightShift => ">>>",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Mult => "*",
            Self::Div => "/",
            Self::Mod => "%",
        }
    }

    /// Word operators need whitespace on both sides even in compact output.
    pub const fn is_keyword(self) -> bool {
        matches!(self, Self::In | Self::InstanceOf)
    }
}

/// Assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignOp {
    #[serde(rename = "=")]
    Assign,
    #[serde(rename = "*=")]
    MultAssign,
    #[serde(rename = "/=")]
    DivAssign,
    #[serde(rename = "%=")]
    ModAssign,
    #[serde(rename = "+=")]
    PlusAssign,
    #[serde(rename = "-=")]
    MinusAssign,
    #[serde(rename = "<<=")]
    LeftShiftAssign,
    #[serde(rename = ">>=")]
    RightShiftAssign,
    #[serde(rename = ">>>=")]
    UnsignedRightShiftAssign,
    #[serde(rename = "&=")]
    BitAndAssign,
    #[serde(rename = "^=")]
    BitXorAssign,
    #[serde(rename = "|=")]
    BitOrAssign,
}

impl AssignOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::MultAssign => "*=",
            Self::DivAssign => "/=",
            Self::ModAssign => "%=",
            Self::PlusAssign => "+=",
            Self::MinusAssign => "-=",
            Self::LeftShiftAssign => "<<=",
            Self::RightShiftAssign => ">>=",
            Self::UnsignedRightShiftAssign => ">>>=",
            Self::BitAndAssign => "&=",
            Self::BitXorAssign => "^=",
            Self::BitOrAssign => "|=",
        }
    }

    /// The binary operator a compound assignment applies, `None` for `=`.
    pub const fn binary_op(self) -> Option<BinaryOp> {
        match self {
            Self::Assign => None,
            Self::MultAssign => Some(BinaryOp::Mult),
            Self::DivAssign => Some(BinaryOp::Div),
            Self::ModAssign => Some(BinaryOp::Mod),
            Self::PlusAssign => Some(BinaryOp::Plus),
            Self::MinusAssign => Some(BinaryOp::Minus),
            Self::LeftShiftAssign => Some(BinaryOp::LeftShift),
            Self::RightShiftAssign => Some(BinaryOp::RightShift),
            Self::UnsignedRightShiftAssign => Some(BinaryOp::UnsignedRightShift),
            Self::BitAndAssign => Some(BinaryOp::BitAnd),
            Self::BitXorAssign => Some(BinaryOp::BitXor),
            Self::BitOrAssign => Some(BinaryOp::BitOr),
        }
    }
}

/// Prefix unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    #[serde(rename = "delete")]
    Delete,
    #[serde(rename = "void")]
    Void,
    #[serde(rename = "typeof")]
    TypeOf,
    #[serde(rename = "++")]
    Increment,
    #[serde(rename = "--")]
    Decrement,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "~")]
    BitNot,
    #[serde(rename = "!")]
    Not,
}

impl UnaryOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Void => "void",
            Self::TypeOf => "typeof",
            Self::Increment => "++",
            Self::Decrement => "--",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::BitNot => "~",
            Self::Not => "!",
        }
    }

    pub const fn is_keyword(self) -> bool {
        matches!(self, Self::Delete | Self::Void | Self::TypeOf)
    }
}

/// Postfix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostfixOp {
    #[serde(rename = "++")]
    Increment,
    #[serde(rename = "--")]
    Decrement,
}

impl PostfixOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Increment => "++",
            Self::Decrement => "--",
        }
    }

    /// The arithmetic the operator performs on the numeric operand.
    pub const fn step_op(self) -> BinaryOp {
        match self {
            Self::Increment => BinaryOp::Plus,
            Self::Decrement => BinaryOp::Minus,
        }
    }
}

/// The statement keyword of a [`NodeKind::Jump`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JumpKind {
    Return,
    Break,
    Continue,
    Throw,
}

impl JumpKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Return => "return",
            Self::Break => "break",
            Self::Continue => "continue",
            Self::Throw => "throw",
        }
    }

    /// `break` and `continue` take an optional label, not an expression.
    pub const fn takes_label(self) -> bool {
        matches!(self, Self::Break | Self::Continue)
    }
}

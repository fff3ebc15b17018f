use crate::{lexer::tokens::TokenKind, Span};

use super::{
    ast::{Expr, Type},
    declarations::Parameter,
    statements::BlockStmt,
};

// NAMES

/// A single name with its location.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

/// Qualified Path
/// `head::tail::...`, used both for value lookup and as a type name.
#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedPath {
    pub head: Identifier,
    pub tail: Vec<Identifier>,
    pub span: Span,
}

impl QualifiedPath {
    pub fn segments(&self) -> impl Iterator<Item = &Identifier> {
        std::iter::once(&self.head).chain(self.tail.iter())
    }

    /// The path joined back with `::`.
    pub fn to_path_string(&self) -> String {
        self.segments()
            .map(|segment| segment.name.as_str())
            .collect::<Vec<_>>()
            .join("::")
    }
}

// LITERALS

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(u64),
    Float(f64),
    /// Decoded contents, escapes resolved
    String(String),
    Char(char),
    Boolean(bool),
    Nil,
}

/// Literal Expression
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub value: Literal,
    pub span: Span,
}

// OPERATORS

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    ShiftLeft,
    ShiftRight,
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOperator {
    pub fn from_token_kind(kind: TokenKind) -> Option<BinaryOperator> {
        let operator = match kind {
            TokenKind::Or => BinaryOperator::Or,
            TokenKind::And => BinaryOperator::And,
            TokenKind::Pipe => BinaryOperator::BitOr,
            TokenKind::Caret => BinaryOperator::BitXor,
            TokenKind::Ampersand => BinaryOperator::BitAnd,
            TokenKind::Equals => BinaryOperator::Equal,
            TokenKind::NotEquals => BinaryOperator::NotEqual,
            TokenKind::Less => BinaryOperator::Less,
            TokenKind::LessEquals => BinaryOperator::LessEqual,
            TokenKind::Greater => BinaryOperator::Greater,
            TokenKind::GreaterEquals => BinaryOperator::GreaterEqual,
            TokenKind::ShiftLeft => BinaryOperator::ShiftLeft,
            TokenKind::ShiftRight => BinaryOperator::ShiftRight,
            TokenKind::Plus => BinaryOperator::Add,
            TokenKind::Dash => BinaryOperator::Subtract,
            TokenKind::Star => BinaryOperator::Multiply,
            TokenKind::Slash => BinaryOperator::Divide,
            _ => return None,
        };

        Some(operator)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Or => "||",
            BinaryOperator::And => "&&",
            BinaryOperator::BitOr => "|",
            BinaryOperator::BitXor => "^",
            BinaryOperator::BitAnd => "&",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::ShiftLeft => "<<",
            BinaryOperator::ShiftRight => ">>",
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Negate,
    Not,
    BitNot,
    AddressOf,
    Deref,
}

impl UnaryOperator {
    pub fn from_token_kind(kind: TokenKind) -> Option<UnaryOperator> {
        let operator = match kind {
            TokenKind::Dash => UnaryOperator::Negate,
            TokenKind::Not => UnaryOperator::Not,
            TokenKind::Tilde => UnaryOperator::BitNot,
            TokenKind::Ampersand => UnaryOperator::AddressOf,
            TokenKind::Star => UnaryOperator::Deref,
            _ => return None,
        };

        Some(operator)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOperator::Negate => "-",
            UnaryOperator::Not => "!",
            UnaryOperator::BitNot => "~",
            UnaryOperator::AddressOf => "&",
            UnaryOperator::Deref => "*",
        }
    }
}

// COMPLEX

/// Binary Expression
/// Every binary operator is left-associative.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: BinaryOperator,
    pub right: Box<Expr>,
    pub span: Span,
}

/// Unary Expression
/// A prefix operator applied to an operand.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub operator: UnaryOperator,
    pub operand: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SizeofOperand {
    Type(Box<Type>),
    Expr(Box<Expr>),
}

/// `sizeof T` or `sizeof expr`
#[derive(Debug, Clone, PartialEq)]
pub struct SizeofExpr {
    pub operand: SizeofOperand,
    pub span: Span,
}

/// Call Expression
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

/// `object.field`
#[derive(Debug, Clone, PartialEq)]
pub struct FieldExpr {
    pub object: Box<Expr>,
    pub field: Identifier,
    pub span: Span,
}

/// `object[index]`
#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpr {
    pub object: Box<Expr>,
    pub index: Box<Expr>,
    pub span: Span,
}

/// `object[start:end]` where either bound may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceExpr {
    pub object: Box<Expr>,
    pub start: Option<Box<Expr>>,
    pub end: Option<Box<Expr>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParenExpr {
    pub inner: Box<Expr>,
    pub span: Span,
}

/// `value as T`
#[derive(Debug, Clone, PartialEq)]
pub struct CastExpr {
    pub value: Box<Expr>,
    pub target: Box<Type>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SomeExpr {
    pub value: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoneExpr {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContextExpr {
    pub span: Span,
}

/// Function Expression
/// An anonymous function, valid wherever an expression is.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionExpr {
    pub calling_convention: Option<String>,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<Type>,
    pub body: BlockStmt,
    pub span: Span,
}

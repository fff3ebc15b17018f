use std::slice::Iter;

use crate::Span;

use super::{
    ast::{Expr, Stmt, Type},
    expressions::Identifier,
};

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutability {
    /// `let`
    Immutable,
    /// `var`
    Mutable,
}

/// `let`/`var` declaration. Both the type and the value may be omitted;
/// inferring a missing type is left to later phases.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub mutability: Mutability,
    pub identifier: Identifier,
    pub explicit_type: Option<Type>,
    pub assigned_value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElseBranch {
    Block(BlockStmt),
    If(Box<IfStmt>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: BlockStmt,
    pub else_body: Option<ElseBranch>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    /// The declaration supplies its own `;`
    VarDecl(Box<VarDeclStmt>),
    Expr(Expr),
}

/// C-style `for init; condition; update { }`
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub initializer: ForInit,
    pub condition: Expr,
    pub update: Expr,
    pub body: BlockStmt,
    pub span: Span,
}

/// `start..end` or `start..=end`
#[derive(Debug, Clone, PartialEq)]
pub struct RangeExpr {
    pub start: Expr,
    pub end: Expr,
    pub inclusive: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoopStmt {
    pub range: RangeExpr,
    pub body: BlockStmt,
    pub span: Span,
}

/// Either a braced block or a run of statements ended by the next
/// `case`, `else` or `}`.
#[derive(Debug, Clone, PartialEq)]
pub enum CaseBody {
    Block(BlockStmt),
    Statements(Vec<Stmt>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseClause {
    pub value: Expr,
    pub body: CaseBody,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElseClause {
    pub body: CaseBody,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStmt {
    pub condition: Expr,
    pub cases: Vec<CaseClause>,
    pub default: Option<ElseClause>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub values: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakStmt {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContinueStmt {
    pub span: Span,
}

/// `defer stmt`, runs `statement` when the enclosing scope exits.
#[derive(Debug, Clone, PartialEq)]
pub struct DeferStmt {
    pub statement: Box<Stmt>,
    pub span: Span,
}

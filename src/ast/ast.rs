use crate::Span;

use super::{
    declarations::{ExternBlock, ExternDecl, FnDecl, ImportDecl, TypeAliasDecl},
    expressions::{
        BinaryExpr, CallExpr, CastExpr, ContextExpr, FieldExpr, FunctionExpr, IndexExpr,
        LiteralExpr, NoneExpr, ParenExpr, QualifiedPath, SizeofExpr, SliceExpr, SomeExpr,
        UnaryExpr,
    },
    statements::{
        BlockStmt, BreakStmt, ContinueStmt, DeferStmt, ExpressionStmt, ForStmt, IfStmt, LoopStmt,
        PrintStmt, ReturnStmt, SwitchStmt, VarDeclStmt, WhileStmt,
    },
    types::{ArrayType, FunctionType, OptionalType, PointerType, PrimitiveType, SliceType},
};

/// Declaration Types
///
/// Discriminator for the top-level declaration forms.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum DeclType {
    Import,
    Function,
    TypeAlias,
    Variable,
    Extern,
    ExternBlock,
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Import(ImportDecl),
    Function(FnDecl),
    TypeAlias(TypeAliasDecl),
    Variable(VarDeclStmt),
    Extern(ExternDecl),
    ExternBlock(ExternBlock),
}

impl Decl {
    pub fn get_decl_type(&self) -> DeclType {
        match self {
            Decl::Import(_) => DeclType::Import,
            Decl::Function(_) => DeclType::Function,
            Decl::TypeAlias(_) => DeclType::TypeAlias,
            Decl::Variable(_) => DeclType::Variable,
            Decl::Extern(_) => DeclType::Extern,
            Decl::ExternBlock(_) => DeclType::ExternBlock,
        }
    }

    pub fn get_span(&self) -> Span {
        match self {
            Decl::Import(decl) => decl.span,
            Decl::Function(decl) => decl.span,
            Decl::TypeAlias(decl) => decl.span,
            Decl::Variable(decl) => decl.span,
            Decl::Extern(decl) => decl.span,
            Decl::ExternBlock(decl) => decl.span,
        }
    }
}

/// Statement Types
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum StmtType {
    ExpressionStmt,
    BlockStmt,
    VarDeclStmt,
    ReturnStmt,
    IfStmt,
    WhileStmt,
    ForStmt,
    LoopStmt,
    SwitchStmt,
    PrintStmt,
    BreakStmt,
    ContinueStmt,
    DeferStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(ExpressionStmt),
    Block(BlockStmt),
    VarDecl(VarDeclStmt),
    Return(ReturnStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Loop(LoopStmt),
    Switch(SwitchStmt),
    Print(PrintStmt),
    Break(BreakStmt),
    Continue(ContinueStmt),
    Defer(DeferStmt),
}

impl Stmt {
    pub fn get_stmt_type(&self) -> StmtType {
        match self {
            Stmt::Expression(_) => StmtType::ExpressionStmt,
            Stmt::Block(_) => StmtType::BlockStmt,
            Stmt::VarDecl(_) => StmtType::VarDeclStmt,
            Stmt::Return(_) => StmtType::ReturnStmt,
            Stmt::If(_) => StmtType::IfStmt,
            Stmt::While(_) => StmtType::WhileStmt,
            Stmt::For(_) => StmtType::ForStmt,
            Stmt::Loop(_) => StmtType::LoopStmt,
            Stmt::Switch(_) => StmtType::SwitchStmt,
            Stmt::Print(_) => StmtType::PrintStmt,
            Stmt::Break(_) => StmtType::BreakStmt,
            Stmt::Continue(_) => StmtType::ContinueStmt,
            Stmt::Defer(_) => StmtType::DeferStmt,
        }
    }

    pub fn get_span(&self) -> Span {
        match self {
            Stmt::Expression(stmt) => stmt.span,
            Stmt::Block(stmt) => stmt.span,
            Stmt::VarDecl(stmt) => stmt.span,
            Stmt::Return(stmt) => stmt.span,
            Stmt::If(stmt) => stmt.span,
            Stmt::While(stmt) => stmt.span,
            Stmt::For(stmt) => stmt.span,
            Stmt::Loop(stmt) => stmt.span,
            Stmt::Switch(stmt) => stmt.span,
            Stmt::Print(stmt) => stmt.span,
            Stmt::Break(stmt) => stmt.span,
            Stmt::Continue(stmt) => stmt.span,
            Stmt::Defer(stmt) => stmt.span,
        }
    }
}

/// Expression Types
///
/// Defines the various kinds of expressions in the AST.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ExprType {
    Path,
    Literal,
    Binary,
    Unary,
    Sizeof,
    Call,
    Field,
    Index,
    Slice,
    Paren,
    Cast,
    Some,
    None,
    Context,
    Function,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Path(QualifiedPath),
    Literal(LiteralExpr),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Sizeof(SizeofExpr),
    Call(CallExpr),
    Field(FieldExpr),
    Index(IndexExpr),
    Slice(SliceExpr),
    Paren(ParenExpr),
    Cast(CastExpr),
    Some(SomeExpr),
    None(NoneExpr),
    Context(ContextExpr),
    Function(FunctionExpr),
}

impl Expr {
    pub fn get_expr_type(&self) -> ExprType {
        match self {
            Expr::Path(_) => ExprType::Path,
            Expr::Literal(_) => ExprType::Literal,
            Expr::Binary(_) => ExprType::Binary,
            Expr::Unary(_) => ExprType::Unary,
            Expr::Sizeof(_) => ExprType::Sizeof,
            Expr::Call(_) => ExprType::Call,
            Expr::Field(_) => ExprType::Field,
            Expr::Index(_) => ExprType::Index,
            Expr::Slice(_) => ExprType::Slice,
            Expr::Paren(_) => ExprType::Paren,
            Expr::Cast(_) => ExprType::Cast,
            Expr::Some(_) => ExprType::Some,
            Expr::None(_) => ExprType::None,
            Expr::Context(_) => ExprType::Context,
            Expr::Function(_) => ExprType::Function,
        }
    }

    pub fn get_span(&self) -> Span {
        match self {
            Expr::Path(expr) => expr.span,
            Expr::Literal(expr) => expr.span,
            Expr::Binary(expr) => expr.span,
            Expr::Unary(expr) => expr.span,
            Expr::Sizeof(expr) => expr.span,
            Expr::Call(expr) => expr.span,
            Expr::Field(expr) => expr.span,
            Expr::Index(expr) => expr.span,
            Expr::Slice(expr) => expr.span,
            Expr::Paren(expr) => expr.span,
            Expr::Cast(expr) => expr.span,
            Expr::Some(expr) => expr.span,
            Expr::None(expr) => expr.span,
            Expr::Context(expr) => expr.span,
            Expr::Function(expr) => expr.span,
        }
    }
}

/// Type Types
///
/// Defines the various kinds of type syntax in the AST.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum TypeType {
    Primitive,
    Path,
    Pointer,
    Array,
    Slice,
    Optional,
    Function,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Primitive(PrimitiveType),
    Path(QualifiedPath),
    Pointer(PointerType),
    Array(ArrayType),
    Slice(SliceType),
    Optional(OptionalType),
    Function(FunctionType),
}

impl Type {
    pub fn get_type_type(&self) -> TypeType {
        match self {
            Type::Primitive(_) => TypeType::Primitive,
            Type::Path(_) => TypeType::Path,
            Type::Pointer(_) => TypeType::Pointer,
            Type::Array(_) => TypeType::Array,
            Type::Slice(_) => TypeType::Slice,
            Type::Optional(_) => TypeType::Optional,
            Type::Function(_) => TypeType::Function,
        }
    }

    pub fn get_span(&self) -> Span {
        match self {
            Type::Primitive(ty) => ty.span,
            Type::Path(ty) => ty.span,
            Type::Pointer(ty) => ty.span,
            Type::Array(ty) => ty.span,
            Type::Slice(ty) => ty.span,
            Type::Optional(ty) => ty.span,
            Type::Function(ty) => ty.span,
        }
    }
}

/// Root of a parsed source unit.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub declarations: Vec<Decl>,
    pub span: Span,
}

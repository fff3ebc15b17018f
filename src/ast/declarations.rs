//! Top-level declarations and the FFI surface described by `extern`.

use crate::Span;

use super::{ast::Type, expressions::Identifier, statements::{BlockStmt, VarDeclStmt}};

/// `[...] name type`
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: Identifier,
    pub ty: Type,
    pub is_variadic: bool,
    pub span: Span,
}

/// Index of the first variadic parameter, if any. Checking that it is the
/// last one is up to the consumer.
pub fn variadic_position(parameters: &[Parameter]) -> Option<usize> {
    parameters.iter().position(|parameter| parameter.is_variadic)
}

/// `import "module";`
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    pub module: String,
    pub span: Span,
}

/// A function with a body.
#[derive(Debug, Clone, PartialEq)]
pub struct FnDecl {
    pub calling_convention: Option<String>,
    pub identifier: Identifier,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<Type>,
    pub body: BlockStmt,
    pub span: Span,
}

/// `type name = T`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAliasDecl {
    pub identifier: Identifier,
    pub aliased: Type,
    pub span: Span,
}

/// Signature-only function: `fn name(params) [type];`
#[derive(Debug, Clone, PartialEq)]
pub struct ExternFnDecl {
    pub identifier: Identifier,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<Type>,
    pub span: Span,
}

/// Opaque foreign type: `type name;`
#[derive(Debug, Clone, PartialEq)]
pub struct ExternTypeDecl {
    pub identifier: Identifier,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExternItem {
    Function(ExternFnDecl),
    Type(ExternTypeDecl),
    Variable(VarDeclStmt),
}

impl ExternItem {
    pub fn get_span(&self) -> Span {
        match self {
            ExternItem::Function(item) => item.span,
            ExternItem::Type(item) => item.span,
            ExternItem::Variable(item) => item.span,
        }
    }
}

/// `extern ["library"] item`
#[derive(Debug, Clone, PartialEq)]
pub struct ExternDecl {
    pub library: Option<String>,
    pub item: ExternItem,
    pub span: Span,
}

/// `extern ["library"] { item* }`
#[derive(Debug, Clone, PartialEq)]
pub struct ExternBlock {
    pub library: Option<String>,
    pub items: Vec<ExternItem>,
    pub span: Span,
}

//! Type syntax for the AST.
//!
//! Types appear in declarations, parameters, casts, `sizeof` and array
//! sizes. They are purely syntactic here: a [`QualifiedPath`](super::expressions::QualifiedPath) is kept as
//! written and left for a later phase to resolve.

use crate::Span;

use super::ast::{Expr, Type};

/// The builtin type keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Void,
    Bool,
    Int,
    Str,
    Char,
    F32,
    F64,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    Struct,
    Enum,
}

impl Primitive {
    pub fn from_keyword(keyword: &str) -> Option<Primitive> {
        let primitive = match keyword {
            "void" => Primitive::Void,
            "bool" => Primitive::Bool,
            "int" => Primitive::Int,
            "str" => Primitive::Str,
            "char" => Primitive::Char,
            "f32" => Primitive::F32,
            "f64" => Primitive::F64,
            "i8" => Primitive::I8,
            "i16" => Primitive::I16,
            "i32" => Primitive::I32,
            "i64" => Primitive::I64,
            "isize" => Primitive::Isize,
            "u8" => Primitive::U8,
            "u16" => Primitive::U16,
            "u32" => Primitive::U32,
            "u64" => Primitive::U64,
            "usize" => Primitive::Usize,
            "struct" => Primitive::Struct,
            "enum" => Primitive::Enum,
            _ => return None,
        };

        Some(primitive)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::Void => "void",
            Primitive::Bool => "bool",
            Primitive::Int => "int",
            Primitive::Str => "str",
            Primitive::Char => "char",
            Primitive::F32 => "f32",
            Primitive::F64 => "f64",
            Primitive::I8 => "i8",
            Primitive::I16 => "i16",
            Primitive::I32 => "i32",
            Primitive::I64 => "i64",
            Primitive::Isize => "isize",
            Primitive::U8 => "u8",
            Primitive::U16 => "u16",
            Primitive::U32 => "u32",
            Primitive::U64 => "u64",
            Primitive::Usize => "usize",
            Primitive::Struct => "struct",
            Primitive::Enum => "enum",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveType {
    pub primitive: Primitive,
    pub span: Span,
}

/// `*T`
#[derive(Debug, Clone, PartialEq)]
pub struct PointerType {
    pub pointee: Box<Type>,
    pub span: Span,
}

/// `[size]T`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub size: Box<Expr>,
    pub element: Box<Type>,
    pub span: Span,
}

/// `[]T`
#[derive(Debug, Clone, PartialEq)]
pub struct SliceType {
    pub element: Box<Type>,
    pub span: Span,
}

/// `?T`
#[derive(Debug, Clone, PartialEq)]
pub struct OptionalType {
    pub inner: Box<Type>,
    pub span: Span,
}

/// `fn "callconv" (T, U) R`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub calling_convention: Option<String>,
    pub parameters: Vec<Type>,
    pub return_type: Option<Box<Type>>,
    pub span: Span,
}

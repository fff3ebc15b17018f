//! Type parsing implementation.
//!
//! This module handles parsing of type annotations. Every type form starts
//! with a distinct token, so a single lookup on the current token picks the
//! handler:
//!
//! - Primitive keywords
//! - Qualified paths
//! - Pointer (`*T`), optional (`?T`), array (`[n]T`) and slice (`[]T`) types
//! - Function types (`fn "callconv" (T, U) R`)

use std::collections::HashMap;

use crate::{
    ast::{
        ast::Type,
        types::{
            ArrayType, FunctionType, OptionalType, PointerType, Primitive, PrimitiveType,
            SliceType,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    expr::{parse_expr, parse_qualified_path},
    lookups::BindingPower,
    parser::Parser,
};

/// Type alias for type handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<Type, Error>;

/// Type alias for type lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Initializes the type parsing lookup table.
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Primitive, parse_primitive_type);
    parser.type_nud(TokenKind::Identifier, parse_path_type);
    parser.type_nud(TokenKind::Star, parse_pointer_type);
    parser.type_nud(TokenKind::Question, parse_optional_type);
    parser.type_nud(TokenKind::OpenBracket, parse_array_type);
    parser.type_nud(TokenKind::Fn, parse_function_type);
}

pub fn parse_type(parser: &mut Parser) -> Result<Type, Error> {
    parser.nested(|parser| {
        let token_kind = parser.current_token_kind();
        let Some(nud) = parser.get_type_nud_lookup().get(&token_kind).copied() else {
            let token = parser.current_token();
            return Err(parser.error(
                ErrorImpl::ExpectedType {
                    found: token.to_string(),
                },
                token.span,
            ));
        };

        nud(parser)
    })
}

pub fn parse_primitive_type(parser: &mut Parser) -> Result<Type, Error> {
    let token = parser.advance();
    let Some(primitive) = Primitive::from_keyword(&token.value) else {
        return Err(parser.error(
            ErrorImpl::ExpectedType {
                found: token.to_string(),
            },
            token.span,
        ));
    };

    Ok(Type::Primitive(PrimitiveType {
        primitive,
        span: token.span,
    }))
}

pub fn parse_path_type(parser: &mut Parser) -> Result<Type, Error> {
    Ok(Type::Path(parse_qualified_path(parser)?))
}

pub fn parse_pointer_type(parser: &mut Parser) -> Result<Type, Error> {
    let start = parser.advance().span;
    let pointee = parse_type(parser)?;

    Ok(Type::Pointer(PointerType {
        span: start.to(pointee.get_span()),
        pointee: Box::new(pointee),
    }))
}

pub fn parse_optional_type(parser: &mut Parser) -> Result<Type, Error> {
    let start = parser.advance().span;
    let inner = parse_type(parser)?;

    Ok(Type::Optional(OptionalType {
        span: start.to(inner.get_span()),
        inner: Box::new(inner),
    }))
}

/// `[]T` when `]` follows immediately, `[size]T` otherwise.
pub fn parse_array_type(parser: &mut Parser) -> Result<Type, Error> {
    let opener = parser.advance().span;

    if parser.current_token_kind() == TokenKind::CloseBracket {
        parser.advance();
        let element = parse_type(parser)?;

        return Ok(Type::Slice(SliceType {
            span: opener.to(element.get_span()),
            element: Box::new(element),
        }));
    }

    let size = parse_expr(parser, BindingPower::Default)?;
    parser.expect_closer(TokenKind::CloseBracket, opener)?;
    let element = parse_type(parser)?;

    Ok(Type::Array(ArrayType {
        span: opener.to(element.get_span()),
        size: Box::new(size),
        element: Box::new(element),
    }))
}

pub fn parse_function_type(parser: &mut Parser) -> Result<Type, Error> {
    let start = parser.advance().span;
    let calling_convention = parser.optional_string()?;

    let opener = parser.expect(TokenKind::OpenParen)?.span;
    let mut parameters = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            parameters.push(parse_type(parser)?);

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }
    parser.expect_closer(TokenKind::CloseParen, opener)?;

    // Greedy: any token that can begin a type continues this one
    let return_type = if parser.at_type_start() {
        Some(Box::new(parse_type(parser)?))
    } else {
        None
    };

    Ok(Type::Function(FunctionType {
        calling_convention,
        parameters,
        return_type,
        span: parser.span_from(start),
    }))
}

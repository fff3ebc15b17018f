//! Top-level declarations, `extern` items, and the parameter lists shared
//! with function expressions.

use crate::{
    ast::{
        ast::{Decl, Type},
        declarations::{
            ExternBlock, ExternDecl, ExternFnDecl, ExternItem, ExternTypeDecl, FnDecl,
            ImportDecl, Parameter, TypeAliasDecl,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    expr::parse_identifier,
    parser::{decode_quoted, Parser},
    stmt::{parse_block, parse_var_decl},
    types::parse_type,
};

pub fn parse_decl(parser: &mut Parser) -> Result<Decl, Error> {
    let token_kind = parser.current_token_kind();
    let Some(handler) = parser.get_decl_lookup().get(&token_kind).copied() else {
        let token = parser.current_token();
        return Err(parser
            .error(
                ErrorImpl::ExpectedDeclaration {
                    found: token.to_string(),
                },
                token.span,
            )
            .with_expected(&[
                TokenKind::Import,
                TokenKind::Fn,
                TokenKind::Type,
                TokenKind::Let,
                TokenKind::Var,
                TokenKind::Extern,
            ]));
    };

    tracing::trace!(kind = ?token_kind, offset = parser.current_token().span.start.0, "declaration");
    handler(parser)
}

/// `[...] name type`
fn parse_parameter(parser: &mut Parser) -> Result<Parameter, Error> {
    let start = parser.current_token().span;
    let is_variadic = if parser.current_token_kind() == TokenKind::Ellipsis {
        parser.advance();
        true
    } else {
        false
    };

    let name = parse_identifier(parser)?;
    let ty = parse_type(parser)?;

    Ok(Parameter {
        name,
        ty,
        is_variadic,
        span: parser.span_from(start),
    })
}

/// `( [param {, param}] )`
pub fn parse_parameter_list(parser: &mut Parser) -> Result<Vec<Parameter>, Error> {
    let opener = parser.expect(TokenKind::OpenParen)?.span;
    let mut parameters = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            parameters.push(parse_parameter(parser)?);

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    parser.expect_closer(TokenKind::CloseParen, opener)?;
    Ok(parameters)
}

/// Return types have no arrow: one is present whenever a type can start here.
pub fn parse_return_type(parser: &mut Parser) -> Result<Option<Type>, Error> {
    if parser.at_type_start() {
        Ok(Some(parse_type(parser)?))
    } else {
        Ok(None)
    }
}

pub fn parse_import_decl(parser: &mut Parser) -> Result<Decl, Error> {
    let start = parser.advance().span;
    let module_token = parser.expect(TokenKind::String)?;
    let module = decode_quoted(parser, &module_token)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Decl::Import(ImportDecl {
        module,
        span: parser.span_from(start),
    }))
}

pub fn parse_fn_decl(parser: &mut Parser) -> Result<Decl, Error> {
    let start = parser.advance().span;
    let calling_convention = parser.optional_string()?;
    let identifier = parse_identifier(parser)?;
    let parameters = parse_parameter_list(parser)?;
    let return_type = parse_return_type(parser)?;
    let body = parse_block(parser)?;

    Ok(Decl::Function(FnDecl {
        calling_convention,
        identifier,
        parameters,
        return_type,
        span: start.to(body.span),
        body,
    }))
}

/// `type name = T` with an optional trailing `;`
pub fn parse_type_alias_decl(parser: &mut Parser) -> Result<Decl, Error> {
    let start = parser.advance().span;
    let identifier = parse_identifier(parser)?;
    parser.expect(TokenKind::Assignment)?;
    let aliased = parse_type(parser)?;

    if parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance();
    }

    Ok(Decl::TypeAlias(TypeAliasDecl {
        identifier,
        aliased,
        span: parser.span_from(start),
    }))
}

pub fn parse_variable_decl(parser: &mut Parser) -> Result<Decl, Error> {
    Ok(Decl::Variable(parse_var_decl(parser)?))
}

fn parse_extern_item(parser: &mut Parser) -> Result<ExternItem, Error> {
    match parser.current_token_kind() {
        TokenKind::Fn => {
            let start = parser.advance().span;
            let identifier = parse_identifier(parser)?;
            let parameters = parse_parameter_list(parser)?;
            let return_type = parse_return_type(parser)?;
            parser.expect(TokenKind::Semicolon)?;

            Ok(ExternItem::Function(ExternFnDecl {
                identifier,
                parameters,
                return_type,
                span: parser.span_from(start),
            }))
        }
        TokenKind::Type => {
            let start = parser.advance().span;
            let identifier = parse_identifier(parser)?;
            parser.expect(TokenKind::Semicolon)?;

            Ok(ExternItem::Type(ExternTypeDecl {
                identifier,
                span: parser.span_from(start),
            }))
        }
        TokenKind::Let | TokenKind::Var => Ok(ExternItem::Variable(parse_var_decl(parser)?)),
        _ => Err(parser.unexpected(
            "`fn`, `type`, `let` or `var`",
            &[TokenKind::Fn, TokenKind::Type, TokenKind::Let, TokenKind::Var],
        )),
    }
}

/// `extern ["library"] item` or `extern ["library"] { item* }`
pub fn parse_extern_decl(parser: &mut Parser) -> Result<Decl, Error> {
    let start = parser.advance().span;
    let library = parser.optional_string()?;

    if parser.current_token_kind() != TokenKind::OpenCurly {
        let item = parse_extern_item(parser)?;
        return Ok(Decl::Extern(ExternDecl {
            library,
            item,
            span: parser.span_from(start),
        }));
    }

    let opener = parser.advance().span;
    let mut items = vec![];

    while parser.has_tokens() && parser.current_token_kind() != TokenKind::CloseCurly {
        items.push(parse_extern_item(parser)?);
    }
    parser.expect_closer(TokenKind::CloseCurly, opener)?;

    Ok(Decl::ExternBlock(ExternBlock {
        library,
        items,
        span: parser.span_from(start),
    }))
}

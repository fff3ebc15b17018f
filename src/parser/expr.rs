use crate::{
    ast::{
        ast::Expr,
        expressions::{
            BinaryExpr, BinaryOperator, CallExpr, CastExpr, ContextExpr, FieldExpr, FunctionExpr,
            Identifier, IndexExpr, Literal, LiteralExpr, NoneExpr, ParenExpr, QualifiedPath,
            SizeofExpr, SizeofOperand, SliceExpr, SomeExpr, UnaryExpr, UnaryOperator,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{
    decl::{parse_parameter_list, parse_return_type},
    lookups::BindingPower,
    parser::{decode_quoted, Parser},
    stmt::parse_block,
    types::parse_type,
};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    parser.nested(|parser| {
        // First parse NUD
        let token_kind = parser.current_token_kind();
        let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
            let token = parser.current_token();
            return Err(parser.error(
                ErrorImpl::ExpectedExpression {
                    found: token.to_string(),
                },
                token.span,
            ));
        };

        let left = nud(parser)?;

        let mut folds = 0;
        let result = fold_operators(parser, left, bp, &mut folds);
        parser.leave(folds);
        result
    })
}

/// Folds infix and postfix operators into `left` while the current token
/// binds tighter than `bp`. Each fold makes the tree one level deeper, so it
/// claims a nesting level that stays held until the whole chain is done.
fn fold_operators(
    parser: &mut Parser,
    mut left: Expr,
    bp: BindingPower,
    folds: &mut usize,
) -> Result<Expr, Error> {
    while parser.current_binding_power() > bp {
        let token_kind = parser.current_token_kind();
        let Some(led) = parser.get_led_lookup().get(&token_kind).copied() else {
            break;
        };

        parser.enter()?;
        *folds += 1;

        let binding_power = parser.current_binding_power();
        left = led(parser, left, binding_power)?;
    }

    Ok(left)
}

pub fn parse_identifier(parser: &mut Parser) -> Result<Identifier, Error> {
    let token = parser.expect(TokenKind::Identifier)?;
    Ok(Identifier {
        name: token.value,
        span: token.span,
    })
}

/// `head::tail::...`, shared by expressions and types.
pub fn parse_qualified_path(parser: &mut Parser) -> Result<QualifiedPath, Error> {
    let head = parse_identifier(parser)?;
    let mut tail = vec![];

    while parser.current_token_kind() == TokenKind::ColonColon {
        parser.advance();
        tail.push(parse_identifier(parser)?);
    }

    Ok(QualifiedPath {
        span: parser.span_from(head.span),
        head,
        tail,
    })
}

pub fn parse_path_expr(parser: &mut Parser) -> Result<Expr, Error> {
    Ok(Expr::Path(parse_qualified_path(parser)?))
}

fn number_error(parser: &Parser, token: &Token) -> Error {
    parser.error(
        ErrorImpl::NumberParseError {
            token: token.value.clone(),
        },
        token.span,
    )
}

fn parse_integer(parser: &Parser, token: &Token) -> Result<u64, Error> {
    let value = token.value.as_str();
    let parsed = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(digits) => u64::from_str_radix(digits, 16),
        None => value.parse::<u64>(),
    };

    parsed.map_err(|_| number_error(parser, token))
}

fn parse_float(parser: &Parser, token: &Token) -> Result<f64, Error> {
    match token.value.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(number_error(parser, token)),
    }
}

fn parse_char(parser: &Parser, token: &Token) -> Result<char, Error> {
    let decoded = decode_quoted(parser, token)?;
    let mut chars = decoded.chars();

    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        (None, _) => Err(parser.error(ErrorImpl::EmptyCharLiteral, token.span)),
        _ => Err(parser.error(ErrorImpl::OverlongCharLiteral, token.span)),
    }
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance();

    let value = match token.kind {
        TokenKind::Integer => Literal::Integer(parse_integer(parser, &token)?),
        TokenKind::Float => Literal::Float(parse_float(parser, &token)?),
        TokenKind::String => Literal::String(decode_quoted(parser, &token)?),
        TokenKind::Char => Literal::Char(parse_char(parser, &token)?),
        TokenKind::True => Literal::Boolean(true),
        TokenKind::False => Literal::Boolean(false),
        TokenKind::Nil => Literal::Nil,
        _ => {
            return Err(parser.error(
                ErrorImpl::ExpectedExpression {
                    found: token.to_string(),
                },
                token.span,
            ))
        }
    };

    Ok(Expr::Literal(LiteralExpr {
        value,
        span: token.span,
    }))
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let Some(operator) = BinaryOperator::from_token_kind(operator_token.kind) else {
        return Err(parser.error(
            ErrorImpl::UnexpectedToken {
                expected: String::from("binary operator"),
                found: operator_token.to_string(),
            },
            operator_token.span,
        ));
    };

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        span: left.get_span().to(right.get_span()),
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let Some(operator) = UnaryOperator::from_token_kind(operator_token.kind) else {
        return Err(parser.error(
            ErrorImpl::ExpectedExpression {
                found: operator_token.to_string(),
            },
            operator_token.span,
        ));
    };

    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Unary(UnaryExpr {
        span: operator_token.span.to(operand.get_span()),
        operator,
        operand: Box::new(operand),
    }))
}

/// Whether the operand of the `sizeof` at the current position is a type.
///
/// Looks past an optional `(` and any number of `*`: a primitive keyword,
/// `[` or `?` there can only begin a type. Anything else, including a name,
/// is read as an expression.
fn sizeof_takes_type(parser: &mut Parser) -> bool {
    let mut n = 1;
    if parser.peek_nth_kind(n) == TokenKind::OpenParen {
        n += 1;
    }
    while parser.peek_nth_kind(n) == TokenKind::Star {
        n += 1;
    }

    matches!(
        parser.peek_nth_kind(n),
        TokenKind::Primitive | TokenKind::OpenBracket | TokenKind::Question
    )
}

pub fn parse_sizeof_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let takes_type = sizeof_takes_type(parser);
    let start = parser.advance().span;

    let operand = if !takes_type {
        SizeofOperand::Expr(Box::new(parse_expr(parser, BindingPower::Unary)?))
    } else if parser.current_token_kind() == TokenKind::OpenParen {
        let opener = parser.advance().span;
        let ty = parse_type(parser)?;
        parser.expect_closer(TokenKind::CloseParen, opener)?;
        SizeofOperand::Type(Box::new(ty))
    } else {
        SizeofOperand::Type(Box::new(parse_type(parser)?))
    };

    Ok(Expr::Sizeof(SizeofExpr {
        operand,
        span: parser.span_from(start),
    }))
}

pub fn parse_cast_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    parser.advance();
    let target = parse_type(parser)?;

    Ok(Expr::Cast(CastExpr {
        span: left.get_span().to(target.get_span()),
        value: Box::new(left),
        target: Box::new(target),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let opener = parser.advance().span;
    let inner = parse_expr(parser, BindingPower::Default)?;
    parser.expect_closer(TokenKind::CloseParen, opener)?;

    Ok(Expr::Paren(ParenExpr {
        inner: Box::new(inner),
        span: parser.span_from(opener),
    }))
}

pub fn parse_call_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    let opener = parser.advance().span;
    let mut arguments = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            arguments.push(parse_expr(parser, BindingPower::Default)?);

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    parser.expect_closer(TokenKind::CloseParen, opener)?;

    Ok(Expr::Call(CallExpr {
        span: parser.span_from(left.get_span()),
        callee: Box::new(left),
        arguments,
    }))
}

pub fn parse_field_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    parser.advance();
    let field = parse_identifier(parser)?;

    Ok(Expr::Field(FieldExpr {
        span: left.get_span().to(field.span),
        object: Box::new(left),
        field,
    }))
}

/// `a[i]`, or a slice when a `:` appears before the closing `]`.
pub fn parse_index_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    let opener = parser.advance().span;

    let start = if parser.current_token_kind() == TokenKind::Colon {
        None
    } else {
        Some(parse_expr(parser, BindingPower::Default)?)
    };

    let start = match start {
        Some(index) if parser.current_token_kind() != TokenKind::Colon => {
            parser.expect_closer(TokenKind::CloseBracket, opener)?;

            return Ok(Expr::Index(IndexExpr {
                span: parser.span_from(left.get_span()),
                object: Box::new(left),
                index: Box::new(index),
            }));
        }
        start => start,
    };

    parser.advance();
    let end = if parser.current_token_kind() == TokenKind::CloseBracket {
        None
    } else {
        Some(parse_expr(parser, BindingPower::Default)?)
    };
    parser.expect_closer(TokenKind::CloseBracket, opener)?;

    Ok(Expr::Slice(SliceExpr {
        span: parser.span_from(left.get_span()),
        object: Box::new(left),
        start: start.map(Box::new),
        end: end.map(Box::new),
    }))
}

pub fn parse_some_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span;
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(Expr::Some(SomeExpr {
        span: start.to(value.get_span()),
        value: Box::new(value),
    }))
}

pub fn parse_none_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let span = parser.advance().span;
    Ok(Expr::None(NoneExpr { span }))
}

pub fn parse_context_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let span = parser.advance().span;
    Ok(Expr::Context(ContextExpr { span }))
}

/// Anonymous function: `fn ["callconv"] (params) [type] { ... }`
pub fn parse_function_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span;
    let calling_convention = parser.optional_string()?;
    let parameters = parse_parameter_list(parser)?;
    let return_type = parse_return_type(parser)?;
    let body = parse_block(parser)?;

    Ok(Expr::Function(FunctionExpr {
        calling_convention,
        parameters,
        return_type,
        span: start.to(body.span),
        body,
    }))
}

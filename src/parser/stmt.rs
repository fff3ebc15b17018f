use crate::{
    ast::{
        ast::Stmt,
        statements::{
            BlockStmt, BreakStmt, CaseBody, CaseClause, ContinueStmt, DeferStmt, ElseBranch,
            ElseClause, ExpressionStmt, ForInit, ForStmt, IfStmt, LoopStmt, Mutability,
            PrintStmt, RangeExpr, ReturnStmt, SwitchStmt, VarDeclStmt, WhileStmt,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::{expr::parse_identifier, parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.nested(|parser| {
        let token_kind = parser.current_token_kind();
        if let Some(handler) = parser.get_stmt_lookup().get(&token_kind).copied() {
            return handler(parser);
        }

        let expression = parse_expr(parser, BindingPower::Default)?;
        parser.expect(TokenKind::Semicolon)?;

        Ok(Stmt::Expression(ExpressionStmt {
            span: parser.span_from(expression.get_span()),
            expression,
        }))
    })
}

pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let opener = parser.expect(TokenKind::OpenCurly)?.span;
    let mut body = vec![];

    while parser.has_tokens() && parser.current_token_kind() != TokenKind::CloseCurly {
        body.push(parse_stmt(parser)?);
    }

    parser.expect_closer(TokenKind::CloseCurly, opener)?;

    Ok(BlockStmt {
        body,
        span: parser.span_from(opener),
    })
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Block(parse_block(parser)?))
}

/// `let`/`var` name [type] [= value] `;`
pub fn parse_var_decl(parser: &mut Parser) -> Result<VarDeclStmt, Error> {
    let start_token = parser.advance();
    let mutability = match start_token.kind {
        TokenKind::Var => Mutability::Mutable,
        _ => Mutability::Immutable,
    };

    let identifier = parse_identifier(parser)?;

    let explicit_type = match parser.current_token_kind() {
        TokenKind::Assignment | TokenKind::Semicolon => None,
        _ => Some(parse_type(parser)?),
    };

    let assigned_value = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    if parser.current_token_kind() != TokenKind::Semicolon {
        let expected: &[TokenKind] = if assigned_value.is_some() {
            &[TokenKind::Semicolon]
        } else {
            &[TokenKind::Assignment, TokenKind::Semicolon]
        };
        let description = if assigned_value.is_some() {
            "`;`"
        } else {
            "`=` or `;`"
        };
        return Err(parser.unexpected(description, expected));
    }
    parser.advance();

    Ok(VarDeclStmt {
        mutability,
        identifier,
        explicit_type,
        assigned_value,
        span: parser.span_from(start_token.span),
    })
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::VarDecl(parse_var_decl(parser)?))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span;

    let value = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Return(ReturnStmt {
        value,
        span: parser.span_from(start),
    }))
}

/// An `else` directly followed by `:` belongs to an enclosing switch.
fn at_else_branch(parser: &Parser) -> bool {
    parser.current_token_kind() == TokenKind::Else && parser.peek_kind() != TokenKind::Colon
}

fn parse_if(parser: &mut Parser) -> Result<IfStmt, Error> {
    let start = parser.advance().span;

    let condition = parse_expr(parser, BindingPower::Default)?;
    let then_body = parse_block(parser)?;

    // `else if` recurses here, so the `else` always binds to the innermost `if`
    let else_body = if at_else_branch(parser) {
        parser.advance();
        if parser.current_token_kind() == TokenKind::If {
            Some(ElseBranch::If(Box::new(parser.nested(parse_if)?)))
        } else {
            Some(ElseBranch::Block(parse_block(parser)?))
        }
    } else {
        None
    };

    Ok(IfStmt {
        condition,
        then_body,
        else_body,
        span: parser.span_from(start),
    })
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::If(parse_if(parser)?))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span;
    let condition = parse_expr(parser, BindingPower::Default)?;
    let body = parse_block(parser)?;

    Ok(Stmt::While(WhileStmt {
        condition,
        body,
        span: parser.span_from(start),
    }))
}

/// `for init; condition; update { }` where a declaration initializer brings
/// its own `;`.
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span;

    let initializer = match parser.current_token_kind() {
        TokenKind::Let | TokenKind::Var => ForInit::VarDecl(Box::new(parse_var_decl(parser)?)),
        _ => {
            let expr = parse_expr(parser, BindingPower::Default)?;
            parser.expect(TokenKind::Semicolon)?;
            ForInit::Expr(expr)
        }
    };

    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;
    let update = parse_expr(parser, BindingPower::Default)?;
    let body = parse_block(parser)?;

    Ok(Stmt::For(ForStmt {
        initializer,
        condition,
        update,
        body,
        span: parser.span_from(start),
    }))
}

fn parse_range(parser: &mut Parser) -> Result<RangeExpr, Error> {
    let start = parse_expr(parser, BindingPower::Default)?;

    let inclusive = match parser.current_token_kind() {
        TokenKind::DotDot => false,
        TokenKind::DotDotEquals => true,
        _ => {
            return Err(parser.unexpected(
                "`..` or `..=`",
                &[TokenKind::DotDot, TokenKind::DotDotEquals],
            ))
        }
    };
    parser.advance();

    let end = parse_expr(parser, BindingPower::Default)?;

    Ok(RangeExpr {
        span: start.get_span().to(end.get_span()),
        start,
        end,
        inclusive,
    })
}

pub fn parse_loop_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span;
    let range = parse_range(parser)?;
    let body = parse_block(parser)?;

    Ok(Stmt::Loop(LoopStmt {
        range,
        body,
        span: parser.span_from(start),
    }))
}

fn malformed_case(parser: &Parser, message: String) -> Error {
    parser.error(
        ErrorImpl::MalformedCaseClause { message },
        parser.current_token().span,
    )
}

/// A braced block, or one or more statements up to the next `case`, `else`
/// or `}`. Blocks cannot appear inside the statement form.
fn parse_case_body(parser: &mut Parser) -> Result<CaseBody, Error> {
    if parser.current_token_kind() == TokenKind::OpenCurly {
        return Ok(CaseBody::Block(parse_block(parser)?));
    }

    let mut stmts = vec![];

    loop {
        match parser.current_token_kind() {
            TokenKind::Case | TokenKind::Else | TokenKind::CloseCurly | TokenKind::EOF => break,
            TokenKind::OpenCurly => {
                return Err(malformed_case(
                    parser,
                    String::from("a block can only be the whole body of a case"),
                ))
            }
            _ => stmts.push(parse_stmt(parser)?),
        }
    }

    if stmts.is_empty() {
        let found = parser.current_token().to_string();
        return Err(malformed_case(
            parser,
            format!("expected at least one statement in the case body, found {}", found),
        ));
    }

    Ok(CaseBody::Statements(stmts))
}

fn expect_case_colon(parser: &mut Parser, clause: &str) -> Result<(), Error> {
    if parser.current_token_kind() != TokenKind::Colon {
        let found = parser.current_token().to_string();
        return Err(malformed_case(
            parser,
            format!("expected `:` after {}, found {}", clause, found),
        )
        .with_expected(&[TokenKind::Colon]));
    }

    parser.advance();
    Ok(())
}

fn parse_case_clause(parser: &mut Parser) -> Result<CaseClause, Error> {
    let start = parser.advance().span;
    let value = parse_expr(parser, BindingPower::Default)?;
    expect_case_colon(parser, "the case value")?;
    let body = parse_case_body(parser)?;

    Ok(CaseClause {
        value,
        body,
        span: parser.span_from(start),
    })
}

fn parse_else_clause(parser: &mut Parser) -> Result<ElseClause, Error> {
    let start = parser.advance().span;
    expect_case_colon(parser, "`else`")?;
    let body = parse_case_body(parser)?;

    Ok(ElseClause {
        body,
        span: parser.span_from(start),
    })
}

pub fn parse_switch_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span;
    let condition = parse_expr(parser, BindingPower::Default)?;
    let opener = parser.expect(TokenKind::OpenCurly)?.span;

    let mut cases = vec![];
    while parser.current_token_kind() == TokenKind::Case {
        cases.push(parser.nested(parse_case_clause)?);
    }

    let default = if parser.current_token_kind() == TokenKind::Else {
        Some(parser.nested(parse_else_clause)?)
    } else {
        None
    };

    match parser.current_token_kind() {
        TokenKind::CloseCurly | TokenKind::EOF => {}
        TokenKind::Case => {
            return Err(malformed_case(
                parser,
                String::from("`case` cannot follow the `else` clause"),
            ))
        }
        _ => {
            let found = parser.current_token().to_string();
            return Err(malformed_case(
                parser,
                format!("expected `case`, `else` or `}}`, found {}", found),
            )
            .with_expected(&[TokenKind::Case, TokenKind::Else, TokenKind::CloseCurly]));
        }
    }
    parser.expect_closer(TokenKind::CloseCurly, opener)?;

    Ok(Stmt::Switch(SwitchStmt {
        condition,
        cases,
        default,
        span: parser.span_from(start),
    }))
}

pub fn parse_print_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span;
    let mut values = vec![parse_expr(parser, BindingPower::Default)?];

    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        values.push(parse_expr(parser, BindingPower::Default)?);
    }

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Print(PrintStmt {
        values,
        span: parser.span_from(start),
    }))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Break(BreakStmt {
        span: parser.span_from(start),
    }))
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Continue(ContinueStmt {
        span: parser.span_from(start),
    }))
}

pub fn parse_defer_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span;
    let statement = parse_stmt(parser)?;

    Ok(Stmt::Defer(DeferStmt {
        span: start.to(statement.get_span()),
        statement: Box::new(statement),
    }))
}

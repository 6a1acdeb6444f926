use crate::{
    ast::{
        expressions::Expr,
        statements::{Block, ForStmt, Stmt, StmtKind},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::{decl::parse_declarator, parser::Parser};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let handler = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied();
    if let Some(handler) = handler {
        return handler(parser);
    }

    let start = parser.get_position();
    let expr = parse_expr(parser, BindingPower::Default)?;

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::new(
        StmtKind::Expression(expr),
        Span {
            start,
            end: parser.get_last_end(),
        },
    ))
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let error = parser.unexpected_detailed("expected identifier during variable declaration");
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?;

    let decl = parse_declarator(parser, name)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::new(
        StmtKind::Declaration(decl),
        Span {
            start,
            end: parser.get_last_end(),
        },
    ))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    let then_branch = parse_stmt(parser)?;

    let else_branch = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        Some(Box::new(parse_stmt(parser)?))
    } else {
        None
    };

    Ok(Stmt::new(
        StmtKind::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch,
        },
        Span {
            start,
            end: parser.get_last_end(),
        },
    ))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_stmt(parser)?;

    Ok(Stmt::new(
        StmtKind::While {
            condition,
            body: Box::new(body),
        },
        Span {
            start,
            end: parser.get_last_end(),
        },
    ))
}

/// `for (init; condition; update) body`, where each clause may be empty and
/// `init` is either an expression or an `int` declaration.
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    parser.expect(TokenKind::OpenParen)?;

    let mut init_expr = None;
    let mut init_decl = None;
    match parser.current_token_kind() {
        TokenKind::Int => {
            parser.advance();
            let error = parser.unexpected_detailed("expected identifier in loop declaration");
            let name = parser.expect_error(TokenKind::Identifier, Some(error))?;
            init_decl = Some(Box::new(parse_declarator(parser, name)?));
        }
        TokenKind::Semicolon => {}
        _ => init_expr = Some(parse_expr(parser, BindingPower::Default)?),
    }
    parser.expect(TokenKind::Semicolon)?;

    let condition = parse_optional_expr(parser, TokenKind::Semicolon)?;
    parser.expect(TokenKind::Semicolon)?;

    let update = parse_optional_expr(parser, TokenKind::CloseParen)?;
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_stmt(parser)?;

    Ok(Stmt::new(
        StmtKind::For(ForStmt {
            init_expr,
            init_decl,
            condition,
            update,
            body: Box::new(body),
            decl_scope: None,
        }),
        Span {
            start,
            end: parser.get_last_end(),
        },
    ))
}

fn parse_optional_expr(
    parser: &mut Parser,
    terminator: TokenKind,
) -> Result<Option<Expr>, Error> {
    if parser.current_token_kind() == terminator {
        return Ok(None);
    }

    Ok(Some(parse_expr(parser, BindingPower::Default)?))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let value = parse_expr(parser, BindingPower::Default)?;

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::new(
        StmtKind::Return(value),
        Span {
            start,
            end: parser.get_last_end(),
        },
    ))
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let mut statements = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(parser.unexpected_detailed("unterminated block"));
        }
        statements.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Stmt::new(
        StmtKind::Block(Block::new(statements)),
        Span {
            start,
            end: parser.get_last_end(),
        },
    ))
}

pub fn parse_empty_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.advance();

    Ok(Stmt::new(StmtKind::Empty, token.span))
}

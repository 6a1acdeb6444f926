//! Declarations and top-level items.

use crate::{
    ast::{
        declarations::{FuncDefn, Initializer, Item, VarDecl},
        statements::Stmt,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    symbols::types::Type,
    Span,
};

use super::{expr::parse_expr, lookups::BindingPower, parser::Parser, stmt::parse_stmt};

/// Parses one top-level item: a function definition or a global declaration.
///
/// Both start with `int IDENT`; a following `(` selects the function.
pub fn parse_item(parser: &mut Parser) -> Result<Item, Error> {
    let error = parser.unexpected_detailed("expected `int` at the start of a declaration");
    let start = parser.expect_error(TokenKind::Int, Some(error))?;

    let error = parser.unexpected_detailed("expected identifier after `int`");
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?;

    if parser.current_token_kind() == TokenKind::OpenParen {
        return Ok(Item::Function(parse_function(parser, start, name)?));
    }

    let decl = parse_declarator(parser, name)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Item::Declaration(decl))
}

/// Parses the rest of a declaration once its name has been consumed:
/// dimensions and an optional initializer.
///
/// # Arguments
///
/// * `parser` - The parser, positioned just after the name
/// * `name` - The identifier token naming the declaration
///
/// # Returns
///
/// The declaration; its span starts at the name.
pub fn parse_declarator(parser: &mut Parser, name: Token) -> Result<VarDecl, Error> {
    let dims = parse_dims(parser)?;

    let initializer = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        Some(parse_initializer(parser)?)
    } else {
        None
    };

    let span = Span {
        start: name.span.start,
        end: parser.get_last_end(),
    };

    Ok(VarDecl::from_parts(name.value, dims, initializer, span))
}

fn parse_initializer(parser: &mut Parser) -> Result<Initializer, Error> {
    if parser.current_token_kind() != TokenKind::OpenCurly {
        return Ok(Initializer::Scalar(parse_expr(parser, BindingPower::Default)?));
    }

    parser.advance();

    let mut elements = vec![];
    if parser.current_token_kind() != TokenKind::CloseCurly {
        loop {
            elements.push(parse_expr(parser, BindingPower::Default)?);

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Initializer::List(elements))
}

/// Parses `[N]` suffixes; `None` when there are none. `[]` reads as 0.
fn parse_dims(parser: &mut Parser) -> Result<Option<Vec<i64>>, Error> {
    if parser.current_token_kind() != TokenKind::OpenBracket {
        return Ok(None);
    }

    let mut dims = vec![];
    while parser.current_token_kind() == TokenKind::OpenBracket {
        parser.advance();

        let negative = parser.current_token_kind() == TokenKind::Dash;
        if negative {
            parser.advance();
        }

        let dim = match parser.current_token_kind() {
            TokenKind::Number => {
                let token = parser.advance();
                let value = token.value.parse::<i64>().map_err(|_| {
                    Error::new(
                        ErrorImpl::NumberParseError {
                            token: token.value.clone(),
                        },
                        token.span.start.clone(),
                    )
                })?;

                if negative {
                    -value
                } else {
                    value
                }
            }
            TokenKind::CloseBracket if !negative => 0,
            _ => return Err(parser.unexpected_detailed("expected an array dimension")),
        };

        parser.expect(TokenKind::CloseBracket)?;
        dims.push(dim);
    }

    Ok(Some(dims))
}

fn parse_function(parser: &mut Parser, start: Token, name: Token) -> Result<FuncDefn, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut params = vec![];
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            params.push(parse_param(parser)?);

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let error = parser.unexpected_detailed("expected `{` to start the function body");
    parser.expect_error(TokenKind::OpenCurly, Some(error))?;

    let mut body: Vec<Stmt> = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(parser.unexpected_detailed("unterminated function body"));
        }
        body.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(FuncDefn {
        name: name.value,
        return_type: Type::Int,
        params,
        body,
        span: Span {
            start: start.span.start,
            end: parser.get_last_end(),
        },
        symbol: None,
    })
}

fn parse_param(parser: &mut Parser) -> Result<VarDecl, Error> {
    let error = parser.unexpected_detailed("expected `int` before a parameter");
    parser.expect_error(TokenKind::Int, Some(error))?;

    let error = parser.unexpected_detailed("expected parameter name");
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?;

    let dims = parse_dims(parser)?;

    let span = Span {
        start: name.span.start,
        end: parser.get_last_end(),
    };

    Ok(VarDecl::parameter(name.value, dims, span))
}

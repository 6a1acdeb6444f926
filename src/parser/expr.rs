use crate::{
    ast::expressions::{BinaryOp, CallExpr, Expr, ExprKind, UnaryOp, VarRef},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

/// Parses an expression whose operators all bind tighter than `bp`.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected()),
    };

    let mut left = nud(parser)?;

    // While the next operator binds tighter than `bp`, keep extending lhs
    loop {
        let token_kind = parser.current_token_kind();
        let next_bp = *parser
            .get_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);
        if next_bp <= bp {
            break;
        }

        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => break,
        };

        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Number => {
            let value = match parser.current_token().value.parse::<i32>() {
                Ok(value) => value,
                Err(_) => {
                    return Err(Error::new(
                        ErrorImpl::NumberParseError {
                            token: parser.current_token().value.clone(),
                        },
                        parser.get_position(),
                    ))
                }
            };

            let token = parser.advance();
            Ok(Expr::new(ExprKind::IntConst(value), token.span))
        }
        TokenKind::Identifier => {
            let token = parser.advance();
            let var_ref = VarRef::new(token.value, token.span.clone());
            Ok(Expr::new(ExprKind::Lvalue(var_ref), token.span))
        }
        _ => Err(parser.unexpected()),
    }
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let operator = match BinaryOp::from_token(operator_token.kind) {
        Some(operator) => operator,
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: operator_token.value,
                },
                operator_token.span.start,
            ))
        }
    };

    let right = parse_expr(parser, bp)?;
    let span = left.span.to(&right.span);

    Ok(Expr::new(
        ExprKind::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    ))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let operator = match UnaryOp::from_token(operator_token.kind) {
        Some(operator) => operator,
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: operator_token.value,
                },
                operator_token.span.start,
            ))
        }
    };

    let operand = parse_expr(parser, BindingPower::Unary)?;
    let span = operator_token.span.to(&operand.span);

    Ok(Expr::new(
        ExprKind::Unary {
            operator,
            operand: Box::new(operand),
        },
        span,
    ))
}

/// `target = value`, right associative.
pub fn parse_assignment_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    let target = match left.kind {
        ExprKind::Lvalue(var_ref) => var_ref,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: String::from("="),
                    message: String::from("only variables and array elements can be assigned to"),
                },
                parser.get_position(),
            ))
        }
    };

    parser.advance();
    let value = parse_expr(parser, BindingPower::Default)?;
    let span = left.span.to(&value.span);

    Ok(Expr::new(
        ExprKind::Assign {
            target,
            value: Box::new(value),
        },
        span,
    ))
}

/// `condition ? then_expr : else_expr`, right associative.
pub fn parse_conditional_expr(
    parser: &mut Parser,
    condition: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    parser.advance();
    let then_expr = parse_expr(parser, BindingPower::Default)?;

    let error = parser.unexpected_detailed("expected `:` in conditional expression");
    parser.expect_error(TokenKind::Colon, Some(error))?;

    let else_expr = parse_expr(parser, BindingPower::Assignment)?;
    let span = condition.span.to(&else_expr.span);

    Ok(Expr::new(
        ExprKind::Conditional {
            condition: Box::new(condition),
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
        },
        span,
    ))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

/// `name(arg, ...)`; only a plain identifier can be called.
pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let name = match left.kind {
        ExprKind::Lvalue(var_ref) if !var_ref.is_array_ref() => var_ref.name,
        _ => return Err(parser.unexpected_detailed("only functions can be called")),
    };

    parser.advance();

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

    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::new(
        ExprKind::Call(CallExpr {
            name,
            arguments,
            symbol: None,
        }),
        Span {
            start: left.span.start,
            end: parser.get_last_end(),
        },
    ))
}

/// `reference[index]`, appended to the reference's index list.
pub fn parse_index_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let mut var_ref = match left.kind {
        ExprKind::Lvalue(var_ref) => var_ref,
        _ => return Err(parser.unexpected_detailed("only arrays can be indexed")),
    };

    parser.advance();
    let index = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    let span = Span {
        start: left.span.start,
        end: parser.get_last_end(),
    };

    var_ref.indices.push(index);
    var_ref.span = span.clone();

    Ok(Expr::new(ExprKind::Lvalue(var_ref), span))
}

use crate::{
    ast::expressions::{BinaryOp, Expr, ExprKind, Literal, UnaryOp},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Span,
};

use super::{lookups::BindingPower, parser::Parser, types::parse_type};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected("expected an expression")),
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while parser.current_bp() > bp {
        let token_kind = parser.current_token_kind();
        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => return Err(parser.unexpected("expected an operator")),
        };

        let next_bp = parser.current_bp();
        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}

/// Decimal or `0x` hexadecimal integer text.
pub fn parse_integer(text: &str) -> Option<i64> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => i64::from_str_radix(hex, 16).ok(),
        None => text.parse::<i64>().ok(),
    }
}

fn parse_number(token: &Token) -> Result<Literal, Error> {
    let text = token.value.as_str();
    let parsed = if text.contains('.') {
        text.parse::<f64>().map(Literal::Float).ok()
    } else {
        parse_integer(text).map(Literal::Int)
    };

    parsed.ok_or_else(|| {
        Error::new(
            ErrorImpl::NumberParseError {
                token: token.value.clone(),
            },
            token.span.start.clone(),
        )
    })
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance().clone();

    let literal = match token.kind {
        TokenKind::Number => parse_number(&token)?,
        TokenKind::String => Literal::Text(token.value.clone()),
        TokenKind::True => Literal::Bool(true),
        TokenKind::False => Literal::Bool(false),
        TokenKind::Null => Literal::Null,
        TokenKind::Identifier => {
            return Ok(Expr::new(ExprKind::Identifier(token.value), token.span));
        }
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken { token: token.value },
                token.span.start,
            ))
        }
    };

    Ok(Expr::new(ExprKind::Literal(literal), token.span))
}

fn binary_op(kind: TokenKind) -> Option<BinaryOp> {
    let op = match kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Dash => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Rem,
        TokenKind::ShiftLeft => BinaryOp::Shl,
        TokenKind::ShiftRight => BinaryOp::Shr,
        TokenKind::Pipe => BinaryOp::BitOr,
        TokenKind::Ampersand => BinaryOp::BitAnd,
        TokenKind::Caret => BinaryOp::BitXor,
        TokenKind::Equals => BinaryOp::Equal,
        TokenKind::NotEquals => BinaryOp::NotEqual,
        TokenKind::Less => BinaryOp::Less,
        TokenKind::Greater => BinaryOp::Greater,
        TokenKind::LessEquals => BinaryOp::LessEqual,
        TokenKind::GreaterEquals => BinaryOp::GreaterEqual,
        TokenKind::And => BinaryOp::And,
        TokenKind::Or => BinaryOp::Or,
        _ => return None,
    };
    Some(op)
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let Some(op) = binary_op(parser.current_token_kind()) else {
        return Err(parser.unexpected("expected a binary operator"));
    };
    parser.advance();

    let right = parse_expr(parser, bp)?;
    let span = left.span.to(&right.span);

    Ok(Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    ))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let (op, bp) = match operator_token.kind {
        TokenKind::Dash => (UnaryOp::Minus, BindingPower::Unary),
        TokenKind::Plus => (UnaryOp::Plus, BindingPower::Unary),
        TokenKind::Ampersand => (UnaryOp::AddressOf, BindingPower::Unary),
        // `not a == b` negates the comparison
        TokenKind::Not => (UnaryOp::Not, BindingPower::LogicalAnd),
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: operator_token.value,
                },
                operator_token.span.start,
            ))
        }
    };

    let operand = parse_expr(parser, bp)?;
    let span = operator_token.span.to(&operand.span);

    Ok(Expr::new(
        ExprKind::Unary {
            op,
            operand: Box::new(operand),
        },
        span,
    ))
}

pub fn parse_deref_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let star = parser.advance().clone();
    let pointer = parse_expr(parser, BindingPower::Unary)?;
    let span = star.span.to(&pointer.span);

    Ok(Expr::new(ExprKind::Deref(Box::new(pointer)), span))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_cast_expr(parser: &mut Parser) -> Result<Expr, Error> {
    // cast<int*>(value)
    let start = parser.advance().span.start.clone();
    parser.expect(TokenKind::Less)?;
    let target = parse_type(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Greater)?;
    parser.expect(TokenKind::OpenParen)?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::new(
        ExprKind::TypeCast {
            target,
            expr: Box::new(expr),
            implicit: false,
        },
        Span {
            start,
            end: parser.previous_end(),
        },
    ))
}

pub fn parse_sizeof_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start.clone();
    parser.expect(TokenKind::OpenParen)?;
    let typ = parse_type(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::new(
        ExprKind::Sizeof(typ),
        Span {
            start,
            end: parser.previous_end(),
        },
    ))
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();

    let mut arguments = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        arguments.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let span = Span {
        start: left.span.start.clone(),
        end: parser.previous_end(),
    };
    Ok(Expr::new(
        ExprKind::Call {
            callee: Box::new(left),
            arguments,
        },
        span,
    ))
}

pub fn parse_index_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let index = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    let span = Span {
        start: left.span.start.clone(),
        end: parser.previous_end(),
    };
    Ok(Expr::new(
        ExprKind::Index {
            base: Box::new(left),
            index: Box::new(index),
        },
        span,
    ))
}

pub fn parse_member_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    parser.advance();
    let field = parser.expect_error(
        TokenKind::Identifier,
        Some(parser.unexpected("expected a field name after `.`")),
    )?;

    let span = left.span.to(&field.span);
    Ok(Expr::new(
        ExprKind::Member {
            base: Box::new(left),
            field: field.value,
        },
        span,
    ))
}

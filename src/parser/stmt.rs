use std::mem;

use crate::{
    ast::{
        ast::{Constant, Function, Import, Module, TypeDef, Variable},
        expressions::{Expr, ExprKind},
        statements::{Stmt, StmtKind, SwitchOption},
        types::Type,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::{parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let handler = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied();
    if let Some(handler) = handler {
        return handler(parser);
    }

    let stmt = parse_simple_stmt(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(stmt)
}

/// An expression statement or an assignment, without the terminator.
fn parse_simple_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let expr = parse_expr(parser, BindingPower::Default)?;

    if parser.current_token_kind() != TokenKind::Assignment {
        let span = expr.span.clone();
        return Ok(Stmt::new(StmtKind::Expression(expr), span));
    }

    parser.advance();
    let rhs = parse_expr(parser, BindingPower::Default)?;
    let span = expr.span.to(&rhs.span);

    Ok(Stmt::new(StmtKind::Assignment { lhs: expr, rhs }, span))
}

fn span_from(parser: &Parser, start: &Span) -> Span {
    Span {
        start: start.start.clone(),
        end: parser.previous_end(),
    }
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let open = parser.expect(TokenKind::OpenCurly)?;

    let mut body = vec![];
    while parser.has_tokens() && parser.current_token_kind() != TokenKind::CloseCurly {
        body.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Stmt::new(StmtKind::Compound(body), span_from(parser, &open.span)))
}

pub fn parse_empty_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.advance().clone();

    Ok(Stmt::empty(token.span))
}

fn parse_parenthesized_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.clone();
    let condition = parse_parenthesized_expr(parser)?;
    let then_body = parse_stmt(parser)?;

    let else_body = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        parse_stmt(parser)?
    } else {
        Stmt::empty(Span {
            start: parser.previous_end(),
            end: parser.previous_end(),
        })
    };

    Ok(Stmt::new(
        StmtKind::If {
            condition,
            then_body: Box::new(then_body),
            else_body: Box::new(else_body),
        },
        span_from(parser, &start),
    ))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.clone();
    let condition = parse_parenthesized_expr(parser)?;
    let body = parse_stmt(parser)?;

    Ok(Stmt::new(
        StmtKind::While {
            condition,
            body: Box::new(body),
        },
        span_from(parser, &start),
    ))
}

fn parse_optional_simple_stmt(parser: &mut Parser, terminator: TokenKind) -> Result<Stmt, Error> {
    if parser.current_token_kind() == terminator {
        let position = parser.get_position();
        return Ok(Stmt::empty(Span {
            start: position.clone(),
            end: position,
        }));
    }

    parse_simple_stmt(parser)
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    // for (i = 0; i < 10; i = i + 1) body
    let start = parser.advance().span.clone();
    parser.expect(TokenKind::OpenParen)?;

    let init = parse_optional_simple_stmt(parser, TokenKind::Semicolon)?;
    parser.expect(TokenKind::Semicolon)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;
    let final_stmt = parse_optional_simple_stmt(parser, TokenKind::CloseParen)?;
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_stmt(parser)?;

    Ok(Stmt::new(
        StmtKind::For {
            init: Box::new(init),
            condition,
            final_stmt: Box::new(final_stmt),
            body: Box::new(body),
        },
        span_from(parser, &start),
    ))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.clone();

    let value = if parser.current_token_kind() == TokenKind::Semicolon {
        None
    } else {
        Some(parse_expr(parser, BindingPower::Default)?)
    };
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::new(StmtKind::Return(value), span_from(parser, &start)))
}

fn parse_case_body(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.get_position();

    let mut body = vec![];
    while parser.has_tokens()
        && !matches!(
            parser.current_token_kind(),
            TokenKind::Case | TokenKind::Default | TokenKind::CloseCurly
        )
    {
        body.push(parse_stmt(parser)?);
    }

    if body.len() == 1 {
        return Ok(body.remove(0));
    }

    Ok(Stmt::new(
        StmtKind::Compound(body),
        Span {
            start,
            end: parser.previous_end(),
        },
    ))
}

pub fn parse_switch_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.clone();
    let scrutinee = parse_parenthesized_expr(parser)?;
    parser.expect(TokenKind::OpenCurly)?;

    let mut options = vec![];
    while parser.has_tokens() && parser.current_token_kind() != TokenKind::CloseCurly {
        let value = match parser.current_token_kind() {
            TokenKind::Case => {
                parser.advance();
                Some(parse_expr(parser, BindingPower::Default)?)
            }
            TokenKind::Default => {
                parser.advance();
                None
            }
            _ => return Err(parser.unexpected("expected `case` or `default`")),
        };
        parser.expect(TokenKind::Colon)?;

        let body = parse_case_body(parser)?;
        options.push(SwitchOption { value, body });
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Stmt::new(
        StmtKind::Switch { scrutinee, options },
        span_from(parser, &start),
    ))
}

/// `var name: type;` or `var name: type = value;` inside a function body.
///
/// The local is recorded on the parser; an initializer becomes an assignment.
pub fn parse_local_var_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.clone();
    let name = parser.expect_error(
        TokenKind::Identifier,
        Some(parser.unexpected("expected identifier during variable declaration")),
    )?;
    parser.expect(TokenKind::Colon)?;
    let typ = parse_type(parser, BindingPower::Default)?;

    parser.locals.push(Variable {
        name: name.value.clone(),
        typ,
        is_local: true,
        span: name.span.clone(),
    });

    if parser.current_token_kind() != TokenKind::Assignment {
        parser.expect(TokenKind::Semicolon)?;
        return Ok(Stmt::empty(span_from(parser, &start)));
    }

    parser.advance();
    let rhs = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    let lhs = Expr::new(ExprKind::Identifier(name.value), name.span);
    Ok(Stmt::new(
        StmtKind::Assignment { lhs, rhs },
        span_from(parser, &start),
    ))
}

/// Parses `module name;` followed by the module's top level declarations.
pub fn parse_module(parser: &mut Parser) -> Result<Module, Error> {
    let start = parser.expect_error(
        TokenKind::Module,
        Some(parser.unexpected("expected `module` declaration")),
    )?;
    let name = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Semicolon)?;

    parser.module = name.value.clone();
    let mut module = Module::new(name.value, start.span.clone());

    while parser.has_tokens() {
        match parser.current_token_kind() {
            TokenKind::Import => module.imports.push(parse_import(parser)?),
            TokenKind::Type => module.types.push(parse_type_def(parser)?),
            TokenKind::Var => module.variables.push(parse_global_var(parser)?),
            TokenKind::Const => module.constants.push(parse_constant(parser)?),
            TokenKind::Function => module.functions.push(parse_function(parser)?),
            _ => return Err(parser.unexpected("expected a top level declaration")),
        }
    }

    module.span = span_from(parser, &start.span);
    Ok(module)
}

fn parse_import(parser: &mut Parser) -> Result<Import, Error> {
    let start = parser.advance().span.clone();
    let module = parser.expect(TokenKind::Identifier)?.value;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Import {
        module,
        span: span_from(parser, &start),
    })
}

fn parse_type_def(parser: &mut Parser) -> Result<TypeDef, Error> {
    let start = parser.advance().span.clone();
    let name = parser.expect(TokenKind::Identifier)?.value;
    parser.expect(TokenKind::Assignment)?;
    let typ = parse_type(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(TypeDef {
        name,
        typ,
        span: span_from(parser, &start),
    })
}

fn parse_global_var(parser: &mut Parser) -> Result<Variable, Error> {
    parser.advance();
    let name = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Colon)?;
    let typ = parse_type(parser, BindingPower::Default)?;
    parser.expect_error(
        TokenKind::Semicolon,
        Some(parser.unexpected("global variables cannot have an initializer")),
    )?;

    Ok(Variable {
        name: name.value,
        typ,
        is_local: false,
        span: name.span,
    })
}

fn parse_constant(parser: &mut Parser) -> Result<Constant, Error> {
    let start = parser.advance().span.clone();
    let name = parser.expect(TokenKind::Identifier)?.value;
    parser.expect(TokenKind::Colon)?;
    let typ = parse_type(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Assignment)?;
    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Constant {
        name,
        typ,
        value,
        span: span_from(parser, &start),
    })
}

fn parse_parameter(parser: &mut Parser) -> Result<Variable, Error> {
    let name = parser.expect_error(
        TokenKind::Identifier,
        Some(parser.unexpected("expected a parameter name")),
    )?;
    parser.expect(TokenKind::Colon)?;
    let typ = parse_type(parser, BindingPower::Default)?;

    Ok(Variable {
        name: name.value,
        typ,
        is_local: true,
        span: span_from(parser, &name.span),
    })
}

fn parse_function(parser: &mut Parser) -> Result<Function, Error> {
    let start = parser.advance().span.clone();
    let name = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::OpenParen)?;
    let mut parameters = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        parameters.push(parse_parameter(parser)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }
    parser.expect(TokenKind::CloseParen)?;

    let return_type = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        parse_type(parser, BindingPower::Default)?
    } else {
        Type::void()
    };

    parser.locals.clear();
    let body = if parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance();
        None
    } else {
        Some(parse_block_stmt(parser)?)
    };

    Ok(Function {
        name,
        module: parser.module.clone(),
        parameters,
        return_type,
        body,
        locals: mem::take(&mut parser.locals),
        span: span_from(parser, &start),
    })
}

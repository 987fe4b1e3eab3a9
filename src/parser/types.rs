//! Type parsing implementation.
//!
//! This module handles parsing of type annotations and type expressions.
//! It supports:
//!
//! - Base types and named types (`int`, `Point`, `geometry.Point`)
//! - Pointer types (`T*`)
//! - Array types (`T[N]`)
//! - Struct types (`struct { x: int; y: int; }`)
//!
//! Similar to expression parsing, it uses NUD/LED handlers with
//! binding powers for parsing complex type expressions.

use std::collections::HashMap;

use crate::{
    ast::types::{ArrayType, BaseType, StructField, StructType, Type, TypeName},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{expr::parse_integer, lookups::BindingPower, parser::Parser};

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<Type, Error>;

/// Type alias for type left denotation handler functions.
pub type TypeLEDHandler = fn(&mut Parser, Type, BindingPower) -> Result<Type, Error>;

pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;
pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;
pub type TypeBPLookup = HashMap<TokenKind, BindingPower>;

/// Initializes the type parsing lookup tables.
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Identifier, parse_symbol_type);
    parser.type_nud(TokenKind::Struct, parse_struct_type);
    parser.type_led(TokenKind::Star, BindingPower::Call, parse_pointer_type);
    parser.type_led(TokenKind::OpenBracket, BindingPower::Call, parse_array_type);
}

pub fn parse_symbol_type(parser: &mut Parser) -> Result<Type, Error> {
    let token = parser.expect(TokenKind::Identifier)?;

    if parser.current_token_kind() == TokenKind::Dot {
        parser.advance();
        let name = parser.expect_error(
            TokenKind::Identifier,
            Some(parser.unexpected("expected a type name after `.`")),
        )?;
        return Ok(Type::Named(TypeName {
            module: token.value,
            name: name.value,
            referenced_in: parser.module.clone(),
            span: token.span.to(&name.span),
        }));
    }

    if let Some(base) = BaseType::from_name(&token.value) {
        return Ok(Type::Base(base));
    }

    Ok(Type::Named(TypeName {
        module: parser.module.clone(),
        name: token.value,
        referenced_in: parser.module.clone(),
        span: token.span,
    }))
}

pub fn parse_struct_type(parser: &mut Parser) -> Result<Type, Error> {
    parser.advance();
    parser.expect(TokenKind::OpenCurly)?;

    let mut fields = vec![];
    while parser.has_tokens() && parser.current_token_kind() != TokenKind::CloseCurly {
        let name = parser.expect_error(
            TokenKind::Identifier,
            Some(parser.unexpected("expected a field name")),
        )?;
        parser.expect(TokenKind::Colon)?;
        let typ = parse_type(parser, BindingPower::Default)?;
        parser.expect(TokenKind::Semicolon)?;

        fields.push(StructField {
            name: name.value,
            typ,
            span: Span {
                start: name.span.start,
                end: parser.previous_end(),
            },
        });
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Type::Struct(StructType { fields }))
}

pub fn parse_pointer_type(
    parser: &mut Parser,
    left: Type,
    _bp: BindingPower,
) -> Result<Type, Error> {
    parser.expect(TokenKind::Star)?;

    Ok(Type::pointer_to(left))
}

pub fn parse_array_type(parser: &mut Parser, left: Type, _bp: BindingPower) -> Result<Type, Error> {
    parser.expect(TokenKind::OpenBracket)?;
    let size = parser.expect_error(
        TokenKind::Number,
        Some(parser.unexpected("expected an array size")),
    )?;
    parser.expect(TokenKind::CloseBracket)?;

    let parsed = parse_integer(&size.value).and_then(|value| usize::try_from(value).ok());
    let size = parsed.ok_or_else(|| {
        Error::new(
            ErrorImpl::NumberParseError {
                token: size.value.clone(),
            },
            size.span.start.clone(),
        )
    })?;

    Ok(Type::Array(ArrayType {
        element: Box::new(left),
        size,
    }))
}

pub fn parse_type(parser: &mut Parser, bp: BindingPower) -> Result<Type, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_type_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected("expected a type")),
    };

    let mut left = nud(parser)?;

    while current_type_bp(parser) > bp {
        let token_kind = parser.current_token_kind();
        let led = match parser.get_type_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => return Err(parser.unexpected("expected a type modifier")),
        };

        let next_bp = current_type_bp(parser);
        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}

fn current_type_bp(parser: &Parser) -> BindingPower {
    *parser
        .get_type_bp_lookup()
        .get(&parser.current_token_kind())
        .unwrap_or(&BindingPower::Default)
}

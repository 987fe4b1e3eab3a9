//! Unit tests for the lexer module.

use super::{lexer::tokenize, tokens::TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.c3".to_string()))
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    assert_eq!(
        kinds("module import type var const function struct if else while for return"),
        vec![
            TokenKind::Module,
            TokenKind::Import,
            TokenKind::Type,
            TokenKind::Var,
            TokenKind::Const,
            TokenKind::Function,
            TokenKind::Struct,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::For,
            TokenKind::Return,
            TokenKind::EOF,
        ]
    );
    assert_eq!(
        kinds("switch case default and or not cast sizeof true false null"),
        vec![
            TokenKind::Switch,
            TokenKind::Case,
            TokenKind::Default,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Not,
            TokenKind::Cast,
            TokenKind::Sizeof,
            TokenKind::True,
            TokenKind::False,
            TokenKind::Null,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar_1 _under CamelCase int".to_string();
    let tokens = tokenize(source, Some("test.c3".to_string())).unwrap();

    for (token, expected) in tokens.iter().zip(["foo", "bar_1", "_under", "CamelCase", "int"]) {
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.value, expected);
    }
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 3.14 0 0x1F".to_string();
    let tokens = tokenize(source, Some("test.c3".to_string())).unwrap();

    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].value, "0");
    assert_eq!(tokens[3].value, "0x1F");
    assert!(tokens[..4].iter().all(|token| token.kind == TokenKind::Number));
}

#[test]
fn test_tokenize_string_escapes() {
    let source = r#""hello\nworld" "tab\there" "quote\"d" "hex\x41""#.to_string();
    let tokens = tokenize(source, Some("test.c3".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello\nworld");
    assert_eq!(tokens[1].value, "tab\there");
    assert_eq!(tokens[2].value, "quote\"d");
    assert_eq!(tokens[3].value, "hexA");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("+ - * / % << >> | & ^ == != < > <= >= ="),
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::ShiftLeft,
            TokenKind::ShiftRight,
            TokenKind::Pipe,
            TokenKind::Ampersand,
            TokenKind::Caret,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Assignment,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation_and_comments() {
    assert_eq!(
        kinds("( ) { } [ ] . , ; : // trailing comment\n"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::Dot,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_token_spans_are_byte_offsets() {
    let tokens = tokenize("var  x".to_string(), Some("test.c3".to_string())).unwrap();

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[0].span.end.0, 3);
    assert_eq!(tokens[1].span.start.0, 5);
    assert_eq!(tokens[1].span.start.1.as_str(), "test.c3");
}

#[test]
fn test_unrecognised_token() {
    let error = tokenize("var x = @;".to_string(), Some("test.c3".to_string())).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 8);
}

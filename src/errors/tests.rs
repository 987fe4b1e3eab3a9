//! Unit tests for error handling.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;
use std::sync::Arc;

fn at(offset: u32) -> Position {
    Position(offset, Arc::new("test.c3".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        at(10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 10);
}

#[test]
fn test_type_mismatch_error() {
    let error = Error::new(
        ErrorImpl::TypeMismatch {
            have: "string".to_string(),
            want: "int".to_string(),
        },
        at(0),
    );

    assert_eq!(error.get_error_name(), "TypeMismatch");
    assert_eq!(error.to_string(), "cannot use 'string' as 'int'");
}

#[test]
fn test_arity_mismatch_mentions_both_counts() {
    let error = Error::new(
        ErrorImpl::ArityMismatch {
            function: "main.add".to_string(),
            expected: 2,
            received: 3,
        },
        at(0),
    );

    assert_eq!(error.get_error_name(), "ArityMismatch");
    let message = error.to_string();
    assert!(message.contains('2'));
    assert!(message.contains('3'));
}

#[test]
fn test_missing_default_case_error() {
    let error = Error::new(ErrorImpl::MissingDefaultCase, at(0));

    assert_eq!(error.get_error_name(), "MissingDefaultCase");
    assert_eq!(error.to_string(), "no default case specified in switch-case");
}

#[test]
fn test_error_kind_accessor() {
    let error = Error::new(
        ErrorImpl::UndefinedSymbol {
            symbol: "MyStruct".to_string(),
        },
        at(4),
    );

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::UndefinedSymbol {
            symbol: "MyStruct".to_string()
        }
    );
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        at(0),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::NonArrayIndex {
            type_: "int".to_string(),
        },
        at(0),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert_eq!(tip, "Cannot index non-array type `int`"),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_semantic_errors_rollup() {
    let error = Error::new(ErrorImpl::SemanticErrors { modules: 2 }, Position::null());

    assert_eq!(error.get_error_name(), "SemanticErrors");
    assert_eq!(error.to_string(), "errors occurred in 2 module(s)");
}

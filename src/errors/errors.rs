use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Error, Debug, Clone)]
#[error("{internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UndefinedSymbol { .. } => "UndefinedSymbol",
            ErrorImpl::Redefinition { .. } => "Redefinition",
            ErrorImpl::UnknownModule { .. } => "UnknownModule",
            ErrorImpl::NotAModule { .. } => "NotAModule",
            ErrorImpl::InvalidType { .. } => "InvalidType",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::NoCommonType { .. } => "NoCommonType",
            ErrorImpl::InvalidLvalue { .. } => "InvalidLvalue",
            ErrorImpl::ArityMismatch { .. } => "ArityMismatch",
            ErrorImpl::NotCallable { .. } => "NotCallable",
            ErrorImpl::MissingDefaultCase => "MissingDefaultCase",
            ErrorImpl::DuplicateDefaultCase => "DuplicateDefaultCase",
            ErrorImpl::InvalidConditionType { .. } => "InvalidConditionType",
            ErrorImpl::UnknownLiteralType { .. } => "UnknownLiteralType",
            ErrorImpl::InvalidField { .. } => "InvalidField",
            ErrorImpl::NonStructureAccess { .. } => "NonStructureAccess",
            ErrorImpl::NonArrayIndex { .. } => "NonArrayIndex",
            ErrorImpl::InvalidVoidCall { .. } => "InvalidVoidCall",
            ErrorImpl::NotACallExpression => "NotACallExpression",
            ErrorImpl::CannotDereference { .. } => "CannotDereference",
            ErrorImpl::CannotUseInExpression { .. } => "CannotUseInExpression",
            ErrorImpl::NonSimpleParameter { .. } => "NonSimpleParameter",
            ErrorImpl::NonSimpleReturn { .. } => "NonSimpleReturn",
            ErrorImpl::ComplexAssignment { .. } => "ComplexAssignment",
            ErrorImpl::InvalidOperator { .. } => "InvalidOperator",
            ErrorImpl::MissingReturnValue { .. } => "MissingReturnValue",
            ErrorImpl::UnexpectedReturnValue { .. } => "UnexpectedReturnValue",
            ErrorImpl::SemanticErrors { .. } => "SemanticErrors",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::UndefinedSymbol { symbol } => {
                ErrorTip::Suggestion(format!("Symbol `{}` is not defined", symbol))
            }
            ErrorImpl::Redefinition { symbol } => {
                ErrorTip::Suggestion(format!("`{}` is already defined in this scope", symbol))
            }
            ErrorImpl::UnknownModule { module } => {
                ErrorTip::Suggestion(format!("No module named `{}` in this unit", module))
            }
            ErrorImpl::NotAModule { symbol } => ErrorTip::Suggestion(format!(
                "`{}` is not a module, members can only be selected from modules and structures",
                symbol
            )),
            ErrorImpl::InvalidType { type_, reason } => {
                ErrorTip::Suggestion(format!("Type `{}` is invalid: {}", type_, reason))
            }
            ErrorImpl::TypeMismatch { have, want } => {
                ErrorTip::Suggestion(format!("Cannot use `{}` as `{}`", have, want))
            }
            ErrorImpl::NoCommonType { left, right } => ErrorTip::Suggestion(format!(
                "Types `{}` and `{}` do not commute, add an explicit cast",
                left, right
            )),
            ErrorImpl::InvalidLvalue { expression } => ErrorTip::Suggestion(format!(
                "`{}` does not denote a storage location",
                expression
            )),
            ErrorImpl::ArityMismatch {
                function,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "{} requires {} arguments, {} given",
                function, expected, received
            )),
            ErrorImpl::NotCallable { symbol } => {
                ErrorTip::Suggestion(format!("Cannot call `{}`, it is not a function", symbol))
            }
            ErrorImpl::MissingDefaultCase => {
                ErrorTip::Suggestion(String::from("Add a `default:` case to the switch"))
            }
            ErrorImpl::DuplicateDefaultCase => {
                ErrorTip::Suggestion(String::from("Only one `default:` case is allowed"))
            }
            ErrorImpl::InvalidConditionType { expected, received } => ErrorTip::Suggestion(
                format!("Condition must be `{}`, found `{}`", expected, received),
            ),
            ErrorImpl::UnknownLiteralType { literal } => ErrorTip::Suggestion(format!(
                "Literal `{}` has no type of its own, use an explicit cast",
                literal
            )),
            ErrorImpl::InvalidField { type_, field } => {
                ErrorTip::Suggestion(format!("`{}` does not contain field `{}`", type_, field))
            }
            ErrorImpl::NonStructureAccess { type_, field } => ErrorTip::Suggestion(format!(
                "Cannot select `{}` of non-structure type `{}`",
                field, type_
            )),
            ErrorImpl::NonArrayIndex { type_ } => {
                ErrorTip::Suggestion(format!("Cannot index non-array type `{}`", type_))
            }
            ErrorImpl::InvalidVoidCall { type_ } => ErrorTip::Suggestion(format!(
                "Only void functions can be called as statements, this one returns `{}`",
                type_
            )),
            ErrorImpl::NotACallExpression => ErrorTip::Suggestion(String::from(
                "Expression statements must be function calls",
            )),
            ErrorImpl::CannotDereference { type_ } => {
                ErrorTip::Suggestion(format!("Cannot dereference `{}`", type_))
            }
            ErrorImpl::CannotUseInExpression { symbol } => {
                ErrorTip::Suggestion(format!("Cannot use `{}` in an expression", symbol))
            }
            ErrorImpl::NonSimpleParameter { function, parameter } => ErrorTip::Suggestion(
                format!(
                    "Parameter `{}` of `{}` must be a simple type, pass a pointer instead",
                    parameter, function
                ),
            ),
            ErrorImpl::NonSimpleReturn { function } => ErrorTip::Suggestion(format!(
                "`{}` can only return simple types",
                function
            )),
            ErrorImpl::ComplexAssignment { type_ } => {
                ErrorTip::Suggestion(format!("Cannot assign to complex type `{}`", type_))
            }
            ErrorImpl::InvalidOperator { operator, type_ } => {
                ErrorTip::Suggestion(format!("Cannot use `{}` on `{}`", operator, type_))
            }
            ErrorImpl::MissingReturnValue { function } => {
                ErrorTip::Suggestion(format!("`{}` must return a value", function))
            }
            ErrorImpl::UnexpectedReturnValue { function } => ErrorTip::Suggestion(format!(
                "`{}` is void and cannot return a value",
                function
            )),
            ErrorImpl::SemanticErrors { .. } => ErrorTip::None,
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },

    #[error("undefined symbol {symbol:?}")]
    UndefinedSymbol { symbol: String },
    #[error("{symbol:?} redefined")]
    Redefinition { symbol: String },
    #[error("unknown module {module:?}")]
    UnknownModule { module: String },
    #[error("{symbol:?} is not a module")]
    NotAModule { symbol: String },
    #[error("invalid type {type_}: {reason}")]
    InvalidType { type_: String, reason: String },
    #[error("cannot use '{have}' as '{want}'")]
    TypeMismatch { have: String, want: String },
    #[error("types {left} and {right} do not commute")]
    NoCommonType { left: String, right: String },
    #[error("no valid lvalue {expression}")]
    InvalidLvalue { expression: String },
    #[error("{function} requires {expected} arguments, {received} given")]
    ArityMismatch {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("cannot call {symbol}")]
    NotCallable { symbol: String },
    #[error("no default case specified in switch-case")]
    MissingDefaultCase,
    #[error("multiple default cases in switch-case")]
    DuplicateDefaultCase,
    #[error("condition must be {expected}, found {received}")]
    InvalidConditionType { expected: String, received: String },
    #[error("unknown literal type {literal}")]
    UnknownLiteralType { literal: String },
    #[error("{type_} does not contain field {field}")]
    InvalidField { type_: String, field: String },
    #[error("cannot select {field} of non-structure type {type_}")]
    NonStructureAccess { type_: String, field: String },
    #[error("cannot index non-array type {type_}")]
    NonArrayIndex { type_: String },
    #[error("can only call void functions, got {type_}")]
    InvalidVoidCall { type_: String },
    #[error("not a call expression")]
    NotACallExpression,
    #[error("cannot deref {type_}")]
    CannotDereference { type_: String },
    #[error("cannot use {symbol} in expression")]
    CannotUseInExpression { symbol: String },
    #[error("parameter {parameter} of {function} is not a simple type")]
    NonSimpleParameter { function: String, parameter: String },
    #[error("{function} does not return a simple type")]
    NonSimpleReturn { function: String },
    #[error("cannot assign to complex type {type_}")]
    ComplexAssignment { type_: String },
    #[error("cannot use {operator} on {type_}")]
    InvalidOperator { operator: String, type_: String },
    #[error("{function} must return a value")]
    MissingReturnValue { function: String },
    #[error("{function} cannot return a value")]
    UnexpectedReturnValue { function: String },
    #[error("errors occurred in {modules} module(s)")]
    SemanticErrors { modules: usize },
}

//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into one [`Module`](crate::ast::ast::Module) per source file. It uses a
//! Pratt parser for expressions with proper operator precedence and handles:
//!
//! - Top level declarations (imports, types, globals, constants, functions)
//! - Statement parsing (assignments, control flow, switch)
//! - Expression parsing (binary ops, calls, member access, casts, literals)
//! - Type parsing for type annotations
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;

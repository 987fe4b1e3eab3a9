//! Lexical analysis module.
//!
//! Converts module source text into a stream of tokens for parsing:
//!
//! - Tokenization using anchored regex patterns tried in order
//! - Recognition of keywords, identifiers, literals and operators
//! - Token position tracking for error reporting
//! - Comments and whitespace handling

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;

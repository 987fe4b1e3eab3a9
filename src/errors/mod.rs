//! Error types and error handling for the checker.
//!
//! This module defines the error types used throughout the front end and
//! the type checker. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing, parsing and semantic analysis
//! - Helpful error tips used when rendering diagnostics

pub mod errors;

#[cfg(test)]
mod tests;
